//! Local stereo-candidate predicates.
//!
//! Each predicate looks only at one atom or bond and its first shell of
//! neighbors. Whether two substituents are equivalent across the whole
//! molecule is decided later by the perception pass.

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::atom::Chirality;
use crate::bond::BondOrder;
use crate::config::StereoConfig;
use crate::mol::Mol;
use crate::stereo_info::StereoType;
use crate::traits::{
    HasAromaticity, HasAtomicNum, HasBondOrder, HasChirality, HasFormalCharge, HasHydrogenCount,
    HasIsotope,
};

/// Identity of a degree-one substituent. Two terminal neighbors with equal
/// keys are interchangeable no matter what the rest of the molecule does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct TerminalKey {
    atomic_num: u8,
    isotope: u16,
    formal_charge: i8,
    hydrogen_count: u8,
    order: u8,
    is_aromatic: bool,
}

const IMPLICIT_HYDROGEN: TerminalKey = TerminalKey {
    atomic_num: 1,
    isotope: 0,
    formal_charge: 0,
    hydrogen_count: 0,
    order: 0,
    is_aromatic: false,
};

fn order_code(order: BondOrder) -> u8 {
    match order {
        BondOrder::Single => 0,
        BondOrder::Double => 1,
        BondOrder::Triple => 2,
        BondOrder::Aromatic => 3,
        BondOrder::Dative => 4,
        BondOrder::Zero => 5,
    }
}

/// Zero-order bonds never count; dative bonds count only for their donor
/// (begin) atom.
pub(crate) fn counts_toward_degree<A, B>(mol: &Mol<A, B>, bond: EdgeIndex, atom: NodeIndex) -> bool
where
    B: HasBondOrder,
{
    match mol.bond(bond).bond_order() {
        BondOrder::Zero => false,
        BondOrder::Dative => mol
            .bond_endpoints(bond)
            .is_some_and(|(begin, _)| begin == atom),
        _ => true,
    }
}

/// Degree of `atom` ignoring bonds that only record coordination.
pub fn nonzero_degree<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> usize
where
    B: HasBondOrder,
{
    mol.bonds_of(atom)
        .filter(|&bond| counts_toward_degree(mol, bond, atom))
        .count()
}

/// Twice the explicit valence (bond orders plus implicit hydrogens), so that
/// aromatic bonds stay integral.
pub fn explicit_valence_x2<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> u32
where
    A: HasHydrogenCount,
    B: HasBondOrder,
{
    let bonds: u32 = mol
        .bonds_of(atom)
        .map(|bond| mol.bond(bond).bond_order().valence_contribution_x2())
        .sum();
    bonds + 2 * u32::from(mol.atom(atom).hydrogen_count())
}

/// True when two degree-one substituents of `atom` (implicit hydrogens
/// included) are indistinguishable. `skip` leaves one bond out, for the
/// double bond whose ends are being examined.
fn has_duplicate_terminal_substituents<A, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    skip: Option<EdgeIndex>,
) -> bool
where
    A: HasAtomicNum + HasIsotope + HasFormalCharge + HasHydrogenCount + HasAromaticity,
    B: HasBondOrder,
{
    let mut keys: Vec<TerminalKey> = Vec::new();
    for bond in mol.bonds_of(atom) {
        if Some(bond) == skip || !counts_toward_degree(mol, bond, atom) {
            continue;
        }
        let Some(nbr) = mol.other_atom(bond, atom) else {
            continue;
        };
        if mol.degree(nbr) != 1 {
            continue;
        }
        let a = mol.atom(nbr);
        let order = mol.bond(bond).bond_order();
        keys.push(TerminalKey {
            atomic_num: a.atomic_num(),
            isotope: a.isotope(),
            formal_charge: a.formal_charge(),
            hydrogen_count: a.hydrogen_count(),
            order: order_code(order),
            is_aromatic: a.is_aromatic(),
        });
    }
    let implicit = mol.atom(atom).hydrogen_count() as usize;
    keys.extend(std::iter::repeat(IMPLICIT_HYDROGEN).take(implicit));
    keys.sort_unstable();
    keys.windows(2).any(|w| w[0] == w[1])
}

/// Could `atom` be a tetrahedral stereocenter, judging from its own
/// neighborhood?
///
/// Four-coordinate atoms qualify. Three-coordinate atoms qualify when the
/// fourth position is an implicit hydrogen, or a lone pair on P, As, S, Se
/// or a constrained N (three-membered ring or bridgehead). Two duplicate
/// terminal substituents always disqualify.
pub fn is_atom_potential_tetrahedral_center<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> bool
where
    A: HasAtomicNum + HasIsotope + HasFormalCharge + HasHydrogenCount + HasAromaticity,
    B: HasBondOrder,
{
    let a = mol.atom(atom);
    let nz = nonzero_degree(mol, atom);
    let h = a.hydrogen_count() as usize;
    if nz + h > 4 {
        return false;
    }
    let eligible = match nz {
        4 => true,
        3 if h == 1 => true,
        3 => match a.atomic_num() {
            15 | 33 => true,
            16 | 34 => {
                let valence_x2 = explicit_valence_x2(mol, atom);
                valence_x2 == 8 || (valence_x2 == 6 && a.formal_charge() == 1)
            }
            7 => {
                let rings = mol.ring_info();
                rings.is_atom_in_ring_of_size(atom, 3) || rings.is_bridgehead(atom)
            }
            _ => false,
        },
        2 => matches!(a.atomic_num(), 15 | 33) && nz + h >= 3,
        _ => false,
    };
    eligible && !has_duplicate_terminal_substituents(mol, atom, None)
}

/// Could `atom` be a square-planar, trigonal-bipyramidal or octahedral
/// center?
///
/// An explicit non-tetrahedral tag is enough. Otherwise the element and
/// coordination number (all bonds plus implicit hydrogens) must match the
/// configured tables.
pub fn is_atom_potential_nontetrahedral_center<A, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    config: &StereoConfig,
) -> bool
where
    A: HasAtomicNum + HasHydrogenCount + HasChirality,
{
    if !config.allow_nontetrahedral {
        return false;
    }
    let a = mol.atom(atom);
    let coordination = mol.degree(atom) + a.hydrogen_count() as usize;
    if !(2..=6).contains(&coordination) {
        return false;
    }
    if a.chirality().is_nontetrahedral() {
        return true;
    }
    match coordination {
        5 | 6 => a.atomic_num() >= config.nontetrahedral_min_atomic_num,
        4 => config.square_planar_elements.contains(&a.atomic_num()),
        _ => false,
    }
}

/// Could `atom` be a tetrahedral or non-tetrahedral stereocenter?
pub fn is_atom_potential_stereo_atom<A, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    config: &StereoConfig,
) -> bool
where
    A: HasAtomicNum + HasIsotope + HasFormalCharge + HasHydrogenCount + HasAromaticity + HasChirality,
    B: HasBondOrder,
{
    is_atom_potential_tetrahedral_center(mol, atom)
        || is_atom_potential_nontetrahedral_center(mol, atom, config)
}

/// Stereo type `atom` would be perceived as, or [`StereoType::None`].
///
/// An explicit non-tetrahedral tag wins, then the tetrahedral rule, then the
/// coordination number of an untagged non-tetrahedral candidate.
pub fn atom_stereo_type<A, B>(mol: &Mol<A, B>, atom: NodeIndex, config: &StereoConfig) -> StereoType
where
    A: HasAtomicNum + HasIsotope + HasFormalCharge + HasHydrogenCount + HasAromaticity + HasChirality,
    B: HasBondOrder,
{
    let nontetrahedral = is_atom_potential_nontetrahedral_center(mol, atom, config);
    if nontetrahedral {
        match mol.atom(atom).chirality() {
            Chirality::SquarePlanar => return StereoType::AtomSquarePlanar,
            Chirality::TrigonalBipyramidal => return StereoType::AtomTrigonalBipyramidal,
            Chirality::Octahedral => return StereoType::AtomOctahedral,
            _ => {}
        }
    }
    if is_atom_potential_tetrahedral_center(mol, atom) {
        return StereoType::AtomTetrahedral;
    }
    if nontetrahedral {
        let coordination = mol.degree(atom) + mol.atom(atom).hydrogen_count() as usize;
        return match coordination {
            4 => StereoType::AtomSquarePlanar,
            5 => StereoType::AtomTrigonalBipyramidal,
            6 => StereoType::AtomOctahedral,
            _ => StereoType::None,
        };
    }
    StereoType::None
}

/// Could `bond` carry cis/trans stereo?
///
/// It must be a double bond whose ends each have one or two other
/// substituents, at least one of them heavy or an isotope-labelled hydrogen,
/// and no duplicated terminal pair. Ring bonds also need a ring of at least
/// [`StereoConfig::min_ring_size_for_double_bond_stereo`] atoms.
pub fn is_bond_potential_stereo_bond<A, B>(
    mol: &Mol<A, B>,
    bond: EdgeIndex,
    config: &StereoConfig,
) -> bool
where
    A: HasAtomicNum + HasIsotope + HasFormalCharge + HasHydrogenCount + HasAromaticity,
    B: HasBondOrder,
{
    if mol.bond(bond).bond_order() != BondOrder::Double {
        return false;
    }
    let Some((begin, end)) = mol.bond_endpoints(bond) else {
        return false;
    };
    for (atom, partner) in [(begin, end), (end, begin)] {
        let degree = mol.degree(atom);
        let h = mol.atom(atom).hydrogen_count() as usize;
        if !(2..=3).contains(&degree) || degree + h > 3 {
            return false;
        }
        let distinguishing = mol.neighbors(atom).any(|nbr| {
            let a = mol.atom(nbr);
            nbr != partner && (a.atomic_num() != 1 || a.isotope() != 0)
        });
        if !distinguishing || has_duplicate_terminal_substituents(mol, atom, Some(bond)) {
            return false;
        }
    }
    let rings = mol.ring_info();
    if rings.is_ring_bond(bond) {
        let smallest = rings.smallest_bond_ring_size(bond).unwrap_or(0);
        if smallest < config.min_ring_size_for_double_bond_stereo {
            return false;
        }
    }
    true
}
