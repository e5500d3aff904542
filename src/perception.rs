//! Whole-molecule stereo perception.
//!
//! The local classifier proposes candidates; a fixed point over symmetry
//! classes then removes candidates with interchangeable substituents, unless
//! another candidate reachable through those substituents tells them apart
//! (para, spiro and bridgehead centers).

use std::collections::{BTreeMap, VecDeque};

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::atom::Chirality;
use crate::bond::{BondDir, BondStereo};
use crate::canonical::rank_atoms;
use crate::chirality::{atom_stereo_type, counts_toward_degree, is_bond_potential_stereo_bond};
use crate::config::StereoConfig;
use crate::mol::Mol;
use crate::permutation::chiral_permutation;
use crate::stereo_group::cleanup_stereo_groups;
use crate::stereo_info::{StereoDescriptor, StereoInfo, StereoSpecified, StereoType};
use crate::traits::{
    HasAtomicNum, HasBondDir, HasBondDirMut, HasBondStereo, HasBondStereoMut, HasChirality,
    HasChiralityMut, HasHydrogenCount, HasIsotope, StereoAtom, StereoBond,
};

/// Key shared by every hydrogen substituent, explicit or implicit.
const HYDROGEN_KEY: u64 = u64::MAX;

/// Extra ranking invariant for atoms at either end of a candidate double
/// bond.
const DOUBLE_BOND_END_MARK: u64 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidates {
    atoms: Vec<StereoType>,
    bonds: Vec<bool>,
}

impl Candidates {
    fn initial<A: StereoAtom, B: StereoBond>(mol: &Mol<A, B>, config: &StereoConfig) -> Self {
        Self {
            atoms: mol
                .atoms()
                .map(|atom| atom_stereo_type(mol, atom, config))
                .collect(),
            bonds: mol
                .bonds()
                .map(|bond| is_bond_potential_stereo_bond(mol, bond, config))
                .collect(),
        }
    }

    fn atom(&self, atom: NodeIndex) -> StereoType {
        self.atoms
            .get(atom.index())
            .copied()
            .unwrap_or(StereoType::None)
    }

    fn bond(&self, bond: EdgeIndex) -> bool {
        self.bonds.get(bond.index()).copied().unwrap_or(false)
    }

    fn counts(&self) -> (usize, usize) {
        (
            self.atoms.iter().filter(|t| **t != StereoType::None).count(),
            self.bonds.iter().filter(|b| **b).count(),
        )
    }

    /// Per-atom invariants that let the ranking tell candidates apart from
    /// otherwise identical atoms.
    fn marks<A, B>(&self, mol: &Mol<A, B>) -> Vec<u64> {
        let mut marks: Vec<u64> = self
            .atoms
            .iter()
            .map(|kind| match kind {
                StereoType::None | StereoType::BondDouble => 0,
                StereoType::AtomTetrahedral => 1,
                StereoType::AtomSquarePlanar => 2,
                StereoType::AtomTrigonalBipyramidal => 3,
                StereoType::AtomOctahedral => 4,
            })
            .collect();
        for bond in mol.bonds() {
            if !self.bond(bond) {
                continue;
            }
            if let Some((begin, end)) = mol.bond_endpoints(bond) {
                marks[begin.index()] += DOUBLE_BOND_END_MARK;
                marks[end.index()] += DOUBLE_BOND_END_MARK;
            }
        }
        marks
    }
}

fn substituent_key<A: StereoAtom, B>(mol: &Mol<A, B>, atom: NodeIndex, ranks: &[usize]) -> u64 {
    let a = mol.atom(atom);
    if a.atomic_num() == 1 && a.isotope() == 0 && mol.degree(atom) == 1 {
        HYDROGEN_KEY
    } else {
        ranks[atom.index()] as u64
    }
}

/// Substituent keys of `atom` in bond order, implicit hydrogens last.
/// `skip` leaves out one bond.
fn keyed_substituents<A: StereoAtom, B: StereoBond>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    ranks: &[usize],
    skip: Option<EdgeIndex>,
    all_bonds: bool,
) -> Vec<(u64, Option<NodeIndex>)> {
    let mut keyed: Vec<(u64, Option<NodeIndex>)> = mol
        .bonds_of(atom)
        .filter(|&bond| Some(bond) != skip)
        .filter(|&bond| all_bonds || counts_toward_degree(mol, bond, atom))
        .filter_map(|bond| mol.other_atom(bond, atom))
        .map(|nbr| (substituent_key(mol, nbr, ranks), Some(nbr)))
        .collect();
    let implicit = mol.atom(atom).hydrogen_count() as usize;
    keyed.extend(std::iter::repeat((HYDROGEN_KEY, None)).take(implicit));
    keyed
}

fn key_classes(keyed: &[(u64, Option<NodeIndex>)]) -> BTreeMap<u64, Vec<Option<NodeIndex>>> {
    let mut classes: BTreeMap<u64, Vec<Option<NodeIndex>>> = BTreeMap::new();
    for &(key, atom) in keyed {
        classes.entry(key).or_default().push(atom);
    }
    classes
}

/// Does another candidate, reachable from `members` without passing through
/// `blocked`, break the symmetry between them?
fn is_resolved<A, B>(
    mol: &Mol<A, B>,
    members: &[NodeIndex],
    blocked: NodeIndex,
    skip: Option<EdgeIndex>,
    candidates: &Candidates,
) -> bool {
    let mut visited = vec![false; mol.atom_count()];
    visited[blocked.index()] = true;
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();
    for &member in members {
        if !visited[member.index()] {
            visited[member.index()] = true;
            queue.push_back(member);
        }
    }
    while let Some(atom) = queue.pop_front() {
        if candidates.atom(atom) != StereoType::None {
            return true;
        }
        for bond in mol.bonds_of(atom) {
            if Some(bond) != skip && candidates.bond(bond) {
                return true;
            }
            if let Some(nbr) = mol.other_atom(bond, atom) {
                if !visited[nbr.index()] {
                    visited[nbr.index()] = true;
                    queue.push_back(nbr);
                }
            }
        }
    }
    false
}

/// Splits equivalent substituents of `center` into pairs that close a ring
/// through it, and the rest.
fn ring_pairs<A, B>(
    mol: &Mol<A, B>,
    center: NodeIndex,
    members: &[NodeIndex],
) -> (Vec<[NodeIndex; 2]>, Vec<NodeIndex>) {
    let mut rest: Vec<NodeIndex> = members.to_vec();
    let mut pairs = Vec::new();
    for ring in mol.ring_info().rings() {
        if !ring.contains(&center) {
            continue;
        }
        let in_ring: Vec<usize> = (0..rest.len())
            .filter(|&i| ring.contains(&rest[i]))
            .collect();
        if let &[i, j] = in_ring.as_slice() {
            pairs.push([rest[i], rest[j]]);
            rest.remove(j);
            rest.remove(i);
        }
    }
    (pairs, rest)
}

fn tetrahedral_survives<A: StereoAtom, B: StereoBond>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    ranks: &[usize],
    candidates: &Candidates,
) -> bool {
    let keyed = keyed_substituents(mol, atom, ranks, None, false);
    for (key, members) in key_classes(&keyed) {
        if members.len() < 2 {
            continue;
        }
        if key == HYDROGEN_KEY {
            return false;
        }
        let members: Vec<NodeIndex> = members.into_iter().flatten().collect();
        // spiro and bridgehead atoms see each ring as its own pair
        let (pairs, rest) = ring_pairs(mol, atom, &members);
        if rest.len() > 2 {
            return false;
        }
        let resolved = pairs
            .iter()
            .map(|pair| pair.as_slice())
            .chain((rest.len() == 2).then_some(rest.as_slice()))
            .all(|group| is_resolved(mol, group, atom, None, candidates));
        if !resolved {
            return false;
        }
    }
    true
}

fn nontetrahedral_survives<A: StereoAtom, B: StereoBond>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    ranks: &[usize],
) -> bool {
    if mol.atom(atom).chirality().is_nontetrahedral() {
        return true;
    }
    let keyed = keyed_substituents(mol, atom, ranks, None, true);
    key_classes(&keyed).len() > 1
}

fn bond_survives<A: StereoAtom, B: StereoBond>(
    mol: &Mol<A, B>,
    bond: EdgeIndex,
    ranks: &[usize],
    candidates: &Candidates,
) -> bool {
    let Some((begin, end)) = mol.bond_endpoints(bond) else {
        return false;
    };
    for atom in [begin, end] {
        let keyed = keyed_substituents(mol, atom, ranks, Some(bond), false);
        if let [(first, a), (second, b)] = keyed.as_slice() {
            if first != second {
                continue;
            }
            if *first == HYDROGEN_KEY {
                return false;
            }
            let members: Vec<NodeIndex> = [*a, *b].into_iter().flatten().collect();
            if !is_resolved(mol, &members, atom, Some(bond), candidates) {
                return false;
            }
        }
    }
    true
}

fn next_round<A: StereoAtom, B: StereoBond>(
    mol: &Mol<A, B>,
    candidates: &Candidates,
) -> Candidates {
    let ranks = rank_atoms(mol, &candidates.marks(mol));
    let atoms = mol
        .atoms()
        .map(|atom| {
            let kind = candidates.atom(atom);
            let survives = match kind {
                StereoType::None | StereoType::BondDouble => false,
                StereoType::AtomTetrahedral => {
                    tetrahedral_survives(mol, atom, &ranks, candidates)
                }
                _ => nontetrahedral_survives(mol, atom, &ranks),
            };
            if survives {
                kind
            } else {
                StereoType::None
            }
        })
        .collect();
    let bonds = mol
        .bonds()
        .map(|bond| candidates.bond(bond) && bond_survives(mol, bond, &ranks, candidates))
        .collect();
    Candidates { atoms, bonds }
}

fn perceive<A: StereoAtom, B: StereoBond>(mol: &Mol<A, B>, config: &StereoConfig) -> Candidates {
    let mut candidates = Candidates::initial(mol, config);
    let rounds = if config.use_legacy_perception {
        1
    } else {
        config.max_perception_rounds.max(1)
    };
    for round in 1..=rounds {
        let next = next_round(mol, &candidates);
        let (atoms, bonds) = next.counts();
        log::debug!("perception round {round}: {atoms} atom and {bonds} bond candidates");
        if next == candidates {
            return candidates;
        }
        candidates = next;
    }
    if !config.use_legacy_perception {
        log::warn!("stereo perception stopped after {rounds} rounds without converging");
    }
    candidates
}

fn has_squiggle<A, B: StereoBond>(mol: &Mol<A, B>, atom: NodeIndex) -> bool {
    mol.bonds_of(atom)
        .any(|bond| mol.bond(bond).bond_dir() == BondDir::Unknown)
}

fn atom_info<A: StereoAtom, B: StereoBond>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    kind: StereoType,
) -> StereoInfo {
    let mut info = StereoInfo::new(kind, atom.index());
    let tag = mol.atom(atom);
    if kind == StereoType::AtomTetrahedral {
        info.controlling_atoms = mol
            .bonds_of(atom)
            .filter(|&bond| counts_toward_degree(mol, bond, atom))
            .filter_map(|bond| mol.other_atom(bond, atom))
            .map(Some)
            .collect();
        info.descriptor = match tag.chirality() {
            Chirality::Cw => StereoDescriptor::TetCw,
            Chirality::Ccw => StereoDescriptor::TetCcw,
            _ => StereoDescriptor::None,
        };
        info.specified = if info.descriptor != StereoDescriptor::None {
            StereoSpecified::Specified
        } else {
            StereoSpecified::Unspecified
        };
    } else {
        info.controlling_atoms = mol.neighbors(atom).map(Some).collect();
        if tag.chirality().is_nontetrahedral() {
            // a class outside the geometry's table reads as unknown
            match chiral_permutation(mol, atom, &info.controlling_atoms) {
                Some(permutation) if permutation > 0 => {
                    info.permutation = permutation;
                    info.specified = StereoSpecified::Specified;
                }
                _ => info.specified = StereoSpecified::Unknown,
            }
        }
    }
    if has_squiggle(mol, atom) {
        info.specified = StereoSpecified::Unknown;
    }
    info
}

/// Substituents of one double-bond end: the stereo atom first when one is
/// set, padded to two slots.
fn bond_end_atoms<A, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    bond: EdgeIndex,
    stereo_atom: Option<NodeIndex>,
) -> [Option<NodeIndex>; 2] {
    let mut subs: Vec<NodeIndex> = mol
        .bonds_of(atom)
        .filter(|&b| b != bond)
        .filter_map(|b| mol.other_atom(b, atom))
        .collect();
    if let Some(pos) = stereo_atom.and_then(|s| subs.iter().position(|&x| x == s)) {
        let first = subs.remove(pos);
        subs.insert(0, first);
    }
    [subs.first().copied(), subs.get(1).copied()]
}

fn bond_info<A, B: StereoBond>(mol: &Mol<A, B>, bond: EdgeIndex) -> Option<StereoInfo> {
    let (begin, end) = mol.bond_endpoints(bond)?;
    let b = mol.bond(bond);
    let stereo = b.bond_stereo();
    let (begin_stereo, end_stereo) = match stereo.stereo_atoms() {
        Some((s, t)) if mol.bond_between(begin, s).is_some() => (Some(s), Some(t)),
        Some((s, t)) => (Some(t), Some(s)),
        None => (None, None),
    };
    let mut info = StereoInfo::new(StereoType::BondDouble, bond.index());
    let [b0, b1] = bond_end_atoms(mol, begin, bond, begin_stereo);
    let [e0, e1] = bond_end_atoms(mol, end, bond, end_stereo);
    info.controlling_atoms = vec![b0, b1, e0, e1];
    info.descriptor = match stereo {
        BondStereo::Cis(..) => StereoDescriptor::BondCis,
        BondStereo::Trans(..) => StereoDescriptor::BondTrans,
        BondStereo::None | BondStereo::Any => StereoDescriptor::None,
    };
    let squiggle = [begin, end].into_iter().any(|atom| {
        mol.bonds_of(atom)
            .any(|other| other != bond && mol.bond(other).bond_dir() == BondDir::Unknown)
    });
    info.specified = if stereo == BondStereo::Any || b.bond_dir() == BondDir::EitherDouble || squiggle
    {
        StereoSpecified::Unknown
    } else if stereo.is_specified() {
        StereoSpecified::Specified
    } else {
        StereoSpecified::Unspecified
    };
    Some(info)
}

/// Clears stereo annotations the perception pass found meaningless.
fn clean_up_annotations<A: StereoAtom, B: StereoBond>(mol: &mut Mol<A, B>, candidates: &Candidates) {
    let atoms: Vec<NodeIndex> = mol.atoms().collect();
    for atom in atoms {
        let chirality = mol.atom(atom).chirality();
        let kind = candidates.atom(atom);
        let mismatched = match kind {
            StereoType::None | StereoType::BondDouble => true,
            StereoType::AtomTetrahedral => chirality.is_nontetrahedral(),
            _ => chirality.is_tetrahedral(),
        };
        if mismatched && chirality != Chirality::None {
            log::debug!("clearing chiral tag on atom {}", atom.index());
            let a = mol.atom_mut(atom);
            a.set_chirality(Chirality::None);
            a.set_chiral_permutation(0);
        }
    }
    let bonds: Vec<EdgeIndex> = mol.bonds().collect();
    for bond in bonds {
        if candidates.bond(bond) {
            continue;
        }
        let b = mol.bond(bond);
        if b.bond_stereo() != BondStereo::None || b.bond_dir() == BondDir::EitherDouble {
            log::debug!("clearing double-bond stereo on bond {}", bond.index());
            let b = mol.bond_mut(bond);
            b.set_bond_stereo(BondStereo::None);
            if b.bond_dir() == BondDir::EitherDouble {
                b.set_bond_dir(BondDir::None);
            }
        }
    }
    cleanup_stereo_groups(mol);
}

/// Finds every atom and double bond that is, or could be, a stereocenter.
///
/// Results list atoms in ascending index, then bonds in ascending index.
/// With `clean_up`, chiral tags and double-bond stereo on anything that is
/// not a stereocenter are cleared and stereo groups pruned to match. With
/// `flag_possible` unset, candidates nobody specified are left out of the
/// result (clean-up still treats them as stereocenters).
///
/// # Examples
///
/// ```
/// use petgraph::graph::NodeIndex;
/// use stereocrab::{find_potential_stereo, Atom, Bond, BondOrder, Mol, StereoConfig, StereoType};
///
/// // CC=CC
/// let mut mol: Mol<Atom, Bond> = Mol::new();
/// let atoms: Vec<NodeIndex> = [3, 1, 1, 3]
///     .iter()
///     .map(|&h| mol.add_atom(Atom { atomic_num: 6, hydrogen_count: h, ..Atom::default() }))
///     .collect();
/// mol.add_bond(atoms[0], atoms[1], Bond::new(BondOrder::Single));
/// mol.add_bond(atoms[1], atoms[2], Bond::new(BondOrder::Double));
/// mol.add_bond(atoms[2], atoms[3], Bond::new(BondOrder::Single));
///
/// let found = find_potential_stereo(&mut mol, false, true, &StereoConfig::default());
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].kind, StereoType::BondDouble);
/// ```
pub fn find_potential_stereo<A: StereoAtom, B: StereoBond>(
    mol: &mut Mol<A, B>,
    clean_up: bool,
    flag_possible: bool,
    config: &StereoConfig,
) -> Vec<StereoInfo> {
    let candidates = perceive(mol, config);
    let mut found: Vec<StereoInfo> = Vec::new();
    for atom in mol.atoms() {
        let kind = candidates.atom(atom);
        if kind != StereoType::None {
            found.push(atom_info(mol, atom, kind));
        }
    }
    for bond in mol.bonds() {
        if candidates.bond(bond) {
            found.extend(bond_info(mol, bond));
        }
    }
    if clean_up {
        clean_up_annotations(mol, &candidates);
    }
    if !flag_possible {
        found.retain(|info| info.specified != StereoSpecified::Unspecified);
    }
    found
}
