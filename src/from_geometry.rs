//! Stereo annotations read back from coordinates.

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::atom::Chirality;
use crate::bond::{BondDir, BondStereo};
use crate::chirality::{atom_stereo_type, counts_toward_degree};
use crate::config::StereoConfig;
use crate::conformer::Conformer;
use crate::error::StereoError;
use crate::geometry::{cross, dot, signed_volume, sub};
use crate::mol::Mol;
use crate::perception::find_potential_stereo;
use crate::stereo_info::StereoType;
use crate::traits::{StereoAtom, StereoBond};
use crate::wedge::depiction_swaps;

/// Chiral volumes smaller than this are treated as planar.
const ZERO_VOLUME: f64 = 0.1;
/// Below this the two substituent normals of a double bond are treated as
/// perpendicular.
const ZERO_DOT: f64 = 1e-4;

fn is_tetrahedral_candidate<A: StereoAtom, B: StereoBond>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    config: &StereoConfig,
) -> bool {
    atom_stereo_type(mol, atom, config) == StereoType::AtomTetrahedral
}

/// Sets tetrahedral tags from the signed volume spanned by the first three
/// neighbors of each possible center. Flat centers, and atoms that cannot be
/// tetrahedral centers, lose any tetrahedral tag they had.
pub fn assign_chiral_tags_from_3d<A: StereoAtom, B: StereoBond>(
    mol: &mut Mol<A, B>,
    conf: &Conformer,
    config: &StereoConfig,
) -> Result<(), StereoError> {
    if !conf.is_3d() {
        return Err(StereoError::NoConformer);
    }
    conf.check_matches(mol)?;
    let atoms: Vec<NodeIndex> = mol.atoms().collect();
    for atom in atoms {
        if mol.atom(atom).chirality().is_nontetrahedral() {
            continue;
        }
        let mut chirality = Chirality::None;
        if is_tetrahedral_candidate(mol, atom, config) {
            let center = conf.position(atom);
            let arms: Vec<_> = mol
                .bonds_of(atom)
                .filter(|&bond| counts_toward_degree(mol, bond, atom))
                .filter_map(|bond| mol.other_atom(bond, atom))
                .take(3)
                .map(|nbr| sub(conf.position(nbr), center))
                .collect();
            if let [a, b, c] = arms[..] {
                let volume = signed_volume(a, b, c);
                if volume > ZERO_VOLUME {
                    chirality = Chirality::Ccw;
                } else if volume < -ZERO_VOLUME {
                    chirality = Chirality::Cw;
                }
            }
        }
        mol.atom_mut(atom).set_chirality(chirality);
    }
    Ok(())
}

/// Wedge or hash drawn from `atom`, or `None` when it has none. A squiggly
/// bond starting at the atom overrides any wedge.
fn depicted_bond<A, B: StereoBond>(mol: &Mol<A, B>, atom: NodeIndex) -> Option<(EdgeIndex, BondDir)> {
    let mut found = None;
    for bond in mol.bonds_of(atom) {
        if mol.bond_endpoints(bond).map(|(begin, _)| begin) != Some(atom) {
            continue;
        }
        match mol.bond(bond).bond_dir() {
            BondDir::Unknown => return None,
            dir @ (BondDir::BeginWedge | BondDir::BeginDash) if found.is_none() => {
                found = Some((bond, dir));
            }
            _ => {}
        }
    }
    found
}

/// Sets tetrahedral tags from a 2D layout plus the wedges and hashes drawn
/// from each center. Undoes [`wedge_mol_bonds`](crate::wedge::wedge_mol_bonds).
pub fn assign_chiral_tags_from_bond_dirs<A: StereoAtom, B: StereoBond>(
    mol: &mut Mol<A, B>,
    conf: &Conformer,
    config: &StereoConfig,
) -> Result<(), StereoError> {
    conf.check_matches(mol)?;
    let atoms: Vec<NodeIndex> = mol.atoms().collect();
    for atom in atoms {
        if mol.atom(atom).chirality().is_nontetrahedral() {
            continue;
        }
        let mut chirality = Chirality::None;
        if is_tetrahedral_candidate(mol, atom, config) {
            if let Some((bond, dir)) = depicted_bond(mol, atom) {
                let odd = depiction_swaps(mol, bond, atom, conf)? % 2 == 1;
                chirality = match (dir, odd) {
                    (BondDir::BeginWedge, false) | (BondDir::BeginDash, true) => Chirality::Ccw,
                    _ => Chirality::Cw,
                };
            }
        }
        mol.atom_mut(atom).set_chirality(chirality);
    }
    Ok(())
}

/// Sets cis/trans on every double bond that can carry stereo, relative to
/// the first substituent on each end. Bonds drawn crossed or next to a
/// squiggle get [`BondStereo::Any`].
pub fn detect_bond_stereochemistry<A: StereoAtom, B: StereoBond>(
    mol: &mut Mol<A, B>,
    conf: &Conformer,
    config: &StereoConfig,
) -> Result<(), StereoError> {
    conf.check_matches(mol)?;
    let found = find_potential_stereo(mol, false, true, config);
    for info in found {
        let Some(bond) = info.center_bond() else {
            continue;
        };
        let Some((begin, end)) = mol.bond_endpoints(bond) else {
            continue;
        };
        let squiggle = mol.bond(bond).bond_dir() == BondDir::EitherDouble
            || [begin, end].into_iter().any(|atom| {
                mol.bonds_of(atom)
                    .any(|other| mol.bond(other).bond_dir() == BondDir::Unknown)
            });
        let stereo = if squiggle {
            BondStereo::Any
        } else {
            let (Some(x), Some(y)) = (info.controlling_atoms[0], info.controlling_atoms[2]) else {
                continue;
            };
            let axis = sub(conf.position(end), conf.position(begin));
            let begin_normal = cross(axis, sub(conf.position(x), conf.position(begin)));
            let end_normal = cross(axis, sub(conf.position(y), conf.position(end)));
            let d = dot(begin_normal, end_normal);
            if d > ZERO_DOT {
                BondStereo::Cis(x, y)
            } else if d < -ZERO_DOT {
                BondStereo::Trans(x, y)
            } else {
                BondStereo::None
            }
        };
        mol.bond_mut(bond).set_bond_stereo(stereo);
    }
    Ok(())
}
