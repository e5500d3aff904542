//! Squiggly-bond depiction of double bonds with unknown configuration.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use petgraph::graph::EdgeIndex;

use crate::atom::Chirality;
use crate::bond::{BondDir, BondOrder, BondStereo};
use crate::mol::Mol;
use crate::traits::{HasBondDirMut, HasBondOrder, HasBondStereoMut, HasChirality};

/// Score limits for squiggly-bond placement.
///
/// Each penalty a single bond picks up is a tenth of the matching limit, so
/// a summed score stays below a limit until that kind of penalty applies.
pub struct StereoBondThresholds;

impl StereoBondThresholds {
    pub const DBL_BOND_NO_STEREO: u32 = 1000;
    pub const DBL_BOND_SPECIFIED_STEREO: u32 = 10_000;
    pub const CHIRAL_ATOM: u32 = 100_000;
    pub const DIRECTION_SET: u32 = 1_000_000;
}

/// Marks one adjacent single bond squiggly for every double bond whose
/// stereo is [`BondStereo::Any`].
///
/// Single bonds next to double bonds are scored by how much existing
/// depiction a squiggle would disturb. Bonds serving the most unknown double
/// bonds go first, then the lowest score. By default only bonds scoring at
/// most [`StereoBondThresholds::DBL_BOND_NO_STEREO`] are used; a nonzero
/// `force_threshold` raises that limit. With `clear_double_bond_flags` the
/// resolved double bond loses its `Any` stereo and crossed-bond direction.
pub fn add_wavy_bonds_for_stereo_any<A, B>(
    mol: &mut Mol<A, B>,
    clear_double_bond_flags: bool,
    force_threshold: u32,
) where
    A: HasChirality,
    B: HasBondOrder + HasBondStereoMut + HasBondDirMut,
{
    let mut scores = vec![0u32; mol.bond_count()];
    let mut any_neighbors: BTreeMap<EdgeIndex, Vec<EdgeIndex>> = BTreeMap::new();
    let mut unresolved: BTreeSet<EdgeIndex> = BTreeSet::new();

    for double in mol.bonds() {
        let d = mol.bond(double);
        if d.bond_order() != BondOrder::Double {
            continue;
        }
        let stereo = d.bond_stereo();
        if stereo == BondStereo::Any {
            unresolved.insert(double);
        }
        let Some((begin, end)) = mol.bond_endpoints(double) else {
            continue;
        };
        for shared in [begin, end] {
            for single in mol.bonds_of(shared) {
                if single == double || mol.bond(single).bond_order() != BondOrder::Single {
                    continue;
                }
                let Some(other) = mol.other_atom(single, shared) else {
                    continue;
                };
                let mut score = scores[single.index()] + 1;
                if mol.bond(single).bond_dir() != BondDir::None {
                    score += StereoBondThresholds::DIRECTION_SET / 10;
                }
                score += match stereo {
                    BondStereo::None => StereoBondThresholds::DBL_BOND_NO_STEREO / 10,
                    BondStereo::Cis(..) | BondStereo::Trans(..) => {
                        StereoBondThresholds::DBL_BOND_SPECIFIED_STEREO / 10
                    }
                    BondStereo::Any => 0,
                };
                score += 10 * mol.degree(other) as u32;
                if mol.atom(other).chirality() != Chirality::None {
                    score += StereoBondThresholds::CHIRAL_ATOM / 10;
                }
                scores[single.index()] = score;
                if stereo == BondStereo::Any {
                    any_neighbors.entry(single).or_default().push(double);
                }
            }
        }
    }

    let mut ranked: Vec<(Reverse<usize>, u32, EdgeIndex)> = any_neighbors
        .iter()
        .map(|(&single, doubles)| (Reverse(doubles.len()), scores[single.index()], single))
        .collect();
    ranked.sort();

    let limit = if force_threshold == 0 {
        StereoBondThresholds::DBL_BOND_NO_STEREO
    } else {
        force_threshold
    };
    for (_, score, single) in ranked {
        if score > limit {
            continue;
        }
        for &double in &any_neighbors[&single] {
            if !unresolved.remove(&double) {
                continue;
            }
            if score > StereoBondThresholds::DBL_BOND_NO_STEREO {
                log::warn!(
                    "setting wavy bond flag on bond {} which may make other stereo info ambiguous",
                    single.index()
                );
            }
            mol.bond_mut(single).set_bond_dir(BondDir::Unknown);
            if clear_double_bond_flags {
                let d = mol.bond_mut(double);
                if d.bond_dir() == BondDir::EitherDouble {
                    d.set_bond_dir(BondDir::None);
                }
                d.set_bond_stereo(BondStereo::None);
            }
        }
    }

    if !unresolved.is_empty() {
        let list: Vec<usize> = unresolved.iter().map(|b| b.index()).collect();
        log::warn!("unable to set wavy bonds for double bonds: {list:?}");
    }
}
