//! Wedge and hash depiction of tetrahedral centers.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::atom::Chirality;
use crate::bond::{BondDir, BondOrder, BondStereo};
use crate::conformer::Conformer;
use crate::error::StereoError;
use crate::geometry::{direction_vector, project_2d, signed_angle_to};
use crate::mol::Mol;
use crate::traits::{
    HasAtomicNum, HasBondDir, HasBondDirMut, HasBondOrder, HasBondStereo, HasChirality,
};

/// Bond index to the center that owns the wedge drawn on it.
pub type WedgeAssignment = BTreeMap<EdgeIndex, NodeIndex>;

/// Center score marking "already has a wedged bond".
const ALREADY_WEDGED: i64 = 101;
/// Center score of an atom that is not a tetrahedral center.
const NOT_A_CENTER: i64 = 100;
const HYDROGEN_BOND_SCORE: i64 = -1_000_000;

/// Counts of (any, stereo-specified, stereo-any) double bonds at `atom`.
fn double_bond_presence<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> (i64, i64, i64)
where
    B: HasBondOrder + HasBondStereo,
{
    let mut presence = (0, 0, 0);
    for bond in mol.bonds_of(atom) {
        let b = mol.bond(bond);
        if b.bond_order() != BondOrder::Double {
            continue;
        }
        presence.0 += 1;
        match b.bond_stereo() {
            BondStereo::Any => presence.2 += 1,
            BondStereo::Cis(..) | BondStereo::Trans(..) => presence.1 += 1,
            BondStereo::None => {}
        }
    }
    presence
}

/// Per-atom center scores: lower means more constrained, so it picks first.
/// Hydrogen neighbors count -10 each and tetrahedral neighbors -1 each.
fn center_scores<A, B>(mol: &Mol<A, B>) -> Vec<i64>
where
    A: HasAtomicNum + HasChirality,
    B: HasBondDir,
{
    let mut scores = vec![NOT_A_CENTER; mol.atom_count()];
    for bond in mol.bonds() {
        if !matches!(
            mol.bond(bond).bond_dir(),
            BondDir::BeginWedge | BondDir::BeginDash | BondDir::Unknown
        ) {
            continue;
        }
        let Some((begin, end)) = mol.bond_endpoints(bond) else {
            continue;
        };
        if mol.atom(begin).chirality().is_tetrahedral() {
            scores[begin.index()] = ALREADY_WEDGED;
        } else if mol.atom(end).chirality().is_tetrahedral() {
            scores[end.index()] = ALREADY_WEDGED;
        }
    }
    for atom in mol.atoms() {
        if scores[atom.index()] > NOT_A_CENTER || !mol.atom(atom).chirality().is_tetrahedral() {
            continue;
        }
        let mut score = 0;
        for nbr in mol.neighbors(atom) {
            let n = mol.atom(nbr);
            if n.atomic_num() == 1 {
                score -= 10;
            } else if n.chirality().is_tetrahedral() {
                score -= 1;
            }
        }
        scores[atom.index()] = score;
    }
    scores
}

/// Chooses one single bond per tetrahedral center to carry its wedge.
///
/// Centers that already have a wedged, hashed or squiggly bond are skipped.
/// The rest go most constrained first; each takes its lowest-scoring
/// unclaimed single bond that is not already drawn, preferring hydrogens, then light low-degree
/// non-ring neighbors away from other centers and double bonds. Ties go to
/// the lower bond index.
pub fn pick_bonds_to_wedge<A, B>(mol: &Mol<A, B>) -> Result<WedgeAssignment, StereoError>
where
    A: HasAtomicNum + HasChirality,
    B: HasBondOrder + HasBondStereo + HasBondDir,
{
    let scores = center_scores(mol);
    let mut order: Vec<NodeIndex> = mol
        .atoms()
        .filter(|&atom| scores[atom.index()] <= 0)
        .collect();
    order.sort_by_key(|atom| scores[atom.index()]);

    let rings = mol.ring_info();
    let mut picked = WedgeAssignment::new();
    for center in order {
        let mut best: Option<(i64, EdgeIndex)> = None;
        for bond in mol.bonds_of(center) {
            let b = mol.bond(bond);
            if b.bond_order() != BondOrder::Single
                || b.bond_dir() != BondDir::None
                || picked.contains_key(&bond)
            {
                continue;
            }
            let Some(other) = mol.other_atom(bond, center) else {
                continue;
            };
            let o = mol.atom(other);
            let score = if o.atomic_num() == 1 {
                HYDROGEN_BOND_SCORE
            } else {
                let mut score = i64::from(o.atomic_num()) + 100 * mol.degree(other) as i64;
                if o.chirality() != Chirality::None {
                    score += 1000;
                }
                if scores[other.index()] < NOT_A_CENTER {
                    score -= 100_000 * scores[other.index()];
                }
                score += 10_000 * rings.num_atom_rings(other) as i64;
                score += 20_000 * rings.num_bond_rings(bond) as i64;
                let (double, known, any) = double_bond_presence(mol, other);
                score + 11_000 * double + 12_000 * known + 23_000 * any
            };
            if best.map_or(true, |current| (score, bond) < current) {
                best = Some((score, bond));
            }
        }
        let (score, bond) = best.ok_or(StereoError::NoEligibleWedgeBond { atom: center })?;
        log::debug!(
            "wedging bond {} for atom {} (score {score})",
            bond.index(),
            center.index()
        );
        picked.insert(bond, center);
    }
    Ok(picked)
}

/// Swaps between the counterclockwise order of `center`'s bonds around the
/// 2D projection (starting at `bond`) and the atom's bond order, plus one
/// when a three-coordinate center has its implicit hydrogen between two
/// substituents at least a half turn apart.
pub(crate) fn depiction_swaps<A, B>(
    mol: &Mol<A, B>,
    bond: EdgeIndex,
    center: NodeIndex,
    conf: &Conformer,
) -> Result<usize, StereoError> {
    let other = mol
        .other_atom(bond, center)
        .ok_or(StereoError::BondNotIncident { bond, atom: center })?;
    let origin = project_2d(conf.position(center));
    let reference = direction_vector(origin, project_2d(conf.position(other)));

    let mut ordered: Vec<EdgeIndex> = vec![bond];
    let mut angles: Vec<f64> = vec![0.0];
    for nbr_bond in mol.bonds_of(center) {
        if nbr_bond == bond {
            continue;
        }
        let Some(nbr) = mol.other_atom(nbr_bond, center) else {
            continue;
        };
        let v = direction_vector(origin, project_2d(conf.position(nbr)));
        let angle = signed_angle_to(reference, v);
        let slot = angles
            .iter()
            .position(|&existing| angle <= existing)
            .unwrap_or(angles.len());
        angles.insert(slot, angle);
        ordered.insert(slot, nbr_bond);
    }

    let mut swaps = mol
        .perturbation_order(center, &ordered)
        .ok_or(StereoError::BondNotIncident { bond, atom: center })?;
    if let [_, first, second] = angles.as_slice() {
        if second - first >= PI - 1e-4 {
            swaps += 1;
        }
    }
    Ok(swaps)
}

/// Direction `bond` should be drawn with so that, seen from `from_atom`, the
/// 2D layout reproduces the atom's tetrahedral tag.
///
/// Without a conformer the bond's current direction is returned unchanged.
pub fn determine_bond_wedge_state<A, B>(
    mol: &Mol<A, B>,
    bond: EdgeIndex,
    from_atom: NodeIndex,
    conf: Option<&Conformer>,
) -> Result<BondDir, StereoError>
where
    A: HasChirality,
    B: HasBondOrder + HasBondDir,
{
    if mol.bond(bond).bond_order() != BondOrder::Single {
        return Err(StereoError::NotSingleBond { bond });
    }
    let Some(conf) = conf else {
        return Ok(mol.bond(bond).bond_dir());
    };
    conf.check_matches(mol)?;
    if mol.other_atom(bond, from_atom).is_none() {
        return Err(StereoError::BondNotIncident {
            bond,
            atom: from_atom,
        });
    }
    let chirality = mol.atom(from_atom).chirality();
    if !chirality.is_tetrahedral() {
        return Err(StereoError::NotTetrahedralCenter { atom: from_atom });
    }
    let odd = depiction_swaps(mol, bond, from_atom, conf)? % 2 == 1;
    Ok(match (chirality, odd) {
        (Chirality::Ccw, false) | (Chirality::Cw, true) => BondDir::BeginWedge,
        _ => BondDir::BeginDash,
    })
}

/// Sets the wedge direction of one bond. Non-single bonds are left alone.
pub fn wedge_bond<A, B>(
    mol: &mut Mol<A, B>,
    bond: EdgeIndex,
    from_atom: NodeIndex,
    conf: &Conformer,
) -> Result<(), StereoError>
where
    A: HasChirality,
    B: HasBondOrder + HasBondDirMut,
{
    if mol.bond(bond).bond_order() != BondOrder::Single {
        return Ok(());
    }
    let dir = determine_bond_wedge_state(mol, bond, from_atom, Some(conf))?;
    if dir.is_wedge_or_dash() {
        mol.bond_mut(bond).set_bond_dir(dir);
    }
    Ok(())
}

/// Picks and orients one wedge per tetrahedral center.
///
/// A wedge owned by the bond's end atom gets its bond reversed so the
/// narrow end sits on the center.
pub fn wedge_mol_bonds<A, B>(mol: &mut Mol<A, B>, conf: &Conformer) -> Result<(), StereoError>
where
    A: HasAtomicNum + HasChirality,
    B: HasBondOrder + HasBondStereo + HasBondDirMut,
{
    conf.check_matches(mol)?;
    let picked = pick_bonds_to_wedge(mol)?;
    for (&bond, &center) in &picked {
        let dir = determine_bond_wedge_state(mol, bond, center, Some(conf))?;
        if !dir.is_wedge_or_dash() {
            continue;
        }
        mol.bond_mut(bond).set_bond_dir(dir);
        if mol.bond_endpoints(bond).is_some_and(|(begin, _)| begin != center) {
            mol.reverse_bond(bond);
        }
    }
    Ok(())
}

/// Clears the direction of every single bond and returns the ones that were
/// squiggly.
pub fn clear_single_bond_dir_flags<A, B>(mol: &mut Mol<A, B>) -> Vec<EdgeIndex>
where
    B: HasBondOrder + HasBondDirMut,
{
    let bonds: Vec<EdgeIndex> = mol.bonds().collect();
    let mut squiggly = Vec::new();
    for bond in bonds {
        let b = mol.bond_mut(bond);
        if b.bond_order() != BondOrder::Single {
            continue;
        }
        if b.bond_dir() == BondDir::Unknown {
            squiggly.push(bond);
        }
        b.set_bond_dir(BondDir::None);
    }
    squiggly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::bond::Bond;
    use crate::testing::{e, mol_from, n, set_chirality};

    /// OC=C[C@H](C1CC1)C2CCC2
    fn allyl_center() -> Mol<Atom, Bond> {
        let mut mol = mol_from(
            &[
                (8, 1),
                (6, 1),
                (6, 1),
                (6, 1),
                (6, 1),
                (6, 2),
                (6, 2),
                (6, 1),
                (6, 2),
                (6, 2),
                (6, 2),
            ],
            &[
                (0, 1, 1),
                (1, 2, 2),
                (2, 3, 1),
                (3, 4, 1),
                (4, 5, 1),
                (5, 6, 1),
                (6, 4, 1),
                (3, 7, 1),
                (7, 8, 1),
                (8, 9, 1),
                (9, 10, 1),
                (10, 7, 1),
            ],
        );
        set_chirality(&mut mol, 3, Chirality::Ccw);
        mol
    }

    /// Center 1 with F, Cl, Br around it at 0, 120 and 240 degrees.
    fn trigonal_layout() -> (Mol<Atom, Bond>, Conformer) {
        let mol = mol_from(
            &[(9, 0), (6, 1), (17, 0), (35, 0)],
            &[(0, 1, 1), (2, 1, 1), (3, 1, 1)],
        );
        let conf = Conformer::new_2d(
            0,
            &[[1.0, 0.0], [0.0, 0.0], [-0.5, 0.866], [-0.5, -0.866]],
        );
        (mol, conf)
    }

    #[test]
    fn avoids_rings_and_double_bonds() {
        let mol = allyl_center();
        let picked = pick_bonds_to_wedge(&mol).unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked.get(&e(3)), Some(&n(3)));
    }

    #[test]
    fn hydrogen_wins() {
        // C[C@]([H])(F)Cl
        let mut mol = mol_from(
            &[(6, 3), (6, 0), (1, 0), (9, 0), (17, 0)],
            &[(0, 1, 1), (1, 2, 1), (1, 3, 1), (1, 4, 1)],
        );
        set_chirality(&mut mol, 1, Chirality::Ccw);
        let picked = pick_bonds_to_wedge(&mol).unwrap();
        assert_eq!(picked.get(&e(1)), Some(&n(1)));
    }

    #[test]
    fn neighboring_centers_share_nothing() {
        // C[C@H](F)[C@H](F)C
        let mut mol = mol_from(
            &[(6, 3), (6, 1), (9, 0), (6, 1), (9, 0), (6, 3)],
            &[(0, 1, 1), (1, 2, 1), (1, 3, 1), (3, 4, 1), (3, 5, 1)],
        );
        set_chirality(&mut mol, 1, Chirality::Cw);
        set_chirality(&mut mol, 3, Chirality::Ccw);
        let picked = pick_bonds_to_wedge(&mol).unwrap();
        let expected: WedgeAssignment = [(e(0), n(1)), (e(4), n(3))].into_iter().collect();
        assert_eq!(picked, expected);
    }

    #[test]
    fn already_wedged_centers_are_skipped() {
        let mut mol = allyl_center();
        mol.bond_mut(e(7)).dir = BondDir::BeginDash;
        assert!(pick_bonds_to_wedge(&mol).unwrap().is_empty());

        // a squiggle drawn from the far end still counts
        let mut mol = allyl_center();
        mol.bond_mut(e(2)).dir = BondDir::Unknown;
        assert!(pick_bonds_to_wedge(&mol).unwrap().is_empty());
    }

    #[test]
    fn bonds_drawn_for_a_neighbor_are_left_alone() {
        // C[C@@H](F)[C@H](C=C)C=O with the wedge of atom 1 on the shared bond
        let mut mol = mol_from(
            &[(6, 3), (6, 1), (9, 0), (6, 1), (6, 1), (6, 2), (6, 1), (8, 0)],
            &[(0, 1, 1), (1, 2, 1), (1, 3, 1), (3, 4, 1), (4, 5, 2), (3, 6, 1), (6, 7, 2)],
        );
        set_chirality(&mut mol, 1, Chirality::Cw);
        set_chirality(&mut mol, 3, Chirality::Ccw);
        mol.bond_mut(e(2)).dir = BondDir::BeginWedge;
        let picked = pick_bonds_to_wedge(&mol).unwrap();
        let expected: WedgeAssignment = [(e(3), n(3))].into_iter().collect();
        assert_eq!(picked, expected);
    }

    #[test]
    fn center_without_single_bonds_is_an_error() {
        // C=[C@]=C
        let mut mol = mol_from(&[(6, 2), (6, 0), (6, 2)], &[(0, 1, 2), (1, 2, 2)]);
        set_chirality(&mut mol, 1, Chirality::Cw);
        assert_eq!(
            pick_bonds_to_wedge(&mol),
            Err(StereoError::NoEligibleWedgeBond { atom: n(1) })
        );
    }

    #[test]
    fn wedge_state_preconditions() {
        let (mut mol, conf) = trigonal_layout();
        assert_eq!(
            determine_bond_wedge_state(&mol, e(0), n(1), Some(&conf)),
            Err(StereoError::NotTetrahedralCenter { atom: n(1) })
        );
        set_chirality(&mut mol, 1, Chirality::Cw);
        assert_eq!(
            determine_bond_wedge_state(&mol, e(0), n(2), Some(&conf)),
            Err(StereoError::BondNotIncident {
                bond: e(0),
                atom: n(2)
            })
        );
        let short = Conformer::new_2d(1, &[[0.0, 0.0]]);
        assert!(matches!(
            determine_bond_wedge_state(&mol, e(0), n(1), Some(&short)),
            Err(StereoError::ConformerMismatch { .. })
        ));
        mol.bond_mut(e(0)).dir = BondDir::BeginWedge;
        assert_eq!(
            determine_bond_wedge_state(&mol, e(0), n(1), None),
            Ok(BondDir::BeginWedge)
        );
        mol.bond_mut(e(1)).order = BondOrder::Double;
        assert_eq!(
            determine_bond_wedge_state(&mol, e(1), n(1), Some(&conf)),
            Err(StereoError::NotSingleBond { bond: e(1) })
        );
    }

    #[test]
    fn wedge_state_follows_tag() {
        let (mut mol, conf) = trigonal_layout();
        set_chirality(&mut mol, 1, Chirality::Ccw);
        assert_eq!(
            determine_bond_wedge_state(&mol, e(0), n(1), Some(&conf)),
            Ok(BondDir::BeginWedge)
        );
        set_chirality(&mut mol, 1, Chirality::Cw);
        assert_eq!(
            determine_bond_wedge_state(&mol, e(0), n(1), Some(&conf)),
            Ok(BondDir::BeginDash)
        );
        // starting from Cl the angular order is Cl, Br, F: two swaps
        assert_eq!(
            determine_bond_wedge_state(&mol, e(1), n(1), Some(&conf)),
            Ok(BondDir::BeginDash)
        );
    }

    #[test]
    fn implicit_hydrogen_between_wide_substituents() {
        // F at 0, Cl at 90, Br at 270 degrees: H sits between Cl and Br
        let (mut mol, _) = trigonal_layout();
        let conf = Conformer::new_2d(0, &[[1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [0.0, -1.0]]);
        set_chirality(&mut mol, 1, Chirality::Ccw);
        assert_eq!(depiction_swaps(&mol, e(0), n(1), &conf), Ok(1));
        assert_eq!(
            determine_bond_wedge_state(&mol, e(0), n(1), Some(&conf)),
            Ok(BondDir::BeginDash)
        );
    }

    #[test]
    fn wedge_mol_bonds_reverses_foreign_begin() {
        let (mut mol, conf) = trigonal_layout();
        set_chirality(&mut mol, 1, Chirality::Ccw);
        wedge_mol_bonds(&mut mol, &conf).unwrap();
        assert_eq!(mol.bond(e(0)).dir, BondDir::BeginWedge);
        assert_eq!(mol.bond_endpoints(e(0)), Some((n(1), n(0))));
        assert_eq!(mol.bond(e(1)).dir, BondDir::None);
        assert_eq!(mol.bond(e(2)).dir, BondDir::None);
    }

    #[test]
    fn wedge_bond_ignores_non_single() {
        let (mut mol, conf) = trigonal_layout();
        set_chirality(&mut mol, 1, Chirality::Ccw);
        mol.bond_mut(e(2)).order = BondOrder::Double;
        assert_eq!(wedge_bond(&mut mol, e(2), n(1), &conf), Ok(()));
        assert_eq!(mol.bond(e(2)).dir, BondDir::None);
        wedge_bond(&mut mol, e(0), n(1), &conf).unwrap();
        assert_eq!(mol.bond(e(0)).dir, BondDir::BeginWedge);
    }

    #[test]
    fn clearing_reports_squiggles() {
        let (mut mol, _) = trigonal_layout();
        mol.bond_mut(e(0)).dir = BondDir::BeginWedge;
        mol.bond_mut(e(1)).dir = BondDir::Unknown;
        assert_eq!(clear_single_bond_dir_flags(&mut mol), vec![e(1)]);
        assert!(mol.bonds().all(|b| mol.bond(b).dir == BondDir::None));
    }
}
