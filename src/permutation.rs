//! Permutation classes of square-planar (SP1-3), trigonal-bipyramidal
//! (TB1-20) and octahedral (OH1-30) centers.
//!
//! Each class is turned into an idealized placement of ligand slots around
//! the origin; two ligand orderings describe the same arrangement when their
//! placements agree up to a proper rotation.

use std::f64::consts::PI;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::atom::Chirality;
use crate::geometry::{angle_to, dot, signed_volume, Point};
use crate::mol::Mol;
use crate::traits::HasChirality;

const TOLERANCE: f64 = 1e-6;

/// Ideal angle between two ligands of a tetrahedral center, in degrees.
pub const TETRAHEDRAL_ANGLE: f64 = 109.471_220_634_490_7;

/// Order of the four equatorial slots around the axis, in quarter turns.
#[derive(Clone, Copy)]
enum Shape {
    U,
    Z,
    Four,
}

impl Shape {
    fn quarter_turns(self) -> [f64; 4] {
        match self {
            Shape::U => [0.0, 1.0, 2.0, 3.0],
            Shape::Z => [0.0, 1.0, 3.0, 2.0],
            Shape::Four => [0.0, 2.0, 1.0, 3.0],
        }
    }
}

/// Slot at `(0, 0, 1)`, slot at `(0, 0, -1)`, anticlockwise viewed from the
/// first.
const TRIGONAL_BIPYRAMIDAL: [(usize, usize, bool); 20] = [
    (0, 4, true),
    (0, 4, false),
    (0, 3, true),
    (0, 3, false),
    (0, 2, true),
    (0, 2, false),
    (0, 1, true),
    (0, 1, false),
    (1, 4, true),
    (1, 3, true),
    (1, 4, false),
    (1, 3, false),
    (1, 2, true),
    (1, 2, false),
    (2, 4, true),
    (2, 3, true),
    (3, 4, true),
    (3, 4, false),
    (2, 3, false),
    (2, 4, false),
];

/// Slot trans to slot 0, equatorial shape, anticlockwise viewed from slot 0.
const OCTAHEDRAL: [(usize, Shape, bool); 30] = [
    (5, Shape::U, true),
    (5, Shape::U, false),
    (4, Shape::U, true),
    (5, Shape::Z, true),
    (4, Shape::Z, true),
    (3, Shape::U, true),
    (3, Shape::Z, true),
    (5, Shape::Four, true),
    (4, Shape::Four, true),
    (5, Shape::Four, false),
    (4, Shape::Four, false),
    (3, Shape::Four, true),
    (3, Shape::Four, false),
    (5, Shape::Z, false),
    (4, Shape::Z, false),
    (4, Shape::U, false),
    (3, Shape::Z, false),
    (3, Shape::U, false),
    (2, Shape::U, true),
    (2, Shape::Z, true),
    (2, Shape::Four, true),
    (2, Shape::Four, false),
    (2, Shape::Z, false),
    (2, Shape::U, false),
    (1, Shape::U, true),
    (1, Shape::Z, true),
    (1, Shape::Four, true),
    (1, Shape::Four, false),
    (1, Shape::Z, false),
    (1, Shape::U, false),
];

const SQUARE_PLANAR: [Shape; 3] = [Shape::U, Shape::Four, Shape::Z];

/// Number of ligand slots of a geometry; `0` for tags without one.
pub fn coordination(geometry: Chirality) -> usize {
    match geometry {
        Chirality::Cw | Chirality::Ccw => 4,
        Chirality::SquarePlanar => 4,
        Chirality::TrigonalBipyramidal => 5,
        Chirality::Octahedral => 6,
        Chirality::None => 0,
    }
}

/// Number of permutation classes of a non-tetrahedral geometry.
pub fn permutation_count(geometry: Chirality) -> u32 {
    match geometry {
        Chirality::SquarePlanar => SQUARE_PLANAR.len() as u32,
        Chirality::TrigonalBipyramidal => TRIGONAL_BIPYRAMIDAL.len() as u32,
        Chirality::Octahedral => OCTAHEDRAL.len() as u32,
        _ => 0,
    }
}

fn planar(angle: f64, clockwise: bool) -> Point {
    let theta = if clockwise { -angle } else { angle };
    [theta.cos(), theta.sin(), 0.0]
}

/// Idealized unit vectors for the slots of `geometry` under class
/// `permutation` (1-based).
fn slot_vectors(geometry: Chirality, permutation: u32) -> Option<Vec<Point>> {
    let index = (permutation as usize).checked_sub(1)?;
    match geometry {
        Chirality::SquarePlanar => {
            let shape = SQUARE_PLANAR.get(index)?;
            Some(
                shape
                    .quarter_turns()
                    .iter()
                    .map(|q| planar(q * PI / 2.0, false))
                    .collect(),
            )
        }
        Chirality::TrigonalBipyramidal => {
            let &(top, bottom, anticlockwise) = TRIGONAL_BIPYRAMIDAL.get(index)?;
            let mut slots = vec![[0.0; 3]; 5];
            slots[top] = [0.0, 0.0, 1.0];
            slots[bottom] = [0.0, 0.0, -1.0];
            let equatorial = (0..5).filter(|&i| i != top && i != bottom);
            for (k, slot) in equatorial.enumerate() {
                slots[slot] = planar(k as f64 * 2.0 * PI / 3.0, !anticlockwise);
            }
            Some(slots)
        }
        Chirality::Octahedral => {
            let &(bottom, shape, anticlockwise) = OCTAHEDRAL.get(index)?;
            let mut slots = vec![[0.0; 3]; 6];
            slots[0] = [0.0, 0.0, 1.0];
            slots[bottom] = [0.0, 0.0, -1.0];
            let equatorial = (1..6).filter(|&i| i != bottom);
            for (slot, q) in equatorial.zip(shape.quarter_turns()) {
                slots[slot] = planar(q * PI / 2.0, !anticlockwise);
            }
            Some(slots)
        }
        _ => None,
    }
}

/// Placeholder ligands stand in for missing neighbors (lone pairs, implicit
/// hydrogens) and are matched up in order of appearance.
fn ligand_keys(ligands: &[Option<NodeIndex>]) -> Vec<usize> {
    let mut placeholders = 0;
    ligands
        .iter()
        .map(|ligand| match ligand {
            Some(atom) => atom.index(),
            None => {
                placeholders += 1;
                usize::MAX - placeholders
            }
        })
        .collect()
}

fn pad(ligands: &[Option<NodeIndex>], slots: usize) -> Option<Vec<Option<NodeIndex>>> {
    if ligands.len() > slots {
        return None;
    }
    let mut padded = ligands.to_vec();
    padded.resize(slots, None);
    Some(padded)
}

/// True when the two placements differ by a proper rotation at most.
fn same_arrangement(a: &[(usize, Point)], b: &[(usize, Point)]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut matched = Vec::with_capacity(a.len());
    for (key, pa) in a {
        match b.iter().find(|(k, _)| k == key) {
            Some(&(_, pb)) => matched.push((*pa, pb)),
            None => return false,
        }
    }
    for i in 0..matched.len() {
        for j in (i + 1)..matched.len() {
            if (dot(matched[i].0, matched[j].0) - dot(matched[i].1, matched[j].1)).abs() > TOLERANCE
            {
                return false;
            }
        }
    }
    for i in 0..matched.len() {
        for j in (i + 1)..matched.len() {
            for k in (j + 1)..matched.len() {
                let va = signed_volume(matched[i].0, matched[j].0, matched[k].0);
                let vb = signed_volume(matched[i].1, matched[j].1, matched[k].1);
                if sign(va) != sign(vb) {
                    return false;
                }
            }
        }
    }
    true
}

fn sign(v: f64) -> i8 {
    if v > TOLERANCE {
        1
    } else if v < -TOLERANCE {
        -1
    } else {
        0
    }
}

fn placement(
    geometry: Chirality,
    permutation: u32,
    ligands: &[Option<NodeIndex>],
) -> Option<Vec<(usize, Point)>> {
    let slots = slot_vectors(geometry, permutation)?;
    let ligands = pad(ligands, slots.len())?;
    Some(ligand_keys(&ligands).into_iter().zip(slots).collect())
}

/// Neighbors of `atom` in bond order, padded to the coordination number of
/// its tag.
fn reference_ligands<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> Vec<Option<NodeIndex>>
where
    A: HasChirality,
{
    let slots = coordination(mol.atom(atom).chirality());
    let mut ligands: Vec<Option<NodeIndex>> = mol.neighbors(atom).map(Some).collect();
    if ligands.len() < slots {
        ligands.resize(slots, None);
    }
    ligands
}

/// Permutation class that describes the stored arrangement of `atom` when
/// its ligands are listed in `probe` order instead of bond order.
///
/// Missing ligands may be given as `None` or left off the end. Returns
/// `Some(0)` when the stored class is unknown and `None` when the atom has no
/// non-tetrahedral tag or `probe` does not fit it.
pub fn chiral_permutation<A, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    probe: &[Option<NodeIndex>],
) -> Option<u32>
where
    A: HasChirality,
{
    let geometry = mol.atom(atom).chirality();
    if !geometry.is_nontetrahedral() {
        return None;
    }
    let stored = mol.atom(atom).chiral_permutation();
    if stored == 0 {
        return Some(0);
    }
    let reference = placement(geometry, stored, &reference_ligands(mol, atom))?;
    (1..=permutation_count(geometry)).find(|&candidate| {
        placement(geometry, candidate, probe)
            .is_some_and(|placed| same_arrangement(&reference, &placed))
    })
}

/// Ideal angle in degrees between the bonds from `atom` to `a` and to `b`.
///
/// Tetrahedral and untagged centers always give the tetrahedral angle.
/// Returns `None` for a non-tetrahedral center with an unknown class or when
/// either atom is not a neighbor.
pub fn ideal_angle_between_ligands<A, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    a: NodeIndex,
    b: NodeIndex,
) -> Option<f64>
where
    A: HasChirality,
{
    let tag = mol.atom(atom);
    if !tag.chirality().is_nontetrahedral() {
        return Some(TETRAHEDRAL_ANGLE);
    }
    let ligands = reference_ligands(mol, atom);
    let placed = placement(tag.chirality(), tag.chiral_permutation(), &ligands)?;
    let find = |target: NodeIndex| {
        placed
            .iter()
            .find(|(key, _)| *key == target.index())
            .map(|(_, p)| *p)
    };
    Some(angle_to(find(a)?, find(b)?).to_degrees())
}

/// Axial ligands of a trigonal-bipyramidal center; an empty axial slot is
/// `None`.
pub fn trigonal_bipyramidal_axial_atoms<A, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
) -> Option<[Option<NodeIndex>; 2]>
where
    A: HasChirality,
{
    let tag = mol.atom(atom);
    if tag.chirality() != Chirality::TrigonalBipyramidal {
        return None;
    }
    let index = (tag.chiral_permutation() as usize).checked_sub(1)?;
    let &(top, bottom, _) = TRIGONAL_BIPYRAMIDAL.get(index)?;
    let ligands = reference_ligands(mol, atom);
    Some([ligands.get(top).copied()?, ligands.get(bottom).copied()?])
}

pub fn is_trigonal_bipyramidal_axial_bond<A, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    bond: EdgeIndex,
) -> bool
where
    A: HasChirality,
{
    let Some(other) = mol.other_atom(bond, atom) else {
        return false;
    };
    trigonal_bipyramidal_axial_atoms(mol, atom)
        .is_some_and(|axial| axial.contains(&Some(other)))
}
