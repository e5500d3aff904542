use crate::error::StereoError;
use crate::geometry::Point;
use crate::mol::Mol;

/// Per-atom coordinates for one molecule. 2D conformers keep `z = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Conformer {
    id: u32,
    positions: Vec<Point>,
    is_3d: bool,
}

impl Conformer {
    pub fn new_2d(id: u32, positions: &[[f64; 2]]) -> Self {
        Self {
            id,
            positions: positions.iter().map(|p| [p[0], p[1], 0.0]).collect(),
            is_3d: false,
        }
    }

    pub fn new_3d(id: u32, positions: Vec<Point>) -> Self {
        Self {
            id,
            positions,
            is_3d: true,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn is_3d(&self) -> bool {
        self.is_3d
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, atom: petgraph::graph::NodeIndex) -> Point {
        self.positions.get(atom.index()).copied().unwrap_or([0.0; 3])
    }

    pub fn set_position(&mut self, atom: petgraph::graph::NodeIndex, pos: Point) {
        if let Some(slot) = self.positions.get_mut(atom.index()) {
            *slot = pos;
        }
    }

    /// Errors unless this conformer has one position per atom of `mol`.
    pub fn check_matches<A, B>(&self, mol: &Mol<A, B>) -> Result<(), StereoError> {
        if self.positions.len() != mol.atom_count() {
            return Err(StereoError::ConformerMismatch {
                expected: mol.atom_count(),
                found: self.positions.len(),
            });
        }
        Ok(())
    }
}
