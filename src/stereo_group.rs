use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::mol::Mol;
use crate::traits::HasChirality;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StereoGroupType {
    /// The drawn configuration is the actual one.
    Absolute,
    /// The drawn configuration or its inverse, not known which.
    Or,
    /// A mixture of the drawn configuration and its inverse.
    And,
}

/// Atoms whose specified configurations are linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StereoGroup {
    pub kind: StereoGroupType,
    pub atoms: Vec<NodeIndex>,
    pub id: u32,
}

impl StereoGroup {
    pub fn new(kind: StereoGroupType, atoms: Vec<NodeIndex>) -> Self {
        Self { kind, atoms, id: 0 }
    }
}

/// Drops every group that references any of `atoms`.
pub fn remove_groups_with_atoms<A, B>(mol: &mut Mol<A, B>, atoms: &[NodeIndex]) {
    let kept: Vec<StereoGroup> = mol
        .stereo_groups()
        .iter()
        .filter(|group| !group.atoms.iter().any(|a| atoms.contains(a)))
        .cloned()
        .collect();
    mol.set_stereo_groups(kept);
}

/// Removes atoms without a chiral tag from every group, then drops groups
/// left empty.
pub fn cleanup_stereo_groups<A: HasChirality, B>(mol: &mut Mol<A, B>) {
    let mut groups: Vec<StereoGroup> = mol.stereo_groups().to_vec();
    for group in &mut groups {
        group.atoms.retain(|&a| {
            a.index() < mol.atom_count() && mol.atom(a).chirality() != crate::Chirality::None
        });
    }
    groups.retain(|group| !group.atoms.is_empty());
    if groups != mol.stereo_groups() {
        mol.set_stereo_groups(groups);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{chain, n, set_chirality};
    use crate::Chirality;

    fn two_group_mol() -> Mol<crate::Atom, crate::Bond> {
        let mut mol = chain(&[3, 1, 2, 1, 2, 1, 3]);
        for i in [1, 3, 5] {
            set_chirality(&mut mol, i, Chirality::Cw);
        }
        mol.add_stereo_group(StereoGroup::new(StereoGroupType::Or, vec![n(1), n(3)]));
        mol.add_stereo_group(StereoGroup::new(StereoGroupType::And, vec![n(5)]));
        mol
    }

    #[test]
    fn remove_groups_touching_atom() {
        let mut mol = two_group_mol();
        remove_groups_with_atoms(&mut mol, &[n(1)]);
        assert_eq!(mol.stereo_groups().len(), 1);
        assert_eq!(mol.stereo_groups()[0].kind, StereoGroupType::And);
    }

    #[test]
    fn remove_groups_untouched() {
        let mut mol = two_group_mol();
        remove_groups_with_atoms(&mut mol, &[n(0)]);
        assert_eq!(mol.stereo_groups().len(), 2);
    }

    #[test]
    fn cleanup_prunes_and_drops() {
        let mut mol = two_group_mol();
        set_chirality(&mut mol, 1, Chirality::None);
        set_chirality(&mut mol, 5, Chirality::None);
        cleanup_stereo_groups(&mut mol);
        assert_eq!(mol.stereo_groups().len(), 1);
        assert_eq!(mol.stereo_groups()[0].atoms, vec![n(3)]);
    }
}
