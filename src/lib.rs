pub mod atom;
pub mod bond;
pub mod canonical;
pub mod chirality;
pub mod config;
pub mod conformer;
pub mod error;
pub mod from_geometry;
pub mod geometry;
pub mod mol;
pub mod perception;
pub mod permutation;
pub mod rings;
pub mod stereo_group;
pub mod stereo_info;
pub mod traits;
pub mod wavy;
pub mod wedge;

pub use atom::{Atom, Chirality};
pub use bond::{Bond, BondDir, BondOrder, BondStereo};
pub use chirality::{
    atom_stereo_type, is_atom_potential_nontetrahedral_center,
    is_atom_potential_stereo_atom, is_atom_potential_tetrahedral_center,
    is_bond_potential_stereo_bond,
};
pub use config::StereoConfig;
pub use conformer::Conformer;
pub use error::StereoError;
pub use from_geometry::{
    assign_chiral_tags_from_3d, assign_chiral_tags_from_bond_dirs, detect_bond_stereochemistry,
};
pub use mol::Mol;
pub use perception::find_potential_stereo;
pub use permutation::{
    chiral_permutation, ideal_angle_between_ligands, is_trigonal_bipyramidal_axial_bond,
    trigonal_bipyramidal_axial_atoms,
};
pub use rings::RingInfo;
pub use stereo_group::{StereoGroup, StereoGroupType};
pub use stereo_info::{StereoDescriptor, StereoInfo, StereoSpecified, StereoType};
pub use traits::{
    HasAromaticity, HasAtomicNum, HasBondDir, HasBondDirMut, HasBondOrder, HasBondStereo,
    HasBondStereoMut, HasChirality, HasChiralityMut, HasFormalCharge, HasHydrogenCount,
    HasIsotope, StereoAtom, StereoBond,
};
pub use wavy::{add_wavy_bonds_for_stereo_any, StereoBondThresholds};
pub use wedge::{
    clear_single_bond_dir_flags, determine_bond_wedge_state, pick_bonds_to_wedge, wedge_bond,
    wedge_mol_bonds, WedgeAssignment,
};

#[cfg(test)]
pub(crate) mod testing;
