use crate::atom::Chirality;
use crate::bond::{BondDir, BondOrder, BondStereo};

pub trait HasAtomicNum {
    fn atomic_num(&self) -> u8;
}

pub trait HasFormalCharge {
    fn formal_charge(&self) -> i8;
}

pub trait HasIsotope {
    fn isotope(&self) -> u16;
}

pub trait HasHydrogenCount {
    fn hydrogen_count(&self) -> u8;
}

pub trait HasAromaticity {
    fn is_aromatic(&self) -> bool;
}

pub trait HasChirality {
    fn chirality(&self) -> Chirality;
    fn chiral_permutation(&self) -> u32;
}

pub trait HasChiralityMut: HasChirality {
    fn set_chirality(&mut self, chirality: Chirality);
    fn set_chiral_permutation(&mut self, permutation: u32);
}

pub trait HasBondOrder {
    fn bond_order(&self) -> BondOrder;
}

pub trait HasBondStereo {
    fn bond_stereo(&self) -> BondStereo;
}

pub trait HasBondStereoMut: HasBondStereo {
    fn set_bond_stereo(&mut self, stereo: BondStereo);
}

pub trait HasBondDir {
    fn bond_dir(&self) -> BondDir;
}

pub trait HasBondDirMut: HasBondDir {
    fn set_bond_dir(&mut self, dir: BondDir);
}

/// Everything the stereo routines read from or write to an atom.
pub trait StereoAtom:
    HasAtomicNum
    + HasFormalCharge
    + HasIsotope
    + HasHydrogenCount
    + HasAromaticity
    + HasChirality
    + HasChiralityMut
{
}

impl<T> StereoAtom for T where
    T: HasAtomicNum
        + HasFormalCharge
        + HasIsotope
        + HasHydrogenCount
        + HasAromaticity
        + HasChirality
        + HasChiralityMut
{
}

/// Everything the stereo routines read from or write to a bond.
pub trait StereoBond:
    HasBondOrder + HasBondStereo + HasBondStereoMut + HasBondDir + HasBondDirMut
{
}

impl<T> StereoBond for T where
    T: HasBondOrder + HasBondStereo + HasBondStereoMut + HasBondDir + HasBondDirMut
{
}
