use serde::{Deserialize, Serialize};

/// Chiral tag stored on an atom.
///
/// Tetrahedral tags are read relative to the atom's bond order (ascending
/// bond index): looking from the first neighbor, the remaining neighbors run
/// clockwise ([`Cw`](Chirality::Cw)) or counterclockwise
/// ([`Ccw`](Chirality::Ccw)). An implicit hydrogen or lone pair on a
/// three-coordinate center is the last neighbor.
///
/// The non-tetrahedral tags only name the coordination geometry; the actual
/// arrangement lives in [`Atom::chiral_permutation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Chirality {
    #[default]
    None,
    /// Clockwise (@@) arrangement.
    Cw,
    /// Counterclockwise (@) arrangement.
    Ccw,
    SquarePlanar,
    TrigonalBipyramidal,
    Octahedral,
}

impl Chirality {
    pub fn is_tetrahedral(self) -> bool {
        matches!(self, Chirality::Cw | Chirality::Ccw)
    }

    pub fn is_nontetrahedral(self) -> bool {
        matches!(
            self,
            Chirality::SquarePlanar | Chirality::TrigonalBipyramidal | Chirality::Octahedral
        )
    }

    /// The opposite tetrahedral handedness; other tags are returned unchanged.
    pub fn inverted(self) -> Self {
        match self {
            Chirality::Cw => Chirality::Ccw,
            Chirality::Ccw => Chirality::Cw,
            other => other,
        }
    }
}

/// Default atom type for a molecular graph node.
///
/// `Atom` stores intrinsic atomic properties plus the stereo annotations the
/// perception and depiction routines read and write.
///
/// # Examples
///
/// ```
/// use stereocrab::{Atom, Chirality};
///
/// let carbon = Atom {
///     atomic_num: 6,
///     hydrogen_count: 1,
///     chirality: Chirality::Ccw,
///     ..Atom::default()
/// };
/// assert!(carbon.chirality.is_tetrahedral());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 7 = N, …). Identifies the element.
    pub atomic_num: u8,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Mass number. `0` means natural isotopic abundance.
    pub isotope: u16,
    /// Number of implicit (suppressed) hydrogens on this atom.
    pub hydrogen_count: u8,
    pub is_aromatic: bool,
    pub chirality: Chirality,
    /// Permutation class for non-tetrahedral tags (SP1-3, TB1-20, OH1-30).
    /// `0` means the arrangement is unknown.
    pub chiral_permutation: u32,
}

impl crate::traits::HasAtomicNum for Atom {
    fn atomic_num(&self) -> u8 {
        self.atomic_num
    }
}

impl crate::traits::HasFormalCharge for Atom {
    fn formal_charge(&self) -> i8 {
        self.formal_charge
    }
}

impl crate::traits::HasIsotope for Atom {
    fn isotope(&self) -> u16 {
        self.isotope
    }
}

impl crate::traits::HasHydrogenCount for Atom {
    fn hydrogen_count(&self) -> u8 {
        self.hydrogen_count
    }
}

impl crate::traits::HasAromaticity for Atom {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}

impl crate::traits::HasChirality for Atom {
    fn chirality(&self) -> Chirality {
        self.chirality
    }

    fn chiral_permutation(&self) -> u32 {
        self.chiral_permutation
    }
}

impl crate::traits::HasChiralityMut for Atom {
    fn set_chirality(&mut self, chirality: Chirality) {
        self.chirality = chirality;
    }

    fn set_chiral_permutation(&mut self, permutation: u32) {
        self.chiral_permutation = permutation;
    }
}
