use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
    /// Coordination bond; the begin atom is the donor.
    Dative,
    /// Zero-order bond kept for connectivity bookkeeping only.
    Zero,
}

impl BondOrder {
    /// Bond order in half-bond units, so aromatic bonds stay integral.
    pub fn valence_contribution_x2(self) -> u32 {
        match self {
            BondOrder::Single => 2,
            BondOrder::Double => 4,
            BondOrder::Triple => 6,
            BondOrder::Aromatic => 3,
            BondOrder::Dative | BondOrder::Zero => 0,
        }
    }
}

/// Double-bond stereo annotation.
///
/// `Cis` and `Trans` carry the two stereo atoms the descriptor refers to: the
/// first is a neighbor of the bond's begin atom, the second a neighbor of its
/// end atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondStereo {
    #[default]
    None,
    /// Explicitly unknown ("either") configuration.
    Any,
    Cis(NodeIndex, NodeIndex),
    Trans(NodeIndex, NodeIndex),
}

impl BondStereo {
    pub fn is_specified(self) -> bool {
        matches!(self, BondStereo::Cis(..) | BondStereo::Trans(..))
    }

    pub fn stereo_atoms(self) -> Option<(NodeIndex, NodeIndex)> {
        match self {
            BondStereo::Cis(a, b) | BondStereo::Trans(a, b) => Some((a, b)),
            BondStereo::None | BondStereo::Any => None,
        }
    }
}

/// Depiction flag on a bond.
///
/// Wedge and dash are read from the begin atom, which is the stereocenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BondDir {
    #[default]
    None,
    BeginWedge,
    BeginDash,
    /// Squiggly single bond.
    Unknown,
    /// Crossed double bond.
    EitherDouble,
}

impl BondDir {
    pub fn is_wedge_or_dash(self) -> bool {
        matches!(self, BondDir::BeginWedge | BondDir::BeginDash)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    pub order: BondOrder,
    pub stereo: BondStereo,
    pub dir: BondDir,
}

impl Default for Bond {
    fn default() -> Self {
        Self {
            order: BondOrder::Single,
            stereo: BondStereo::None,
            dir: BondDir::None,
        }
    }
}

impl Bond {
    pub fn new(order: BondOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }
}

impl crate::traits::HasBondOrder for Bond {
    fn bond_order(&self) -> BondOrder {
        self.order
    }
}

impl crate::traits::HasBondStereo for Bond {
    fn bond_stereo(&self) -> BondStereo {
        self.stereo
    }
}

impl crate::traits::HasBondStereoMut for Bond {
    fn set_bond_stereo(&mut self, stereo: BondStereo) {
        self.stereo = stereo;
    }
}

impl crate::traits::HasBondDir for Bond {
    fn bond_dir(&self) -> BondDir {
        self.dir
    }
}

impl crate::traits::HasBondDirMut for Bond {
    fn set_bond_dir(&mut self, dir: BondDir) {
        self.dir = dir;
    }
}
