use petgraph::graph::{EdgeIndex, NodeIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StereoType {
    #[default]
    None,
    AtomTetrahedral,
    AtomSquarePlanar,
    AtomTrigonalBipyramidal,
    AtomOctahedral,
    BondDouble,
}

impl StereoType {
    pub fn is_atom(self) -> bool {
        matches!(
            self,
            StereoType::AtomTetrahedral
                | StereoType::AtomSquarePlanar
                | StereoType::AtomTrigonalBipyramidal
                | StereoType::AtomOctahedral
        )
    }

    pub fn is_nontetrahedral(self) -> bool {
        matches!(
            self,
            StereoType::AtomSquarePlanar
                | StereoType::AtomTrigonalBipyramidal
                | StereoType::AtomOctahedral
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StereoSpecified {
    /// Never set.
    #[default]
    Unspecified,
    Specified,
    /// Explicitly indeterminate: a squiggly bond or an "any" flag.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StereoDescriptor {
    #[default]
    None,
    TetCcw,
    TetCw,
    /// Relative to the first controlling atom on each end of the bond.
    BondCis,
    BondTrans,
}

/// One perceived stereo element.
///
/// `controlling_atoms` holds the neighbors that define the arrangement, in
/// the center's bond order; `None` marks an empty slot, such as a
/// double-bond end with a single substituent. For double bonds the layout
/// is `[begin_a, begin_b, end_a, end_b]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StereoInfo {
    pub kind: StereoType,
    /// Atom index for atom types, bond index for [`StereoType::BondDouble`].
    pub centered_on: usize,
    pub controlling_atoms: Vec<Option<NodeIndex>>,
    pub specified: StereoSpecified,
    pub descriptor: StereoDescriptor,
    /// Non-tetrahedral permutation class, `0` when unknown.
    pub permutation: u32,
}

impl StereoInfo {
    pub fn new(kind: StereoType, centered_on: usize) -> Self {
        Self {
            kind,
            centered_on,
            ..Self::default()
        }
    }

    /// Same kind of element on the same center, ignoring its configuration.
    pub fn same_element(&self, other: &StereoInfo) -> bool {
        self.kind == other.kind && self.centered_on == other.centered_on
    }

    pub fn center_atom(&self) -> Option<NodeIndex> {
        self.kind
            .is_atom()
            .then(|| NodeIndex::new(self.centered_on))
    }

    pub fn center_bond(&self) -> Option<EdgeIndex> {
        (self.kind == StereoType::BondDouble).then(|| EdgeIndex::new(self.centered_on))
    }
}
