use petgraph::graph::{EdgeIndex, NodeIndex};
use thiserror::Error;

/// Misuse of the depiction routines. Perception never returns these; it
/// narrows its result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StereoError {
    #[error("a conformer is required")]
    NoConformer,

    #[error("conformer has {found} positions but the molecule has {expected} atoms")]
    ConformerMismatch { expected: usize, found: usize },

    #[error("bond {} is not a single bond", bond.index())]
    NotSingleBond { bond: EdgeIndex },

    #[error("bond {} does not touch atom {}", bond.index(), atom.index())]
    BondNotIncident { bond: EdgeIndex, atom: NodeIndex },

    #[error("atom {} is not a tetrahedral stereocenter", atom.index())]
    NotTetrahedralCenter { atom: NodeIndex },

    #[error("no eligible bond to wedge for atom {}", atom.index())]
    NoEligibleWedgeBond { atom: NodeIndex },
}
