use std::cell::OnceCell;

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::rings::RingInfo;
use crate::stereo_group::StereoGroup;

/// Molecular graph: an undirected petgraph arena plus molecule-level stereo
/// bookkeeping.
///
/// Bond source/target are the bond's begin/end atoms. Per-atom bond order is
/// ascending [`EdgeIndex`]; chiral tags and permutation indices are read
/// relative to it.
pub struct Mol<A, B> {
    graph: UnGraph<A, B>,
    stereo_groups: Vec<StereoGroup>,
    ring_info: OnceCell<RingInfo>,
}

impl<A, B> Mol<A, B> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            stereo_groups: Vec::new(),
            ring_info: OnceCell::new(),
        }
    }

    pub fn graph(&self) -> &UnGraph<A, B> {
        &self.graph
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut A {
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    pub fn bond_mut(&mut self, idx: EdgeIndex) -> &mut B {
        &mut self.graph[idx]
    }

    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        self.ring_info = OnceCell::new();
        self.graph.add_node(atom)
    }

    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> EdgeIndex {
        self.ring_info = OnceCell::new();
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Neighbors of `idx`, in the atom's bond order.
    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.bonds_of(idx)
            .filter_map(move |edge| self.other_atom(edge, idx))
    }

    /// Bonds incident to `idx`, in ascending bond index.
    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        let mut bonds: Vec<EdgeIndex> = self.graph.edges(idx).map(|e| e.id()).collect();
        bonds.sort_unstable();
        bonds.into_iter()
    }

    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges(idx).count()
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    /// `(begin, end)` atoms of a bond.
    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    pub fn other_atom(&self, bond: EdgeIndex, atom: NodeIndex) -> Option<NodeIndex> {
        let (a, b) = self.bond_endpoints(bond)?;
        if a == atom {
            Some(b)
        } else if b == atom {
            Some(a)
        } else {
            None
        }
    }

    /// Swaps the begin and end atoms of `idx`. Atom and bond indices are
    /// unchanged.
    pub fn reverse_bond(&mut self, idx: EdgeIndex) {
        if idx.index() >= self.bond_count() {
            return;
        }
        let (nodes, edges) = std::mem::take(&mut self.graph).into_nodes_edges();
        let mut rebuilt = UnGraph::with_capacity(nodes.len(), edges.len());
        for node in nodes {
            rebuilt.add_node(node.weight);
        }
        for (i, edge) in edges.into_iter().enumerate() {
            let (a, b) = (edge.source(), edge.target());
            if i == idx.index() {
                rebuilt.add_edge(b, a, edge.weight);
            } else {
                rebuilt.add_edge(a, b, edge.weight);
            }
        }
        self.graph = rebuilt;
    }

    /// SSSR ring information, perceived on first use.
    pub fn ring_info(&self) -> &RingInfo {
        self.ring_info.get_or_init(|| RingInfo::sssr(self))
    }

    pub fn stereo_groups(&self) -> &[StereoGroup] {
        &self.stereo_groups
    }

    pub fn set_stereo_groups(&mut self, groups: Vec<StereoGroup>) {
        self.stereo_groups = groups;
    }

    pub fn add_stereo_group(&mut self, group: StereoGroup) {
        self.stereo_groups.push(group);
    }

    /// Number of swaps needed to turn the atom's bond order into `probe`.
    ///
    /// Returns `None` when `probe` is not a reordering of the atom's bonds.
    pub fn perturbation_order(&self, atom: NodeIndex, probe: &[EdgeIndex]) -> Option<usize> {
        let reference: Vec<EdgeIndex> = self.bonds_of(atom).collect();
        count_swaps(&reference, probe)
    }
}

impl<A: Clone, B: Clone> Clone for Mol<A, B> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            stereo_groups: self.stereo_groups.clone(),
            ring_info: self.ring_info.clone(),
        }
    }
}

impl<A, B> Default for Mol<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: PartialEq, B: PartialEq> PartialEq for Mol<A, B> {
    fn eq(&self, other: &Self) -> bool {
        if self.atom_count() != other.atom_count() || self.bond_count() != other.bond_count() {
            return false;
        }
        for idx in self.atoms() {
            if self.atom(idx) != other.atom(idx) {
                return false;
            }
        }
        for idx in self.bonds() {
            if self.bond(idx) != other.bond(idx) {
                return false;
            }
            if self.bond_endpoints(idx) != other.bond_endpoints(idx) {
                return false;
            }
        }
        self.stereo_groups == other.stereo_groups
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Mol<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mol")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .field("stereo_groups", &self.stereo_groups)
            .finish()
    }
}

/// Transpositions needed to reorder `from` into `to`, counted over the cycle
/// decomposition of the permutation.
pub(crate) fn count_swaps<T: Eq>(from: &[T], to: &[T]) -> Option<usize> {
    let n = from.len();
    if n != to.len() {
        return None;
    }
    let perm = from
        .iter()
        .map(|f| to.iter().position(|t| t == f))
        .collect::<Option<Vec<usize>>>()?;
    let mut visited = vec![false; n];
    let mut swaps = 0usize;
    for i in 0..n {
        if visited[i] {
            continue;
        }
        let mut cycle_len = 0;
        let mut j = i;
        while !visited[j] {
            visited[j] = true;
            j = perm[j];
            cycle_len += 1;
        }
        swaps += cycle_len - 1;
    }
    Some(swaps)
}
