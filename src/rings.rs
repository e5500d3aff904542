use std::collections::VecDeque;

use petgraph::algo::connected_components;
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::mol::Mol;

/// Smallest set of smallest rings, with per-ring bond lists.
#[derive(Debug, Clone, Default)]
pub struct RingInfo {
    rings: Vec<Vec<NodeIndex>>,
    ring_bonds: Vec<Vec<EdgeIndex>>,
}

impl RingInfo {
    pub fn sssr<A, B>(mol: &Mol<A, B>) -> Self {
        let num_expected = Self::expected_ring_count(mol);
        if num_expected == 0 {
            return Self::default();
        }

        let candidates = horton_candidates(mol);
        let rings = select_independent_rings(&candidates, num_expected, mol);
        let ring_bonds = rings
            .iter()
            .map(|ring| ring_bond_list(ring, mol))
            .collect();

        Self { rings, ring_bonds }
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn rings(&self) -> &[Vec<NodeIndex>] {
        &self.rings
    }

    pub fn is_ring_atom(&self, atom: NodeIndex) -> bool {
        self.rings.iter().any(|ring| ring.contains(&atom))
    }

    pub fn is_ring_bond(&self, bond: EdgeIndex) -> bool {
        self.ring_bonds.iter().any(|ring| ring.contains(&bond))
    }

    pub fn num_atom_rings(&self, atom: NodeIndex) -> usize {
        self.rings.iter().filter(|ring| ring.contains(&atom)).count()
    }

    pub fn num_bond_rings(&self, bond: EdgeIndex) -> usize {
        self.ring_bonds
            .iter()
            .filter(|ring| ring.contains(&bond))
            .count()
    }

    pub fn smallest_ring_size(&self, atom: NodeIndex) -> Option<usize> {
        self.rings
            .iter()
            .filter(|ring| ring.contains(&atom))
            .map(|ring| ring.len())
            .min()
    }

    pub fn smallest_bond_ring_size(&self, bond: EdgeIndex) -> Option<usize> {
        self.ring_bonds
            .iter()
            .filter(|ring| ring.contains(&bond))
            .map(|ring| ring.len())
            .min()
    }

    pub fn is_atom_in_ring_of_size(&self, atom: NodeIndex, size: usize) -> bool {
        self.rings
            .iter()
            .any(|ring| ring.len() == size && ring.contains(&atom))
    }

    /// An atom with at least three ring bonds that sits in two rings sharing
    /// two or more bonds.
    pub fn is_bridgehead(&self, atom: NodeIndex) -> bool {
        let containing: Vec<usize> = (0..self.rings.len())
            .filter(|&i| self.rings[i].contains(&atom))
            .collect();
        if containing.len() < 2 {
            return false;
        }
        let mut atom_ring_bonds: Vec<EdgeIndex> = containing
            .iter()
            .flat_map(|&i| {
                let ring = &self.rings[i];
                let pos = ring.iter().position(|&a| a == atom).unwrap_or(0);
                let len = ring.len();
                let before = self.ring_bonds[i][(pos + len - 1) % len];
                let after = self.ring_bonds[i][pos];
                [before, after]
            })
            .collect();
        atom_ring_bonds.sort_unstable();
        atom_ring_bonds.dedup();
        if atom_ring_bonds.len() < 3 {
            return false;
        }
        containing.iter().enumerate().any(|(k, &i)| {
            containing[k + 1..].iter().any(|&j| {
                self.ring_bonds[i]
                    .iter()
                    .filter(|b| self.ring_bonds[j].contains(b))
                    .count()
                    >= 2
            })
        })
    }

    pub fn expected_ring_count<A, B>(mol: &Mol<A, B>) -> usize {
        let v = mol.atom_count();
        let e = mol.bond_count();
        let c = connected_components(mol.graph());
        (e + c).saturating_sub(v)
    }
}

/// Bond `i` of the returned list joins ring atoms `i` and `i + 1`.
fn ring_bond_list<A, B>(ring: &[NodeIndex], mol: &Mol<A, B>) -> Vec<EdgeIndex> {
    let len = ring.len();
    (0..len)
        .filter_map(|i| mol.bond_between(ring[i], ring[(i + 1) % len]))
        .collect()
}

fn horton_candidates<A, B>(mol: &Mol<A, B>) -> Vec<Vec<NodeIndex>> {
    let n = mol.atom_count();
    let (dist, pred) = bfs_tables(mol, n);

    let mut candidates: Vec<Vec<NodeIndex>> = Vec::new();

    for edge in mol.bonds() {
        let Some((u, v)) = mol.bond_endpoints(edge) else {
            continue;
        };
        for w in 0..n {
            let du = dist[w][u.index()];
            let dv = dist[w][v.index()];
            if du == u32::MAX || dv == u32::MAX {
                continue;
            }
            if du as usize + dv as usize + 1 < 3 {
                continue;
            }
            let path_u = walk_back(&pred, w, u);
            let path_v = walk_back(&pred, w, v);
            if path_u.is_empty() || path_v.is_empty() {
                continue;
            }
            if path_u[1..].iter().any(|node| path_v[1..].contains(node)) {
                continue;
            }
            let mut ring = path_u;
            ring.extend(path_v[1..].iter().rev());
            candidates.push(ring);
        }
    }

    candidates.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    candidates.dedup();
    candidates
}

type BfsTables = (Vec<Vec<u32>>, Vec<Vec<Option<NodeIndex>>>);

/// All-pairs BFS distances and shortest-path predecessors.
fn bfs_tables<A, B>(mol: &Mol<A, B>, n: usize) -> BfsTables {
    let mut dist = vec![vec![u32::MAX; n]; n];
    let mut pred = vec![vec![None; n]; n];
    for src in 0..n {
        dist[src][src] = 0;
        let mut queue = VecDeque::from([NodeIndex::new(src)]);
        while let Some(cur) = queue.pop_front() {
            let d = dist[src][cur.index()];
            for nb in mol.neighbors(cur) {
                if dist[src][nb.index()] == u32::MAX {
                    dist[src][nb.index()] = d + 1;
                    pred[src][nb.index()] = Some(cur);
                    queue.push_back(nb);
                }
            }
        }
    }
    (dist, pred)
}

/// Shortest path from `src` to `dst`, source first.
fn walk_back(pred: &[Vec<Option<NodeIndex>>], src: usize, dst: NodeIndex) -> Vec<NodeIndex> {
    let mut path = vec![dst];
    let mut cur = dst;
    while cur.index() != src {
        match pred[src][cur.index()] {
            Some(p) => {
                path.push(p);
                cur = p;
            }
            None => return vec![],
        }
    }
    path.reverse();
    path
}

fn edge_bitvector<A, B>(ring: &[NodeIndex], mol: &Mol<A, B>) -> Vec<u64> {
    let mut bv = vec![0u64; mol.bond_count().div_ceil(64)];
    for edge in ring_bond_list(ring, mol) {
        let idx = edge.index();
        bv[idx / 64] |= 1u64 << (idx % 64);
    }
    bv
}

fn select_independent_rings<A, B>(
    candidates: &[Vec<NodeIndex>],
    num_needed: usize,
    mol: &Mol<A, B>,
) -> Vec<Vec<NodeIndex>> {
    let mut result = Vec::with_capacity(num_needed);
    let mut basis: Vec<Vec<u64>> = Vec::with_capacity(num_needed);

    for ring in candidates {
        if result.len() >= num_needed {
            break;
        }
        let bv = edge_bitvector(ring, mol);
        if bv.iter().all(|&w| w == 0) {
            continue;
        }
        if try_add_to_basis(&mut basis, bv) {
            result.push(normalize_ring(ring));
        }
    }

    result.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    result
}

/// GF(2) elimination against the current basis; keeps `candidate` if it is
/// independent.
fn try_add_to_basis(basis: &mut Vec<Vec<u64>>, candidate: Vec<u64>) -> bool {
    let mut v = candidate;
    for row in basis.iter() {
        if let Some(p) = leading_bit(row) {
            if v[p / 64] & (1u64 << (p % 64)) != 0 {
                for (vw, rw) in v.iter_mut().zip(row.iter()) {
                    *vw ^= *rw;
                }
            }
        }
    }
    if v.iter().all(|&w| w == 0) {
        return false;
    }
    basis.push(v);
    true
}

fn leading_bit(bv: &[u64]) -> Option<usize> {
    bv.iter()
        .enumerate()
        .find(|(_, &word)| word != 0)
        .map(|(i, &word)| i * 64 + word.trailing_zeros() as usize)
}

/// Rotates the ring to start at its lowest atom and walks toward the lower
/// of its two neighbors.
fn normalize_ring(ring: &[NodeIndex]) -> Vec<NodeIndex> {
    let Some(min_pos) = ring
        .iter()
        .enumerate()
        .min_by_key(|&(_, idx)| idx)
        .map(|(i, _)| i)
    else {
        return vec![];
    };

    let len = ring.len();
    let mut normalized: Vec<NodeIndex> = (0..len).map(|i| ring[(min_pos + i) % len]).collect();
    if len > 2 && normalized[1] > normalized[len - 1] {
        normalized[1..].reverse();
    }
    normalized
}
