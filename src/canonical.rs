use std::hash::{Hash, Hasher};

use petgraph::graph::NodeIndex;

use crate::bond::BondOrder;
use crate::mol::Mol;
use crate::traits::{
    HasAromaticity, HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount, HasIsotope,
};

struct Fnv1aHasher(u64);

impl Fnv1aHasher {
    fn new() -> Self {
        Self(0xcbf29ce484222325)
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(0x100000001b3);
        }
    }
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct AtomInvariant {
    atomic_num: u8,
    degree: u8,
    hydrogen_count: u8,
    formal_charge: i8,
    is_aromatic: bool,
    isotope: u16,
    bond_orders: [u8; 6],
    extra: u64,
}

fn order_slot(order: BondOrder) -> usize {
    match order {
        BondOrder::Single => 0,
        BondOrder::Double => 1,
        BondOrder::Triple => 2,
        BondOrder::Aromatic => 3,
        BondOrder::Dative => 4,
        BondOrder::Zero => 5,
    }
}

fn atom_invariant<A, B>(mol: &Mol<A, B>, idx: NodeIndex, extra: u64) -> AtomInvariant
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge + HasAromaticity + HasIsotope,
    B: HasBondOrder,
{
    let atom = mol.atom(idx);
    let mut bond_orders = [0u8; 6];
    let mut degree = 0u8;
    for edge in mol.bonds_of(idx) {
        degree = degree.saturating_add(1);
        let slot = order_slot(mol.bond(edge).bond_order());
        bond_orders[slot] = bond_orders[slot].saturating_add(1);
    }
    AtomInvariant {
        atomic_num: atom.atomic_num(),
        degree,
        hydrogen_count: atom.hydrogen_count(),
        formal_charge: atom.formal_charge(),
        is_aromatic: atom.is_aromatic(),
        isotope: atom.isotope(),
        bond_orders,
        extra,
    }
}

fn ranks_from_values(values: &[u64]) -> Vec<usize> {
    let n = values.len();
    let mut indices: Vec<usize> = (0..n).collect();
    indices.sort_by_key(|&i| values[i]);
    let mut ranks = vec![0usize; n];
    for i in 1..n {
        ranks[indices[i]] = if values[indices[i]] == values[indices[i - 1]] {
            ranks[indices[i - 1]]
        } else {
            i
        };
    }
    ranks
}

fn count_distinct(ranks: &[usize]) -> usize {
    let mut sorted: Vec<usize> = ranks.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len()
}

fn morgan_refine<A, B>(mol: &Mol<A, B>, ranks: &mut Vec<usize>)
where
    B: HasBondOrder,
{
    let n = mol.atom_count();
    let mut prev_distinct = count_distinct(ranks);

    loop {
        let mut new_values = vec![0u64; n];
        for node in mol.atoms() {
            let i = node.index();
            let mut neighbor_keys: Vec<(usize, usize)> = mol
                .bonds_of(node)
                .filter_map(|edge| {
                    let nb = mol.other_atom(edge, node)?;
                    Some((order_slot(mol.bond(edge).bond_order()), ranks[nb.index()]))
                })
                .collect();
            neighbor_keys.sort_unstable();

            let mut h = Fnv1aHasher::new();
            ranks[i].hash(&mut h);
            neighbor_keys.hash(&mut h);
            new_values[i] = h.finish();
        }
        let new_ranks = ranks_from_values(&new_values);
        let distinct = count_distinct(&new_ranks);
        if distinct <= prev_distinct {
            return;
        }
        *ranks = new_ranks;
        prev_distinct = distinct;
    }
}

/// Symmetry classes of the atoms: equal ranks mean topologically equivalent
/// atoms. Ties are never broken.
///
/// `extra` supplies one additional invariant per atom (missing entries count
/// as zero); the stereo perception pass uses it to mark candidate centers.
pub fn rank_atoms<A, B>(mol: &Mol<A, B>, extra: &[u64]) -> Vec<usize>
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge + HasAromaticity + HasIsotope,
    B: HasBondOrder,
{
    let values: Vec<u64> = mol
        .atoms()
        .map(|idx| {
            let inv = atom_invariant(mol, idx, extra.get(idx.index()).copied().unwrap_or(0));
            let mut h = Fnv1aHasher::new();
            inv.hash(&mut h);
            h.finish()
        })
        .collect();
    let mut ranks = ranks_from_values(&values);
    morgan_refine(mol, &mut ranks);
    ranks
}
