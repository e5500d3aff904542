//! Hand-built molecules for unit tests.

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::atom::{Atom, Chirality};
use crate::bond::{Bond, BondOrder};
use crate::mol::Mol;

pub(crate) fn n(i: usize) -> NodeIndex {
    NodeIndex::new(i)
}

pub(crate) fn e(i: usize) -> EdgeIndex {
    EdgeIndex::new(i)
}

pub(crate) fn order(code: u8) -> BondOrder {
    match code {
        0 => BondOrder::Zero,
        2 => BondOrder::Double,
        3 => BondOrder::Triple,
        4 => BondOrder::Aromatic,
        5 => BondOrder::Dative,
        _ => BondOrder::Single,
    }
}

/// Builds a molecule from `(atomic_num, implicit_h)` atoms and
/// `(begin, end, order_code)` bonds. Order codes: 0 zero, 1 single,
/// 2 double, 3 triple, 4 aromatic, 5 dative.
pub(crate) fn mol_from(atoms: &[(u8, u8)], bonds: &[(usize, usize, u8)]) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    for &(atomic_num, hydrogen_count) in atoms {
        mol.add_atom(Atom {
            atomic_num,
            hydrogen_count,
            ..Atom::default()
        });
    }
    for &(a, b, code) in bonds {
        mol.add_bond(n(a), n(b), Bond::new(order(code)));
    }
    mol
}

pub(crate) fn set_chirality(mol: &mut Mol<Atom, Bond>, atom: usize, chirality: Chirality) {
    mol.atom_mut(n(atom)).chirality = chirality;
}

/// Carbon chain `C0-C1-...` with the given implicit hydrogen counts.
pub(crate) fn chain(hydrogens: &[u8]) -> Mol<Atom, Bond> {
    let atoms: Vec<(u8, u8)> = hydrogens.iter().map(|&h| (6, h)).collect();
    let bonds: Vec<(usize, usize, u8)> = (1..hydrogens.len()).map(|i| (i - 1, i, 1)).collect();
    mol_from(&atoms, &bonds)
}
