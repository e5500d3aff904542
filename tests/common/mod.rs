#![allow(dead_code)]

use petgraph::graph::{EdgeIndex, NodeIndex};
use stereocrab::{Atom, Bond, BondOrder, Mol};

pub fn n(i: usize) -> NodeIndex {
    NodeIndex::new(i)
}

pub fn e(i: usize) -> EdgeIndex {
    EdgeIndex::new(i)
}

pub fn order(code: u8) -> BondOrder {
    match code {
        0 => BondOrder::Zero,
        2 => BondOrder::Double,
        3 => BondOrder::Triple,
        4 => BondOrder::Aromatic,
        5 => BondOrder::Dative,
        _ => BondOrder::Single,
    }
}

/// `(atomic_num, implicit_h)` atoms and `(begin, end, order_code)` bonds;
/// order codes as in [`order`].
pub fn mol_from(atoms: &[(u8, u8)], bonds: &[(usize, usize, u8)]) -> Mol<Atom, Bond> {
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

/// Copy of `mol` with atom `i` moved to `perm[i]`. Bonds keep their index
/// and direction, so per-atom bond order and chiral tags carry over.
pub fn relabel(mol: &Mol<Atom, Bond>, perm: &[usize]) -> Mol<Atom, Bond> {
    let mut inverse = vec![0; perm.len()];
    for (old, &new) in perm.iter().enumerate() {
        inverse[new] = old;
    }
    let mut out = Mol::new();
    for &old in &inverse {
        out.add_atom(mol.atom(n(old)).clone());
    }
    for bond in mol.bonds() {
        let Some((a, b)) = mol.bond_endpoints(bond) else {
            continue;
        };
        let mut copy = mol.bond(bond).clone();
        copy.stereo = match copy.stereo {
            stereocrab::BondStereo::Cis(x, y) => {
                stereocrab::BondStereo::Cis(n(perm[x.index()]), n(perm[y.index()]))
            }
            stereocrab::BondStereo::Trans(x, y) => {
                stereocrab::BondStereo::Trans(n(perm[x.index()]), n(perm[y.index()]))
            }
            other => other,
        };
        out.add_bond(n(perm[a.index()]), n(perm[b.index()]), copy);
    }
    out
}

/// Named molecules shared by the property and depiction tests.
pub fn fixtures() -> Vec<(&'static str, Mol<Atom, Bond>)> {
    vec![
        (
            "but-2-ene",
            mol_from(&[(6, 3), (6, 1), (6, 1), (6, 3)], &[(0, 1, 1), (1, 2, 2), (2, 3, 1)]),
        ),
        (
            "2,4-difluoro-3-methylpentane",
            mol_from(
                &[(6, 3), (6, 1), (9, 0), (6, 1), (6, 3), (6, 1), (6, 3), (9, 0)],
                &[(0, 1, 1), (1, 2, 1), (1, 3, 1), (3, 4, 1), (3, 5, 1), (5, 6, 1), (5, 7, 1)],
            ),
        ),
        (
            "1,4-dimethylcyclohexane",
            mol_from(
                &[(6, 1), (6, 2), (6, 2), (6, 1), (6, 2), (6, 2), (6, 3), (6, 3)],
                &[
                    (0, 1, 1),
                    (1, 2, 1),
                    (2, 3, 1),
                    (3, 4, 1),
                    (4, 5, 1),
                    (5, 0, 1),
                    (0, 6, 1),
                    (3, 7, 1),
                ],
            ),
        ),
        (
            "decalin",
            mol_from(
                &[(6, 2), (6, 2), (6, 2), (6, 1), (6, 2), (6, 2), (6, 2), (6, 2), (6, 1), (6, 2)],
                &[
                    (0, 1, 1),
                    (1, 2, 1),
                    (2, 3, 1),
                    (3, 4, 1),
                    (4, 5, 1),
                    (5, 6, 1),
                    (6, 7, 1),
                    (7, 8, 1),
                    (8, 3, 1),
                    (8, 9, 1),
                    (9, 0, 1),
                ],
            ),
        ),
        (
            "hexa-2,4-diene",
            mol_from(
                &[(6, 3), (6, 1), (6, 1), (6, 1), (6, 1), (6, 3)],
                &[(0, 1, 1), (1, 2, 2), (2, 3, 1), (3, 4, 2), (4, 5, 1)],
            ),
        ),
        (
            "chlorotetrafluorophosphorane",
            mol_from(
                &[(15, 0), (17, 0), (9, 0), (9, 0), (9, 0), (9, 0)],
                &[(0, 1, 1), (0, 2, 1), (0, 3, 1), (0, 4, 1), (0, 5, 1)],
            ),
        ),
    ]
}
