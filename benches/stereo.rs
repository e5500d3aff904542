use criterion::{black_box, criterion_group, criterion_main, Criterion};
use petgraph::graph::NodeIndex;

use stereocrab::{
    add_wavy_bonds_for_stereo_any, find_potential_stereo, pick_bonds_to_wedge, Atom, Bond,
    BondOrder, BondStereo, Chirality, Mol, StereoConfig,
};

fn atom(atomic_num: u8, hydrogen_count: u8) -> Atom {
    Atom {
        atomic_num,
        hydrogen_count,
        ..Atom::default()
    }
}

/// myo-inositol: six interdependent ring centers.
fn inositol() -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    let ring: Vec<NodeIndex> = (0..6)
        .map(|_| {
            let c = mol.add_atom(atom(6, 1));
            let o = mol.add_atom(atom(8, 1));
            mol.add_bond(c, o, Bond::new(BondOrder::Single));
            c
        })
        .collect();
    for i in 0..6 {
        mol.add_bond(ring[i], ring[(i + 1) % 6], Bond::new(BondOrder::Single));
    }
    mol
}

/// Linear polyene with `n` double bonds, every one flagged unknown.
fn polyene(n: usize) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    let mut prev = mol.add_atom(atom(6, 3));
    for i in 0..2 * n {
        let next = mol.add_atom(atom(6, 1));
        let order = if i % 2 == 0 {
            BondOrder::Single
        } else {
            BondOrder::Double
        };
        let mut bond = Bond::new(order);
        if order == BondOrder::Double {
            bond.stereo = BondStereo::Any;
        }
        mol.add_bond(prev, next, bond);
        prev = next;
    }
    let last = mol.add_atom(atom(6, 3));
    mol.add_bond(prev, last, Bond::new(BondOrder::Single));
    mol
}

/// Chain of `n` CH(F) centers, all tagged.
fn fluorinated_chain(n: usize) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    let mut prev = mol.add_atom(atom(6, 3));
    for i in 0..n {
        let c = mol.add_atom(Atom {
            chirality: if i % 2 == 0 { Chirality::Cw } else { Chirality::Ccw },
            ..atom(6, 1)
        });
        let f = mol.add_atom(atom(9, 0));
        mol.add_bond(prev, c, Bond::new(BondOrder::Single));
        mol.add_bond(c, f, Bond::new(BondOrder::Single));
        prev = c;
    }
    let last = mol.add_atom(atom(6, 3));
    mol.add_bond(prev, last, Bond::new(BondOrder::Single));
    mol
}

fn bench_perception(c: &mut Criterion) {
    let config = StereoConfig::default();
    let legacy = StereoConfig {
        use_legacy_perception: true,
        ..StereoConfig::default()
    };
    let inositol = inositol();
    let chain = fluorinated_chain(40);

    let mut group = c.benchmark_group("perception");
    group.bench_function("inositol", |b| {
        b.iter(|| {
            let mut mol = inositol.clone();
            black_box(find_potential_stereo(&mut mol, false, true, black_box(&config)))
        })
    });
    group.bench_function("inositol_legacy", |b| {
        b.iter(|| {
            let mut mol = inositol.clone();
            black_box(find_potential_stereo(&mut mol, false, true, black_box(&legacy)))
        })
    });
    group.bench_function("chain_40", |b| {
        b.iter(|| {
            let mut mol = chain.clone();
            black_box(find_potential_stereo(&mut mol, true, false, black_box(&config)))
        })
    });
    group.finish();
}

fn bench_depiction(c: &mut Criterion) {
    let chain = fluorinated_chain(40);
    let polyene = polyene(30);

    let mut group = c.benchmark_group("depiction");
    group.bench_function("pick_wedges_chain_40", |b| {
        b.iter(|| black_box(pick_bonds_to_wedge(black_box(&chain)).unwrap()))
    });
    group.bench_function("wavy_polyene_30", |b| {
        b.iter(|| {
            let mut mol = polyene.clone();
            add_wavy_bonds_for_stereo_any(&mut mol, true, 0);
            black_box(mol)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_perception, bench_depiction);
criterion_main!(benches);
