use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cgrcrab::{
    clone_subgraphs, Atom, AtomNumber, Bond, BondOrder, Cgr, DynAtom, DynBond, Mol,
    ReactionContainer,
};

const S: BondOrder = BondOrder::Single;

/// Chain of `len` carbons substituted at its end, plus `copies` lone carbons
/// each bonded to a fresh oxygen as partial copies of the chain.
fn chain_with_copies(len: usize, copies: usize) -> Cgr {
    let mut g = Cgr::new();
    for n in 1..=len {
        g.add_atom_numbered(n, DynAtom::new(6)).unwrap();
        if n > 1 {
            g.connect(n - 1, n, DynBond::unchanged(S)).unwrap();
        }
    }
    let br = len + 1;
    let o = len + 2;
    g.add_atom_numbered(br, DynAtom::new(35)).unwrap();
    g.add_atom_numbered(o, DynAtom::new(8)).unwrap();
    g.connect(len, br, DynBond::broken(S)).unwrap();
    g.connect(len, o, DynBond::formed(S)).unwrap();

    let mut next = o + 1;
    for _ in 0..copies {
        g.add_atom_numbered(next, DynAtom::new(6)).unwrap();
        g.add_atom_numbered(next + 1, DynAtom::new(8)).unwrap();
        g.connect(next, next + 1, DynBond::formed(S)).unwrap();
        next += 2;
    }
    g
}

fn mol(atoms: &[(AtomNumber, u8)], bonds: &[(AtomNumber, AtomNumber)]) -> Mol<Atom, Bond> {
    let mut m = Mol::new();
    for &(n, z) in atoms {
        m.add_atom_numbered(n, Atom::new(z)).unwrap();
    }
    for &(a, b) in bonds {
        m.connect(a, b, Bond::new(S)).unwrap();
    }
    m
}

fn bench_no_match(c: &mut Criterion) {
    let g = chain_with_copies(2, 0);
    c.bench_function("no_match_bromoethane", |b| {
        b.iter(|| black_box(clone_subgraphs(&g).unwrap()))
    });
}

fn bench_single_copy(c: &mut Criterion) {
    let g = chain_with_copies(2, 1);
    c.bench_function("single_copy_ethyl", |b| {
        b.iter(|| black_box(clone_subgraphs(&g).unwrap()))
    });
}

fn bench_many_copies(c: &mut Criterion) {
    let g = chain_with_copies(8, 16);
    c.bench_function("many_copies_octyl", |b| {
        b.iter(|| black_box(clone_subgraphs(&g).unwrap()))
    });
}

fn bench_balance(c: &mut Criterion) {
    let rxn = ReactionContainer::new(
        vec![mol(&[(1, 6), (2, 6), (3, 35)], &[(1, 2), (2, 3)])],
        vec![mol(&[(1, 6), (2, 6), (4, 8), (5, 6)], &[(1, 2), (2, 4), (4, 5)])],
    );
    c.bench_function("balance_substituents", |b| {
        b.iter(|| black_box(rxn.balance_substituents().unwrap()))
    });
}

criterion_group!(
    benches,
    bench_no_match,
    bench_single_copy,
    bench_many_copies,
    bench_balance,
);
criterion_main!(benches);
