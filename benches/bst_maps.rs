use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use splay_collections::bst::{Tree, Unbalanced};
use splay_collections::compare::Natural;
use splay_collections::splay_tree::SplayMap;
use std::collections::BTreeMap;

const NUM_OF_OPERATIONS: usize = 1000;

fn keys() -> Vec<(u32, u32)> {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    (0..NUM_OF_OPERATIONS)
        .map(|_| (rng.next_u32(), rng.next_u32()))
        .collect()
}

fn bench_btreemap_insert(c: &mut Criterion) {
    let pairs = keys();
    c.bench_function("bench btreemap insert", |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &(key, val) in &pairs {
                map.insert(key, val);
            }
        })
    });
}

fn bench_btreemap_get(c: &mut Criterion) {
    let pairs = keys();
    let map: BTreeMap<u32, u32> = pairs.iter().cloned().collect();
    c.bench_function("bench btreemap get", move |b| {
        b.iter(|| {
            for (key, _) in &pairs {
                black_box(map.get(key));
            }
        })
    });
}

fn bench_splay_tree_insert(c: &mut Criterion) {
    let pairs = keys();
    c.bench_function("bench splay_tree insert", |b| {
        b.iter(|| {
            let mut map = SplayMap::new();
            for &(key, val) in &pairs {
                map.insert(key, val);
            }
        })
    });
}

fn bench_splay_tree_get(c: &mut Criterion) {
    let pairs = keys();
    let mut map: SplayMap<u32, u32> = pairs.iter().cloned().collect();
    c.bench_function("bench splay_tree get", move |b| {
        b.iter(|| {
            for (key, _) in &pairs {
                black_box(map.get(key));
            }
        })
    });
}

fn bench_splay_tree_get_hot_key(c: &mut Criterion) {
    let pairs = keys();
    let mut map: SplayMap<u32, u32> = pairs.iter().cloned().collect();
    let hot = pairs[0].0;
    c.bench_function("bench splay_tree get hot key", move |b| {
        b.iter(|| black_box(map.get(&hot).cloned()))
    });
}

fn bench_unbalanced_insert(c: &mut Criterion) {
    let pairs = keys();
    c.bench_function("bench unbalanced insert", |b| {
        b.iter(|| {
            let mut tree: Tree<u32, u32, Natural, Unbalanced> = Tree::default();
            for &(key, val) in &pairs {
                tree.try_insert(key, val).unwrap();
            }
        })
    });
}

fn bench_unbalanced_get(c: &mut Criterion) {
    let pairs = keys();
    let tree: Tree<u32, u32, Natural, Unbalanced> =
        Tree::from_iter_with(pairs.iter().cloned(), Natural, Default::default()).unwrap();
    c.bench_function("bench unbalanced get", move |b| {
        b.iter(|| {
            for (key, _) in &pairs {
                black_box(tree.peek(key));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_btreemap_get,
    bench_btreemap_insert,
    bench_splay_tree_get,
    bench_splay_tree_get_hot_key,
    bench_splay_tree_insert,
    bench_unbalanced_get,
    bench_unbalanced_insert,
);
criterion_main!(benches);
