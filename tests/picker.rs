use catalog_bot::picker::pick;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

fn ids(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("p{i}")).collect()
}

fn as_set(v: &[String]) -> HashSet<String> {
    v.iter().cloned().collect()
}

#[test]
fn nine_of_nine_then_reset() {
    let pool = ids(9);
    let mut rng = StdRng::seed_from_u64(7);

    let (first, excluded) = pick(&pool, 9, &HashSet::new(), &mut rng);
    assert_eq!(first.len(), 9);
    assert_eq!(as_set(&first), as_set(&pool));
    assert_eq!(excluded, as_set(&pool));

    // Nothing unseen is left, so the second draw starts over with the full pool.
    let (second, excluded) = pick(&pool, 9, &excluded, &mut rng);
    assert_eq!(second.len(), 9);
    assert_eq!(as_set(&second), as_set(&pool));
    assert_eq!(excluded, as_set(&pool));
}

#[test]
fn never_repeats_within_a_call() {
    let pool = ids(30);
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let (picked, _) = pick(&pool, 10, &HashSet::new(), &mut rng);
        assert_eq!(picked.len(), 10);
        assert_eq!(as_set(&picked).len(), 10, "seed {seed}");
    }
}

#[test]
fn avoids_excluded_until_exhausted() {
    let pool = ids(10);
    let mut rng = StdRng::seed_from_u64(42);
    let mut excluded = HashSet::new();
    let mut shown = HashSet::new();
    for _ in 0..2 {
        let (picked, next) = pick(&pool, 5, &excluded, &mut rng);
        for id in &picked {
            assert!(shown.insert(id.clone()), "{id} shown twice before reset");
        }
        excluded = next;
    }
    assert_eq!(shown, as_set(&pool));

    // Pool exhausted: third draw resets and the exclusion set holds only the new picks.
    let (picked, next) = pick(&pool, 5, &excluded, &mut rng);
    assert_eq!(picked.len(), 5);
    assert_eq!(next, as_set(&picked));
}

#[test]
fn k_larger_than_pool_returns_whole_pool() {
    let pool = ids(3);
    let mut rng = StdRng::seed_from_u64(1);
    let (picked, excluded) = pick(&pool, 9, &HashSet::new(), &mut rng);
    assert_eq!(as_set(&picked), as_set(&pool));
    assert_eq!(excluded.len(), 3);
}

#[test]
fn stale_excluded_ids_are_carried_until_reset() {
    let pool = ids(6);
    let mut excluded = as_set(&ids(2));
    excluded.insert("gone".to_string());
    let mut rng = StdRng::seed_from_u64(3);
    let (picked, next) = pick(&pool, 2, &excluded, &mut rng);
    assert!(picked.iter().all(|id| !excluded.contains(id)));
    assert!(next.contains("gone"));
    assert_eq!(next.len(), excluded.len() + 2);
}

#[test]
fn same_seed_same_draw() {
    let pool = ids(20);
    let a = pick(&pool, 5, &HashSet::new(), &mut StdRng::seed_from_u64(99)).0;
    let b = pick(&pool, 5, &HashSet::new(), &mut StdRng::seed_from_u64(99)).0;
    assert_eq!(a, b);
}

#[test]
fn empty_pool_yields_nothing() {
    let pool: Vec<String> = Vec::new();
    let (picked, excluded) = pick(&pool, 4, &HashSet::new(), &mut StdRng::seed_from_u64(0));
    assert!(picked.is_empty());
    assert!(excluded.is_empty());
}
