//! No-repeat random selection for the highlights broadcast.
use rand::Rng;
use rand::seq::index;
use std::collections::HashSet;
use std::hash::Hash;

/// Draw `k` items from `pool`, avoiding anything in `excluded`.
///
/// When fewer than `k` unseen items remain the exclusion set is reset and the whole pool is
/// eligible again. The draw is uniform without replacement and yields `min(k, eligible)` items.
/// Returns the selection and the exclusion set to persist: the (possibly reset) input set plus
/// everything just selected.
pub fn pick<T, R>(
    pool: &[T],
    k: usize,
    excluded: &HashSet<T>,
    rng: &mut R,
) -> (Vec<T>, HashSet<T>)
where
    T: Clone + Eq + Hash,
    R: Rng + ?Sized,
{
    let mut seen = HashSet::with_capacity(pool.len());
    let unique: Vec<&T> = pool.iter().filter(|item| seen.insert(*item)).collect();

    let unseen: Vec<&T> = unique
        .iter()
        .copied()
        .filter(|item| !excluded.contains(*item))
        .collect();

    let (eligible, mut next_excluded) = if unseen.len() < k {
        tracing::debug!(target = "picker", pool = unique.len(), unseen = unseen.len(), k, "exclusion set reset");
        (unique, HashSet::new())
    } else {
        (unseen, excluded.clone())
    };

    let amount = k.min(eligible.len());
    let selected: Vec<T> = index::sample(rng, eligible.len(), amount)
        .into_iter()
        .map(|i| eligible[i].clone())
        .collect();
    next_excluded.extend(selected.iter().cloned());
    (selected, next_excluded)
}
