// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Shuffles samples and splits them into two sets:
//   - Training set:   consumed by the epoch/batch loop
//   - Validation set: held out from the batch loop
//
// The shuffle runs over the whole combined corpus before the
// cut, so the class mix in each set is whatever the shuffle
// produced. There is no stratification.
//
// Sizes:
//   validation = floor(N * val_fraction)
//   train      = N - validation
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom,
// so every permutation is equally likely.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use rand::{seq::SliceRandom, Rng};

/// Number of items that go to validation for a corpus of `total`.
pub fn validation_len(total: usize, val_fraction: f64) -> usize {
    ((total as f64) * val_fraction).floor() as usize
}

/// Shuffle `samples` with `rng` and split into (train, validation).
///
/// # Arguments
/// * `samples`      - All available samples (consumed by this function)
/// * `val_fraction` - Proportion held out for validation, e.g. 0.2 = 20%
/// * `rng`          - Source of randomness for the shuffle
pub fn split_train_val<T, R>(
    mut samples:  Vec<T>,
    val_fraction: f64,
    rng:          &mut R,
) -> (Vec<T>, Vec<T>)
where
    R: Rng + ?Sized,
{
    samples.shuffle(rng);

    let total    = samples.len();
    let split_at = total - validation_len(total, val_fraction).min(total);

    // split_off(n) leaves [0..n) in `samples` and returns [n..total)
    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation ({}% / {}%)",
        samples.len(),
        val.len(),
        (samples.len() * 100) / total.max(1),
        (val.len()     * 100) / total.max(1),
    );

    (samples, val)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, val)      = split_train_val(items, 0.2, &mut rng());
        assert_eq!(train.len(), 80);
        assert_eq!(val.len(),   20);
    }

    #[test]
    fn test_validation_size_is_floored() {
        // 7 * 0.2 = 1.4 → 1 validation item, 6 training
        let items: Vec<usize> = (0..7).collect();
        let (train, val)      = split_train_val(items, 0.2, &mut rng());
        assert_eq!(val.len(),   1);
        assert_eq!(train.len(), 6);
    }

    #[test]
    fn test_small_corpus_rounds_validation_down() {
        // floor(3 * 0.2) = 0 and floor(4 * 0.2) = 0: everything trains
        for n in [3usize, 4] {
            let (train, val) = split_train_val((0..n).collect::<Vec<_>>(), 0.2, &mut rng());
            assert_eq!((train.len(), val.len()), (n, 0), "n = {n}");
        }
        // floor(5 * 0.2) = 1
        let (train, val) = split_train_val((0..5).collect::<Vec<usize>>(), 0.2, &mut rng());
        assert_eq!((train.len(), val.len()), (4, 1));
        assert_eq!(validation_len(3, 0.5), 1);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (train, val)      = split_train_val(items, 0.3, &mut rng());

        let mut all: Vec<usize> = train.into_iter().chain(val).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_single_item_goes_to_training() {
        let (train, val) = split_train_val(vec!["only"], 0.2, &mut rng());
        assert_eq!(train, vec!["only"]);
        assert!(val.is_empty());
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, val)      = split_train_val(items, 0.2, &mut rng());
        assert!(train.is_empty());
        assert!(val.is_empty());
    }

    #[test]
    fn test_shuffle_changes_order() {
        let items: Vec<usize> = (0..40).collect();
        let orders: Vec<Vec<usize>> = (0..5u64)
            .map(|seed| {
                let mut r = StdRng::seed_from_u64(seed);
                let (train, val) = split_train_val(items.clone(), 0.2, &mut r);
                train.into_iter().chain(val).collect()
            })
            .collect();

        assert!(orders.iter().any(|o| *o != items));
        assert!(orders.windows(2).any(|w| w[0] != w[1]));
    }
}
