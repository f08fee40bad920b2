// Stratified train/validation split over a list of class labels
//
// Positions are grouped by label. Each label's train count is its
// proportional share of n_train, floored, with the leftover samples handed
// to the labels with the largest fractional remainders (ties broken at
// random). Validation counts are allocated the same way from what is left.
// Members of each label are shuffled before being dealt out, and both
// output lists are shuffled at the end.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

/// A seeded RNG for reproducible splits.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Partition `0..labels.len()` into `(train, val)` preserving the relative
/// frequency of every label.
///
/// `n_train = floor(train_fraction * n)` and every other position goes to
/// validation. Fails if the fraction is outside (0, 1), if either side
/// would be empty, if any label has fewer than 2 members, or if either side
/// is too small to hold one member of every label.
pub fn train_val_split<R: Rng + ?Sized>(
    labels: &[usize],
    train_fraction: f64,
    rng: &mut R,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(Error::InvalidFraction(train_fraction));
    }

    let n = labels.len();
    let n_train = (train_fraction * n as f64).floor() as usize;
    let n_val = n - n_train;
    if n_train == 0 {
        return Err(Error::Stratification(format!(
            "with {n} samples and train fraction {train_fraction}, the train split would be empty"
        )));
    }
    if n_val == 0 {
        return Err(Error::Stratification(format!(
            "with {n} samples and train fraction {train_fraction}, the validation split would be empty"
        )));
    }

    // Members of each label, in position order, labels sorted ascending.
    let mut by_label: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (pos, &label) in labels.iter().enumerate() {
        by_label.entry(label).or_default().push(pos);
    }
    let mut strata: Vec<(usize, Vec<usize>)> = by_label.into_iter().collect();
    let n_classes = strata.len();

    if let Some((label, members)) = strata.iter().find(|(_, m)| m.len() < 2) {
        return Err(Error::Stratification(format!(
            "label {label} has only {} member(s); every label needs at least 2",
            members.len()
        )));
    }
    if n_train < n_classes {
        return Err(Error::Stratification(format!(
            "train split of {n_train} samples cannot hold all {n_classes} labels"
        )));
    }
    if n_val < n_classes {
        return Err(Error::Stratification(format!(
            "validation split of {n_val} samples cannot hold all {n_classes} labels"
        )));
    }

    let counts: Vec<usize> = strata.iter().map(|(_, m)| m.len()).collect();
    let train_counts = approximate_mode(&counts, n_train, rng);
    let remaining: Vec<usize> = counts
        .iter()
        .zip(&train_counts)
        .map(|(&c, &t)| c - t)
        .collect();
    let val_counts = approximate_mode(&remaining, n_val, rng);

    let mut train = Vec::with_capacity(n_train);
    let mut val = Vec::with_capacity(n_val);
    for (i, (_, members)) in strata.iter_mut().enumerate() {
        members.shuffle(rng);
        let (t, v) = (train_counts[i], val_counts[i]);
        train.extend_from_slice(&members[..t]);
        val.extend_from_slice(&members[t..t + v]);
    }
    train.shuffle(rng);
    val.shuffle(rng);

    log::debug!(
        "stratified split: {} train / {} val over {n_classes} labels",
        train.len(),
        val.len()
    );
    Ok((train, val))
}

/// Distribute `n_draws` over classes proportionally to `counts`.
///
/// The result sums to `n_draws` (when `n_draws <= counts.iter().sum()`)
/// and never exceeds a class's count.
fn approximate_mode<R: Rng + ?Sized>(counts: &[usize], n_draws: usize, rng: &mut R) -> Vec<usize> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0; counts.len()];
    }

    let continuous: Vec<f64> = counts
        .iter()
        .map(|&c| c as f64 / total as f64 * n_draws as f64)
        .collect();
    let mut floored: Vec<usize> = continuous.iter().map(|v| v.floor() as usize).collect();
    let mut need = n_draws.saturating_sub(floored.iter().sum());

    if need > 0 {
        let remainder: Vec<f64> = continuous
            .iter()
            .zip(&floored)
            .map(|(&c, &f)| c - f as f64)
            .collect();
        let mut values = remainder.clone();
        values.sort_by(|a, b| b.total_cmp(a));
        values.dedup();

        for value in values {
            let tied: Vec<usize> = (0..remainder.len())
                .filter(|&i| remainder[i] == value)
                .collect();
            let take = tied.len().min(need);
            for &i in tied.choose_multiple(rng, take) {
                floored[i] += 1;
            }
            need -= take;
            if need == 0 {
                break;
            }
        }
    }
    floored
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn count_label(indexes: &[usize], labels: &[usize], label: usize) -> usize {
        indexes.iter().filter(|&&i| labels[i] == label).count()
    }

    #[test]
    fn even_two_class_split() {
        let labels: Vec<usize> = (0..100).map(|i| i % 2).collect();
        let (train, val) = train_val_split(&labels, 0.5, &mut seeded(0)).unwrap();
        assert_eq!(train.len(), 50);
        assert_eq!(val.len(), 50);
        assert_eq!(count_label(&train, &labels, 0), 25);
        assert_eq!(count_label(&train, &labels, 1), 25);
        assert_eq!(count_label(&val, &labels, 0), 25);
        assert_eq!(count_label(&val, &labels, 1), 25);
    }

    #[test]
    fn partitions_are_disjoint_and_complete() {
        let labels: Vec<usize> = (0..57).map(|i| i % 4).collect();
        let (train, val) = train_val_split(&labels, 0.7, &mut seeded(3)).unwrap();
        let t: HashSet<_> = train.iter().copied().collect();
        let v: HashSet<_> = val.iter().copied().collect();
        assert!(t.is_disjoint(&v));
        assert_eq!(t.len() + v.len(), 57);
        assert_eq!(train.len(), 39); // floor(0.7 * 57)
    }

    #[test]
    fn proportions_within_one_sample() {
        // Uneven classes: 30, 12, 8
        let mut labels = vec![0usize; 30];
        labels.extend(vec![1; 12]);
        labels.extend(vec![2; 8]);
        let f = 0.6;
        let (train, _) = train_val_split(&labels, f, &mut seeded(11)).unwrap();
        for (label, total) in [(0usize, 30usize), (1, 12), (2, 8)] {
            let got = count_label(&train, &labels, label) as f64;
            assert!((got - f * total as f64).abs() <= 1.0, "label {label}: {got}");
        }
    }

    #[test]
    fn seeded_is_reproducible() {
        let labels: Vec<usize> = (0..40).map(|i| i % 5).collect();
        let a = train_val_split(&labels, 0.5, &mut seeded(7)).unwrap();
        let b = train_val_split(&labels, 0.5, &mut seeded(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn singleton_class_is_infeasible() {
        let labels = vec![0, 0, 0, 1];
        let err = train_val_split(&labels, 0.5, &mut seeded(0)).unwrap_err();
        assert!(matches!(err, Error::Stratification(_)));
    }

    #[test]
    fn too_few_for_all_classes() {
        let labels = vec![0, 0, 1, 1, 2, 2];
        // floor(0.2 * 6) = 1 train sample for 3 labels
        let err = train_val_split(&labels, 0.2, &mut seeded(0)).unwrap_err();
        assert!(matches!(err, Error::Stratification(_)));
    }

    #[test]
    fn bad_fraction() {
        let labels = vec![0, 0, 1, 1];
        for f in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let err = train_val_split(&labels, f, &mut seeded(0)).unwrap_err();
            assert!(matches!(err, Error::InvalidFraction(_)));
        }
    }

    #[test]
    fn empty_labels() {
        let err = train_val_split(&[], 0.5, &mut seeded(0)).unwrap_err();
        assert!(matches!(err, Error::Stratification(_)));
    }

    #[test]
    fn approximate_mode_sums_to_draws() {
        let mut rng = seeded(1);
        let counts = [5, 3, 2];
        let out = approximate_mode(&counts, 7, &mut rng);
        assert_eq!(out.iter().sum::<usize>(), 7);
        assert!(out.iter().zip(&counts).all(|(o, c)| o <= c));
    }
}
