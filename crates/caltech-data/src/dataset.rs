// Dataset trait: unified interface for indexed data sources

use crate::error::Result;

/// A dataset is an indexed collection of `(sample, target)` pairs.
///
/// `get` takes `&self`: implementations apply any transforms to a fresh value
/// and never mutate stored data.
pub trait Dataset {
    /// What `get` returns as the input half of a pair.
    type Sample;
    /// What `get` returns as the label half of a pair.
    type Target;

    /// Total number of samples in the dataset.
    fn len(&self) -> usize;

    /// Whether the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieve the pair at position `index`.
    ///
    /// Fails with [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange)
    /// if `index >= self.len()`.
    fn get(&self, index: usize) -> Result<(Self::Sample, Self::Target)>;

    /// Optional human-readable name.
    fn name(&self) -> &str {
        "dataset"
    }
}
