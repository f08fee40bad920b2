// Dataset combinators

use crate::dataset::Dataset;
use crate::error::{Error, Result};

/// A borrowed view exposing only the samples at the given indices.
///
/// Pairs with [`Caltech::stratified_sampling`](crate::Caltech::stratified_sampling)
/// to turn index lists into train/validation datasets.
#[derive(Debug)]
pub struct Subset<'a, D: Dataset> {
    inner: &'a D,
    indices: Vec<usize>,
}

impl<'a, D: Dataset> Subset<'a, D> {
    /// Create a view of `inner` containing only the samples at `indices`.
    ///
    /// Indices are not checked here; an index past the end of `inner`
    /// surfaces as an error from `get`.
    pub fn new(inner: &'a D, indices: Vec<usize>) -> Self {
        Self { inner, indices }
    }

    /// Positions in the underlying dataset, in view order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn inner(&self) -> &'a D {
        self.inner
    }
}

impl<D: Dataset> Dataset for Subset<'_, D> {
    type Sample = D::Sample;
    type Target = D::Target;

    fn len(&self) -> usize {
        self.indices.len()
    }

    fn get(&self, index: usize) -> Result<(D::Sample, D::Target)> {
        let &inner_index = self.indices.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.indices.len(),
        })?;
        self.inner.get(inner_index)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tiny helper dataset for testing.
    struct TinyDataset {
        n: usize,
    }

    impl Dataset for TinyDataset {
        type Sample = usize;
        type Target = usize;

        fn len(&self) -> usize {
            self.n
        }

        fn get(&self, index: usize) -> Result<(usize, usize)> {
            if index >= self.n {
                return Err(Error::IndexOutOfRange { index, len: self.n });
            }
            Ok((index, index % 3))
        }

        fn name(&self) -> &str {
            "tiny"
        }
    }

    #[test]
    fn subset_maps_indices() {
        let ds = TinyDataset { n: 10 };
        let sub = Subset::new(&ds, vec![2, 5, 7]);
        assert_eq!(sub.len(), 3);
        assert_eq!(sub.get(0).unwrap(), (2, 2));
        assert_eq!(sub.get(1).unwrap(), (5, 2));
        assert_eq!(sub.get(2).unwrap(), (7, 1));
        assert_eq!(sub.name(), "tiny");
    }

    #[test]
    fn subset_out_of_range() {
        let ds = TinyDataset { n: 10 };
        let sub = Subset::new(&ds, vec![1, 12]);
        assert!(matches!(
            sub.get(2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        ));
        // Bad inner index propagates from the wrapped dataset.
        assert!(matches!(
            sub.get(1),
            Err(Error::IndexOutOfRange { index: 12, len: 10 })
        ));
    }

    #[test]
    fn empty_subset() {
        let ds = TinyDataset { n: 4 };
        let sub = Subset::new(&ds, Vec::new());
        assert!(sub.is_empty());
    }
}
