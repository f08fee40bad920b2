use std::io;
use std::path::PathBuf;

/// All errors that can occur while loading or reading a Caltech dataset.
///
/// Every failure during the eager load aborts construction, so there is no
/// partially built dataset to recover.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The split manifest (`train.txt` / `test.txt`) does not exist.
    #[error("manifest not found: {}", .path.display())]
    ManifestNotFound { path: PathBuf },

    /// An image referenced by the manifest does not exist.
    #[error("image not found: {}", .path.display())]
    ImageNotFound { path: PathBuf },

    /// Any other I/O failure, tagged with the file that caused it.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The image crate could not decode the file.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Indexed access past the end of a dataset.
    #[error("index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Strict split parsing rejected the name.
    #[error("invalid split name: {0:?} (expected \"train\" or \"test\")")]
    InvalidSplit(String),

    /// Train fraction outside the open interval (0, 1).
    #[error("train fraction must be in (0, 1), got {0}")]
    InvalidFraction(f64),

    /// The requested stratified split cannot be satisfied.
    #[error("stratified split infeasible: {0}")]
    Stratification(String),
}

impl Error {
    /// Classify an I/O error on `path`, turning `NotFound` into `not_found(path)`.
    pub(crate) fn from_io(
        source: io::Error,
        path: PathBuf,
        not_found: impl FnOnce(PathBuf) -> Error,
    ) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            not_found(path)
        } else {
            Error::Io { path, source }
        }
    }
}

/// Convenience Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
