// Split identifier: which manifest file a dataset is built from.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Which split of the dataset to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Split {
    #[default]
    Train,
    Test,
}

impl Split {
    /// Lowercase name, as used in manifest file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
        }
    }

    /// File name of the manifest listing this split's members.
    pub fn manifest_name(&self) -> &'static str {
        match self {
            Split::Train => "train.txt",
            Split::Test => "test.txt",
        }
    }

    /// Parse a split name, falling back to [`Split::Train`] on anything
    /// other than `"train"` or `"test"`.
    ///
    /// The fallback is not an error; it emits a single warning and continues.
    pub fn coerce(name: &str) -> Split {
        match name.parse() {
            Ok(split) => split,
            Err(_) => {
                log::warn!("invalid split name {name:?}, using the default split (train)");
                Split::default()
            }
        }
    }
}

impl FromStr for Split {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Split::Train),
            "test" => Ok(Split::Test),
            other => Err(Error::InvalidSplit(other.to_string())),
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
