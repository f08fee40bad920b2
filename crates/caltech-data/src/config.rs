// Where a Caltech dataset lives on disk and which split to read.

use std::path::{Path, PathBuf};

use crate::split::Split;

/// Directory holding the `train.txt` / `test.txt` manifests.
pub const DEFAULT_MANIFEST_DIR: &str = "Caltech101";

/// Directory holding the `<class>/<image>` tree.
pub const DEFAULT_IMAGE_ROOT: &str = "Caltech101/101_ObjectCategories";

/// Configuration for loading a [`Caltech`](crate::Caltech) dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaltechConfig {
    /// Image root; manifest lines are resolved against it.
    pub root: PathBuf,
    /// Directory containing the split manifests.
    pub manifest_dir: PathBuf,
    /// Which manifest to read.
    pub split: Split,
}

impl Default for CaltechConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_IMAGE_ROOT),
            manifest_dir: PathBuf::from(DEFAULT_MANIFEST_DIR),
            split: Split::default(),
        }
    }
}

impl CaltechConfig {
    pub fn root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.root = root.as_ref().to_path_buf();
        self
    }

    pub fn manifest_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.manifest_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn split(mut self, split: Split) -> Self {
        self.split = split;
        self
    }

    /// Set the split by name. Unknown names fall back to train with a warning.
    pub fn split_name(mut self, name: &str) -> Self {
        self.split = Split::coerce(name);
        self
    }

    /// `<manifest_dir>/<split>.txt`
    pub fn manifest_path(&self) -> PathBuf {
        self.manifest_dir.join(self.split.manifest_name())
    }

    /// Full path of an image listed in the manifest.
    pub fn image_path(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}
