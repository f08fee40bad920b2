// Caltech: eagerly loaded image classification dataset driven by split manifests
//
// Expected layout (both directories are configurable):
//
//   Caltech101/
//     train.txt
//     test.txt
//     101_ObjectCategories/
//       accordion/image_0001.jpg
//       ...
//
// Each manifest line is `<class>/<file>`. Classes receive ids in order of
// first appearance in the manifest; the `BACKGROUND_Google` class is skipped.
//
// USAGE:
//
//   let ds = Caltech::builder("Caltech101/101_ObjectCategories")
//       .split(Split::Train)
//       .transform(Resize::new(224, 224).then(ToTensor))
//       .build()?;
//   let (train_idx, val_idx) = ds.stratified_sampling(0.5)?;

use std::fmt;
use std::path::{Path, PathBuf};

use image::RgbImage;
use rand::Rng;

use crate::combinators::Subset;
use crate::config::CaltechConfig;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::image_loader::load_rgb;
use crate::labels::{is_sentinel, LabelMap};
use crate::manifest::read_manifest;
use crate::split::Split;
use crate::stratify;
use crate::transform::{Identity, Transform};

// CaltechBuilder

/// Builder for [`Caltech`].
pub struct CaltechBuilder<T = Identity, U = Identity> {
    config: CaltechConfig,
    transform: T,
    target_transform: U,
}

impl CaltechBuilder {
    /// Create a builder reading images from `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::from_config(CaltechConfig::default().root(root))
    }

    pub fn from_config(config: CaltechConfig) -> Self {
        CaltechBuilder {
            config,
            transform: Identity,
            target_transform: Identity,
        }
    }
}

impl<T, U> CaltechBuilder<T, U> {
    /// Directory holding `train.txt` / `test.txt`.
    pub fn manifest_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.config = self.config.manifest_dir(dir);
        self
    }

    pub fn split(mut self, split: Split) -> Self {
        self.config = self.config.split(split);
        self
    }

    /// Select the split by name; unknown names fall back to train with a warning.
    pub fn split_name(mut self, name: &str) -> Self {
        self.config = self.config.split_name(name);
        self
    }

    /// Transform applied to every image on `get`.
    pub fn transform<T2: Transform<RgbImage>>(self, transform: T2) -> CaltechBuilder<T2, U> {
        CaltechBuilder {
            config: self.config,
            transform,
            target_transform: self.target_transform,
        }
    }

    /// Transform applied to every class id on `get`.
    pub fn target_transform<U2: Transform<usize>>(
        self,
        target_transform: U2,
    ) -> CaltechBuilder<T, U2> {
        CaltechBuilder {
            config: self.config,
            transform: self.transform,
            target_transform,
        }
    }

    pub fn config(&self) -> &CaltechConfig {
        &self.config
    }

    /// Read the manifest and load every image.
    pub fn build(self) -> Result<Caltech<T, U>> {
        Caltech::load_with(&self.config, self.transform, self.target_transform)
    }
}

// Caltech dataset

/// An image classification dataset held entirely in memory.
///
/// Entries are `(image, class id)` in manifest order. The label map and
/// entries are fixed at construction.
pub struct Caltech<T = Identity, U = Identity> {
    labels: LabelMap,
    entries: Vec<(RgbImage, usize)>,
    /// Manifest-relative path of each entry.
    paths: Vec<PathBuf>,
    split: Split,
    transform: T,
    target_transform: U,
}

impl Caltech {
    /// Convenience entry-point: `Caltech::builder(root)` returns a builder.
    pub fn builder<P: AsRef<Path>>(root: P) -> CaltechBuilder {
        CaltechBuilder::new(root)
    }

    /// Load `split` ("train" or "test") from the default manifest directory,
    /// with images under `root`.
    pub fn new<P: AsRef<Path>>(root: P, split: &str) -> Result<Self> {
        Self::load(CaltechConfig::default().root(root).split_name(split))
    }

    pub fn load(config: CaltechConfig) -> Result<Self> {
        Self::load_with(&config, Identity, Identity)
    }
}

impl<T, U> Caltech<T, U> {
    fn load_with(config: &CaltechConfig, transform: T, target_transform: U) -> Result<Self> {
        let manifest_path = config.manifest_path();
        let manifest = read_manifest(&manifest_path)?;

        let mut labels = LabelMap::new();
        let mut entries = Vec::with_capacity(manifest.len());
        let mut paths = Vec::with_capacity(manifest.len());
        let mut skipped = 0usize;

        for record in manifest {
            if is_sentinel(&record.label) {
                skipped += 1;
                continue;
            }
            let id = labels.insert(&record.label);
            let img = load_rgb(config.image_path(&record.path))?;
            entries.push((img, id));
            paths.push(record.path);
        }

        if skipped > 0 {
            log::debug!("skipped {skipped} background entries in {}", manifest_path.display());
        }
        log::info!(
            "loaded Caltech {} split: {} images, {} classes",
            config.split,
            entries.len(),
            labels.len()
        );

        Ok(Caltech {
            labels,
            entries,
            paths,
            split: config.split,
            transform,
            target_transform,
        })
    }

    pub fn split(&self) -> Split {
        self.split
    }

    /// Class name to id mapping.
    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    pub fn num_classes(&self) -> usize {
        self.labels.len()
    }

    /// Class names indexed by id.
    pub fn class_names(&self) -> &[String] {
        self.labels.names()
    }

    /// Stored image of the i-th entry, untransformed.
    pub fn image(&self, index: usize) -> Option<&RgbImage> {
        self.entries.get(index).map(|(img, _)| img)
    }

    /// Class id of the i-th entry, untransformed.
    pub fn label(&self, index: usize) -> Option<usize> {
        self.entries.get(index).map(|&(_, id)| id)
    }

    /// Manifest-relative path of the i-th entry.
    pub fn path_of(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    /// All raw `(image, id)` pairs in manifest order.
    pub fn entries(&self) -> &[(RgbImage, usize)] {
        &self.entries
    }

    /// Class ids parallel to the entries.
    pub fn targets(&self) -> Vec<usize> {
        self.entries.iter().map(|&(_, id)| id).collect()
    }

    /// Number of entries per class id.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.labels.len()];
        for &(_, id) in &self.entries {
            counts[id] += 1;
        }
        counts
    }

    /// Split all entry indexes into `(train, val)` lists that preserve each
    /// class's share, with `floor(train_fraction * len)` indexes in train.
    pub fn stratified_sampling(&self, train_fraction: f64) -> Result<(Vec<usize>, Vec<usize>)> {
        self.stratified_sampling_with_rng(train_fraction, &mut rand::thread_rng())
    }

    /// Like [`stratified_sampling`](Self::stratified_sampling), reproducible for a given seed.
    pub fn stratified_sampling_seeded(
        &self,
        train_fraction: f64,
        seed: u64,
    ) -> Result<(Vec<usize>, Vec<usize>)> {
        self.stratified_sampling_with_rng(train_fraction, &mut stratify::seeded(seed))
    }

    pub fn stratified_sampling_with_rng<R: Rng + ?Sized>(
        &self,
        train_fraction: f64,
        rng: &mut R,
    ) -> Result<(Vec<usize>, Vec<usize>)> {
        stratify::train_val_split(&self.targets(), train_fraction, rng)
    }
}

impl<T, U> Caltech<T, U>
where
    T: Transform<RgbImage>,
    U: Transform<usize>,
{
    /// View over the given entry indexes, e.g. one side of a stratified split.
    pub fn subset(&self, indices: Vec<usize>) -> Subset<'_, Self> {
        Subset::new(self, indices)
    }
}

impl<T, U> Dataset for Caltech<T, U>
where
    T: Transform<RgbImage>,
    U: Transform<usize>,
{
    type Sample = T::Output;
    type Target = U::Output;

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, index: usize) -> Result<(T::Output, U::Output)> {
        let (img, id) = self.entries.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })?;
        Ok((
            self.transform.apply(img.clone()),
            self.target_transform.apply(*id),
        ))
    }

    fn name(&self) -> &str {
        match self.split {
            Split::Train => "Caltech101-train",
            Split::Test => "Caltech101-test",
        }
    }
}

impl<T, U> fmt::Debug for Caltech<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Caltech")
            .field("split", &self.split)
            .field("len", &self.entries.len())
            .field("classes", &self.labels.len())
            .finish_non_exhaustive()
    }
}
