//! # caltech-data
//!
//! Caltech-101 style image classification datasets, loaded from split
//! manifests into memory.
//!
//! This crate provides:
//! - [`Dataset`] trait: indexed `(sample, target)` access
//! - [`Caltech`]: manifest-driven dataset with eager RGB image loading
//! - [`CaltechConfig`] / [`CaltechBuilder`]: roots, split, transforms
//! - [`Transform`]: image and target preprocessing applied on `get`
//! - [`Subset`]: borrowed view over an index list
//! - Stratified train/validation splitting with optional seeding

pub mod caltech;
pub mod combinators;
pub mod config;
pub mod dataset;
pub mod error;
pub mod image_loader;
pub mod labels;
pub mod manifest;
pub mod split;
pub mod stratify;
pub mod transform;

pub use caltech::{Caltech, CaltechBuilder};
pub use combinators::Subset;
pub use config::CaltechConfig;
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use image_loader::load_rgb;
pub use labels::{LabelMap, BACKGROUND_LABEL};
pub use manifest::{read_manifest, ManifestEntry};
pub use split::Split;
pub use stratify::train_val_split;
pub use transform::{
    CenterCrop, Identity, ImageTensor, Normalize, OneHot, Resize, ToTensor, Transform,
    TransformExt,
};
