// Image decode routine: open, decode, force RGB, return the materialized buffer.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{ImageReader, RgbImage};

use crate::error::{Error, Result};

/// Load the image at `path` as an 8-bit, 3-channel RGB buffer.
///
/// Grayscale, palette and alpha images are converted. The format is guessed
/// from the file contents, not the extension. The file handle is released
/// when the reader goes out of scope, before any decode error is returned.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage> {
    let path = path.as_ref();
    let decoded = {
        let file = File::open(path).map_err(|e| {
            Error::from_io(e, path.to_path_buf(), |path| Error::ImageNotFound { path })
        })?;
        let reader = ImageReader::new(BufReader::new(file))
            .with_guessed_format()
            .map_err(|e| Error::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        reader.decode()
    };
    let img = decoded.map_err(|e| Error::Decode {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.into_rgb8())
}
