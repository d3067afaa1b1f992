//! Writing the crop region out as a PNG tile.

use image::{ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::region::CropRegion;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("crop region is empty")]
    EmptyRegion,

    #[error("crop region {0:?} is outside the image")]
    OutOfBounds(CropRegion),

    #[error("encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not move tile into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Encodes `region` of `source` as PNG at `path`.
///
/// The image is written to a temporary file next to `path` and renamed over
/// it once complete, so a failure never leaves a truncated tile behind.
pub fn export(source: &RgbaImage, region: &CropRegion, path: &Path) -> Result<(), ExportError> {
    if region.is_empty() {
        return Err(ExportError::EmptyRegion);
    }
    let tile = region
        .extract(source)
        .ok_or(ExportError::OutOfBounds(*region))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::Builder::new()
        .prefix(".crop-")
        .suffix(".png")
        .tempfile_in(dir)?;
    tile.write_to(file.as_file_mut(), ImageFormat::Png)?;
    file.persist(path)?;
    Ok(())
}

/// Names tiles `crop_NNN_WxH.png`. The counter advances on every attempt,
/// successful or not.
#[derive(Debug)]
pub struct Exporter {
    output_dir: PathBuf,
    counter: u32,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            counter: 1,
        }
    }

    pub fn next_path(&mut self, region: &CropRegion) -> PathBuf {
        let name = format!("crop_{:03}_{}x{}.png", self.counter, region.w, region.h);
        self.counter += 1;
        self.output_dir.join(name)
    }
}
