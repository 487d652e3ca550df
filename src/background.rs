use crate::{Colour, TxpixError};
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::{Path, PathBuf};

/// What every page of a document is drawn on top of
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    /// A canvas filled with a single colour
    Solid(Colour),
    /// One of these images, picked at random for each document
    Images(Vec<PathBuf>),
}

impl Background {
    /// Background images take precedence; the colour is only parsed when there are none
    pub fn from_config(images: &[PathBuf], colour: &str) -> Result<Background, TxpixError> {
        if images.is_empty() {
            Ok(Background::Solid(Colour::parse(colour)?))
        } else {
            Ok(Background::Images(images.to_vec()))
        }
    }

    /// Produce a `width` × `height` canvas. For [Background::Images], one path is chosen
    /// uniformly from `rng`, and the image is scaled to cover the canvas and cropped
    /// around its centre.
    pub fn compose<R: Rng + ?Sized>(
        &self,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Result<RgbaImage, TxpixError> {
        match self {
            Background::Solid(colour) => {
                Ok(RgbaImage::from_pixel(width, height, (*colour).into()))
            }
            Background::Images(paths) => {
                let path = paths.choose(rng).ok_or_else(|| {
                    TxpixError::InvalidConfig("no background images to choose from".into())
                })?;
                tracing::debug!(path = %path.display(), "using background image");
                let image = load_background(path)?;
                Ok(fill(&image, width, height))
            }
        }
    }
}

fn load_background(path: &Path) -> Result<DynamicImage, TxpixError> {
    let err = |source: image::ImageError| TxpixError::BackgroundLoad {
        path: path.to_owned(),
        source,
    };
    let data = std::fs::read(path).map_err(|e| err(image::ImageError::IoError(e)))?;
    image::load_from_memory(&data).map_err(err)
}

/// Scale `image` so that it covers `width` × `height` while keeping its aspect ratio,
/// then crop the overflow evenly from both sides
pub fn fill(image: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    image
        .resize_to_fill(width, height, FilterType::Lanczos3)
        .to_rgba8()
}
