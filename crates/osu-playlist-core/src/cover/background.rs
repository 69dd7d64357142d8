//! Cover background acquisition and geometry

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageReader, Rgb, RgbImage};

use super::{COVER_HEIGHT, COVER_WIDTH};
use crate::api::Covers;
use crate::download::AssetSource;
use crate::error::{Error, Result};

/// Scale to cover 1920x360 and center-crop.
///
/// Images are scaled to width 1920; if that leaves them shorter than 360 they
/// are scaled to height 360 instead and cropped horizontally.
pub fn fit_cover(img: &DynamicImage) -> RgbImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return placeholder();
    }
    if (width, height) == (COVER_WIDTH, COVER_HEIGHT) {
        return img.to_rgb8();
    }

    let scale = f64::max(
        f64::from(COVER_WIDTH) / f64::from(width),
        f64::from(COVER_HEIGHT) / f64::from(height),
    );
    let scaled_w = ((f64::from(width) * scale).round() as u32).max(COVER_WIDTH);
    let scaled_h = ((f64::from(height) * scale).round() as u32).max(COVER_HEIGHT);

    let resized = imageops::resize(&img.to_rgb8(), scaled_w, scaled_h, FilterType::Lanczos3);
    let x = (scaled_w - COVER_WIDTH) / 2;
    let y = (scaled_h - COVER_HEIGHT) / 2;
    imageops::crop_imm(&resized, x, y, COVER_WIDTH, COVER_HEIGHT).to_image()
}

/// Multiply every channel by `factor`
pub fn apply_brightness(img: &mut RgbImage, factor: f32) {
    for pixel in img.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = (f32::from(*channel) * factor).round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Blurred dark gradient used when a beatmapset has no usable cover
pub fn placeholder() -> RgbImage {
    let gradient = RgbImage::from_fn(COVER_WIDTH, COVER_HEIGHT, |x, y| {
        let t = x as f32 / COVER_WIDTH as f32;
        let v = y as f32 / COVER_HEIGHT as f32;
        let mix = |a: f32, b: f32| (a + (b - a) * t - 12.0 * v) as u8;
        Rgb([mix(72.0, 28.0), mix(64.0, 36.0), mix(96.0, 52.0)])
    });
    imageops::blur(&gradient, 6.0)
}

/// Download and decode one cover image
fn fetch_image(assets: &dyn AssetSource, url: &str, filename: &str) -> Result<DynamicImage> {
    let not_found = || Error::ImageNotFound {
        url: url.to_string(),
    };

    let path = match assets.fetch(url, filename) {
        Ok(path) => path,
        Err(Error::Http(e)) if e.status() == Some(reqwest::StatusCode::NOT_FOUND) => {
            return Err(not_found())
        }
        Err(e) => return Err(e),
    };

    // mirrors do not always serve what the extension says
    let decoded = ImageReader::open(&path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(image::ImageError::IoError)
        .and_then(|reader| reader.decode());

    decoded.map_err(|e| {
        tracing::debug!("Cannot decode {}: {}", path.display(), e);
        not_found()
    })
}

/// A fitted 1920x360 background
#[derive(Debug, Clone)]
pub struct Background {
    pub image: RgbImage,
    /// No cover was available and [`placeholder`] was used
    pub is_placeholder: bool,
}

/// Fetch the best available background for a beatmapset.
///
/// Tries the slim cover, then the regular cover, then falls back to
/// [`placeholder`]. Only a missing or undecodable image falls through; other
/// download errors propagate.
pub fn load_background(
    assets: &dyn AssetSource,
    covers: &Covers,
    stem: &str,
) -> Result<Background> {
    let candidates = [("slimcover", &covers.slimcover), ("cover", &covers.cover)];

    for (kind, url) in candidates {
        if url.is_empty() {
            continue;
        }
        match fetch_image(assets, url, &format!("{}.{}.jpg", stem, kind)) {
            Ok(img) => {
                return Ok(Background {
                    image: fit_cover(&img),
                    is_placeholder: false,
                })
            }
            Err(Error::ImageNotFound { url }) => {
                tracing::debug!("{} unavailable: {}", kind, url);
            }
            Err(e) => return Err(e),
        }
    }

    tracing::warn!("No usable cover for {}, using placeholder", stem);
    Ok(Background {
        image: placeholder(),
        is_placeholder: true,
    })
}
