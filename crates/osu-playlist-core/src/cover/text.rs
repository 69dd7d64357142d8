//! Font loading, text measurement and title truncation

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{FontRole, FontSet};
use crate::error::{Error, Result};

pub const ELLIPSIS: &str = "...";

/// Measures rendered text width in pixels
pub trait TextMeasure {
    fn text_width(&self, text: &str, size: f32) -> f32;
}

impl TextMeasure for FontArc {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text_size(PxScale::from(size), self, text).0 as f32
    }
}

/// Shorten `title` from the end, appending an ellipsis, until it fits `budget`.
///
/// Titles that already fit are returned unchanged, so applying this twice
/// gives the same result as applying it once. When not even the ellipsis
/// fits, the title is dropped entirely.
pub fn truncate_title(measure: &dyn TextMeasure, title: &str, size: f32, budget: f32) -> String {
    if measure.text_width(title, size) <= budget {
        return title.to_string();
    }

    let chars: Vec<char> = title.chars().collect();
    for keep in (0..chars.len()).rev() {
        let mut candidate: String = chars[..keep].iter().collect();
        candidate.push_str(ELLIPSIS);
        if measure.text_width(&candidate, size) <= budget {
            return candidate;
        }
    }

    String::new()
}

/// Draw text with a drop shadow and a one pixel horizontal thickening
pub fn draw_shadowed_text(
    canvas: &mut RgbImage,
    font: &FontArc,
    size: f32,
    (x, y): (i32, i32),
    text: &str,
    fill: Rgb<u8>,
    shadow: Rgb<u8>,
) {
    let scale = PxScale::from(size);
    draw_text_mut(canvas, shadow, x + 2, y + 3, scale, font, text);
    draw_text_mut(canvas, fill, x, y, scale, font, text);
    draw_text_mut(canvas, fill, x + 1, y, scale, font, text);
}

/// Fonts for every text role on a cover
#[derive(Clone)]
pub struct Fonts {
    pub title: FontArc,
    pub artist: FontArc,
    pub version: FontArc,
    /// The literal "mapped by"
    pub mapped_by: FontArc,
    /// Mapper name
    pub creator: FontArc,
    pub mono: FontArc,
}

impl Fonts {
    /// Load the configured font files; a file shared by several roles is read once
    pub fn load(set: &FontSet) -> Result<Self> {
        let mut loaded: HashMap<PathBuf, FontArc> = HashMap::new();
        let mut get = |role: FontRole| -> Result<FontArc> {
            let path = set.path_for(role)?;
            if let Some(font) = loaded.get(path) {
                return Ok(font.clone());
            }
            let font = load_font(path)?;
            loaded.insert(path.to_path_buf(), font.clone());
            Ok(font)
        };

        Ok(Self {
            title: get(FontRole::Title)?,
            artist: get(FontRole::Artist)?,
            version: get(FontRole::Version)?,
            mapped_by: get(FontRole::MappedBy)?,
            creator: get(FontRole::Creator)?,
            mono: get(FontRole::Mono)?,
        })
    }
}

fn load_font(path: &Path) -> Result<FontArc> {
    let bytes = fs::read(path).map_err(|e| Error::Font {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    FontArc::try_from_vec(bytes).map_err(|e| Error::Font {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
