//! Composed playlist covers
//!
//! A cover is the beatmapset banner scaled to 1920x360, darkened, with the
//! difficulty name, title, artist and mapper on the left, mod badges in the
//! top right corner, target badges along the right edge and optionally a
//! difficulty table.

mod background;
mod composer;
mod table;
mod text;

pub use background::{apply_brightness, fit_cover, load_background, placeholder, Background};
pub use composer::{mod_badge_color, CoverComposer};
pub use table::DifficultyTable;
pub use text::{draw_shadowed_text, truncate_title, Fonts, TextMeasure, ELLIPSIS};

use image::RgbImage;

use crate::error::Result;
use crate::mods::ModSet;

pub const COVER_WIDTH: u32 = 1920;
pub const COVER_HEIGHT: u32 = 360;

/// Everything drawn on top of a cover background
#[derive(Debug, Clone, Copy)]
pub struct CoverText<'a> {
    /// Difficulty name
    pub version: &'a str,
    pub title: &'a str,
    pub artist: &'a str,
    pub creator: &'a str,
    pub mods: &'a ModSet,
    /// Empty when target badges are disabled
    pub targets: &'a [String],
    pub table: Option<&'a DifficultyTable>,
}

/// Turns a fitted 1920x360 background into a finished cover
pub trait CoverRenderer {
    fn render(&self, background: RgbImage, cover: &CoverText<'_>) -> Result<RgbImage>;
}
