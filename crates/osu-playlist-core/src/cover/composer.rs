//! Font-backed cover renderer

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use super::background::apply_brightness;
use super::table::DifficultyTable;
use super::text::{draw_shadowed_text, truncate_title, Fonts, TextMeasure};
use super::{CoverRenderer, CoverText};
use crate::config::CoverStyle;
use crate::error::Result;
use crate::mods::Mod;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const SHADOW: Rgb<u8> = Rgb([0x1f, 0x1f, 0x1f]);
const BADGE_SHADOW: Rgb<u8> = Rgb([0x30, 0x30, 0x30]);
const CREATOR: Rgb<u8> = Rgb([180, 235, 250]);
const TABLE_TEXT: Rgb<u8> = Rgb([235, 235, 235]);

const TITLE_SIZE: f32 = 72.0;
const MARGIN_X: i32 = 40;

/// Rightmost mod badge; further badges go left
const MOD_ANCHOR_X: i32 = 1772;
const MOD_Y: i32 = 32;
const MOD_WIDTH: u32 = 100;
const MOD_HEIGHT: u32 = 62;
const MOD_STEP: i32 = 118;

/// Lowest target badge; earlier targets stack above it
const TARGET_ANCHOR_Y: i32 = 276;
const TARGET_STEP: i32 = 74;
const TARGET_PILL_X: i32 = 1859;
const TARGET_TEXT_RIGHT: i32 = 1845;

const TABLE_X: i32 = 1468;
const TABLE_Y: i32 = 110;
const TABLE_SIZE: f32 = 28.0;

/// (shade, highlight) per target position
const TARGET_COLORS: [(Rgb<u8>, Rgb<u8>); 3] = [
    (Rgb([165, 42, 42]), Rgb([255, 165, 0])),
    (Rgb([128, 128, 128]), Rgb([192, 192, 192])),
    (Rgb([218, 165, 32]), Rgb([255, 255, 0])),
];

/// Draws cover text and badges with real fonts
pub struct CoverComposer {
    fonts: Fonts,
    style: CoverStyle,
}

impl CoverComposer {
    pub fn new(fonts: Fonts, style: CoverStyle) -> Self {
        Self { fonts, style }
    }

    fn draw_text_block(&self, canvas: &mut RgbImage, cover: &CoverText<'_>) {
        let fonts = &self.fonts;
        let title = truncate_title(
            &fonts.title,
            cover.title,
            TITLE_SIZE,
            self.style.title_budget,
        );

        let lines = [
            (&fonts.version, 48.0, 16, cover.version),
            (&fonts.title, TITLE_SIZE, 129, title.as_str()),
            (&fonts.artist, 44.0, 216, cover.artist),
        ];
        for (font, size, y, text) in lines {
            draw_shadowed_text(canvas, font, size, (MARGIN_X, y), text, WHITE, SHADOW);
        }

        let mapped_by = "mapped by ";
        draw_shadowed_text(
            canvas,
            &fonts.mapped_by,
            36.0,
            (MARGIN_X, 290),
            mapped_by,
            WHITE,
            SHADOW,
        );
        let creator_x = MARGIN_X + fonts.mapped_by.text_width(mapped_by, 36.0).round() as i32;
        draw_shadowed_text(
            canvas,
            &fonts.creator,
            36.0,
            (creator_x, 290),
            cover.creator,
            CREATOR,
            SHADOW,
        );
    }

    fn draw_mod_badges(&self, canvas: &mut RgbImage, cover: &CoverText<'_>) {
        let size = (MOD_WIDTH, MOD_HEIGHT);
        for (i, m) in cover.mods.iter().rev().enumerate() {
            let x = MOD_ANCHOR_X - MOD_STEP * i as i32;
            draw_rounded_rect(canvas, (x + 2, MOD_Y + 2), size, 12, BADGE_SHADOW);
            draw_rounded_rect(canvas, (x, MOD_Y), size, 12, mod_badge_color(m));

            let label = m.abbreviation();
            let width = self.fonts.version.text_width(label, 48.0).round() as i32;
            let text_x = x + (MOD_WIDTH as i32 - width) / 2;
            draw_shadowed_text(
                canvas,
                &self.fonts.version,
                48.0,
                (text_x, MOD_Y + 4),
                label,
                WHITE,
                SHADOW,
            );
        }
    }

    fn draw_target_badges(&self, canvas: &mut RgbImage, targets: &[String]) {
        let count = targets.len() as i32;
        for (i, target) in targets.iter().enumerate() {
            let y = TARGET_ANCHOR_Y - TARGET_STEP * (count - 1 - i as i32);
            let (shade, highlight) = TARGET_COLORS[i % TARGET_COLORS.len()];

            draw_rounded_rect(canvas, (TARGET_PILL_X + 1, y + 2), (11, 56), 5, shade);
            draw_rounded_rect(canvas, (TARGET_PILL_X, y), (10, 56), 5, highlight);

            let width = self.fonts.artist.text_width(target, 44.0).round() as i32;
            draw_shadowed_text(
                canvas,
                &self.fonts.artist,
                44.0,
                (TARGET_TEXT_RIGHT - width, y + 4),
                target,
                WHITE,
                Rgb([40, 40, 40]),
            );
        }
    }

    fn draw_table(&self, canvas: &mut RgbImage, table: &DifficultyTable) {
        let line_height = (TABLE_SIZE * 1.15).round() as i32;
        for (i, line) in table.lines().iter().enumerate() {
            let y = TABLE_Y + line_height * i as i32;
            draw_shadowed_text(
                canvas,
                &self.fonts.mono,
                TABLE_SIZE,
                (TABLE_X, y),
                line,
                TABLE_TEXT,
                SHADOW,
            );
        }
    }
}

impl CoverRenderer for CoverComposer {
    fn render(&self, mut background: RgbImage, cover: &CoverText<'_>) -> Result<RgbImage> {
        apply_brightness(&mut background, self.style.brightness);

        self.draw_text_block(&mut background, cover);
        if !cover.mods.is_empty() {
            self.draw_mod_badges(&mut background, cover);
        }
        if !cover.targets.is_empty() {
            self.draw_target_badges(&mut background, cover.targets);
        }
        if let Some(table) = cover.table {
            self.draw_table(&mut background, table);
        }

        Ok(background)
    }
}

/// Filled rectangle with circular corners
fn draw_rounded_rect(
    canvas: &mut RgbImage,
    (x, y): (i32, i32),
    (w, h): (u32, u32),
    radius: u32,
    color: Rgb<u8>,
) {
    let r = radius.min(w / 2).min(h / 2);

    if w > 2 * r {
        draw_filled_rect_mut(canvas, Rect::at(x + r as i32, y).of_size(w - 2 * r, h), color);
    }
    if h > 2 * r {
        draw_filled_rect_mut(canvas, Rect::at(x, y + r as i32).of_size(w, h - 2 * r), color);
    }
    if r == 0 {
        return;
    }

    let (r, w, h) = (r as i32, w as i32, h as i32);
    for (cx, cy) in [
        (x + r, y + r),
        (x + w - 1 - r, y + r),
        (x + r, y + h - 1 - r),
        (x + w - 1 - r, y + h - 1 - r),
    ] {
        draw_filled_circle_mut(canvas, (cx, cy), r, color);
    }
}

/// Badge color for a mod abbreviation, as drawn on covers
pub fn mod_badge_color(m: &Mod) -> Rgb<u8> {
    Rgb(m.color())
}
