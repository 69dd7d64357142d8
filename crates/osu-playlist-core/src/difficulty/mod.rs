//! Difficulty recalculation for mod combinations
//!
//! CS and BPM are adjusted arithmetically; HP, OD, AR, star rating and max
//! combo come from a [`DifficultyEngine`] run against the beatmap file.

mod engine;

pub use engine::*;

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::mods::{Mod, ModSet};

/// Unmodified difficulty settings of a beatmap
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BaseAttributes {
    pub cs: f64,
    pub hp: f64,
    pub od: f64,
    pub ar: f64,
    pub bpm: f64,
}

/// Star rating, optionally paired with the HR-equivalent rating (FM slots)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "String")]
pub enum StarRating {
    Single(f64),
    WithHrEquivalent { rating: f64, hard_rock: f64 },
}

impl StarRating {
    /// The rating for the mods that were actually applied
    pub fn value(&self) -> f64 {
        match *self {
            Self::Single(rating) | Self::WithHrEquivalent { rating, .. } => rating,
        }
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(rating) => write!(f, "{:.2}", rating),
            Self::WithHrEquivalent { rating, hard_rock } => {
                write!(f, "{:.2}({:.2})", rating, hard_rock)
            }
        }
    }
}

impl From<StarRating> for String {
    fn from(rating: StarRating) -> Self {
        rating.to_string()
    }
}

/// Difficulty of a beatmap after applying a mod set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultyResult {
    pub mods: String,
    /// Playback speed multiplier of the applied mods
    pub clock_rate: f64,
    pub cs: f64,
    pub hp: f64,
    pub od: f64,
    pub ar: f64,
    pub bpm: f64,
    pub max_combo: u32,
    pub star_rating: StarRating,
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Recalculate difficulty attributes for `mods`.
///
/// Fails with `InvalidModCombination` before touching the engine when the
/// mod set is illegal.
pub fn recalculate(
    engine: &dyn DifficultyEngine,
    base: &BaseAttributes,
    path: &Path,
    mods: &ModSet,
) -> Result<DifficultyResult> {
    mods.validate()?;

    let mut cs = base.cs;
    if mods.contains(&Mod::HardRock) {
        cs *= 1.3;
    }
    if mods.contains(&Mod::Easy) {
        cs += 0.5;
    }

    let clock_rate = mods.clock_rate();
    let bpm = base.bpm * clock_rate;

    let attributes = engine.calculate(path, mods.bits())?;

    let star_rating = if mods.contains(&Mod::FreeMod) {
        let hard_rock: ModSet = [Mod::HardRock].into_iter().collect();
        let hr = recalculate(engine, base, path, &hard_rock)?;
        StarRating::WithHrEquivalent {
            rating: attributes.stars,
            hard_rock: hr.star_rating.value(),
        }
    } else {
        StarRating::Single(attributes.stars)
    };

    Ok(DifficultyResult {
        mods: mods.to_string(),
        clock_rate,
        cs: round2(cs),
        hp: attributes.hp.unwrap_or(base.hp),
        od: attributes.od.unwrap_or(base.od),
        ar: attributes.ar.unwrap_or(base.ar),
        bpm: round2(bpm),
        max_combo: attributes.max_combo,
        star_rating,
    })
}
