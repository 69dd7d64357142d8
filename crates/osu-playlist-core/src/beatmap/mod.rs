//! Beatmap data structures and types

mod metadata;

pub use metadata::*;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::difficulty::BaseAttributes;

/// Represents a game mode in osu!
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Osu = 0,
    Taiko = 1,
    #[serde(rename = "fruits")]
    Catch = 2,
    Mania = 3,
}

impl GameMode {
    /// Ruleset name as used in osu! website URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Osu => "osu",
            Self::Taiko => "taiko",
            Self::Catch => "fruits",
            Self::Mania => "mania",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<u8> for GameMode {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Taiko,
            2 => Self::Catch,
            3 => Self::Mania,
            _ => Self::Osu,
        }
    }
}

/// Difficulty settings for a beatmap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeatmapDifficulty {
    pub hp_drain: f32,
    pub circle_size: f32,
    pub overall_difficulty: f32,
    pub approach_rate: f32,
}

/// Information about a single difficulty read from a .osu file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeatmapInfo {
    pub metadata: BeatmapMetadata,
    pub difficulty: BeatmapDifficulty,
    /// Main BPM
    pub bpm: f64,
    pub mode: GameMode,
    /// Difficulty name/version
    pub version: String,
}

impl BeatmapInfo {
    /// Unmodified settings as input for the recalculator
    pub fn base_attributes(&self) -> BaseAttributes {
        BaseAttributes {
            cs: f64::from(self.difficulty.circle_size),
            hp: f64::from(self.difficulty.hp_drain),
            od: f64::from(self.difficulty.overall_difficulty),
            ar: f64::from(self.difficulty.approach_rate),
            bpm: self.bpm,
        }
    }
}
