//! Response types of the osu! web API (only the fields we use)

use serde::{Deserialize, Serialize};

use crate::beatmap::GameMode;
use crate::difficulty::BaseAttributes;

/// Cover image URLs of a beatmapset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Covers {
    /// 900x250 banner
    #[serde(default)]
    pub cover: String,
    /// 1920x360 banner
    #[serde(default)]
    pub slimcover: String,
}

/// Beatmapset as embedded in a beatmap response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiBeatmapset {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub title_unicode: Option<String>,
    pub artist: String,
    #[serde(default)]
    pub artist_unicode: Option<String>,
    pub creator: String,
    #[serde(default)]
    pub covers: Covers,
}

impl ApiBeatmapset {
    /// Unicode title when present
    pub fn display_title(&self) -> &str {
        self.title_unicode
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.title)
    }

    /// Unicode artist when present
    pub fn display_artist(&self) -> &str {
        self.artist_unicode
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.artist)
    }
}

/// A single difficulty returned by `/beatmaps`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiBeatmap {
    pub id: u32,
    pub beatmapset_id: u32,
    pub version: String,
    #[serde(default)]
    pub mode: GameMode,
    pub difficulty_rating: f64,
    pub cs: f64,
    /// HP drain
    pub drain: f64,
    /// Overall difficulty
    pub accuracy: f64,
    pub ar: f64,
    #[serde(default)]
    pub bpm: Option<f64>,
    /// Drain time in seconds
    #[serde(default)]
    pub hit_length: u32,
    #[serde(default)]
    pub total_length: u32,
    #[serde(default)]
    pub max_combo: Option<u32>,
    pub beatmapset: ApiBeatmapset,
}

impl ApiBeatmap {
    /// Link to the beatmap page
    pub fn url(&self) -> String {
        format!(
            "https://osu.ppy.sh/beatmapsets/{}#{}/{}",
            self.beatmapset_id, self.mode, self.id
        )
    }

    /// Unmodified settings as input for the recalculator
    pub fn base_attributes(&self) -> BaseAttributes {
        BaseAttributes {
            cs: self.cs,
            hp: self.drain,
            od: self.accuracy,
            ar: self.ar,
            bpm: self.bpm.unwrap_or_default(),
        }
    }
}

/// Body of `GET /api/v2/beatmaps`
#[derive(Debug, Deserialize)]
pub(crate) struct BeatmapsResponse {
    pub beatmaps: Vec<ApiBeatmap>,
}

/// Body of `POST /oauth/token`
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
}
