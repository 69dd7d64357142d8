//! Beatmap metadata structures

use serde::{Deserialize, Serialize};

/// Metadata for a beatmap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeatmapMetadata {
    /// Romanized song title
    pub title: String,
    /// Unicode song title
    pub title_unicode: Option<String>,
    /// Romanized artist name
    pub artist: String,
    /// Unicode artist name
    pub artist_unicode: Option<String>,
    /// Beatmap creator username
    pub creator: String,
    /// Online beatmap ID
    pub beatmap_id: Option<u32>,
}

impl BeatmapMetadata {
    /// Get display title (unicode if available, otherwise romanized)
    pub fn display_title(&self) -> &str {
        self.title_unicode.as_deref().unwrap_or(&self.title)
    }

    /// Get display artist (unicode if available, otherwise romanized)
    pub fn display_artist(&self) -> &str {
        self.artist_unicode.as_deref().unwrap_or(&self.artist)
    }
}
