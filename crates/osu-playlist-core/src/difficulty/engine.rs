//! Difficulty engine abstraction backed by rosu-pp

use std::path::Path;

use rosu_pp::model::mode::GameMode;

use crate::error::{Error, Result};

/// Attributes derived by a difficulty engine for one mod bitmask.
///
/// `None` means the engine has no opinion and the caller's value stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineAttributes {
    pub hp: Option<f64>,
    pub od: Option<f64>,
    pub ar: Option<f64>,
    pub stars: f64,
    pub max_combo: u32,
}

/// Something that can rate a beatmap file under a legacy mod bitmask
pub trait DifficultyEngine {
    fn calculate(&self, path: &Path, mods: u32) -> Result<EngineAttributes>;
}

/// [`DifficultyEngine`] using rosu-pp
#[derive(Debug, Clone, Copy, Default)]
pub struct RosuEngine;

impl RosuEngine {
    pub fn new() -> Self {
        Self
    }
}

impl DifficultyEngine for RosuEngine {
    fn calculate(&self, path: &Path, mods: u32) -> Result<EngineAttributes> {
        let map = rosu_pp::Beatmap::from_path(path).map_err(|e| Error::BeatmapParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let difficulty = rosu_pp::Difficulty::new().mods(mods).calculate(&map);
        let attributes = map.attributes().mods(mods).build();

        // AR has no meaning for taiko and mania
        let ar = match map.mode {
            GameMode::Osu | GameMode::Catch => Some(attributes.ar),
            GameMode::Taiko | GameMode::Mania => None,
        };

        tracing::debug!(
            "rosu-pp rated {} with mods {}: {:.2} stars",
            path.display(),
            mods,
            difficulty.stars()
        );

        Ok(EngineAttributes {
            hp: Some(attributes.hp),
            od: Some(attributes.od),
            ar,
            stars: difficulty.stars(),
            max_combo: difficulty.max_combo(),
        })
    }
}
