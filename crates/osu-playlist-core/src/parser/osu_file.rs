//! .osu file parsing using rosu-map

use crate::beatmap::{BeatmapDifficulty, BeatmapInfo, BeatmapMetadata, GameMode};
use crate::error::{Error, Result};
use std::path::Path;

/// Parse a .osu file and extract beatmap information
pub fn parse_osu_file(path: &Path) -> Result<BeatmapInfo> {
    let beatmap = rosu_map::from_path::<rosu_map::Beatmap>(path).map_err(|e| Error::BeatmapParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let metadata = BeatmapMetadata {
        title: beatmap.title.clone(),
        title_unicode: non_empty(&beatmap.title_unicode),
        artist: beatmap.artist.clone(),
        artist_unicode: non_empty(&beatmap.artist_unicode),
        creator: beatmap.creator.clone(),
        beatmap_id: u32::try_from(beatmap.beatmap_id).ok().filter(|id| *id > 0),
    };

    let difficulty = BeatmapDifficulty {
        hp_drain: beatmap.hp_drain_rate,
        circle_size: beatmap.circle_size,
        overall_difficulty: beatmap.overall_difficulty,
        approach_rate: beatmap.approach_rate,
    };

    Ok(BeatmapInfo {
        metadata,
        difficulty,
        bpm: calculate_bpm(&beatmap),
        mode: GameMode::from(beatmap.mode as u8),
        version: beatmap.version.clone(),
    })
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Calculate the main BPM from the first uninherited timing point
fn calculate_bpm(beatmap: &rosu_map::Beatmap) -> f64 {
    let beat_len = beatmap
        .control_points
        .timing_points
        .first()
        .map(|tp| tp.beat_len)
        .unwrap_or(500.0);

    bpm_from_beat_len(beat_len)
}

fn bpm_from_beat_len(beat_len: f64) -> f64 {
    if beat_len > 0.0 {
        60000.0 / beat_len
    } else {
        120.0
    }
}
