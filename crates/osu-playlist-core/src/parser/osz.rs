//! .osz archive handling

use crate::beatmap::BeatmapInfo;
use crate::error::{Error, Result};
use crate::parser::parse_osu_file;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// A difficulty file extracted from an archive
#[derive(Debug, Clone)]
pub struct ExtractedDifficulty {
    /// Location of the extracted .osu file
    pub path: PathBuf,
    pub info: BeatmapInfo,
}

/// Extract the .osu files of an .osz archive into `dest` and parse them.
///
/// Files that fail to parse are logged and left out.
pub fn extract_osz(osz_path: &Path, dest: &Path) -> Result<Vec<ExtractedDifficulty>> {
    let file = File::open(osz_path)?;
    let mut archive = ZipArchive::new(file)?;

    fs::create_dir_all(dest)?;

    let mut osu_files = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let filename = entry
            .enclosed_name()
            .ok_or_else(|| Error::InvalidOsz {
                reason: "Invalid file path in archive".to_string(),
            })?
            .to_path_buf();

        if !filename.to_string_lossy().to_lowercase().ends_with(".osu") {
            continue;
        }

        let dest_path = dest.join(&filename);
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut output = File::create(&dest_path)?;
        io::copy(&mut entry, &mut output)?;
        osu_files.push(dest_path);
    }

    let mut difficulties = Vec::new();
    for path in osu_files {
        match parse_osu_file(&path) {
            Ok(info) => difficulties.push(ExtractedDifficulty { path, info }),
            Err(e) => tracing::warn!("Failed to parse {}: {}", path.display(), e),
        }
    }

    if difficulties.is_empty() {
        return Err(Error::InvalidOsz {
            reason: "No valid .osu files found in archive".to_string(),
        });
    }

    Ok(difficulties)
}

/// Pick the difficulty for `beatmap_id`.
///
/// Old files may lack a `BeatmapID`; those are matched by difficulty name.
pub fn find_difficulty<'a>(
    difficulties: &'a [ExtractedDifficulty],
    beatmap_id: u32,
    version: &str,
) -> Result<&'a ExtractedDifficulty> {
    difficulties
        .iter()
        .find(|d| d.info.metadata.beatmap_id == Some(beatmap_id))
        .or_else(|| {
            difficulties
                .iter()
                .find(|d| d.info.metadata.beatmap_id.is_none() && d.info.version == version)
        })
        .ok_or(Error::BeatmapFileNotFound { beatmap_id })
}
