//! Error types for osu-playlist-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for playlist generation
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read/write ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse beatmap file {path}: {message}")]
    BeatmapParse { path: PathBuf, message: String },

    #[error("Invalid .osz archive: {reason}")]
    InvalidOsz { reason: String },

    #[error("Invalid mod combination: {mods}")]
    InvalidModCombination { mods: String },

    #[error("Cover image not found or unreadable: {url}")]
    ImageNotFound { url: String },

    #[error("No difficulty file for beatmap {beatmap_id} in downloaded archive")]
    BeatmapFileNotFound { beatmap_id: u32 },

    #[error("Invalid playlist entry {key} = {value:?}")]
    InvalidAnnotation { key: String, value: String },

    #[error("Invalid properties file {path} (line {line}): {message}")]
    InvalidProperties {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Beatmap {0} was not returned by the API")]
    BeatmapNotReturned(u32),

    #[error("Failed to load font {path}: {message}")]
    Font { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for playlist operations
pub type Result<T> = std::result::Result<T, Error>;
