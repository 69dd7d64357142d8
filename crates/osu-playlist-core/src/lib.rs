//! # osu-playlist-core
//!
//! Core library for generating osu! playlist pages.
//!
//! A playlist definition maps beatmap ids to a `"<mods> [<targets>] (<notes>)"`
//! annotation. For each entry this crate:
//! - Resolves the beatmap through the osu! web API
//! - Downloads the beatmapset cover and composes a 1920x360 banner with
//!   mod and target badges
//! - Optionally downloads the beatmap archive and recalculates difficulty
//!   for the entry's mods
//! - Collects everything into an HTML page (and optionally a CSV/zip package)
//!
//! ## Modules
//!
//! - [`api`] - osu! web API client
//! - [`batch`] - Directory-wide generation with caching
//! - [`beatmap`] - Beatmap data structures
//! - [`config`] - Generator configuration
//! - [`cover`] - Cover composition
//! - [`difficulty`] - Difficulty recalculation for mod combinations
//! - [`generator`] - Single-playlist pipeline
//! - [`mods`] - Mod abbreviations and validation
//! - [`parser`] - `.osu` files and `.osz` archives
//! - [`playlist`] - Definition files
//! - [`report`] - HTML page, CSV export and packaging
//!
//! ## Example
//!
//! ```no_run
//! use osu_playlist_core::{
//!     CoverComposer, Credentials, Fonts, GeneratorConfig, OsuApi, PlaylistGenerator, PlaylistKind,
//! };
//! use std::path::Path;
//!
//! # fn main() -> osu_playlist_core::Result<()> {
//! let config = GeneratorConfig::load();
//! let credentials = Credentials::load(Path::new("credentials.properties"))?;
//! let api = OsuApi::authenticate(&credentials, &config.api_base_url, config.http_timeout())?;
//! let composer = CoverComposer::new(Fonts::load(&config.fonts)?, config.cover.clone());
//!
//! let generator = PlaylistGenerator::builder(config)
//!     .lookup(api)
//!     .renderer(composer)
//!     .build()?;
//!
//! let kind = PlaylistKind::Match;
//! let result = generator.generate(Path::new("pool.properties"), kind.suffix(), &kind.options())?;
//! println!("Wrote {}", result.html_path.display());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod batch;
pub mod beatmap;
pub mod config;
pub mod cover;
pub mod difficulty;
pub mod download;
pub mod error;
pub mod generator;
pub mod mods;
pub mod parser;
pub mod playlist;
pub mod report;
pub mod utils;

// Error types
pub use error::{Error, Result};

// Beatmap types
pub use beatmap::{BeatmapDifficulty, BeatmapInfo, BeatmapMetadata, GameMode};

// Configuration
pub use config::{CoverStyle, FontRole, FontSet, GeneratorConfig};

// Definitions and mods
pub use mods::{Mod, ModSet};
pub use playlist::{Annotation, PlaylistDefinition, PlaylistEntry, Properties};

// Parsing
pub use parser::{extract_osz, find_difficulty, parse_osu_file, ExtractedDifficulty};

// Web API and downloads
pub use api::{ApiBeatmap, ApiBeatmapset, BeatmapLookup, Covers, Credentials, OsuApi};
pub use download::{AssetSource, Downloader};

// Difficulty
pub use difficulty::{
    recalculate, BaseAttributes, DifficultyEngine, DifficultyResult, EngineAttributes, RosuEngine,
    StarRating,
};

// Covers
pub use cover::{CoverComposer, CoverRenderer, CoverText, DifficultyTable, Fonts, TextMeasure};

// Report
pub use report::{create_package, export_csv, Report, ReportRow};

// Pipeline
pub use batch::{discover, BatchDriver, BatchJob, BatchOptions, BatchSummary, PlaylistKind};
pub use generator::{
    AssetFactory, GeneratePhase, GenerateProgress, GenerateResult, PlaylistGenerator,
    PlaylistGeneratorBuilder, ProgressCallback, RenderOptions,
};
