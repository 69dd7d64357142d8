//! Command implementations and shared setup

pub mod batch;
pub mod config;
pub mod generate;
pub mod recalc;

use anyhow::{Context, Result};
use std::path::Path;

use osu_playlist_core::{
    CoverComposer, Credentials, Fonts, GenerateProgress, GeneratorConfig, OsuApi, PlaylistGenerator,
};

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions<'a> {
    pub config: Option<&'a Path>,
    pub credentials: Option<&'a Path>,
    pub json: bool,
}

/// Load the configuration from `--config`, or the per-user file
pub fn load_config(options: &GlobalOptions<'_>) -> Result<GeneratorConfig> {
    match options.config {
        Some(path) => GeneratorConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(GeneratorConfig::load()),
    }
}

/// Authenticate against the API, load fonts and assemble a generator
pub fn build_generator(
    config: GeneratorConfig,
    options: &GlobalOptions<'_>,
) -> Result<PlaylistGenerator> {
    let credentials_path = options
        .credentials
        .map(Path::to_path_buf)
        .or_else(|| config.credentials_path.clone())
        .context(
            "No credentials file configured (use --credentials or credentials_path in the config)",
        )?;
    tracing::debug!("Using credentials from {}", credentials_path.display());
    let credentials = Credentials::load(&credentials_path)
        .with_context(|| format!("Failed to read credentials {}", credentials_path.display()))?;

    let api = OsuApi::authenticate(&credentials, &config.api_base_url, config.http_timeout())
        .context("Failed to authenticate with the osu! API")?;
    tracing::info!("Authenticated with {}", config.api_base_url);
    let fonts = Fonts::load(&config.fonts).context("Failed to load cover fonts")?;
    let composer = CoverComposer::new(fonts, config.cover.clone());

    let mut builder = PlaylistGenerator::builder(config).lookup(api).renderer(composer);
    if !options.json {
        builder = builder.progress_callback(Box::new(|progress: GenerateProgress| {
            if let Some(id) = progress.beatmap_id {
                eprint!(
                    "\r  [{}/{}] {} {:<28}",
                    progress.current, progress.total, id, progress.phase
                );
            }
        }));
    }

    Ok(builder.build()?)
}
