//! Playlist page generation pipeline
//!
//! For one definition file: resolve every beatmap through the API, compose a
//! cover per entry (optionally with recalculated difficulty), and write the
//! HTML page next to the definition. Entries are processed one at a time
//! with a fixed pause in between; all downloads live in a temporary
//! directory that is removed when generation ends, successfully or not.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tempfile::TempDir;

use crate::api::{ApiBeatmap, BeatmapLookup};
use crate::config::GeneratorConfig;
use crate::cover::{load_background, CoverRenderer, CoverText, DifficultyTable};
use crate::difficulty::{recalculate, DifficultyEngine, DifficultyResult, RosuEngine};
use crate::download::{AssetSource, Downloader};
use crate::error::{Error, Result};
use crate::parser::{extract_osz, find_difficulty};
use crate::playlist::{PlaylistDefinition, PlaylistEntry};
use crate::report::{create_package, export_csv, Report, ReportRow};
use crate::utils::relative_link;

/// What to draw and compute for a playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Draw target badges along the right edge of each cover
    pub draw_targets: bool,
    /// Draw the difficulty table on each cover
    pub draw_difficulty_table: bool,
    /// Download beatmap archives and recalculate difficulty for the entry's mods
    pub recalculate: bool,
    /// Also write `<name>.csv` and `<name>.zip`
    pub package: bool,
}

/// Phase of the generation of a single playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratePhase {
    /// Resolving beatmap ids through the API
    #[default]
    Lookup,
    /// Fetching the cover background
    Cover,
    /// Downloading the archive and recalculating difficulty
    Difficulty,
    /// Drawing and saving the cover
    Compose,
    /// Writing the page and exports
    Report,
    Complete,
}

impl std::fmt::Display for GeneratePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lookup => write!(f, "Looking up beatmaps"),
            Self::Cover => write!(f, "Fetching cover"),
            Self::Difficulty => write!(f, "Recalculating difficulty"),
            Self::Compose => write!(f, "Composing cover"),
            Self::Report => write!(f, "Writing report"),
            Self::Complete => write!(f, "Complete"),
        }
    }
}

/// Progress information for generation callbacks
#[derive(Debug, Clone, Default)]
pub struct GenerateProgress {
    /// 1-based index of the current entry, 0 outside the entry loop
    pub current: usize,
    pub total: usize,
    pub beatmap_id: Option<u32>,
    pub phase: GeneratePhase,
}

/// Progress callback type
pub type ProgressCallback = Box<dyn Fn(GenerateProgress) + Send + Sync>;

/// Creates the asset source for one playlist run inside its temporary directory
pub type AssetFactory = Box<dyn Fn(&Path) -> Result<Box<dyn AssetSource>>>;

/// Outcome of generating one playlist
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Page title: definition name plus suffix
    pub title: String,
    pub html_path: PathBuf,
    pub covers_dir: PathBuf,
    /// Set in package mode
    pub package_path: Option<PathBuf>,
    pub entries: usize,
    /// Entries that fell back to the placeholder background
    pub placeholders: usize,
    pub elapsed_seconds: u64,
}

/// Generates playlist pages
pub struct PlaylistGenerator {
    config: GeneratorConfig,
    lookup: Box<dyn BeatmapLookup>,
    renderer: Box<dyn CoverRenderer>,
    engine: Box<dyn DifficultyEngine>,
    assets: AssetFactory,
    progress_callback: Option<ProgressCallback>,
}

impl PlaylistGenerator {
    pub fn builder(config: GeneratorConfig) -> PlaylistGeneratorBuilder {
        PlaylistGeneratorBuilder::new(config)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn report_progress(&self, progress: GenerateProgress) {
        if let Some(ref cb) = self.progress_callback {
            cb(progress);
        }
    }

    /// Generate the page for the definition at `definition_path`.
    ///
    /// Output lands next to the definition: `<name>.html`, `<name>.covers/`
    /// and, in package mode, `<name>.csv` and `<name>.zip`.
    pub fn generate(
        &self,
        definition_path: &Path,
        suffix: &str,
        options: &RenderOptions,
    ) -> Result<GenerateResult> {
        let start = Instant::now();
        let definition = PlaylistDefinition::load(definition_path)?;
        let title = format!("{}{}", definition.name(), suffix);
        let total = definition.len();

        tracing::info!("Generating {} ({} entries)", title, total);

        self.report_progress(GenerateProgress {
            total,
            ..Default::default()
        });
        let beatmaps = self.lookup.beatmaps(&definition.beatmap_ids())?;
        if beatmaps.len() != total {
            return Err(Error::Other(format!(
                "Lookup returned {} beatmaps for {} entries",
                beatmaps.len(),
                total
            )));
        }

        let workdir = tempfile::Builder::new().prefix("osu-playlist-").tempdir()?;
        let assets = (self.assets)(workdir.path())?;

        // Covers from an earlier run are not reused
        let covers_dir = definition.covers_dir();
        if covers_dir.exists() {
            fs::remove_dir_all(&covers_dir)?;
        }
        fs::create_dir_all(&covers_dir)?;
        let base = definition.path.parent().unwrap_or_else(|| Path::new(""));

        let mut report = Report::new(title.clone());
        let mut placeholders = 0usize;

        for (index, (entry, beatmap)) in definition.entries.iter().zip(&beatmaps).enumerate() {
            if index > 0 && !self.config.request_delay().is_zero() {
                std::thread::sleep(self.config.request_delay());
            }

            let job = EntryJob {
                entry,
                beatmap,
                current: index + 1,
                total,
            };
            let (cover_path, difficulty, placeholder) =
                self.process_entry(&job, assets.as_ref(), &workdir, &covers_dir, options)?;
            if placeholder {
                placeholders += 1;
            }

            report.push(ReportRow {
                rank: entry.rank,
                beatmap_id: beatmap.id,
                beatmapset_id: beatmap.beatmapset_id,
                label: format!(
                    "{} - {} [{}]",
                    beatmap.beatmapset.display_artist(),
                    beatmap.beatmapset.display_title(),
                    beatmap.version
                ),
                cover_src: relative_link(&cover_path, base),
                link: beatmap.url(),
                difficulty,
                notes: entry.annotation.notes.clone(),
            });
        }

        self.report_progress(GenerateProgress {
            current: total,
            total,
            beatmap_id: None,
            phase: GeneratePhase::Report,
        });

        let html_path = definition.html_path();
        report.write_html(&html_path)?;

        let package_path = if options.package {
            export_csv(&report, &definition.csv_path())?;
            let path = definition.package_path();
            create_package(&definition, &path)?;
            Some(path)
        } else {
            None
        };

        workdir.close()?;

        self.report_progress(GenerateProgress {
            current: total,
            total,
            beatmap_id: None,
            phase: GeneratePhase::Complete,
        });

        tracing::info!("Wrote {}", html_path.display());

        Ok(GenerateResult {
            title,
            html_path,
            covers_dir,
            package_path,
            entries: total,
            placeholders,
            elapsed_seconds: start.elapsed().as_secs(),
        })
    }

    /// Compose and save the cover of one entry.
    ///
    /// Returns the cover path, the recalculated difficulty if requested, and
    /// whether the placeholder background was used.
    fn process_entry(
        &self,
        job: &EntryJob<'_>,
        assets: &dyn AssetSource,
        workdir: &TempDir,
        covers_dir: &Path,
        options: &RenderOptions,
    ) -> Result<(PathBuf, Option<DifficultyResult>, bool)> {
        let EntryJob { entry, beatmap, .. } = *job;
        let stem = format!("{}-{}", entry.rank, beatmap.id);

        tracing::debug!(
            "[{}/{}] {} {} {}",
            job.current,
            job.total,
            beatmap.id,
            entry.annotation.mods,
            beatmap.beatmapset.display_title()
        );

        self.report_progress(job.progress(GeneratePhase::Cover));
        let background = load_background(assets, &beatmap.beatmapset.covers, &stem)?;

        let difficulty = if options.recalculate {
            self.report_progress(job.progress(GeneratePhase::Difficulty));
            Some(self.recalculate_entry(entry, beatmap, assets, workdir)?)
        } else {
            None
        };

        let table = options.draw_difficulty_table.then(|| match &difficulty {
            Some(result) => DifficultyTable::adjusted(beatmap, result),
            None => DifficultyTable::original(beatmap),
        });
        let targets: &[String] = if options.draw_targets {
            &entry.annotation.targets
        } else {
            &[]
        };

        self.report_progress(job.progress(GeneratePhase::Compose));
        let cover = self.renderer.render(
            background.image,
            &CoverText {
                version: &beatmap.version,
                title: beatmap.beatmapset.display_title(),
                artist: beatmap.beatmapset.display_artist(),
                creator: &beatmap.beatmapset.creator,
                mods: &entry.annotation.mods,
                targets,
                table: table.as_ref(),
            },
        )?;

        let cover_path = covers_dir.join(format!("{}.jpg", stem));
        cover.save(&cover_path)?;

        Ok((cover_path, difficulty, background.is_placeholder))
    }

    fn recalculate_entry(
        &self,
        entry: &PlaylistEntry,
        beatmap: &ApiBeatmap,
        assets: &dyn AssetSource,
        workdir: &TempDir,
    ) -> Result<DifficultyResult> {
        let set_id = beatmap.beatmapset_id;
        let osz = assets.fetch(
            &self.config.beatmapset_url(set_id),
            &format!("{}.osz", set_id),
        )?;

        let extract_dir = workdir.path().join(set_id.to_string());
        let difficulties = extract_osz(&osz, &extract_dir)?;
        let difficulty = find_difficulty(&difficulties, beatmap.id, &beatmap.version)?;

        recalculate(
            self.engine.as_ref(),
            &beatmap.base_attributes(),
            &difficulty.path,
            &entry.annotation.mods,
        )
    }
}

/// One entry in flight
struct EntryJob<'a> {
    entry: &'a PlaylistEntry,
    beatmap: &'a ApiBeatmap,
    current: usize,
    total: usize,
}

impl EntryJob<'_> {
    fn progress(&self, phase: GeneratePhase) -> GenerateProgress {
        GenerateProgress {
            current: self.current,
            total: self.total,
            beatmap_id: Some(self.beatmap.id),
            phase,
        }
    }
}

/// Builder for [`PlaylistGenerator`]
pub struct PlaylistGeneratorBuilder {
    config: GeneratorConfig,
    lookup: Option<Box<dyn BeatmapLookup>>,
    renderer: Option<Box<dyn CoverRenderer>>,
    engine: Option<Box<dyn DifficultyEngine>>,
    assets: Option<AssetFactory>,
    progress_callback: Option<ProgressCallback>,
}

impl PlaylistGeneratorBuilder {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            lookup: None,
            renderer: None,
            engine: None,
            assets: None,
            progress_callback: None,
        }
    }

    /// Set the beatmap lookup (required)
    pub fn lookup(mut self, lookup: impl BeatmapLookup + 'static) -> Self {
        self.lookup = Some(Box::new(lookup));
        self
    }

    /// Set the cover renderer (required)
    pub fn renderer(mut self, renderer: impl CoverRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Set the difficulty engine; defaults to [`RosuEngine`]
    pub fn engine(mut self, engine: impl DifficultyEngine + 'static) -> Self {
        self.engine = Some(Box::new(engine));
        self
    }

    /// Set how downloads are performed; defaults to a [`Downloader`] in the
    /// run's temporary directory
    pub fn assets(mut self, factory: AssetFactory) -> Self {
        self.assets = Some(factory);
        self
    }

    /// Set the progress callback
    pub fn progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn build(self) -> Result<PlaylistGenerator> {
        let lookup = self
            .lookup
            .ok_or_else(|| Error::Config("Beatmap lookup not configured".to_string()))?;
        let renderer = self
            .renderer
            .ok_or_else(|| Error::Config("Cover renderer not configured".to_string()))?;

        let timeout = self.config.http_timeout();
        let assets = self.assets.unwrap_or_else(|| {
            Box::new(move |dir: &Path| -> Result<Box<dyn AssetSource>> {
                Ok(Box::new(Downloader::new(dir, timeout)?))
            })
        });

        Ok(PlaylistGenerator {
            config: self.config,
            lookup,
            renderer,
            engine: self.engine.unwrap_or_else(|| Box::new(RosuEngine::new())),
            assets,
            progress_callback: self.progress_callback,
        })
    }
}
