//! Batch generation over a directory of playlist definitions
//!
//! Definition files are named `<kind>.<name>.properties` where the kind
//! prefix is `O` (original), `M` (match) or `SP` (skill practice). Each file
//! is copied to `<out>/<name>.properties` and generated there, so the page
//! lands at `<out>/<name>.html`. The staged copy is always removed again.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::generator::{GenerateResult, PlaylistGenerator, RenderOptions};

/// Playlist type encoded in the definition file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaylistKind {
    Original,
    Match,
    SkillPractice,
}

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(O|M|SP)\.(.+)\.properties$").expect("filename pattern is valid")
    })
}

impl PlaylistKind {
    /// Kind and playlist name of a definition file name, if it follows the
    /// naming convention
    pub fn from_filename(filename: &str) -> Option<(Self, String)> {
        let captures = filename_pattern().captures(filename)?;
        let kind = match &captures[1] {
            "O" => Self::Original,
            "M" => Self::Match,
            _ => Self::SkillPractice,
        };
        Some((kind, captures[2].to_string()))
    }

    /// Render options for this kind; `package` is left off
    pub fn options(&self) -> RenderOptions {
        match self {
            Self::Original => RenderOptions {
                draw_targets: true,
                draw_difficulty_table: false,
                recalculate: false,
                package: false,
            },
            Self::Match | Self::SkillPractice => RenderOptions {
                draw_targets: false,
                draw_difficulty_table: true,
                recalculate: true,
                package: false,
            },
        }
    }

    /// Appended to the playlist name to form the page title
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Original => " — original playlist",
            Self::Match => " — match playlist",
            Self::SkillPractice => " — original skill practice playlist",
        }
    }
}

impl fmt::Display for PlaylistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::Match => write!(f, "match"),
            Self::SkillPractice => write!(f, "skill-practice"),
        }
    }
}

impl std::str::FromStr for PlaylistKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "o" | "original" => Ok(Self::Original),
            "m" | "match" => Ok(Self::Match),
            "sp" | "skill-practice" | "skill_practice" => Ok(Self::SkillPractice),
            other => Err(Error::Other(format!("Unknown playlist kind: {}", other))),
        }
    }
}

/// A definition file found in the input directory
#[derive(Debug, Clone, PartialEq)]
pub struct BatchJob {
    pub source: PathBuf,
    pub name: String,
    pub kind: PlaylistKind,
}

/// Options for a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Where pages are written; defaults to the input directory
    pub output_dir: Option<PathBuf>,
    /// Regenerate even when the page already exists
    pub force: bool,
    /// Package every generated playlist
    pub package: bool,
    /// Stop at the first failing playlist
    pub fail_fast: bool,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub generated: Vec<String>,
    pub skipped: Vec<String>,
    /// Playlist name and error message
    pub failed: Vec<(String, String)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.generated.len() + self.skipped.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Removes the staged definition copy when dropped
struct StagedCopy {
    path: PathBuf,
}

impl StagedCopy {
    /// Copy `source` to `dest`, refusing to overwrite an existing file
    fn create(source: &Path, dest: &Path) -> Result<Self> {
        if dest.exists() {
            return Err(Error::Other(format!(
                "Refusing to overwrite existing {}",
                dest.display()
            )));
        }
        fs::copy(source, dest)?;
        Ok(Self {
            path: dest.to_path_buf(),
        })
    }
}

impl Drop for StagedCopy {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!("Failed to remove staged {}: {}", self.path.display(), e);
        }
    }
}

/// List the definition files in `dir`, sorted by file name
pub fn discover(dir: &Path) -> Result<Vec<BatchJob>> {
    let mut jobs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let filename = entry.file_name().to_string_lossy().into_owned();
        match PlaylistKind::from_filename(&filename) {
            Some((kind, name)) => jobs.push(BatchJob {
                source: entry.path(),
                name,
                kind,
            }),
            None => tracing::debug!("Ignoring {}", filename),
        }
    }
    jobs.sort_by(|a, b| a.source.cmp(&b.source));
    Ok(jobs)
}

/// Runs a [`PlaylistGenerator`] over every definition in a directory
pub struct BatchDriver<'a> {
    generator: &'a PlaylistGenerator,
    options: BatchOptions,
}

impl<'a> BatchDriver<'a> {
    pub fn new(generator: &'a PlaylistGenerator, options: BatchOptions) -> Self {
        Self { generator, options }
    }

    /// Process every definition in `input_dir`.
    ///
    /// Prints one `skipped`, `generated` or `failed` line per playlist.
    /// Failures are recorded and the loop moves on unless `fail_fast` is set.
    pub fn run(&self, input_dir: &Path) -> Result<BatchSummary> {
        let output_dir = self.options.output_dir.as_deref().unwrap_or(input_dir);
        fs::create_dir_all(output_dir)?;

        let jobs = discover(input_dir)?;
        tracing::info!("Found {} playlist definitions in {}", jobs.len(), input_dir.display());

        let mut name_counts: HashMap<&str, usize> = HashMap::new();
        for job in &jobs {
            *name_counts.entry(job.name.as_str()).or_default() += 1;
        }

        let mut summary = BatchSummary::default();
        for job in &jobs {
            // Kinds share the output stem, so one name can only be generated once
            if name_counts[job.name.as_str()] > 1 {
                let e = Error::Other(format!(
                    "{} is defined more than once in {}",
                    job.name,
                    input_dir.display()
                ));
                println!("failed {}: {}", job.name, e);
                tracing::error!("Skipping {}: {}", job.source.display(), e);
                if self.options.fail_fast {
                    return Err(e);
                }
                summary.failed.push((job.name.clone(), e.to_string()));
                continue;
            }

            let html = output_dir.join(format!("{}.html", job.name));
            if html.exists() && !self.options.force {
                println!("skipped {}", job.name);
                summary.skipped.push(job.name.clone());
                continue;
            }

            match self.run_job(job, output_dir) {
                Ok(result) => {
                    println!("generated {}", job.name);
                    tracing::info!("{} done in {}s", result.title, result.elapsed_seconds);
                    summary.generated.push(job.name.clone());
                }
                Err(e) => {
                    println!("failed {}: {}", job.name, e);
                    tracing::error!("Failed to generate {}: {}", job.name, e);
                    if self.options.fail_fast {
                        return Err(e);
                    }
                    summary.failed.push((job.name.clone(), e.to_string()));
                }
            }
        }

        Ok(summary)
    }

    fn run_job(&self, job: &BatchJob, output_dir: &Path) -> Result<GenerateResult> {
        let staged_path = output_dir.join(format!("{}.properties", job.name));
        let staged = StagedCopy::create(&job.source, &staged_path)?;

        let mut options = job.kind.options();
        options.package = self.options.package;

        self.generator.generate(&staged.path, job.kind.suffix(), &options)
    }
}
