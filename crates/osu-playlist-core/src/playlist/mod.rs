//! Playlist definition files
//!
//! A definition is a properties file mapping beatmap ids to annotations of
//! the form `"<mods> [<targets>] (<notes>)"`, e.g.
//!
//! ```text
//! 2116202=HD HR [S/SS/SS+HD] (warmup)
//! 1872396=NM [] ()
//! ```

mod properties;

pub use properties::Properties;

use regex::Regex;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::mods::ModSet;

/// Parsed annotation of one playlist entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotation {
    pub mods: ModSet,
    pub targets: Vec<String>,
    pub notes: String,
}

fn annotation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(.*?)\s*\[(.*)\]\s*\((.*)\)\s*$").expect("annotation pattern is valid")
    })
}

impl FromStr for Annotation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let captures = annotation_pattern()
            .captures(s)
            .ok_or_else(|| Error::InvalidAnnotation {
                key: String::new(),
                value: s.to_string(),
            })?;

        let targets = captures[2]
            .split('/')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            mods: ModSet::parse(&captures[1]),
            targets,
            notes: captures[3].trim().to_string(),
        })
    }
}

/// One beatmap of a playlist
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistEntry {
    /// 1-based position in the definition file
    pub rank: usize,
    pub beatmap_id: u32,
    pub annotation: Annotation,
}

/// A loaded playlist definition
#[derive(Debug, Clone)]
pub struct PlaylistDefinition {
    /// Path of the definition file
    pub path: PathBuf,
    pub entries: Vec<PlaylistEntry>,
}

impl PlaylistDefinition {
    /// Load and validate a definition file
    pub fn load(path: &Path) -> Result<Self> {
        let props = Properties::load(path)?;
        Self::from_properties(path, &props)
    }

    /// Build a definition from already parsed properties.
    ///
    /// Mod sets are validated here so an illegal combination fails before
    /// any network traffic.
    pub fn from_properties(path: &Path, props: &Properties) -> Result<Self> {
        let mut entries = Vec::with_capacity(props.len());

        for (key, value) in props.iter() {
            let invalid = || Error::InvalidAnnotation {
                key: key.to_string(),
                value: value.to_string(),
            };

            let beatmap_id: u32 = key.parse().map_err(|_| invalid())?;
            let annotation: Annotation = value.parse().map_err(|_| invalid())?;
            annotation.mods.validate()?;

            entries.push(PlaylistEntry {
                rank: entries.len() + 1,
                beatmap_id,
                annotation,
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Beatmap ids in rank order
    pub fn beatmap_ids(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.beatmap_id).collect()
    }

    /// File name without extension, used as page title
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// `<name>.html` next to the definition
    pub fn html_path(&self) -> PathBuf {
        self.path.with_extension("html")
    }

    /// `<name>.covers/` next to the definition
    pub fn covers_dir(&self) -> PathBuf {
        self.path.with_extension("covers")
    }

    /// `<name>.csv` next to the definition
    pub fn csv_path(&self) -> PathBuf {
        self.path.with_extension("csv")
    }

    /// `<name>.zip` next to the definition
    pub fn package_path(&self) -> PathBuf {
        self.path.with_extension("zip")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
