//! CLI argument definitions for osu-playlist.

use clap::{Parser, Subcommand, ValueEnum};
use osu_playlist_core::PlaylistKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "osu-playlist")]
#[command(about = "Generate osu! playlist pages with composed beatmap covers", version)]
pub struct Args {
    /// Configuration file (defaults to the per-user config)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Properties file with client_id and client_secret
    #[arg(long, global = true, value_name = "FILE", env = "OSU_PLAYLIST_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Machine-readable output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate every O./M./SP. playlist definition in a directory
    Batch {
        /// Directory holding the definition files
        dir: PathBuf,
        /// Output directory (defaults to the input directory)
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Regenerate pages that already exist
        #[arg(long)]
        force: bool,
        /// Also write a CSV export and a zip package per playlist
        #[arg(long)]
        package: bool,
        /// Stop at the first failing playlist
        #[arg(long)]
        fail_fast: bool,
    },
    /// Generate a single playlist page next to its definition
    Generate {
        /// Playlist definition (.properties)
        file: PathBuf,
        /// Playlist kind (defaults to the file name prefix, else original)
        #[arg(long, short, value_enum)]
        kind: Option<KindArg>,
        /// Page title suffix (defaults to the kind's suffix)
        #[arg(long)]
        suffix: Option<String>,
        /// Also write a CSV export and a zip package
        #[arg(long)]
        package: bool,
    },
    /// Recalculate difficulty of a local .osu file for a mod combination
    Recalc {
        /// Beatmap file (.osu)
        file: PathBuf,
        /// Space separated mods, e.g. "HD HR"
        #[arg(long, short, default_value = "")]
        mods: String,
        /// Override base circle size
        #[arg(long)]
        cs: Option<f64>,
        /// Override base HP drain
        #[arg(long)]
        hp: Option<f64>,
        /// Override base overall difficulty
        #[arg(long)]
        od: Option<f64>,
        /// Override base approach rate
        #[arg(long)]
        ar: Option<f64>,
        /// Override base BPM
        #[arg(long)]
        bpm: Option<f64>,
    },
    /// Show the configuration, or write the defaults with --init
    Config {
        /// Write the configuration file
        #[arg(long)]
        init: bool,
    },
}

/// Playlist kind as given on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    Original,
    Match,
    SkillPractice,
}

impl From<KindArg> for PlaylistKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Original => Self::Original,
            KindArg::Match => Self::Match,
            KindArg::SkillPractice => Self::SkillPractice,
        }
    }
}
