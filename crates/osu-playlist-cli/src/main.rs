//! osu-playlist - playlist page generator for osu!
//!
//! Usage:
//!   osu-playlist batch <dir>                 Generate every O./M./SP. definition
//!   osu-playlist generate <file.properties>  Generate one playlist
//!   osu-playlist recalc <file.osu> --mods .. Recalculate difficulty locally
//!   osu-playlist config [--init]             Show or create the configuration

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};
use commands::recalc::Overrides;
use commands::GlobalOptions;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = GlobalOptions {
        config: args.config.as_deref(),
        credentials: args.credentials.as_deref(),
        json: args.json,
    };

    match args.command {
        Command::Batch {
            ref dir,
            ref out,
            force,
            package,
            fail_fast,
        } => commands::batch::run(dir, out.clone(), force, package, fail_fast, &options),
        Command::Generate {
            ref file,
            kind,
            ref suffix,
            package,
        } => commands::generate::run(
            file,
            kind.map(Into::into),
            suffix.as_deref(),
            package,
            &options,
        ),
        Command::Recalc {
            ref file,
            ref mods,
            cs,
            hp,
            od,
            ar,
            bpm,
        } => commands::recalc::run(file, mods, Overrides { cs, hp, od, ar, bpm }, args.json),
        Command::Config { init } => commands::config::run(init, &options),
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "osu_playlist_core=debug,osu_playlist=debug,info",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
