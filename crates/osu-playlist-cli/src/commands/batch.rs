//! `batch` command

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use osu_playlist_core::{BatchDriver, BatchOptions};

use super::{build_generator, load_config, GlobalOptions};

pub fn run(
    dir: &Path,
    out: Option<PathBuf>,
    force: bool,
    package: bool,
    fail_fast: bool,
    options: &GlobalOptions<'_>,
) -> Result<()> {
    if !dir.is_dir() {
        bail!("Not a directory: {}", dir.display());
    }

    let config = load_config(options)?;
    let generator = build_generator(config, options)?;

    let batch = BatchOptions {
        output_dir: out,
        force,
        package,
        fail_fast,
    };
    let summary = BatchDriver::new(&generator, batch).run(dir)?;

    if options.json {
        let failed: Vec<_> = summary
            .failed
            .iter()
            .map(|(name, error)| serde_json::json!({ "name": name, "error": error }))
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "summary": {
                    "total": summary.total(),
                    "generated": summary.generated.len(),
                    "skipped": summary.skipped.len(),
                    "failed": summary.failed.len(),
                },
                "generated": summary.generated,
                "skipped": summary.skipped,
                "failed": failed,
            })
        );
    } else {
        println!();
        println!("Batch Results:");
        println!("  Generated: {}", summary.generated.len());
        println!("  Skipped:   {}", summary.skipped.len());
        println!("  Failed:    {}", summary.failed.len());
    }

    if !summary.is_success() {
        bail!("{} playlists failed", summary.failed.len());
    }
    Ok(())
}
