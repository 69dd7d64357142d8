//! `generate` command

use anyhow::Result;
use std::path::Path;

use osu_playlist_core::PlaylistKind;

use super::{build_generator, load_config, GlobalOptions};

pub fn run(
    file: &Path,
    kind: Option<PlaylistKind>,
    suffix: Option<&str>,
    package: bool,
    options: &GlobalOptions<'_>,
) -> Result<()> {
    let kind = kind
        .or_else(|| {
            file.file_name()
                .and_then(|n| PlaylistKind::from_filename(&n.to_string_lossy()))
                .map(|(kind, _)| kind)
        })
        .unwrap_or(PlaylistKind::Original);

    let mut render = kind.options();
    render.package = package;
    let suffix = suffix.unwrap_or(kind.suffix());

    let config = load_config(options)?;
    let generator = build_generator(config, options)?;
    let result = generator.generate(file, suffix, &render)?;

    if options.json {
        println!(
            "{}",
            serde_json::json!({
                "title": result.title,
                "kind": kind.to_string(),
                "html": result.html_path.to_string_lossy(),
                "covers": result.covers_dir.to_string_lossy(),
                "package": result.package_path.as_ref().map(|p| p.to_string_lossy()),
                "entries": result.entries,
                "placeholders": result.placeholders,
                "elapsed_seconds": result.elapsed_seconds,
            })
        );
    } else {
        eprintln!();
        println!("Generated {} ({} entries)", result.title, result.entries);
        println!("  Page:   {}", result.html_path.display());
        println!("  Covers: {}", result.covers_dir.display());
        if let Some(package) = &result.package_path {
            println!("  Package: {}", package.display());
        }
        if result.placeholders > 0 {
            println!("  {} entries without a cover image", result.placeholders);
        }
    }

    Ok(())
}
