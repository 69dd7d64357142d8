//! CSV export and zip packaging of a generated playlist

use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::Report;
use crate::error::{Error, Result};
use crate::playlist::PlaylistDefinition;

/// Export the report rows to CSV format
pub fn export_csv(report: &Report, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record([
        "rank",
        "beatmap_id",
        "beatmapset_id",
        "beatmap",
        "link",
        "cover",
        "mods",
        "star",
        "cs",
        "hp",
        "od",
        "ar",
        "bpm",
        "max_combo",
        "notes",
    ])?;

    for row in report.rows() {
        let difficulty = match &row.difficulty {
            Some(d) => [
                d.mods.clone(),
                d.star_rating.to_string(),
                format!("{:.2}", d.cs),
                format!("{:.2}", d.hp),
                format!("{:.2}", d.od),
                format!("{:.2}", d.ar),
                format!("{:.2}", d.bpm),
                d.max_combo.to_string(),
            ],
            None => Default::default(),
        };

        let mut record = vec![
            row.rank.to_string(),
            row.beatmap_id.to_string(),
            row.beatmapset_id.to_string(),
            row.label.clone(),
            row.link.clone(),
            row.cover_src.clone(),
        ];
        record.extend(difficulty);
        record.push(row.notes.clone());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Bundle the page, its CSV export and the covers directory into `dest`.
///
/// Archive paths are relative to the definition's directory so the page's
/// cover links stay valid after extraction.
pub fn create_package(definition: &PlaylistDefinition, dest: &Path) -> Result<usize> {
    let base = definition.path.parent().unwrap_or_else(|| Path::new(""));

    let file = File::create(dest)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(6));

    let mut files = 0usize;
    for path in [definition.html_path(), definition.csv_path()] {
        if path.is_file() {
            add_file_to_zip(&mut zip, &path, &archive_name(&path, base), options)?;
            files += 1;
        }
    }

    let covers = definition.covers_dir();
    if covers.is_dir() {
        for entry in WalkDir::new(&covers).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::Other(e.to_string()))?;
            if entry.file_type().is_file() {
                let name = archive_name(entry.path(), base);
                add_file_to_zip(&mut zip, entry.path(), &name, options)?;
                files += 1;
            } else if entry.file_type().is_dir() {
                zip.add_directory(archive_name(entry.path(), base) + "/", options)?;
            }
        }
    }

    zip.finish()?;
    tracing::debug!("Packaged {} files into {}", files, dest.display());
    Ok(files)
}

fn archive_name(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn add_file_to_zip<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    file_path: &Path,
    archive_path: &str,
    options: SimpleFileOptions,
) -> Result<u64> {
    let mut file = File::open(file_path)?;
    let file_size = file.metadata()?.len();

    zip.start_file(archive_path, options)?;

    let mut buffer = vec![0u8; 64 * 1024];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        zip.write_all(&buffer[..bytes_read])?;
    }

    Ok(file_size)
}
