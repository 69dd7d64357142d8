//! HTML playlist page assembly

mod export;

pub use export::{create_package, export_csv};

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::difficulty::DifficultyResult;
use crate::error::Result;
use crate::utils::escape_html;

const STYLE: &str = "\
body { color: #ebebeb; font-family: sans-serif; }
table.pd { border-collapse: collapse; margin: auto; }
table.pd th, table.pd td { border: 1px solid #3f3f3f; padding: 4px 8px; text-align: center; }
table.pd th { background-color: #2a2a2a; }
a { color: #b4ebfa; }";

/// One playlist entry in the generated page
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub rank: usize,
    pub beatmap_id: u32,
    pub beatmapset_id: u32,
    /// `Artist - Title [Version]`
    pub label: String,
    /// Link to the composed cover, relative to the page
    pub cover_src: String,
    /// Beatmap page URL
    pub link: String,
    pub difficulty: Option<DifficultyResult>,
    pub notes: String,
}

/// Rows keyed by rank, always iterated in ascending rank order
#[derive(Debug, Clone, Default)]
pub struct Report {
    title: String,
    rows: BTreeMap<usize, ReportRow>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: BTreeMap::new(),
        }
    }

    /// Add a row; a row with the same rank is replaced
    pub fn push(&mut self, row: ReportRow) {
        if let Some(old) = self.rows.insert(row.rank, row) {
            tracing::warn!("Replaced report row for rank {}", old.rank);
        }
    }

    /// Rows in ascending rank order
    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn has_difficulty(&self) -> bool {
        self.rows().any(|r| r.difficulty.is_some())
    }

    /// Render the complete page
    pub fn render_html(&self) -> String {
        self.to_string()
    }

    /// Render and write the page to `path`
    pub fn write_html(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render_html())?;
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let with_difficulty = self.has_difficulty();

        let mut headers = vec!["#", "BID", "SID", "Beatmap Info"];
        if with_difficulty {
            headers.extend(["Mods", "Star", "CS", "HP", "OD", "AR", "BPM", "Combo"]);
        }
        headers.push("NOTES");

        writeln!(f, "<html>")?;
        writeln!(
            f,
            "  <head><meta charset=\"utf-8\"><title>{}</title>",
            escape_html(&self.title)
        )?;
        writeln!(f, "  <link rel=\"stylesheet\" type=\"text/css\" href=\"style.css\"/>")?;
        writeln!(f, "  <style>\n{}\n  </style></head>", STYLE)?;
        writeln!(f, "  <body bgcolor=\"#1f1f1f\">")?;
        writeln!(f, "    <table border=\"1\" class=\"dataframe pd\">")?;
        writeln!(f, "      <thead>")?;
        writeln!(f, "        <tr style=\"text-align: center;\">")?;
        for header in &headers {
            writeln!(f, "          <th>{}</th>", header)?;
        }
        writeln!(f, "        </tr>")?;
        writeln!(f, "      </thead>")?;
        writeln!(f, "      <tbody>")?;

        for row in self.rows() {
            let mut cells = vec![
                row.rank.to_string(),
                row.beatmap_id.to_string(),
                row.beatmapset_id.to_string(),
                format!(
                    "<a href=\"{}\"><img src=\"{}\" alt=\"{}\" height=\"118\"/></a>",
                    escape_html(&row.link),
                    escape_html(&row.cover_src),
                    escape_html(&row.label)
                ),
            ];
            if with_difficulty {
                cells.extend(difficulty_cells(row.difficulty.as_ref()));
            }
            cells.push(escape_html(&row.notes));

            writeln!(f, "        <tr>")?;
            for cell in cells {
                writeln!(f, "          <td>{}</td>", cell)?;
            }
            writeln!(f, "        </tr>")?;
        }

        writeln!(f, "      </tbody>")?;
        writeln!(f, "    </table>")?;
        writeln!(f, "  </body>")?;
        writeln!(f, "</html>")
    }
}

fn difficulty_cells(difficulty: Option<&DifficultyResult>) -> Vec<String> {
    match difficulty {
        Some(d) => vec![
            escape_html(&d.mods),
            d.star_rating.to_string(),
            format!("{:.2}", d.cs),
            format!("{:.2}", d.hp),
            format!("{:.2}", d.od),
            format!("{:.2}", d.ar),
            format!("{:.2}", d.bpm),
            d.max_combo.to_string(),
        ],
        None => vec![String::new(); 8],
    }
}
