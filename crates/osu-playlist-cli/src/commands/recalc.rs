//! `recalc` command

use anyhow::{Context, Result};
use std::path::Path;

use osu_playlist_core::{parse_osu_file, recalculate, BaseAttributes, ModSet, RosuEngine};

/// Base attribute overrides from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub cs: Option<f64>,
    pub hp: Option<f64>,
    pub od: Option<f64>,
    pub ar: Option<f64>,
    pub bpm: Option<f64>,
}

impl Overrides {
    fn apply(&self, mut base: BaseAttributes) -> BaseAttributes {
        base.cs = self.cs.unwrap_or(base.cs);
        base.hp = self.hp.unwrap_or(base.hp);
        base.od = self.od.unwrap_or(base.od);
        base.ar = self.ar.unwrap_or(base.ar);
        base.bpm = self.bpm.unwrap_or(base.bpm);
        base
    }
}

pub fn run(file: &Path, mods: &str, overrides: Overrides, json: bool) -> Result<()> {
    let info = parse_osu_file(file).with_context(|| format!("Failed to parse {}", file.display()))?;
    let base = overrides.apply(info.base_attributes());
    let mods = ModSet::parse(mods);

    let result = recalculate(&RosuEngine::new(), &base, file, &mods)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let mods = if result.mods.is_empty() { "NM" } else { result.mods.as_str() };
        println!(
            "{} - {} [{}] +{}",
            info.metadata.display_artist(),
            info.metadata.display_title(),
            info.version,
            mods
        );
        println!("  Star:  {}", result.star_rating);
        println!("  CS:    {:.2}", result.cs);
        println!("  HP:    {:.2}", result.hp);
        println!("  OD:    {:.2}", result.od);
        println!("  AR:    {:.2}", result.ar);
        println!("  BPM:   {:.2}", result.bpm);
        println!("  Combo: {}", result.max_combo);
    }

    Ok(())
}
