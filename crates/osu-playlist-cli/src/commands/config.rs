//! `config` command

use anyhow::{Context, Result};

use osu_playlist_core::GeneratorConfig;

use super::{load_config, GlobalOptions};

pub fn run(init: bool, options: &GlobalOptions<'_>) -> Result<()> {
    if init {
        let config = GeneratorConfig::default();
        let path = match options.config {
            Some(path) => {
                config.save_to(path)?;
                path.to_path_buf()
            }
            None => config.save().context("Failed to write config")?,
        };
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let config = load_config(options)?;
    if !options.json {
        match options.config.map(|p| p.to_path_buf()).or_else(GeneratorConfig::config_path) {
            Some(path) => eprintln!("# {}", path.display()),
            None => eprintln!("# no config directory, showing defaults"),
        }
    }
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
