//! HTTP downloads cached by file name

use reqwest::blocking::Client;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

/// Something that can place a remote file on disk
pub trait AssetSource {
    /// Download `url` as `filename` and return the local path.
    fn fetch(&self, url: &str, filename: &str) -> Result<PathBuf>;
}

/// Downloads into a directory, reusing files that already exist there
pub struct Downloader {
    client: Client,
    dir: PathBuf,
}

impl Downloader {
    pub fn new(dir: impl Into<PathBuf>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("osu-playlist/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            dir: dir.into(),
        })
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AssetSource for Downloader {
    fn fetch(&self, url: &str, filename: &str) -> Result<PathBuf> {
        let dest = self.dir.join(filename);
        if dest.exists() {
            tracing::debug!("Using cached {}", dest.display());
            return Ok(dest);
        }

        fs::create_dir_all(&self.dir)?;

        tracing::debug!("Downloading {} -> {}", url, dest.display());
        let bytes = self.client.get(url).send()?.error_for_status()?.bytes()?;

        // only complete downloads ever appear at `dest`
        let partial = dest.with_extension("part");
        let mut file = fs::File::create(&partial)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&partial, &dest)?;

        Ok(dest)
    }
}
