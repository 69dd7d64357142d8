//! Shared fixtures for the pipeline integration tests.
//!
//! Every external collaborator is replaced by an in-memory fake so the tests
//! run without network access or font files.

#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};
use osu_playlist_core::{
    ApiBeatmap, ApiBeatmapset, AssetSource, BeatmapLookup, CoverRenderer, CoverText, Covers,
    DifficultyEngine, EngineAttributes, Error, GeneratorConfig, PlaylistGenerator, Result,
};
use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Route library logs to the test output
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Temporary working directory holding definition files
pub struct TestFixture {
    _temp_dir: TempDir,
    pub dir: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dir = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            dir,
        }
    }

    /// Write a definition file and return its path
    pub fn write_definition(&self, filename: &str, content: &str) -> PathBuf {
        let path = self.dir.join(filename);
        fs::write(&path, content).expect("Failed to write definition");
        path
    }
}

pub fn cover_url(set_id: u32, kind: &str) -> String {
    format!("https://assets.test/beatmaps/{}/covers/{}.jpg", set_id, kind)
}

pub fn osz_url(set_id: u32) -> String {
    format!("https://mirror.test/d/{}", set_id)
}

/// API record for beatmap `id` in set `id + 1000`
pub fn api_beatmap(id: u32) -> ApiBeatmap {
    let set_id = id + 1000;
    ApiBeatmap {
        id,
        beatmapset_id: set_id,
        version: "Insane".to_string(),
        difficulty_rating: 5.5,
        cs: 4.0,
        drain: 5.0,
        accuracy: 8.0,
        ar: 9.0,
        bpm: Some(180.0),
        hit_length: 120,
        total_length: 130,
        max_combo: Some(900),
        beatmapset: ApiBeatmapset {
            id: set_id,
            title: format!("Song {}", id),
            artist: "Artist".to_string(),
            creator: "Mapper".to_string(),
            covers: Covers {
                cover: cover_url(set_id, "cover"),
                slimcover: cover_url(set_id, "slimcover"),
            },
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Lookup serving a fixed set of beatmaps
#[derive(Clone, Default)]
pub struct FakeLookup {
    beatmaps: HashMap<u32, ApiBeatmap>,
}

impl FakeLookup {
    pub fn with_ids(ids: &[u32]) -> Self {
        Self {
            beatmaps: ids.iter().map(|id| (*id, api_beatmap(*id))).collect(),
        }
    }
}

impl BeatmapLookup for FakeLookup {
    fn beatmaps(&self, ids: &[u32]) -> Result<Vec<ApiBeatmap>> {
        ids.iter()
            .map(|id| self.beatmaps.get(id).cloned().ok_or(Error::BeatmapNotReturned(*id)))
            .collect()
    }
}

/// One call to the fake renderer
#[derive(Debug, Clone)]
pub struct RenderCall {
    pub version: String,
    pub title: String,
    pub mods: String,
    pub targets: Vec<String>,
    pub table_heading: Option<String>,
    pub table_star: Option<String>,
}

/// Renderer that records its input and returns the background unchanged
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub calls: Arc<Mutex<Vec<RenderCall>>>,
}

impl CoverRenderer for RecordingRenderer {
    fn render(&self, background: RgbImage, cover: &CoverText<'_>) -> Result<RgbImage> {
        self.calls.lock().unwrap().push(RenderCall {
            version: cover.version.to_string(),
            title: cover.title.to_string(),
            mods: cover.mods.to_string(),
            targets: cover.targets.to_vec(),
            table_heading: cover.table.map(|t| t.heading.clone()),
            table_star: cover.table.map(|t| t.star.clone()),
        });
        Ok(background)
    }
}

/// Engine rating 6.00 plus 0.50 for HR and 1.00 for DT
#[derive(Clone, Default)]
pub struct FakeEngine;

impl DifficultyEngine for FakeEngine {
    fn calculate(&self, _path: &Path, mods: u32) -> Result<EngineAttributes> {
        let mut stars = 6.0;
        if mods & 16 != 0 {
            stars += 0.5;
        }
        if mods & 64 != 0 {
            stars += 1.0;
        }
        Ok(EngineAttributes {
            hp: Some(5.0),
            od: Some(8.0),
            ar: Some(if mods & 64 != 0 { 10.33 } else { 9.0 }),
            stars,
            max_combo: 900,
        })
    }
}

/// Remote files served by [`FakeAssets`], plus every directory handed out
#[derive(Clone, Default)]
pub struct FakeRemote {
    pub files: Arc<HashMap<String, Vec<u8>>>,
    pub workdirs: Arc<Mutex<Vec<PathBuf>>>,
    pub fetched: Arc<Mutex<Vec<String>>>,
}

impl FakeRemote {
    /// Slim covers and archives for every beatmap id
    pub fn for_ids(ids: &[u32]) -> Self {
        let mut files = HashMap::new();
        for &id in ids {
            let set_id = id + 1000;
            files.insert(cover_url(set_id, "slimcover"), png(1920, 360, [90, 60, 30]));
            files.insert(osz_url(set_id), osz(&[(id, "Insane")]));
        }
        Self {
            files: Arc::new(files),
            ..Default::default()
        }
    }

    /// Same remote without any cover images
    pub fn without_covers(self) -> Self {
        let files = self
            .files
            .iter()
            .filter(|(url, _)| !url.contains("/covers/"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self {
            files: Arc::new(files),
            ..self
        }
    }

    /// Same remote without any beatmap archives
    pub fn without_archives(self) -> Self {
        let files = self
            .files
            .iter()
            .filter(|(url, _)| !url.starts_with("https://mirror.test/"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self {
            files: Arc::new(files),
            ..self
        }
    }

    pub fn factory(&self) -> osu_playlist_core::AssetFactory {
        let remote = self.clone();
        Box::new(move |dir: &Path| -> Result<Box<dyn AssetSource>> {
            remote.workdirs.lock().unwrap().push(dir.to_path_buf());
            Ok(Box::new(FakeAssets {
                dir: dir.to_path_buf(),
                remote: remote.clone(),
            }))
        })
    }
}

/// Serves files from a [`FakeRemote`] into a run's directory
pub struct FakeAssets {
    dir: PathBuf,
    remote: FakeRemote,
}

impl AssetSource for FakeAssets {
    fn fetch(&self, url: &str, filename: &str) -> Result<PathBuf> {
        self.remote.fetched.lock().unwrap().push(url.to_string());
        let bytes = self.remote.files.get(url).ok_or_else(|| Error::ImageNotFound {
            url: url.to_string(),
        })?;
        let path = self.dir.join(filename);
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

pub fn png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    bytes.into_inner()
}

/// Minimal `.osu` file
pub fn osu_file(beatmap_id: u32, version: &str) -> String {
    format!(
        "osu file format v14\n\n\
         [General]\nAudioFilename: audio.mp3\nMode: 0\n\n\
         [Metadata]\nTitle:Song {id}\nArtist:Artist\nCreator:Mapper\nVersion:{version}\n\
         BeatmapID:{id}\nBeatmapSetID:{set}\n\n\
         [Difficulty]\nHPDrainRate:5\nCircleSize:4\nOverallDifficulty:8\nApproachRate:9\n\
         SliderMultiplier:1.4\nSliderTickRate:1\n\n\
         [TimingPoints]\n0,333.333,4,2,0,100,1,0\n\n\
         [HitObjects]\n64,64,1000,1,0,0:0:0:0:\n448,320,1250,1,0,0:0:0:0:\n",
        id = beatmap_id,
        set = beatmap_id + 1000,
        version = version,
    )
}

/// `.osz` archive holding one `.osu` file per (id, version)
pub fn osz(difficulties: &[(u32, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (id, version) in difficulties {
        let name = format!("Artist - Song ({}) [{}].osu", id, version);
        zip.start_file(name, SimpleFileOptions::default()).unwrap();
        zip.write_all(osu_file(*id, version).as_bytes()).unwrap();
    }
    zip.start_file("audio.mp3", SimpleFileOptions::default()).unwrap();
    zip.write_all(b"not really audio").unwrap();
    zip.finish().unwrap().into_inner()
}

/// Config with no delay and archives served from the fake mirror
pub fn test_config() -> GeneratorConfig {
    GeneratorConfig {
        beatmapset_url: "https://mirror.test/d/{set_id}".to_string(),
        request_delay_ms: 0,
        ..Default::default()
    }
}

pub struct TestGenerator {
    pub generator: PlaylistGenerator,
    pub renderer: RecordingRenderer,
    pub remote: FakeRemote,
}

/// Generator wired to fakes for `ids`
pub fn generator(ids: &[u32], remote: FakeRemote) -> TestGenerator {
    let renderer = RecordingRenderer::default();
    let generator = PlaylistGenerator::builder(test_config())
        .lookup(FakeLookup::with_ids(ids))
        .renderer(renderer.clone())
        .engine(FakeEngine)
        .assets(remote.factory())
        .build()
        .expect("Failed to build generator");

    TestGenerator {
        generator,
        renderer,
        remote,
    }
}
