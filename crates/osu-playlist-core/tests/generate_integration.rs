//! Integration tests for single-playlist generation.
//!
//! These run the whole pipeline (definition, lookup, covers, recalculation,
//! report, packaging) against in-memory fakes.

mod common;

use common::{generator, init_logging, FakeLookup, FakeRemote, RecordingRenderer, TestFixture};
use osu_playlist_core::{
    Error, GeneratePhase, GenerateProgress, GeneratorConfig, PlaylistGenerator, PlaylistKind,
    RenderOptions,
};
use std::fs::{self, File};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use zip::ZipArchive;

const ORIGINAL: &str = "\
# warmup first
300=HD [S/SS] (warmup)
100=NM [A/S/SS/SS+HD] (stream practice)
200=DT [] ()
";

#[test]
fn test_generate_original_playlist() {
    init_logging();
    let fixture = TestFixture::new();
    let path = fixture.write_definition("pool.properties", ORIGINAL);
    let t = generator(&[100, 200, 300], FakeRemote::for_ids(&[100, 200, 300]));

    let kind = PlaylistKind::Original;
    let result = t.generator.generate(&path, kind.suffix(), &kind.options()).unwrap();

    assert_eq!(result.title, "pool — original playlist");
    assert_eq!(result.entries, 3);
    assert_eq!(result.placeholders, 0);
    assert!(result.package_path.is_none());
    assert_eq!(result.html_path, fixture.dir.join("pool.html"));

    let covers = fixture.dir.join("pool.covers");
    for name in ["1-300.jpg", "2-100.jpg", "3-200.jpg"] {
        assert!(covers.join(name).is_file(), "missing cover {}", name);
    }
    let cover = image::open(covers.join("1-300.jpg")).unwrap();
    assert_eq!((cover.width(), cover.height()), (1920, 360));

    let html = fs::read_to_string(&result.html_path).unwrap();
    assert!(html.contains("<title>pool — original playlist</title>"));
    assert!(!html.contains("<th>Star</th>"));
    let first = html.find("./pool.covers/1-300.jpg").unwrap();
    let second = html.find("./pool.covers/2-100.jpg").unwrap();
    let third = html.find("./pool.covers/3-200.jpg").unwrap();
    assert!(first < second && second < third);
    assert!(html.contains("https://osu.ppy.sh/beatmapsets/1300#osu/300"));
    assert!(html.contains("stream practice"));

    let calls = t.renderer.calls.lock().unwrap();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].mods, "HD");
    assert_eq!(calls[0].targets, vec!["S", "SS"]);
    assert_eq!(calls[1].targets, vec!["A", "S", "SS", "SS+HD"]);
    assert!(calls[2].targets.is_empty());
    assert!(calls.iter().all(|c| c.table_heading.is_none()));

    // no archive downloads without recalculation
    let fetched = t.remote.fetched.lock().unwrap();
    assert!(fetched.iter().all(|url| !url.starts_with("https://mirror.test/")));

    let workdirs = t.remote.workdirs.lock().unwrap();
    assert_eq!(workdirs.len(), 1);
    assert!(!workdirs[0].exists(), "temporary directory was not removed");
}

#[test]
fn test_generate_match_playlist_recalculates() {
    init_logging();
    let fixture = TestFixture::new();
    let path = fixture.write_definition(
        "qualifiers.properties",
        "1=HD HR [S] (hr slot)\n2=DT [S] (dt slot)\n3=FM [S] (tiebreaker-ish)\n",
    );
    let t = generator(&[1, 2, 3], FakeRemote::for_ids(&[1, 2, 3]));

    let kind = PlaylistKind::Match;
    let result = t.generator.generate(&path, kind.suffix(), &kind.options()).unwrap();
    assert_eq!(result.title, "qualifiers — match playlist");

    let calls = t.renderer.calls.lock().unwrap();
    assert!(calls.iter().all(|c| c.targets.is_empty()));
    assert_eq!(calls[0].table_heading.as_deref(), Some("HDHR Difficulty"));
    assert_eq!(calls[0].table_star.as_deref(), Some("6.50"));
    assert_eq!(calls[1].table_star.as_deref(), Some("7.00"));
    assert_eq!(calls[2].table_star.as_deref(), Some("6.00(6.50)"));

    let html = fs::read_to_string(&result.html_path).unwrap();
    assert!(html.contains("<th>Star</th>"));
    assert!(html.contains("<th>Combo</th>"));
    assert!(html.contains("<td>6.00(6.50)</td>"));
    // HR: CS 4 * 1.3
    assert!(html.contains("<td>5.20</td>"));
    // DT: BPM 180 * 1.5
    assert!(html.contains("<td>270.00</td>"));

    let fetched = t.remote.fetched.lock().unwrap();
    assert!(fetched.contains(&"https://mirror.test/d/1001".to_string()));
}

#[test]
fn test_missing_covers_use_placeholder() {
    let fixture = TestFixture::new();
    let path = fixture.write_definition("pool.properties", "10=NM [] ()\n20=HD [] ()\n");
    let t = generator(&[10, 20], FakeRemote::for_ids(&[10, 20]).without_covers());

    let result = t
        .generator
        .generate(&path, "", &PlaylistKind::Original.options())
        .unwrap();

    assert_eq!(result.placeholders, 2);
    assert!(result.html_path.is_file());
    assert!(fixture.dir.join("pool.covers").join("2-20.jpg").is_file());
}

#[test]
fn test_missing_archive_aborts_and_cleans_up() {
    let fixture = TestFixture::new();
    let path = fixture.write_definition("pool.properties", "10=HR [] ()\n");
    let t = generator(&[10], FakeRemote::for_ids(&[10]).without_archives());

    let result = t.generator.generate(&path, "", &PlaylistKind::Match.options());
    assert!(result.is_err());
    assert!(!fixture.dir.join("pool.html").exists());

    let workdirs = t.remote.workdirs.lock().unwrap();
    assert_eq!(workdirs.len(), 1);
    assert!(!workdirs[0].exists(), "temporary directory was not removed");
}

#[test]
fn test_archive_without_matching_difficulty() {
    let fixture = TestFixture::new();
    let path = fixture.write_definition("pool.properties", "10=HR [] ()\n");

    // the archive for set 1010 only holds beatmap 11
    let mut files = (*FakeRemote::for_ids(&[10]).files).clone();
    files.insert(common::osz_url(1010), common::osz(&[(11, "Hard")]));
    let remote = FakeRemote {
        files: Arc::new(files),
        ..Default::default()
    };
    let t = generator(&[10], remote);

    let err = t
        .generator
        .generate(&path, "", &PlaylistKind::Match.options())
        .unwrap_err();
    assert!(matches!(err, Error::BeatmapFileNotFound { beatmap_id: 10 }));
}

#[test]
fn test_invalid_mod_combination_fails_early() {
    let fixture = TestFixture::new();
    let path = fixture.write_definition("pool.properties", "10=NM [] ()\n20=EZ HR [] ()\n");
    let t = generator(&[10, 20], FakeRemote::for_ids(&[10, 20]));

    let err = t
        .generator
        .generate(&path, "", &PlaylistKind::Original.options())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidModCombination { .. }));
    assert!(t.remote.workdirs.lock().unwrap().is_empty());
    assert!(t.renderer.calls.lock().unwrap().is_empty());
}

#[test]
fn test_unknown_beatmap_fails() {
    let fixture = TestFixture::new();
    let path = fixture.write_definition("pool.properties", "10=NM [] ()\n99=HD [] ()\n");
    let t = generator(&[10], FakeRemote::for_ids(&[10]));

    let err = t
        .generator
        .generate(&path, "", &PlaylistKind::Original.options())
        .unwrap_err();
    assert!(matches!(err, Error::BeatmapNotReturned(99)));
}

#[test]
fn test_package_mode() {
    let fixture = TestFixture::new();
    let path = fixture.write_definition("pool.properties", "100=DT [S] (fast)\n");
    let t = generator(&[100], FakeRemote::for_ids(&[100]));

    let options = RenderOptions {
        package: true,
        ..PlaylistKind::Match.options()
    };
    let result = t.generator.generate(&path, "", &options).unwrap();

    let package = result.package_path.unwrap();
    assert_eq!(package, fixture.dir.join("pool.zip"));

    let mut archive = ZipArchive::new(File::open(&package).unwrap()).unwrap();
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert!(names.contains(&"pool.html".to_string()));
    assert!(names.contains(&"pool.csv".to_string()));
    assert!(names.contains(&"pool.covers/1-100.jpg".to_string()));

    let csv = fs::read_to_string(fixture.dir.join("pool.csv")).unwrap();
    assert!(csv.lines().nth(1).unwrap().starts_with("1,100,1100,"));
}

#[test]
fn test_regeneration_drops_stale_covers() {
    let fixture = TestFixture::new();
    let path = fixture.write_definition("pool.properties", "1=NM [] ()\n2=HD [] ()\n");
    let t = generator(&[1, 2], FakeRemote::for_ids(&[1, 2]));
    let options = RenderOptions {
        package: true,
        ..PlaylistKind::Original.options()
    };
    t.generator.generate(&path, "", &options).unwrap();

    fixture.write_definition("pool.properties", "2=HD [] ()\n1=NM [] ()\n");
    let result = t.generator.generate(&path, "", &options).unwrap();

    let mut covers: Vec<String> = fs::read_dir(&result.covers_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    covers.sort();
    assert_eq!(covers, vec!["1-2.jpg", "2-1.jpg"]);

    let package = result.package_path.unwrap();
    let mut archive = ZipArchive::new(File::open(&package).unwrap()).unwrap();
    let mut packaged: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .filter(|name| name.ends_with(".jpg"))
        .collect();
    packaged.sort();
    assert_eq!(packaged, vec!["pool.covers/1-2.jpg", "pool.covers/2-1.jpg"]);
}

#[test]
fn test_request_delay_between_entries() {
    let fixture = TestFixture::new();
    let path = fixture.write_definition("pool.properties", "1=NM [] ()\n2=HD [] ()\n3=HR [] ()\n");
    let remote = FakeRemote::for_ids(&[1, 2, 3]);
    let delay = Duration::from_millis(150);

    let covers: Arc<Mutex<Vec<Instant>>> = Arc::default();
    let sink = Arc::clone(&covers);
    let config = GeneratorConfig {
        request_delay_ms: delay.as_millis() as u64,
        ..common::test_config()
    };
    let generator = PlaylistGenerator::builder(config)
        .lookup(FakeLookup::with_ids(&[1, 2, 3]))
        .renderer(RecordingRenderer::default())
        .engine(common::FakeEngine)
        .assets(remote.factory())
        .progress_callback(Box::new(move |p: GenerateProgress| {
            if p.phase == GeneratePhase::Cover {
                sink.lock().unwrap().push(Instant::now());
            }
        }))
        .build()
        .unwrap();

    let start = Instant::now();
    generator.generate(&path, "", &PlaylistKind::Original.options()).unwrap();
    let elapsed = start.elapsed();

    let covers = covers.lock().unwrap();
    assert_eq!(covers.len(), 3);
    assert!(elapsed >= delay * 2, "finished after {:?}", elapsed);
    assert!(covers[0] - start < delay, "first entry waited {:?}", covers[0] - start);
    assert!(covers[1] - covers[0] >= delay);
    assert!(covers[2] - covers[1] >= delay);
}

#[test]
fn test_progress_callback() {
    let fixture = TestFixture::new();
    let path = fixture.write_definition("pool.properties", "1=NM [] ()\n2=HD [] ()\n");
    let remote = FakeRemote::for_ids(&[1, 2]);

    let events: Arc<Mutex<Vec<GenerateProgress>>> = Arc::default();
    let sink = Arc::clone(&events);
    let generator = PlaylistGenerator::builder(common::test_config())
        .lookup(FakeLookup::with_ids(&[1, 2]))
        .renderer(RecordingRenderer::default())
        .engine(common::FakeEngine)
        .assets(remote.factory())
        .progress_callback(Box::new(move |p: GenerateProgress| sink.lock().unwrap().push(p)))
        .build()
        .unwrap();

    generator
        .generate(&path, "", &PlaylistKind::Original.options())
        .unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.first().unwrap().phase, GeneratePhase::Lookup);
    assert_eq!(events.last().unwrap().phase, GeneratePhase::Complete);
    assert!(events.iter().all(|e| e.total == 2));
    assert!(events
        .iter()
        .any(|e| e.phase == GeneratePhase::Compose && e.current == 2 && e.beatmap_id == Some(2)));
    assert!(!events.iter().any(|e| e.phase == GeneratePhase::Difficulty));
}
