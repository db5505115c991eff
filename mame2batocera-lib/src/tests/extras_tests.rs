use std::io::Write;

use zip::write::SimpleFileOptions;

use super::*;
use crate::progress::SilentProgress;

fn write_zip(path: &Path, members: &[&str]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    for name in members {
        if name.ends_with('/') {
            zip.add_directory(*name, SimpleFileOptions::default()).unwrap();
        } else {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(format!("PNG:{name}").as_bytes()).unwrap();
        }
    }
    zip.finish().unwrap();
}

fn media_id(category: MediaCategory, name: &str) -> Option<String> {
    media_id_for_entry(category, name).map(|id| id.to_string())
}

#[test]
fn test_snap_and_flyer_entries() {
    assert_eq!(media_id(MediaCategory::Screenshot, "pacman.png"), Some("pacman".into()));
    assert_eq!(media_id(MediaCategory::Screenshot, "snap/PacMan.PNG"), Some("pacman".into()));
    assert_eq!(media_id(MediaCategory::Cover, "flyers/galaga.png"), Some("galaga".into()));
    assert_eq!(media_id(MediaCategory::Screenshot, "pacman.jpg"), None);
    assert_eq!(media_id(MediaCategory::Screenshot, "snap/"), None);
}

#[test]
fn test_artwork_marquee_names() {
    assert_eq!(media_id(MediaCategory::Marquee, "pacman_marquee.png"), Some("pacman".into()));
    assert_eq!(media_id(MediaCategory::Marquee, "pacman/marquee.png"), Some("pacman".into()));
    assert_eq!(media_id(MediaCategory::Marquee, "galaga.png"), Some("galaga".into()));
    assert_eq!(media_id(MediaCategory::Marquee, "pacman_bezel.png"), None);
    assert_eq!(media_id(MediaCategory::Marquee, "pacman/snap.png"), None);
    assert_eq!(media_id(MediaCategory::Marquee, "pacman/cabinet.png"), None);
    assert_eq!(media_id(MediaCategory::Marquee, "pacman.lay"), None);
}

#[test]
fn test_sources_use_defaults_and_overrides() {
    let settings = ExtrasSettings {
        flyers: Some("flyer_pack.zip".to_string()),
        ..ExtrasSettings::default()
    };
    let sources = extras_sources(Path::new("/extras"), &settings);
    assert_eq!(sources.len(), 3);
    assert_eq!(sources[0].path, PathBuf::from("/extras/snap.zip"));
    assert!(!sources[0].explicit);
    assert_eq!(sources[1].path, PathBuf::from("/extras/flyer_pack.zip"));
    assert!(sources[1].explicit);
    assert_eq!(sources[2].path, PathBuf::from("/extras/artwork.zip"));
}

#[test]
fn test_open_missing_archive() {
    let dir = tempfile::tempdir().unwrap();
    let source = ExtrasSource {
        category: MediaCategory::Screenshot,
        path: dir.path().join("snap.zip"),
        explicit: false,
    };
    assert!(matches!(
        ExtrasArchive::open(source),
        Err(ExtrasError::MissingExtrasArchive(_))
    ));
}

#[test]
fn test_open_corrupt_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snap.zip");
    std::fs::write(&path, b"not a zip").unwrap();
    let source = ExtrasSource {
        category: MediaCategory::Screenshot,
        path,
        explicit: false,
    };
    assert!(matches!(ExtrasArchive::open(source), Err(ExtrasError::Zip { .. })));
}

#[test]
fn test_index_skips_non_png_and_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snap.zip");
    write_zip(
        &path,
        &["snap/", "snap/pacman.png", "readme.txt", "other/pacman.png", "snap/galaga.png"],
    );

    let archive = ExtrasArchive::open(ExtrasSource {
        category: MediaCategory::Screenshot,
        path,
        explicit: false,
    })
    .unwrap();
    assert_eq!(archive.len(), 2);
    assert_eq!(archive.category(), MediaCategory::Screenshot);
}

#[test]
fn test_archive_without_pngs_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flyers.zip");
    write_zip(&path, &["flyers/", "readme.txt"]);

    let archive = ExtrasArchive::open(ExtrasSource {
        category: MediaCategory::Cover,
        path: path.clone(),
        explicit: false,
    })
    .unwrap();
    assert!(archive.is_empty());
    assert_eq!(archive.path(), path.as_path());

    let index = collect_media(dir.path(), &ExtrasSettings::default(), None, &SilentProgress);
    assert!(index.is_empty());
}

#[test]
fn test_collect_media_extracts_into_staging() {
    let extras = tempfile::tempdir().unwrap();
    write_zip(&extras.path().join("snap.zip"), &["pacman.png", "galaga.png"]);
    write_zip(
        &extras.path().join("artwork.zip"),
        &["pacman_marquee.png", "pacman_bezel.png"],
    );

    let staging = StagingArea::create(None).unwrap();
    let index = collect_media(
        extras.path(),
        &ExtrasSettings::default(),
        Some(&staging),
        &SilentProgress,
    );

    assert_eq!(index.count(MediaCategory::Screenshot), 2);
    assert_eq!(index.count(MediaCategory::Cover), 0);
    assert_eq!(index.count(MediaCategory::Marquee), 1);

    let pacman = GameId::new("pacman").unwrap();
    let marquee = index.get(&pacman, MediaCategory::Marquee).unwrap();
    assert_eq!(marquee.entry_name, "pacman_marquee.png");
    let staged = marquee.staged_path.as_ref().unwrap();
    assert_eq!(staged, &staging.path().join("marquees/pacman.png"));
    assert_eq!(std::fs::read(staged).unwrap(), b"PNG:pacman_marquee.png");
}

#[test]
fn test_collect_media_dry_run_extracts_nothing() {
    let extras = tempfile::tempdir().unwrap();
    write_zip(&extras.path().join("flyers.zip"), &["pacman.png"]);

    let index = collect_media(extras.path(), &ExtrasSettings::default(), None, &SilentProgress);
    let pacman = GameId::new("pacman").unwrap();
    let flyer = index.get(&pacman, MediaCategory::Cover).unwrap();
    assert_eq!(flyer.staged_path, None);
}

#[test]
fn test_collect_media_isolates_categories() {
    let extras = tempfile::tempdir().unwrap();
    std::fs::write(extras.path().join("snap.zip"), b"garbage").unwrap();
    write_zip(&extras.path().join("flyers.zip"), &["pacman.png"]);
    let settings = ExtrasSettings {
        artwork: Some("missing_artwork.zip".to_string()),
        ..ExtrasSettings::default()
    };

    let index = collect_media(extras.path(), &settings, None, &SilentProgress);
    assert_eq!(index.count(MediaCategory::Screenshot), 0);
    assert_eq!(index.count(MediaCategory::Cover), 1);
    assert_eq!(index.count(MediaCategory::Marquee), 0);
}
