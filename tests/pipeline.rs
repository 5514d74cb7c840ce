//! End-to-end pipeline tests: archive → store → registry → export.
//!
//! These run the same stages the binary wires together, against temp
//! directories and the embedded database engine — no network, no fixtures
//! checked into the repo.

use folio::archive::{self, ExtractLayout};
use folio::export;
use folio::project::Project;
use folio::registry::ProjectRegistry;
use folio::store::{ContentStore, DEFAULT_CONNECT_TIMEOUT, DbStore, DirStore};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap();
}

fn sample_records_json() -> Vec<u8> {
    serde_json::to_vec(&vec![
        Project {
            title: "alpha".to_string(),
            short: "first project".to_string(),
            image_url: "img/alpha.png".to_string(),
            description: "<p>alpha description</p>".to_string(),
            date: "2024-01-01".to_string(),
        },
        Project {
            title: "beta".to_string(),
            short: "second project".to_string(),
            image_url: "img/beta.png".to_string(),
            description: "<p>beta description</p>".to_string(),
            date: "2024-02-01".to_string(),
        },
    ])
    .unwrap()
}

#[tokio::test]
async fn archive_to_database_to_export() {
    let tmp = TempDir::new().unwrap();

    // stage 1: archive
    let archive_path = tmp.path().join("input.zip");
    write_zip(
        &archive_path,
        &[
            ("projects.json", &sample_records_json()),
            ("images/", b""),
            ("images/alpha.png", b"alpha-png"),
            ("images/beta.png", b"beta-png"),
        ],
    );
    let layout = ExtractLayout {
        content_dir: tmp.path().join("extracted"),
        image_dir: tmp.path().join("static/img"),
    };
    let report = archive::extract(&archive_path, &layout).unwrap();
    assert_eq!(report.content_files, 1);
    assert_eq!(report.images, 2);

    // stage 2: records into the database and back
    let raw = fs::read(layout.content_dir.join("projects.json")).unwrap();
    let records: Vec<Project> = serde_json::from_slice(&raw).unwrap();
    let store = DbStore::connect("mem://", DEFAULT_CONNECT_TIMEOUT)
        .await
        .unwrap();
    store.populate(&records).await.unwrap();

    // stage 3: registry
    let registry = ProjectRegistry::new();
    let count = registry.reload(&store).await.unwrap();
    assert_eq!(count, 2);
    assert!(registry.find_by_slug("alpha").is_some());
    assert!(registry.find_by_slug("missing").is_none());

    // stage 4: export
    let out = tmp.path().join("out");
    let export_report = export::export_all(&registry, &tmp.path().join("static"), &out).unwrap();
    assert_eq!(export_report.pages, 3);
    assert_eq!(export_report.assets, 2);

    let index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("alpha"));

    let alpha = fs::read_to_string(out.join("projects/alpha.html")).unwrap();
    assert!(alpha.contains("<p>alpha description</p>"));

    // asset tree mirrored under static/ with paths preserved
    assert_eq!(
        fs::read(out.join("static/img/alpha.png")).unwrap(),
        b"alpha-png"
    );
}

#[tokio::test]
async fn directory_mode_skips_archive_and_database() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("projects");
    fs::create_dir_all(&content).unwrap();
    fs::write(content.join("weather-station.md"), "# Weather\n\nA **station**.").unwrap();
    fs::write(content.join("bike-light.md"), "Blinky.").unwrap();

    let store = DirStore::new(&content);
    let registry = ProjectRegistry::new();
    registry.reload(&store).await.unwrap();

    assert_eq!(registry.len(), 2);
    let weather = registry.find_by_slug("weather-station").unwrap();
    assert!(weather.description.contains("<strong>station</strong>"));

    let out = tmp.path().join("out");
    export::export_all(&registry, &tmp.path().join("no-assets"), &out).unwrap();
    assert!(out.join("projects/weather-station.html").exists());
    assert!(out.join("projects/bike-light.html").exists());
}

#[tokio::test]
async fn bad_record_title_aborts_before_the_registry_changes() {
    let store = DbStore::connect("mem://", DEFAULT_CONNECT_TIMEOUT)
        .await
        .unwrap();
    store
        .populate(&[Project {
            title: "../escape".to_string(),
            short: String::new(),
            image_url: String::new(),
            description: String::new(),
            date: String::new(),
        }])
        .await
        .unwrap();

    let registry = ProjectRegistry::new();
    assert!(registry.reload(&store).await.is_err());
    assert!(registry.is_empty());
}

#[tokio::test]
async fn database_round_trip_preserves_every_field() {
    let raw = sample_records_json();
    let records: Vec<Project> = serde_json::from_slice(&raw).unwrap();

    let store = DbStore::connect("mem://", DEFAULT_CONNECT_TIMEOUT)
        .await
        .unwrap();
    store.populate(&records).await.unwrap();

    let mut loaded = store.load_all().await.unwrap();
    loaded.sort_by(|a, b| a.title.cmp(&b.title));
    assert_eq!(loaded, records);
}
