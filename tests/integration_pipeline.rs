//! Integration tests for the ingest-to-report pipeline
//!
//! Exports are written to a temporary directory, discovered and ingested as a
//! batch, persisted as a snapshot and read back into a roster and deck.

use baseline_analytics::app::adapters::filesystem::{
    SnapshotStore, collect_csv_files, read_request,
};
use baseline_analytics::app::services::batch_ingest::{FileStatus, ingest_batch};
use baseline_analytics::app::services::presentation::PresentationDeck;
use baseline_analytics::app::services::roster::PlayerRoster;
use baseline_analytics::{AnalyticsConfig, SourceType};
use std::fs;
use tempfile::TempDir;

fn write_exports(dir: &TempDir) {
    let blast_dir = dir.path().join("blast");
    let hittrax_dir = dir.path().join("hittrax");
    fs::create_dir_all(&blast_dir).unwrap();
    fs::create_dir_all(&hittrax_dir).unwrap();

    fs::write(
        blast_dir.join("Metrics - Jane Doe - Jan.csv"),
        "Blast Export\n\nDate,Equipment,Handedness,Swing Details,Bat Speed (mph)\n\
         2024-01-01,Bat X,R,Tee,60\n2024-01-02,Bat X,R,Tee,62\n2024-01-03,Bat X,R,Tee,64\n",
    )
    .unwrap();
    fs::write(
        blast_dir.join("Metrics - Sam Lee - Jan.csv"),
        "no header here\n2024-01-01,Bat X,R,Tee,60\n",
    )
    .unwrap();
    fs::write(
        hittrax_dir.join("JaneDoedata.csv"),
        "Date,Time,AvgV\n2024-01-01,10:00,70\n2024-01-01,10:05,74\n2024-01-05,10:00,76\n",
    )
    .unwrap();
    fs::write(hittrax_dir.join("readme.txt"), "ignored").unwrap();
}

#[tokio::test]
async fn test_ingest_save_and_present() {
    let dir = TempDir::new().unwrap();
    write_exports(&dir);
    let config = AnalyticsConfig::default()
        .with_max_concurrent_files(2)
        .with_snapshot_path(dir.path().join("state").join("snapshot.json"));

    let mut requests = Vec::new();
    for (source, sub) in [(SourceType::Blast, "blast"), (SourceType::HitTrax, "hittrax")] {
        for path in collect_csv_files(&[dir.path().join(sub)]).unwrap() {
            requests.push(read_request(&path, source).unwrap());
        }
    }
    assert_eq!(requests.len(), 3);

    let report = ingest_batch(requests, &config).await;
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    assert!(matches!(report.files[1].status, FileStatus::Error(_)));

    let store = SnapshotStore::from_config(&config.storage).unwrap();
    store.save(&report.into_dataset()).unwrap();
    let dataset = store.load().unwrap().expect("snapshot should load");

    let roster = PlayerRoster::from_dataset(&dataset);
    assert_eq!(roster.names().collect::<Vec<_>>(), vec!["Jane Doe"]);
    let jane = roster.get("Jane Doe").unwrap();
    assert_eq!(jane.sources(), vec![SourceType::Blast, SourceType::HitTrax]);
    assert_eq!(roster.sessions("Jane Doe", SourceType::HitTrax).len(), 2);

    let mut deck =
        PresentationDeck::build(&roster, "Jane Doe", &["Bat Speed mph", "AvgV"]).unwrap();
    assert_eq!(deck.len(), 2);

    let blast_slide = deck.current().unwrap();
    assert_eq!(blast_slide.source, SourceType::Blast);
    assert_eq!(blast_slide.series.len(), 3);
    let trend = blast_slide.trend.unwrap();
    assert!((trend.slope_per_day() - 2.0).abs() < 1e-9);

    let hittrax_slide = deck.next().unwrap();
    assert_eq!(hittrax_slide.series[0].value, 72.0);
    assert_eq!(hittrax_slide.series[1].value, 76.0);

    assert!(store.clear().unwrap());
    assert!(store.load().unwrap().is_none());
}
