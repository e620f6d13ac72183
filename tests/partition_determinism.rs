use std::fs;

use rootshard::partition::{partition, PartitionOptions};
use rootshard::persist::{digest, ShardStore};
use rootshard::record::{Bucket, RecordCollection};
use tempfile::TempDir;

fn records() -> RecordCollection {
    serde_json::from_str(
        r#"[
            {"id": "I1", "name": "jean-pierre DUPONT", "born": "12/03/1899", "death": null, "country": "fr1870"},
            {"id": "I2", "name": "Élodie Martin", "born": "1900", "religion": "?"},
            {"id": "I3", "name": "  anne   de  la TOUR ", "born": "08/??/2015"},
            {"id": "I4", "name": "Inconnu", "born": "Inconnu"},
            {"id": "I5", "name": "louis", "born": "1815", "parents": {"father": "I9", "mother": null}}
        ]"#,
    )
    .expect("records")
}

#[test]
fn reruns_into_empty_stores_are_byte_identical() {
    let first = TempDir::new().expect("tempdir");
    let second = TempDir::new().expect("tempdir");
    let a = partition(records(), &ShardStore::new(first.path()), &PartitionOptions::default()).expect("first");
    let b = partition(records(), &ShardStore::new(second.path()), &PartitionOptions::default()).expect("second");

    assert_eq!(a.shards.keys().collect::<Vec<_>>(), b.shards.keys().collect::<Vec<_>>());
    for (bucket, summary) in &a.shards {
        let other = &b.shards[bucket];
        assert_eq!(summary.digest, other.digest);
        let left = fs::read(&summary.path).expect("read");
        let right = fs::read(&other.path).expect("read");
        assert_eq!(left, right);
        assert_eq!(digest(&left), summary.digest);
    }
}

#[test]
fn rerun_over_existing_store_rewrites_identically() {
    let dir = TempDir::new().expect("tempdir");
    let store = ShardStore::new(dir.path());
    let a = partition(records(), &store, &PartitionOptions::default()).expect("first");
    let b = partition(records(), &store, &PartitionOptions::default()).expect("second");
    assert_eq!(a, b);
}

#[test]
fn expected_buckets_and_layout() {
    let dir = TempDir::new().expect("tempdir");
    let store = ShardStore::new(dir.path());
    let report = partition(records(), &store, &PartitionOptions::default()).expect("partition");
    let labels: Vec<String> = report.shards.keys().map(Bucket::label).collect();
    assert_eq!(labels, vec!["1800", "1900", "2000", "unknown"]);
    assert_eq!(report.shards[&Bucket::Century(1800)].records, 2);
    assert_eq!(report.unresolved_dates, 1);

    let text = fs::read_to_string(store.shard_path(&Bucket::Century(1900))).expect("read");
    assert_eq!(
        text,
        "[\n    {\n        \"id\": \"I2\",\n        \"name\": \"Élodie Martin\",\n        \"born\": \"1900\",\n        \"religion\": \"?\"\n    }\n]\n"
    );
}

#[test]
fn name_normalization_profile() {
    let dir = TempDir::new().expect("tempdir");
    let store = ShardStore::new(dir.path());
    let options = PartitionOptions { normalize_names: true, ..Default::default() };
    let report = partition(records(), &store, &options).expect("partition");
    assert_eq!(report.names_normalized, 3);

    let shard: RecordCollection =
        serde_json::from_str(&fs::read_to_string(store.shard_path(&Bucket::Century(1800))).expect("read")).expect("json");
    let names: Vec<&str> = shard.iter().filter_map(|p| p.name()).collect();
    assert_eq!(names, vec!["Jean-Pierre Dupont", "Louis"]);
}
