use rootshard::consolidate::consolidate;
use rootshard::partition::{partition, PartitionOptions};
use rootshard::persist::{read_collection, CanonicalFile, ShardStore};
use rootshard::record::{PersonRecord, RecordCollection};
use rootshard::year::extract_year;
use serde_json::json;
use tempfile::TempDir;

// Deterministic mix of full, masked, bare, missing and unreadable dates.
fn family(size: usize) -> RecordCollection {
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };
    (0..size)
        .map(|i| {
            let year = 1500 + next() % 530;
            let born = match next() % 7 {
                0 => json!(null),
                1 => json!(""),
                2 => json!(format!("{:02}/??/{}", next() % 12 + 1, year)),
                3 => json!(format!("??/??/{}", year)),
                4 => json!("??/??/????"),
                5 => json!(year.to_string()),
                _ => json!(format!("{:02}/{:02}/{}", next() % 28 + 1, next() % 12 + 1, year)),
            };
            let mut person = json!({"id": format!("p{i}"), "name": format!("person {i}"), "gender": "female", "img": "../Images/Persons/Unknown.jpg"});
            if next() % 5 != 0 {
                person["born"] = born;
            }
            serde_json::from_value(person).expect("object")
        })
        .collect()
}

fn as_multiset(records: &[PersonRecord]) -> Vec<String> {
    let mut items: Vec<String> = records.iter().map(|r| serde_json::to_string(r).expect("serialize")).collect();
    items.sort();
    items
}

#[test]
fn partition_is_lossless() {
    let dir = TempDir::new().expect("tempdir");
    let store = ShardStore::new(dir.path().join("familyDatas"));
    let input = family(400);
    let report = partition(input.clone(), &store, &PartitionOptions::default()).expect("partition");

    let mut union = Vec::new();
    for shard in store.list().expect("list") {
        union.extend(read_collection(&shard.path).expect("shard"));
    }
    assert_eq!(as_multiset(&union), as_multiset(&input));
    assert_eq!(report.records, input.len());
    assert_eq!(report.shards.values().map(|s| s.records).sum::<usize>(), input.len());
}

#[test]
fn every_shard_holds_only_its_century() {
    let dir = TempDir::new().expect("tempdir");
    let store = ShardStore::new(dir.path());
    partition(family(200), &store, &PartitionOptions::default()).expect("partition");
    for shard in store.list().expect("list") {
        for person in read_collection(&shard.path).expect("shard") {
            let label = match extract_year(person.born()) {
                Some(year) => (year / 100 * 100).to_string(),
                None => "unknown".to_string(),
            };
            assert_eq!(label, shard.label);
        }
    }
}

#[test]
fn consolidate_restores_content_in_year_order() {
    let dir = TempDir::new().expect("tempdir");
    let store = ShardStore::new(dir.path().join("familyDatas"));
    let canonical = CanonicalFile::new(dir.path().join("data.json"));
    let input = family(300);
    partition(input.clone(), &store, &PartitionOptions::default()).expect("partition");

    let merged = consolidate(&store, &canonical, 4).expect("consolidate");
    assert_eq!(as_multiset(&merged), as_multiset(&input));
    assert_eq!(canonical.load().expect("reload"), merged);

    let years: Vec<Option<u32>> = merged.iter().map(|p| extract_year(p.born())).collect();
    let first_undated = years.iter().position(Option::is_none).unwrap_or(years.len());
    assert!(years[first_undated..].iter().all(Option::is_none));
    assert!(years[..first_undated].windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn undated_records_keep_their_relative_order() {
    let dir = TempDir::new().expect("tempdir");
    let store = ShardStore::new(dir.path().join("familyDatas"));
    let canonical = CanonicalFile::new(dir.path().join("data.json"));
    let input = family(150);
    partition(input.clone(), &store, &PartitionOptions::default()).expect("partition");
    let merged = consolidate(&store, &canonical, 4).expect("consolidate");

    let undated_in = input.iter().filter(|p| extract_year(p.born()).is_none()).map(|p| p.get("id").cloned());
    let undated_out = merged.iter().filter(|p| extract_year(p.born()).is_none()).map(|p| p.get("id").cloned());
    assert!(undated_in.eq(undated_out));
}

#[test]
fn consolidating_twice_is_idempotent() {
    let dir = TempDir::new().expect("tempdir");
    let store = ShardStore::new(dir.path().join("familyDatas"));
    let canonical = CanonicalFile::new(dir.path().join("data.json"));
    partition(family(120), &store, &PartitionOptions::default()).expect("partition");
    consolidate(&store, &canonical, 4).expect("first");
    let first = std::fs::read(canonical.path()).expect("read");

    let reloaded = canonical.load().expect("load");
    let again = TempDir::new().expect("tempdir");
    let store_again = ShardStore::new(again.path());
    partition(reloaded, &store_again, &PartitionOptions::default()).expect("partition again");
    consolidate(&store_again, &canonical, 4).expect("second");
    assert_eq!(std::fs::read(canonical.path()).expect("read"), first);
}

#[test]
fn wide_and_precise_numbers_survive_byte_for_byte() {
    let dir = TempDir::new().expect("tempdir");
    let store = ShardStore::new(dir.path().join("familyDatas"));
    let canonical = CanonicalFile::new(dir.path().join("data.json"));
    let original = "[\n    {\n        \"id\": 123456789012345678901234567890,\n        \"born\": \"1815\",\n        \"weight\": 0.1000000000000000000000000001,\n        \"far\": 1e400\n    }\n]\n";
    std::fs::write(canonical.path(), original).expect("write");

    rootshard::partition::partition_canonical(&canonical, &store, &PartitionOptions::default()).expect("partition");
    let shard = std::fs::read_to_string(store.dir().join("data_1800.json")).expect("shard");
    assert_eq!(shard, original);

    consolidate(&store, &canonical, 4).expect("consolidate");
    assert_eq!(std::fs::read_to_string(canonical.path()).expect("canonical"), original);
}
