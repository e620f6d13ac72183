//! Merging the century shards back into one chronological collection.

use tracing::{debug, info};

use crate::error::{Result, RootshardError};
use crate::persist::{CanonicalFile, ShardStore};
use crate::record::{RecordCollection, YearTally};

/// Stable sort by birth year, records without a year last.
///
/// Returns how many records carried a birth date that could not be read.
pub fn sort_chronologically(records: &mut RecordCollection) -> usize {
    let mut tally = YearTally::default();
    let mut keyed: Vec<_> = records
        .drain(..)
        .map(|record| {
            let year = tally.year_of(&record);
            ((year.is_none(), year), record)
        })
        .collect();
    keyed.sort_by_key(|(key, _)| *key);
    records.extend(keyed.into_iter().map(|(_, record)| record));
    tally.unresolved
}

/// Reads every shard of `store` in label order and concatenates them.
pub fn collect_shards(store: &ShardStore) -> Result<RecordCollection> {
    let shards = store.list()?;
    if shards.is_empty() {
        return Err(RootshardError::NoShards { dir: store.dir().to_path_buf() });
    }
    let mut records = RecordCollection::new();
    for shard in &shards {
        let part = store.read(shard)?;
        debug!(label=%shard.label, records=part.len(), "shard read");
        records.extend(part);
    }
    Ok(records)
}

/// Rebuilds the canonical file from all shards and returns its records.
///
/// Every shard is read before the canonical file is touched; a missing or
/// malformed shard leaves it as it was.
pub fn consolidate(store: &ShardStore, canonical: &CanonicalFile, indent: usize) -> Result<RecordCollection> {
    let mut records = collect_shards(store)?;
    let unresolved = sort_chronologically(&mut records);
    canonical.save(&records, indent)?;
    info!(
        records=records.len(),
        unresolved_dates=unresolved,
        canonical=%canonical.path().display(),
        "consolidation complete"
    );
    Ok(records)
}
