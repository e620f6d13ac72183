//! Splitting the canonical collection into century shards.
//!
//! Records are grouped by the century origin of their birth year, keeping
//! their relative order inside each group, and each group replaces the shard
//! file of its bucket. All shards are staged before the first one is renamed
//! into place, so a failure while writing leaves the previous shards intact.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::{Result, RootshardError};
use crate::persist::{digest, encode_collection, CanonicalFile, ShardStore, StagedFile};
use crate::record::{Bucket, RecordCollection, YearTally};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionOptions {
    pub normalize_names: bool,
    pub prune_stale: bool,
    pub indent: usize,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self { normalize_names: false, prune_stale: false, indent: 4 }
    }
}

/// Records grouped by bucket, in input order within each bucket.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Grouping {
    pub buckets: BTreeMap<Bucket, RecordCollection>,
    pub unresolved_dates: usize,
    pub names_normalized: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardSummary {
    pub path: PathBuf,
    pub records: usize,
    /// BLAKE3 of the bytes written, equal across reruns on unchanged input.
    pub digest: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PartitionReport {
    pub records: usize,
    pub unresolved_dates: usize,
    pub names_normalized: usize,
    pub shards: BTreeMap<Bucket, ShardSummary>,
    /// Shards of buckets absent from this input, left in place.
    pub stale: Vec<PathBuf>,
    /// Shards of buckets absent from this input, deleted.
    pub pruned: Vec<PathBuf>,
}

/// Groups records by birth century without touching the file system.
pub fn group_by_century(records: RecordCollection, normalize_names: bool) -> Grouping {
    let mut grouping = Grouping::default();
    let mut tally = YearTally::default();
    for mut record in records {
        if normalize_names && record.normalize_name() {
            grouping.names_normalized += 1;
        }
        let bucket = Bucket::for_year(tally.year_of(&record));
        grouping.buckets.entry(bucket).or_default().push(record);
    }
    grouping.unresolved_dates = tally.unresolved;
    grouping
}

/// Writes one shard per bucket of `records` into `store`.
pub fn partition(records: RecordCollection, store: &ShardStore, options: &PartitionOptions) -> Result<PartitionReport> {
    let total = records.len();
    let grouping = group_by_century(records, options.normalize_names);
    store.ensure_dir()?;

    let mut report = PartitionReport {
        records: total,
        unresolved_dates: grouping.unresolved_dates,
        names_normalized: grouping.names_normalized,
        ..Default::default()
    };
    let mut staged = Vec::with_capacity(grouping.buckets.len());
    for (bucket, members) in &grouping.buckets {
        let path = store.shard_path(bucket);
        let bytes = encode_collection(members, options.indent)
            .map_err(|e| RootshardError::format(&path, e.to_string()))?;
        staged.push(StagedFile::stage(&path, &bytes)?);
        report.shards.insert(*bucket, ShardSummary { path, records: members.len(), digest: digest(&bytes) });
    }

    let written: BTreeSet<String> = grouping.buckets.keys().map(Bucket::label).collect();
    let stale: Vec<PathBuf> = store
        .list()?
        .into_iter()
        .filter(|shard| !written.contains(&shard.label))
        .map(|shard| shard.path)
        .collect();

    for file in staged {
        file.commit()?;
    }

    if options.prune_stale {
        for path in stale {
            fs::remove_file(&path).map_err(|e| RootshardError::storage(&path, e))?;
            info!(path=%path.display(), "stale shard removed");
            report.pruned.push(path);
        }
    } else {
        for path in &stale {
            warn!(path=%path.display(), "stale shard left in store, it will be consolidated again");
        }
        report.stale = stale;
    }

    info!(
        records=report.records,
        shards=report.shards.len(),
        unresolved_dates=report.unresolved_dates,
        names_normalized=report.names_normalized,
        store=%store.dir().display(),
        "partition complete"
    );
    Ok(report)
}

/// Loads the canonical file and partitions it into `store`.
pub fn partition_canonical(canonical: &CanonicalFile, store: &ShardStore, options: &PartitionOptions) -> Result<PartitionReport> {
    let records = canonical.load()?;
    partition(records, store, options)
}
