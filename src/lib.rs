//! Rootshard – century sharding for genealogical person records.
//!
//! A family tree is kept as one JSON array of person objects (the *canonical
//! file*). For browsing it is split into one file per century of birth (the
//! *shards*), and after editing the shards are merged back into a single
//! chronologically sorted canonical file. The two directions are:
//! * **partition**: canonical file → `data_<bucket>.json` per century.
//! * **consolidate**: all shards → canonical file, sorted by birth year.
//!
//! A person is an open set of fields. Only two are interpreted:
//! * `born` – a free-form date such as `"1815"`, `"01/01/1915"` or
//!   `"08/??/2015"`. The year is the digits of the last `/` segment.
//! * `name` – optionally normalized to `"Jean-Pierre Dupont"` style
//!   capitalization while partitioning.
//!
//! Everything else, including field order, is carried through as is.
//!
//! ## Modules
//! * [`year`] – Year extraction from free-form dates, with typed failures.
//! * [`name`] – Display name capitalization.
//! * [`record`] – [`record::PersonRecord`] and the century [`record::Bucket`].
//! * [`persist`] – JSON reading, atomic writing, the shard store and canonical file.
//! * [`partition`] – Canonical collection → century shards.
//! * [`consolidate`] – Century shards → sorted canonical collection.
//! * [`config`] – Layered [`config::Settings`].
//! * [`error`] – [`error::RootshardError`] and exit codes.
//!
//! ## Guarantees
//! * Partition is lossless: the shards together hold exactly the input records.
//! * Each bucket keeps the input order of its records.
//! * Consolidation orders by birth year, undated records last, ties in shard
//!   label order then file order.
//! * Files are replaced atomically; an interrupted run never leaves a
//!   truncated file.
//!
//! ## Quick Start
//! ```
//! use rootshard::persist::{CanonicalFile, ShardStore};
//! use rootshard::partition::{partition, PartitionOptions};
//! use rootshard::consolidate::consolidate;
//! let dir = tempfile::TempDir::new().unwrap();
//! let records = serde_json::from_str(r#"[{"name": "Ada", "born": "10/12/1815"}, {"name": "Bob"}]"#).unwrap();
//! let store = ShardStore::new(dir.path().join("familyDatas"));
//! let report = partition(records, &store, &PartitionOptions::default()).unwrap();
//! assert_eq!(report.shards.len(), 2);
//! let canonical = CanonicalFile::new(dir.path().join("data.json"));
//! let merged = consolidate(&store, &canonical, 4).unwrap();
//! assert_eq!(merged[0].name(), Some("Ada"));
//! ```

pub mod config;
pub mod consolidate;
pub mod error;
pub mod name;
pub mod partition;
pub mod persist;
pub mod record;
pub mod year;

pub use error::{Result, RootshardError};
