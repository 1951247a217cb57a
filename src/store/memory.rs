//! In-process record store.
//!
//! Records are filtered on their `recordInsertDatetime` field. A record
//! without a parseable timestamp is kept but never matches a date range.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use futures_util::future::{self, BoxFuture, FutureExt};
use serde::Deserialize;
use serde_json::Value;

use crate::paging::{date, PaginationQuery};
use crate::store::{RecordKind, RecordStore, StoreError, StorePage};

/// Field every stored record is timestamped by.
pub const INSERT_TIMESTAMP_FIELD: &str = "recordInsertDatetime";

#[derive(Debug, Default, Deserialize)]
struct Seed {
    #[serde(default)]
    episodes: Vec<Value>,
    #[serde(default)]
    profiles: Vec<Value>,
}

#[derive(Debug, Clone)]
struct StoredRecord {
    inserted_at: Option<NaiveDateTime>,
    payload: Value,
}

/// Record store held entirely in memory, ordered by insertion timestamp.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<RecordKind, Vec<StoredRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load records from a JSON seed file of the form
    /// `{"episodes": [...], "profiles": [...]}`.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        let seed: Seed = serde_json::from_str(&content)?;

        let mut store = Self::new();
        store.extend(RecordKind::Episodes, seed.episodes);
        store.extend(RecordKind::Profiles, seed.profiles);

        tracing::info!(
            path = %path.display(),
            episodes = store.len(RecordKind::Episodes),
            profiles = store.len(RecordKind::Profiles),
            "Loaded seed records"
        );
        Ok(store)
    }

    pub fn insert(&mut self, kind: RecordKind, record: Value) {
        self.extend(kind, std::iter::once(record));
    }

    pub fn extend(&mut self, kind: RecordKind, records: impl IntoIterator<Item = Value>) {
        let bucket = self.records.entry(kind).or_default();
        bucket.extend(records.into_iter().map(|payload| StoredRecord {
            inserted_at: payload
                .get(INSERT_TIMESTAMP_FIELD)
                .and_then(Value::as_str)
                .and_then(date::parse),
            payload,
        }));
        // Stable sort keeps insertion order among equal timestamps.
        bucket.sort_by_key(|record| record.inserted_at);
    }

    pub fn len(&self, kind: RecordKind) -> usize {
        self.records.get(&kind).map_or(0, Vec::len)
    }

    fn page(&self, kind: RecordKind, query: &PaginationQuery, rows_to_skip: u64) -> StorePage {
        let Some(bucket) = self.records.get(&kind) else {
            return StorePage::default();
        };

        let matching: Vec<&StoredRecord> = bucket
            .iter()
            .filter(|record| {
                record
                    .inserted_at
                    .is_some_and(|at| at >= query.start_date && at <= query.end_date)
            })
            .collect();

        let skip = usize::try_from(rows_to_skip).unwrap_or(usize::MAX);
        let items = matching
            .iter()
            .skip(skip)
            .take(query.page_size as usize)
            .map(|record| record.payload.clone())
            .collect();

        StorePage {
            items,
            total_count: matching.len() as u64,
        }
    }
}

impl RecordStore for MemoryStore {
    fn fetch_page<'a>(
        &'a self,
        kind: RecordKind,
        query: &'a PaginationQuery,
        rows_to_skip: u64,
    ) -> BoxFuture<'a, Result<StorePage, StoreError>> {
        future::ready(Ok(self.page(kind, query, rows_to_skip))).boxed()
    }
}
