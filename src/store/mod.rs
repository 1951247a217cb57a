//! Record store collaborator used by the data tier.
//!
//! # Data Flow
//! ```text
//! data tier handler
//!     → RecordStore::fetch_page(kind, query, rows_to_skip)
//!     → StorePage { items, total_count }
//!     → RecordPage (items + the parameters that produced them)
//!     → JSON body
//! ```
//!
//! # Design Decisions
//! - Records are opaque JSON values; the relay never inspects them
//! - The store is shared read-only across requests
//! - Pages are request-scoped and never cached

pub mod memory;

use std::fmt;

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::paging::PaginationQuery;

pub use memory::MemoryStore;

/// The two record kinds served by every tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Episodes,
    Profiles,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Episodes, RecordKind::Profiles];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Episodes => "episodes",
            RecordKind::Profiles => "profiles",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or failed mid-query.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Seed data could not be read.
    #[error("failed to read seed file: {0}")]
    Seed(#[from] std::io::Error),

    /// Seed data was not valid JSON of the expected shape.
    #[error("malformed seed data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One slice of matching records plus the size of the full match set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorePage {
    pub items: Vec<Value>,
    pub total_count: u64,
}

/// Data-access contract consumed by the data tier.
pub trait RecordStore: Send + Sync {
    /// Fetch the records of `kind` inserted within the query's inclusive date
    /// range, ordered by insertion time, skipping `rows_to_skip` and taking at
    /// most `query.page_size`.
    fn fetch_page<'a>(
        &'a self,
        kind: RecordKind,
        query: &'a PaginationQuery,
        rows_to_skip: u64,
    ) -> BoxFuture<'a, Result<StorePage, StoreError>>;
}

/// A page of records together with the parameters that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPage {
    pub kind: RecordKind,
    pub items: Vec<Value>,
    pub page: u32,
    pub page_size: u32,
    pub rows_to_skip: u64,
    pub total_results: u64,
}

impl RecordPage {
    pub fn new(kind: RecordKind, query: &PaginationQuery, rows_to_skip: u64, page: StorePage) -> Self {
        Self {
            kind,
            items: page.items,
            page: query.page,
            page_size: query.page_size,
            rows_to_skip,
            total_results: page.total_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_pages(&self) -> u64 {
        self.total_results.div_ceil(u64::from(self.page_size))
    }

    pub fn has_more_data(&self) -> bool {
        self.total_results > self.rows_to_skip + u64::from(self.page_size)
    }

    /// Serialize into the JSON body returned by the data tier.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut body = json!({
            "page": self.page,
            "pageSize": self.page_size,
            "totalResults": self.total_results,
            "totalPages": self.total_pages(),
            "hasMoreData": self.has_more_data(),
        });
        body[self.kind.as_str()] = Value::Array(self.items.clone());
        serde_json::to_vec(&body)
    }
}
