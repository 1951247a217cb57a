//! Pagination subsystem.
//!
//! # Data Flow
//! ```text
//! raw query string
//!     → query.rs (validate & normalize page, pageSize, dates)
//!     → builder.rs (render canonical downstream URL)
//!     → date.rs (fixed wire format shared by every tier)
//! ```

pub mod date;
pub mod query;
pub mod builder;

pub use query::{PaginationQuery, ValidationError};
pub use builder::UrlBuilder;
