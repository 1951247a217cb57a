//! Pagination parameter validation.
//!
//! # Rules
//! - `page`: absent or unparseable → [`ValidationError::InvalidPage`]; < 1 → 1
//! - `pageSize`: absent or unparseable → 1000; clamped to [1, 5000]
//! - `startDate`, `endDate`: required, see [`crate::paging::date::parse`]
//!
//! No ordering is enforced between the two dates. An inverted range is
//! forwarded as-is and the store answers it with an empty page.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::paging::date;

pub const PAGE_PARAM: &str = "page";
pub const PAGE_SIZE_PARAM: &str = "pageSize";
pub const START_DATE_PARAM: &str = "startDate";
pub const END_DATE_PARAM: &str = "endDate";

pub const MIN_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 1000;
pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 5000;

/// A rejected pagination request. Always answered locally with 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid page")]
    InvalidPage,

    #[error("invalid date range")]
    InvalidDateRange,
}

/// Validated pagination parameters.
///
/// Invariant: `page >= 1` and `1 <= page_size <= 5000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationQuery {
    pub page: u32,
    pub page_size: u32,
    /// Inclusive lower bound.
    pub start_date: NaiveDateTime,
    /// Inclusive upper bound.
    pub end_date: NaiveDateTime,
}

impl PaginationQuery {
    /// Validate a decoded query-string map.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ValidationError> {
        Self::parse(
            params.get(PAGE_PARAM).map(String::as_str),
            params.get(PAGE_SIZE_PARAM).map(String::as_str),
            params.get(START_DATE_PARAM).map(String::as_str),
            params.get(END_DATE_PARAM).map(String::as_str),
        )
    }

    /// Validate raw parameter values.
    pub fn parse(
        page: Option<&str>,
        page_size: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let page = parse_page(page)?;

        let start_date = start_date
            .and_then(date::parse)
            .ok_or(ValidationError::InvalidDateRange)?;
        let end_date = end_date
            .and_then(date::parse)
            .ok_or(ValidationError::InvalidDateRange)?;

        Ok(Self {
            page,
            page_size: parse_page_size(page_size),
            start_date,
            end_date,
        })
    }

    /// Zero-based offset of the first record on this page.
    pub fn rows_to_skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

fn parse_page(raw: Option<&str>) -> Result<u32, ValidationError> {
    raw.ok_or(ValidationError::InvalidPage)?
        .trim()
        .parse::<i32>()
        .map(|page| page.max(MIN_PAGE as i32) as u32)
        .map_err(|_| ValidationError::InvalidPage)
}

fn parse_page_size(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<i32>().ok())
        .map_or(DEFAULT_PAGE_SIZE, |size| {
            size.clamp(MIN_PAGE_SIZE as i32, MAX_PAGE_SIZE as i32) as u32
        })
}
