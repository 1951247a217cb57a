//! Canonical downstream URL construction.

use url::Url;

use crate::paging::date::format_canonical;
use crate::paging::query::{
    PaginationQuery, END_DATE_PARAM, PAGE_PARAM, PAGE_SIZE_PARAM, START_DATE_PARAM,
};

/// Renders the canonical query for one downstream endpoint.
///
/// Query pairs already present on the base address (function keys and the
/// like) are kept ahead of the pagination parameters.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: Url,
}

impl UrlBuilder {
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(base)?,
        })
    }

    pub fn build(&self, query: &PaginationQuery) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair(PAGE_PARAM, &query.page.to_string())
            .append_pair(PAGE_SIZE_PARAM, &query.page_size.to_string())
            .append_pair(START_DATE_PARAM, &format_canonical(&query.start_date))
            .append_pair(END_DATE_PARAM, &format_canonical(&query.end_date));
        url
    }
}
