//! Pagination module
//!
//! Link header parsing and the fetcher that walks `rel="next"` chains.
//!
//! # Overview
//!
//! A response's `Link` header is parsed into a [`LinkSet`]. While the set has
//! a "next" relation, the [`PaginatingFetcher`] requests that URL and appends
//! its body to the accumulated result.

mod fetcher;
mod link;

pub use fetcher::{PaginatingFetcher, ACCESS_TOKEN_PARAM, PAGE_PARAM, PER_PAGE_PARAM};
pub use link::{parse_link_header, LinkSet};
