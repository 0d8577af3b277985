//! HTTP client module
//!
//! One authenticated-by-URL GET per page, JSON bodies, Link header parsing.
//!
//! # Features
//!
//! - **Strict status check**: only `200 OK` is a page; status and body are kept otherwise
//! - **Identity headers**: fixed `User-Agent` and `Accept: application/json`
//! - **Throttling**: optional token bucket rate limiter using governor

mod client;
mod rate_limit;

pub(crate) use client::redact;
pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, Page, ACCEPT_JSON};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
