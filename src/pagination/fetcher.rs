//! Paginating fetcher
//!
//! Fetches a page, follows its `rel="next"` link, and repeats until the
//! server stops advertising one. The chain is strictly sequential, so the
//! result is always page 1 followed by page 2 and so on.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{redact, HttpClient, HttpClientConfig};
use crate::types::Credential;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

/// Query parameter carrying the credential
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Query parameter carrying the page size
pub const PER_PAGE_PARAM: &str = "per_page";

/// Query parameter carrying the page number
pub const PAGE_PARAM: &str = "page";

/// Follows Link-header pagination and merges every page into one value
#[derive(Debug)]
pub struct PaginatingFetcher {
    client: HttpClient,
    api_root: Url,
    per_page: u32,
    max_pages: Option<u32>,
}

impl PaginatingFetcher {
    /// Create a fetcher around an existing HTTP client
    pub fn new(client: HttpClient, config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client,
            api_root: config.api_root_url()?,
            per_page: config.per_page,
            max_pages: config.max_pages,
        })
    }

    /// Create a fetcher and its HTTP client from a config
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = HttpClient::with_config(HttpClientConfig::from(config))?;
        Self::new(client, config)
    }

    /// Page ceiling, if any
    pub fn max_pages(&self) -> Option<u32> {
        self.max_pages
    }

    /// Build the request URL for a target
    ///
    /// Targets containing a protocol marker are used verbatim: server-supplied
    /// "next" links already carry their own page number and query. Anything
    /// else is a path relative to the API root.
    pub fn build_url(
        &self,
        target: &str,
        credential: Option<&Credential>,
        page: u32,
    ) -> Result<String> {
        if is_absolute(target) {
            return Ok(target.to_string());
        }

        let base = self.api_root.as_str().trim_end_matches('/');
        let path = target.trim_start_matches('/');
        let mut url = Url::parse(&format!("{base}/{path}"))?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(credential) = credential {
                query.append_pair(ACCESS_TOKEN_PARAM, credential.expose());
            }
            query.append_pair(PER_PAGE_PARAM, &self.per_page.to_string());
            query.append_pair(PAGE_PARAM, &page.to_string());
        }
        Ok(url.into())
    }

    /// Fetch every page of `target`, starting at page 1
    pub async fn fetch(&self, target: &str, credential: Option<&Credential>) -> Result<Value> {
        self.fetch_from(target, credential, 1, &CancellationToken::new())
            .await
    }

    /// Fetch every page of `target`, starting at `page`
    ///
    /// `cancel` is checked before each page and raced against the request in
    /// flight. Any error drops the pages fetched so far.
    pub async fn fetch_from(
        &self,
        target: &str,
        credential: Option<&Credential>,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<Value> {
        let mut url = self.build_url(target, credential, page)?;
        let mut page_number = page;
        let mut pages_fetched = 0u32;
        let mut pages = Vec::new();

        loop {
            let fetched = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(Error::Cancelled { pages_fetched }),
                result = self.client.get_page(&url) => result?,
            };
            pages_fetched += 1;

            let next = fetched.links.next().map(str::to_string);
            debug!(
                page = page_number,
                items = fetched.item_count(),
                has_next = next.is_some(),
                "Fetched {}",
                redact(&url)
            );
            pages.push(fetched.body);

            let Some(next) = next else {
                break;
            };

            if let Some(max_pages) = self.max_pages {
                if pages_fetched >= max_pages {
                    return Err(Error::PageLimitExceeded { max_pages });
                }
            }

            // The next link already embeds the credential and page number
            page_number += 1;
            url = resolve_next(&url, &next)?;
        }

        info!(pages = pages_fetched, "Completed {}", redact(target));
        Ok(accumulate(pages))
    }
}

/// True when the target carries a protocol marker
fn is_absolute(target: &str) -> bool {
    target.contains("://")
}

/// Resolve a `rel="next"` target against the page it came from
///
/// Absolute links are kept verbatim. Relative ones are joined to the
/// current page URL, keeping their own query as-is.
pub(crate) fn resolve_next(current: &str, next: &str) -> Result<String> {
    if is_absolute(next) {
        return Ok(next.to_string());
    }
    Ok(Url::parse(current)?.join(next)?.into())
}

/// Merge pages in order
///
/// A lone page is returned as parsed. With several pages, arrays are
/// concatenated and any non-array page becomes a single element.
pub(crate) fn accumulate(mut pages: Vec<Value>) -> Value {
    if pages.len() == 1 {
        if let Some(only) = pages.pop() {
            return only;
        }
    }

    let mut items = Vec::new();
    for page in pages {
        match page {
            Value::Array(values) => items.extend(values),
            other => items.push(other),
        }
    }
    Value::Array(items)
}
