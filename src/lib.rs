//! # hubpager
//!
//! Call a paginated REST API by operation name and get every page back as
//! one merged JSON value.
//!
//! ## Features
//!
//! - **Route by arity**: each operation has URL templates that differ in placeholder count
//! - **Link header pagination**: `rel="next"` chains are followed and concatenated in order
//! - **Bounded**: page ceiling and cancellation between pages
//! - **Faithful errors**: non-200 responses keep their status code and body
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hubpager::{ClientConfig, Credential, GithubCollection, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let github = GithubCollection::from_config(&ClientConfig::default())?;
//!     let token = Credential::new("ghp_...");
//!
//!     // GET users/octocat/repos, every page
//!     let repos = github.repos(Some("octocat"), &token).await?;
//!     println!("{} repos", repos.as_array().map_or(0, Vec::len));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │      Collection / GithubCollection (named operations)    │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────────────────────────────────────────────────┐
//! │  Dispatcher: validate → pick template by arity → render  │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────────────────────────────────────────────────┐
//! │  PaginatingFetcher: GET → parse Link → follow "next"     │
//! │                     → concatenate pages in order         │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// HTTP client
pub mod http;

/// Link header parsing and page accumulation
pub mod pagination;

/// URL templates, operation table and dispatcher
pub mod route;

/// Collection trait
pub mod collection;

/// GitHub operations
pub mod api;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use api::GithubCollection;
pub use collection::Collection;
pub use config::{load_config, ClientConfig};
pub use error::{Error, Result};
pub use pagination::{parse_link_header, LinkSet, PaginatingFetcher};
pub use route::{Dispatcher, Invocation, OperationDescriptor, OperationTable};
pub use types::Credential;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
