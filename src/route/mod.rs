//! Route resolution
//!
//! Picks a URL template by argument count, fills its placeholders, and
//! dispatches the resulting path.
//!
//! ```text
//! call("repos", ["octocat"])
//!   → templates: user/repos (0), users/:user/repos (1)
//!   → users/octocat/repos
//!   → PaginatingFetcher (page 1)
//! ```

mod operation;
mod resolver;
mod template;

pub use operation::{OperationDescriptor, OperationTable};
pub use resolver::{Dispatcher, Invocation};
pub use template::{Segment, UrlTemplate};
