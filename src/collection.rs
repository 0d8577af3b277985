//! Collection trait
//!
//! A collection is what a hosting framework registers: it has a name, a
//! lifecycle hook, and dispatches operations by name.

use crate::error::Result;
use crate::route::{Invocation, OperationTable};
use async_trait::async_trait;
use serde_json::Value;

/// Core trait for dispatchable collections
#[async_trait]
pub trait Collection: Send + Sync {
    /// Name the collection is registered under
    fn name(&self) -> &str;

    /// Registration hook called by the host before first use
    ///
    /// Nothing needs preparing, so this always succeeds.
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    /// Operations this collection can run
    fn operations(&self) -> &OperationTable;

    /// Run an operation by name and return every page merged
    async fn call(&self, operation: &str, invocation: Invocation) -> Result<Value>;
}
