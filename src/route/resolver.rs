//! Dispatch by operation name
//!
//! A call carries a model token, positional arguments and a credential. The
//! dispatcher checks the call, resolves the path by argument count, and
//! hands the path to the paginating fetcher at page 1.

use super::operation::{OperationDescriptor, OperationTable};
use crate::api::builtin_operations;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::pagination::PaginatingFetcher;
use crate::types::Credential;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// One call into the dispatcher
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Name of the calling model/collection
    pub model: String,
    /// Positional path arguments
    pub args: Vec<String>,
    /// Access token
    pub credential: Option<Credential>,
}

impl Invocation {
    /// Start an invocation for a model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Append a positional argument
    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Append several positional arguments
    #[must_use]
    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(values.into_iter().map(Into::into));
        self
    }

    /// Set the credential
    #[must_use]
    pub fn credential(mut self, credential: impl Into<Credential>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    /// Check the call shape before anything goes on the wire
    pub fn validate(&self) -> Result<&Credential> {
        if self.model.trim().is_empty() {
            return Err(Error::invalid_invocation("missing model"));
        }

        if let Some(index) = self.args.iter().position(|a| a.trim().is_empty()) {
            return Err(Error::invalid_invocation(format!(
                "argument {} is empty",
                index + 1
            )));
        }

        match &self.credential {
            Some(credential) if !credential.is_blank() => Ok(credential),
            _ => Err(Error::invalid_invocation("missing credential")),
        }
    }
}

/// Resolves operations and runs them through the paginating fetcher
#[derive(Debug)]
pub struct Dispatcher {
    fetcher: PaginatingFetcher,
    operations: OperationTable,
}

impl Dispatcher {
    /// Create a dispatcher from parts
    pub fn new(fetcher: PaginatingFetcher, operations: OperationTable) -> Self {
        Self {
            fetcher,
            operations,
        }
    }

    /// Built-in operations plus any declared in config
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let fetcher = PaginatingFetcher::from_config(config)?;
        let mut operations = builtin_operations()?;
        operations.register_defs(&config.operations)?;
        Ok(Self::new(fetcher, operations))
    }

    /// Registered operations
    pub fn operations(&self) -> &OperationTable {
        &self.operations
    }

    /// Underlying fetcher
    pub fn fetcher(&self) -> &PaginatingFetcher {
        &self.fetcher
    }

    /// Run an operation by name
    pub async fn call(&self, operation: &str, invocation: Invocation) -> Result<Value> {
        self.call_with_cancel(operation, invocation, &CancellationToken::new())
            .await
    }

    /// Run an operation by name, honoring `cancel` between pages
    pub async fn call_with_cancel(
        &self,
        operation: &str,
        invocation: Invocation,
        cancel: &CancellationToken,
    ) -> Result<Value> {
        let descriptor = self.operations.require(operation)?;
        self.run(descriptor, &invocation, cancel).await
    }

    /// Run a descriptor that is not in the table
    pub async fn call_descriptor(
        &self,
        descriptor: &OperationDescriptor,
        invocation: Invocation,
    ) -> Result<Value> {
        self.run(descriptor, &invocation, &CancellationToken::new())
            .await
    }

    async fn run(
        &self,
        descriptor: &OperationDescriptor,
        invocation: &Invocation,
        cancel: &CancellationToken,
    ) -> Result<Value> {
        let credential = invocation.validate()?;
        let path = descriptor.resolve(&invocation.args)?;

        debug!(
            operation = descriptor.name(),
            model = %invocation.model,
            "Resolved route to {path}"
        );

        self.fetcher
            .fetch_from(&path, Some(credential), 1, cancel)
            .await
    }
}
