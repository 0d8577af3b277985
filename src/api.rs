//! GitHub operation surface
//!
//! The built-in operation table and a collection exposing each operation as
//! a named method. Optional path variables are `Option`s; the method still
//! goes through the arity-based resolver, so the table is the single source
//! of URL shapes.

use crate::collection::Collection;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::route::{Dispatcher, Invocation, OperationDescriptor, OperationTable};
use crate::types::Credential;
use async_trait::async_trait;
use serde_json::Value;

/// Current user, or a named user
pub const USER: &str = "user";
/// Organizations of the current or a named user
pub const ORGS: &str = "orgs";
/// Repositories of the current or a named user
pub const REPOS: &str = "repos";
/// Repositories of an organization
pub const ORG_REPOS: &str = "org_repos";
/// Contents of a repository, optionally at a path
pub const CONTENTS: &str = "contents";
/// Branches of a repository
pub const BRANCHES: &str = "branches";

/// Built-in operations and their templates
const BUILTIN: &[(&str, &[&str])] = &[
    (USER, &["user", "users/:user"]),
    (ORGS, &["user/orgs", "users/:user/orgs"]),
    (REPOS, &["user/repos", "users/:user/repos"]),
    (ORG_REPOS, &["orgs/:org/repos"]),
    (
        CONTENTS,
        &["repos/:owner/:repo/contents", "repos/:owner/:repo/contents/:path"],
    ),
    (BRANCHES, &["repos/:owner/:repo/branches"]),
];

/// Table holding the built-in GitHub operations
pub fn builtin_operations() -> Result<OperationTable> {
    let mut table = OperationTable::new();
    for (name, templates) in BUILTIN {
        table.register(OperationDescriptor::new(*name, templates.iter())?);
    }
    Ok(table)
}

/// GitHub data exposed as a collection
#[derive(Debug)]
pub struct GithubCollection {
    name: String,
    dispatcher: Dispatcher,
}

impl GithubCollection {
    /// Collection name used when none is given
    pub const DEFAULT_NAME: &'static str = "github";

    /// Create a collection over an existing dispatcher
    pub fn new(name: impl Into<String>, dispatcher: Dispatcher) -> Self {
        Self {
            name: name.into(),
            dispatcher,
        }
    }

    /// Create a collection named `github` from a config
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(
            Self::DEFAULT_NAME,
            Dispatcher::from_config(config)?,
        ))
    }

    /// Underlying dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn invocation<'a>(
        &self,
        args: impl IntoIterator<Item = &'a str>,
        token: &Credential,
    ) -> Invocation {
        Invocation::new(&self.name)
            .args(args)
            .credential(token.clone())
    }

    /// The authenticated user, or `login` when given
    pub async fn user(&self, login: Option<&str>, token: &Credential) -> Result<Value> {
        self.call(USER, self.invocation(login, token)).await
    }

    /// Organizations of the authenticated user, or of `login`
    pub async fn orgs(&self, login: Option<&str>, token: &Credential) -> Result<Value> {
        self.call(ORGS, self.invocation(login, token)).await
    }

    /// Repositories of the authenticated user, or of `login`
    pub async fn repos(&self, login: Option<&str>, token: &Credential) -> Result<Value> {
        self.call(REPOS, self.invocation(login, token)).await
    }

    /// Repositories of an organization
    pub async fn org_repos(&self, org: &str, token: &Credential) -> Result<Value> {
        self.call(ORG_REPOS, self.invocation([org], token)).await
    }

    /// Contents of a repository root, or of `path` inside it
    pub async fn contents(
        &self,
        owner: &str,
        repo: &str,
        path: Option<&str>,
        token: &Credential,
    ) -> Result<Value> {
        let args = [owner, repo].into_iter().chain(path);
        self.call(CONTENTS, self.invocation(args, token)).await
    }

    /// Branches of a repository
    pub async fn branches(&self, owner: &str, repo: &str, token: &Credential) -> Result<Value> {
        self.call(BRANCHES, self.invocation([owner, repo], token))
            .await
    }
}

#[async_trait]
impl Collection for GithubCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn operations(&self) -> &OperationTable {
        self.dispatcher.operations()
    }

    async fn call(&self, operation: &str, invocation: Invocation) -> Result<Value> {
        self.dispatcher.call(operation, invocation).await
    }
}
