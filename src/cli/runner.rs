//! CLI runner - executes commands

use crate::api::GithubCollection;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::collection::Collection;
use crate::config::{load_config, ClientConfig};
use crate::error::Result;
use crate::pagination::parse_link_header;
use crate::route::Invocation;
use crate::types::Credential;
use serde_json::{json, Map, Value};

/// Environment variables checked for a token, in order
const TOKEN_ENV_VARS: [&str; 2] = ["HUBPAGER_TOKEN", "GITHUB_TOKEN"];

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command and print its output
    pub async fn run(&self) -> Result<()> {
        let output = self.execute().await?;
        println!("{output}");
        Ok(())
    }

    /// Run the CLI command and return the rendered output
    pub async fn execute(&self) -> Result<String> {
        let value = match &self.cli.command {
            Commands::Call { operation, args } => self.call(operation, args).await?,
            Commands::Operations => self.operations()?,
            Commands::Links { header } => links(header)?,
        };
        self.render(&value)
    }

    fn load_config(&self) -> Result<ClientConfig> {
        match &self.cli.config {
            Some(path) => load_config(path),
            None => {
                let mut config = ClientConfig::default();
                config.apply_env();
                config.validate()?;
                Ok(config)
            }
        }
    }

    fn token(&self) -> Option<Credential> {
        resolve_token(self.cli.token.as_deref(), |key| std::env::var(key).ok())
    }

    async fn call(&self, operation: &str, args: &[String]) -> Result<Value> {
        let config = self.load_config()?;
        let collection = GithubCollection::from_config(&config)?;
        collection.initialize().await?;

        let mut invocation = Invocation::new(collection.name()).args(args.iter().cloned());
        if let Some(token) = self.token() {
            invocation = invocation.credential(token);
        }

        collection.call(operation, invocation).await
    }

    fn operations(&self) -> Result<Value> {
        let config = self.load_config()?;
        let collection = GithubCollection::from_config(&config)?;

        let ops: Vec<Value> = collection
            .operations()
            .iter()
            .map(|op| {
                json!({
                    "name": op.name(),
                    "templates": op.templates().iter().map(ToString::to_string).collect::<Vec<_>>(),
                })
            })
            .collect();

        Ok(Value::Array(ops))
    }

    fn render(&self, value: &Value) -> Result<String> {
        let output = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        Ok(output)
    }
}

/// Parse a Link header into a JSON object keyed by relation
fn links(header: &str) -> Result<Value> {
    let links = parse_link_header(header)?;
    let mut pairs: Vec<_> = links.iter().collect();
    pairs.sort_unstable();

    let map: Map<String, Value> = pairs
        .into_iter()
        .map(|(rel, url)| (rel.to_string(), Value::String(url.to_string())))
        .collect();
    Ok(Value::Object(map))
}

/// Flag first, then the token environment variables
fn resolve_token(flag: Option<&str>, lookup: impl Fn(&str) -> Option<String>) -> Option<Credential> {
    flag.map(str::to_string)
        .or_else(|| TOKEN_ENV_VARS.iter().find_map(|key| lookup(key)))
        .filter(|token| !token.trim().is_empty())
        .map(Credential::new)
}
