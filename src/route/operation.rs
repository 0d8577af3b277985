//! Operation descriptors and the operation table
//!
//! An operation is a name plus templates that differ in placeholder count.
//! The number of positional arguments in a call picks the template.

use super::template::UrlTemplate;
use crate::config::OperationDef;
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashSet};

/// A named set of URL templates for one logical API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    name: String,
    templates: Vec<UrlTemplate>,
}

impl OperationDescriptor {
    /// Create a descriptor, rejecting templates that share a placeholder count
    pub fn new<I, S>(name: impl Into<String>, templates: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let templates = templates
            .into_iter()
            .map(|t| UrlTemplate::parse(t.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        if templates.is_empty() {
            return Err(Error::config(format!(
                "operation '{name}' has no URL templates"
            )));
        }

        let mut counts = HashSet::new();
        for template in &templates {
            if !counts.insert(template.placeholder_count()) {
                return Err(Error::config(format!(
                    "operation '{name}' has more than one template with {} placeholder(s)",
                    template.placeholder_count()
                )));
            }
        }

        Ok(Self { name, templates })
    }

    /// Operation name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Templates in declaration order
    pub fn templates(&self) -> &[UrlTemplate] {
        &self.templates
    }

    /// First template taking exactly `arg_count` arguments
    pub fn select(&self, arg_count: usize) -> Option<&UrlTemplate> {
        self.templates
            .iter()
            .find(|t| t.placeholder_count() == arg_count)
    }

    /// Pick a template by arity and substitute `args` into it
    pub fn resolve<S: AsRef<str>>(&self, args: &[S]) -> Result<String> {
        match self.select(args.len()) {
            Some(template) => template.render(args),
            None => Err(Error::NoMatchingRoute {
                operation: self.name.clone(),
                arg_count: args.len(),
                templates: self.describe_templates(),
            }),
        }
    }

    /// Templates joined for error messages
    pub fn describe_templates(&self) -> String {
        self.templates
            .iter()
            .map(UrlTemplate::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TryFrom<&OperationDef> for OperationDescriptor {
    type Error = Error;

    fn try_from(def: &OperationDef) -> Result<Self> {
        Self::new(&def.name, &def.templates)
    }
}

/// Registry of operations by name
#[derive(Debug, Clone, Default)]
pub struct OperationTable {
    operations: BTreeMap<String, OperationDescriptor>,
}

impl OperationTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation, replacing any existing one with the same name
    pub fn register(&mut self, descriptor: OperationDescriptor) -> Option<OperationDescriptor> {
        self.operations
            .insert(descriptor.name().to_string(), descriptor)
    }

    /// Add every operation declared in config
    pub fn register_defs(&mut self, defs: &[OperationDef]) -> Result<()> {
        for def in defs {
            self.register(OperationDescriptor::try_from(def)?);
        }
        Ok(())
    }

    /// Look up an operation
    pub fn get(&self, name: &str) -> Option<&OperationDescriptor> {
        self.operations.get(name)
    }

    /// Look up an operation or fail with `UnknownOperation`
    pub fn require(&self, name: &str) -> Result<&OperationDescriptor> {
        self.get(name).ok_or_else(|| Error::unknown_operation(name))
    }

    /// Operation names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.operations.keys().map(String::as_str).collect()
    }

    /// Iterate over descriptors in name order
    pub fn iter(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.operations.values()
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// True when no operation is registered
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
