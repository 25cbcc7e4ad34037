//! Prompt catalog: category name → prompts

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, ScoutError};

/// Prompts grouped by category, loaded from YAML:
///
/// ```yaml
/// sports:
///   - "Names for a running club app"
///   - "Brands for a climbing gym"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PromptCatalog {
    categories: BTreeMap<String, Vec<String>>,
}

impl PromptCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScoutError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Builder-style insert, mostly for programmatic catalogs
    pub fn with_category<I, S>(mut self, category: impl Into<String>, prompts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories
            .insert(category.into(), prompts.into_iter().map(Into::into).collect());
        self
    }

    /// Prompts for `category`; empty when the category is unknown
    pub fn prompts_for(&self, category: &str) -> &[String] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Category names, sorted
    pub fn categories(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(Vec::is_empty)
    }
}
