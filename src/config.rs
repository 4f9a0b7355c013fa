//! Configuration for graph construction and default facet filters
//!
//! Loaded from TOML. Every key is optional:
//!
//! ```toml
//! [sizing]
//! backlink_cap = 20
//! backlink_weight = 1.0
//!
//! [filters]
//! show_images = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::graph::{GraphFilters, SizePolicy};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub sizing: SizePolicy,
    pub filters: GraphFilters,
}

impl GraphConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GraphConfig = toml::from_str(content)?;
        config.sizing.validate()?;
        Ok(config)
    }

    /// Read a config file; `~` is expanded
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_string_lossy();
        let path = shellexpand::tilde(&path).to_string();
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!(path = %path, "Loaded graph config");
        Self::from_toml_str(&content)
    }
}
