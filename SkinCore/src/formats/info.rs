//! Info descriptors: the per-vehicle placeholder and the mod's root `info.json`

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default version written into a mod's `info.json`
pub const DEFAULT_MOD_VERSION: &str = "1.0";

/// Placeholder info file stored with a vehicle template
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub name: String,
    pub author: String,
}

impl Default for TemplateInfo {
    fn default() -> Self {
        Self {
            name: "skinname".to_string(),
            author: "author".to_string(),
        }
    }
}

impl TemplateInfo {
    /// Render as 2-space indented JSON
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The `info.json` at the root of a mod archive
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModInfo {
    pub name: String,
    pub version: String,
    pub author: String,
}

impl ModInfo {
    #[must_use]
    pub fn new(name: &str, author: &str) -> Self {
        Self {
            name: name.to_string(),
            version: DEFAULT_MOD_VERSION.to_string(),
            author: author.to_string(),
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Render as 2-space indented JSON
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
