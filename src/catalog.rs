//! # Build Configuration Catalog
//!
//! This module defines the data structures that represent the `build.json`
//! configuration document, as well as the logic for loading it. The document
//! maps configuration names to arbitrary nested parameter mappings; a
//! reserved `inherits` key names a single parent configuration.
//!
//! ## Document shape
//!
//! ```json
//! {
//!   "default": "debug",
//!   "configurations": {
//!     "debug":   { "options": { "CMAKE_BUILD_TYPE": "Debug" } },
//!     "release": { "inherits": "debug",
//!                  "options": { "CMAKE_BUILD_TYPE": "Release" } }
//!   }
//! }
//! ```
//!
//! The `default` field may be a single name or a list of names; it is
//! normalized to a list at this boundary so that the rest of the system never
//! sees the ambiguous "string or list" shape. The catalog is loaded once per
//! invocation and treated as read-only thereafter.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A JSON value that may be written either as a bare string or as a list of
/// strings. Call [`StringOrList::into_vec`] to normalize to a sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    /// A single bare string, e.g. `"all"`.
    One(String),
    /// An explicit list of strings, e.g. `["install", "test"]`.
    Many(Vec<String>),
}

impl StringOrList {
    /// Normalize to a sequence: a bare string becomes a one-element vector.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

/// A single named build configuration: an arbitrary nested mapping of build
/// parameters, with the reserved `inherits` key naming its parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationSpec(pub Map<String, Value>);

impl ConfigurationSpec {
    /// The parent configuration named by the reserved `inherits` key, if any.
    pub fn inherits(&self) -> Option<&str> {
        self.0.get("inherits").and_then(Value::as_str)
    }
}

/// The full configuration catalog loaded from the configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Configuration name(s) to use when none is requested explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<StringOrList>,

    /// All named configurations. Kept in a `BTreeMap` so listings come out
    /// sorted without an extra pass.
    pub configurations: BTreeMap<String, ConfigurationSpec>,
}

impl Catalog {
    /// Parse a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigParse` if the document is not valid JSON or does
    /// not match the expected shape.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|err| Error::ConfigParse {
            message: err.to_string(),
        })
    }

    /// Load a catalog from a JSON file on disk.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and
    /// `Error::ConfigParse` if its contents cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Look up a configuration by name.
    pub fn get(&self, name: &str) -> Option<&ConfigurationSpec> {
        self.configurations.get(name)
    }

    /// Whether the catalog contains a configuration with the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.configurations.contains_key(name)
    }

    /// All configuration names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.configurations.keys().map(String::as_str)
    }

    /// The configurations selected when none is named on the command line.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingDefault` if the catalog declares no `default`
    /// field.
    pub fn default_configurations(&self) -> Result<Vec<String>> {
        self.default
            .clone()
            .map(StringOrList::into_vec)
            .ok_or(Error::MissingDefault)
    }
}
