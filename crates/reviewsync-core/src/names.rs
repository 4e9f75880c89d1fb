//! Placeholder reviewer names.
//!
//! Provider reviews carry no author identity usable in the catalog, so each
//! injected review gets a display name drawn from this pool. The built-in
//! pool can be replaced with a YAML file of the form:
//!
//! ```yaml
//! names:
//!   - Alice
//!   - Bob
//! ```

use std::path::Path;

use rand::Rng;
use serde::Deserialize;

use crate::app_config::AppConfig;
use crate::ConfigError;

const BUILTIN_NAMES: &[&str] = &[
    "Alejandro", "Beatriz", "Carlos", "Daniela", "Eduardo", "Fernanda", "Gabriel", "Helena",
    "Ignacio", "Julia", "Lucas", "Mariana", "Nicolas", "Olivia", "Pablo", "Rafaela", "Sebastian",
    "Teresa", "Valentina", "Ximena",
];

#[derive(Debug, Deserialize)]
struct NamesFile {
    names: Vec<String>,
}

/// Non-empty pool of reviewer display names.
#[derive(Debug, Clone)]
pub struct NamePool {
    names: Vec<String>,
}

impl NamePool {
    /// Builds a pool from `names`, trimming entries and dropping blank ones.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyNamePool`] if no usable name remains.
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_owned())
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            return Err(ConfigError::EmptyNamePool);
        }
        Ok(Self { names })
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self {
            names: BUILTIN_NAMES.iter().map(|n| (*n).to_owned()).collect(),
        }
    }

    /// Loads a pool from a YAML names file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed, or holds no
    /// usable names.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::NamesFileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Uses `config.names_path` when set, otherwise the built-in pool.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`NamePool::load`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        match &config.names_path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let file: NamesFile = serde_yaml::from_str(content)?;
        Self::new(file.names)
    }

    /// Picks a name uniformly at random. Repeats across calls are allowed.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.names[rng.random_range(0..self.names.len())]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false` for a constructed pool.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}
