//! Engine configuration.
//!
//! Describes which repositories an engine starts with. The default layout is
//! the baseline `Config` (200), `Default` (100), `Runtime` (50) set. Layouts
//! can be loaded from TOML:
//!
//! ```toml
//! [[repositories]]
//! name = "Config"
//! priority = 200
//!
//! [[repositories]]
//! name = "Save"
//! priority = 150
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::repository::{
	CONFIG_PRIORITY, DEFAULT_PRIORITY, RUNTIME_PRIORITY, RepositoryName,
};


/// One repository in the starting layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
	pub name: String,
	pub priority: i32,
}

impl RepositoryConfig {
	pub fn new(name: impl Into<String>, priority: i32) -> Self {
		Self {
			name: name.into(),
			priority,
		}
	}
}

/// Starting layout of a [`TagValueEngine`](crate::TagValueEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
	#[serde(default)]
	pub repositories: Vec<RepositoryConfig>,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			repositories: vec![
				RepositoryConfig::new(RepositoryName::CONFIG, CONFIG_PRIORITY),
				RepositoryConfig::new(RepositoryName::DEFAULT, DEFAULT_PRIORITY),
				RepositoryConfig::new(RepositoryName::RUNTIME, RUNTIME_PRIORITY),
			],
		}
	}
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The configuration file could not be read.
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The TOML text could not be parsed.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A repository entry has an empty name.
	#[error("repository {index} has an empty name")]
	EmptyName { index: usize },

	/// Two repository entries share a name.
	#[error("duplicate repository name: {0}")]
	DuplicateName(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

impl EngineConfig {
	/// An empty layout: the engine starts without repositories.
	pub fn empty() -> Self {
		Self {
			repositories: Vec::new(),
		}
	}

	/// Parses and validates a TOML layout.
	pub fn from_toml_str(content: &str) -> Result<Self> {
		let config: EngineConfig = toml::from_str(content)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a TOML layout file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&content)
	}

	/// Checks that names are non-empty and unique.
	pub fn validate(&self) -> Result<()> {
		let mut seen = rustc_hash::FxHashSet::default();
		for (index, repository) in self.repositories.iter().enumerate() {
			let name = repository.name.trim();
			if name.is_empty() {
				return Err(ConfigError::EmptyName { index });
			}
			if !seen.insert(name) {
				tracing::warn!(domain = "tagval", repository = name, "duplicate repository in config");
				return Err(ConfigError::DuplicateName(name.to_string()));
			}
		}
		Ok(())
	}

	/// Adds a repository to the layout, builder style.
	pub fn with_repository(mut self, name: impl Into<String>, priority: i32) -> Self {
		self.repositories.push(RepositoryConfig::new(name, priority));
		self
	}
}
