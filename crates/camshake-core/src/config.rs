use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::properties::Properties;

/// Environment variable naming a TOML file to load shake profiles from.
pub const CONFIG_ENV_VAR: &str = "CAMSHAKE_CONFIG";
/// Fallback location checked when the environment variable is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/camshake.toml";

/// Data-driven shake profiles: a default plus named presets.
///
/// ```toml
/// [default]
/// strength = 0.3
///
/// [presets.explosion]
/// strength = 1.2
/// duration = 1.0
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    pub default: Properties,
    pub presets: BTreeMap<String, Properties>,
}

impl ShakeConfig {
    /// Default profile plus a small set of ready-made presets.
    pub fn builtin() -> Self {
        let presets = BTreeMap::from([
            (
                "impact".to_string(),
                Properties::new(0.0, 0.15, 25.0, 0.25, 0.2, 0.7, 0.3),
            ),
            (
                "explosion".to_string(),
                Properties::new(90.0, 0.8, 18.0, 1.2, 0.6, 0.4, 0.8),
            ),
            (
                "rumble".to_string(),
                Properties::new(0.0, 0.05, 12.0, 2.5, 1.0, 0.9, 0.1),
            ),
        ]);
        Self {
            default: Properties::default(),
            presets,
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(ConfigError::Parse)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from `$CAMSHAKE_CONFIG`, then `config/camshake.toml`, falling
    /// back to [`ShakeConfig::builtin`].
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            match Self::from_file(&path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(%path, error = %e, "Ignoring shake config"),
            }
        }
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            match Self::from_file(DEFAULT_CONFIG_PATH) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = DEFAULT_CONFIG_PATH, error = %e, "Ignoring shake config");
                },
            }
        }
        Self::builtin()
    }

    /// The named preset, or the default profile when `name` is `None`.
    pub fn profile(&self, name: Option<&str>) -> Result<Properties, ConfigError> {
        match name {
            None => Ok(self.default),
            Some(name) => self
                .presets
                .get(name)
                .copied()
                .ok_or_else(|| ConfigError::UnknownPreset(name.to_string())),
        }
    }

    /// Log every out-of-range value in the default profile and presets.
    /// Returns the number of issues found.
    pub fn validate(&self) -> usize {
        let profiles = std::iter::once(("default", &self.default))
            .chain(self.presets.iter().map(|(n, p)| (n.as_str(), p)));
        let mut count = 0;
        for (name, props) in profiles {
            if let Err(issues) = props.validate() {
                for issue in issues {
                    tracing::warn!(profile = name, %issue, "Shake profile out of range");
                    count += 1;
                }
            }
        }
        count
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    UnknownPreset(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Parse(e) => write!(f, "invalid shake config: {e}"),
            Self::UnknownPreset(name) => write!(f, "no shake preset named '{name}'"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::UnknownPreset(_) => None,
        }
    }
}
