//! Tracker configuration
//!
//! Loaded from the `[tracker]` table of a TOML file, or built in code.
//!
//! ```
//! use tagdelta_core::config::{Bootstrap, TrackerConfig};
//!
//! let config = TrackerConfig::from_toml_str("[tracker]\nbootstrap = \"baseline\"\n")?;
//! assert_eq!(config.bootstrap, Bootstrap::Baseline);
//! # Ok::<(), tagdelta_core::DeltaError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// What the first observed snapshot means
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bootstrap {
    /// Announce every association of the first snapshot as added
    #[default]
    AnnounceAll,
    /// Retain the first snapshot silently; only later changes are announced
    Baseline,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    pub bootstrap: Bootstrap,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    tracker: TrackerConfig,
}

impl TrackerConfig {
    pub fn with_bootstrap(mut self, bootstrap: Bootstrap) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    /// Parse configuration from TOML text
    ///
    /// A missing `[tracker]` table or missing keys fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for malformed TOML, unknown keys or unknown
    /// bootstrap values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        Ok(file.tracker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DeltaError;

    #[test]
    fn test_defaults() {
        assert_eq!(TrackerConfig::default().bootstrap, Bootstrap::AnnounceAll);
        assert_eq!(
            TrackerConfig::from_toml_str("").unwrap(),
            TrackerConfig::default()
        );
        assert_eq!(
            TrackerConfig::from_toml_str("[tracker]\n").unwrap(),
            TrackerConfig::default()
        );
    }

    #[test]
    fn test_announce_all_spelling() {
        let config = TrackerConfig::from_toml_str("[tracker]\nbootstrap = \"announce_all\"").unwrap();
        assert_eq!(config.bootstrap, Bootstrap::AnnounceAll);
    }

    #[test]
    fn test_unknown_bootstrap_rejected() {
        let err = TrackerConfig::from_toml_str("[tracker]\nbootstrap = \"replay\"").unwrap_err();
        assert!(matches!(err, DeltaError::InvalidConfig { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = TrackerConfig::from_toml_str("[tracker]\nbootstarp = \"baseline\"").unwrap_err();
        assert!(matches!(err, DeltaError::InvalidConfig { .. }));

        let err = TrackerConfig::from_toml_str("[tracer]\n").unwrap_err();
        assert!(matches!(err, DeltaError::InvalidConfig { .. }));
    }
}
