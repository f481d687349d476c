//! Configuration persistence
//!
//! Stores user preferences in `~/.config/ng-emmet/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::host::IndentOptions;
use crate::scanner::MatchPolicy;

/// Settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Width of one indentation level
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Indent with spaces instead of tabs
    #[serde(default = "default_insert_spaces")]
    pub insert_spaces: bool,

    /// Language id whose documents are expanded on change (e.g. "typescript")
    #[serde(default = "default_language")]
    pub language: String,

    /// Tie-break when several delimiters share a line
    #[serde(default)]
    pub match_policy: MatchPolicy,
}

fn default_tab_size() -> usize {
    4
}

fn default_insert_spaces() -> bool {
    true
}

fn default_language() -> String {
    "typescript".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            insert_spaces: default_insert_spaces(),
            language: default_language(),
            match_policy: MatchPolicy::default(),
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<EditorConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Indentation settings derived from this config
    pub fn indent(&self) -> IndentOptions {
        IndentOptions {
            width: self.tab_size,
            use_spaces: self.insert_spaces,
        }
    }

    fn sanitized(mut self) -> Self {
        if self.tab_size == 0 {
            tracing::warn!("tab_size 0 is not usable, using {}", default_tab_size());
            self.tab_size = default_tab_size();
        }
        self
    }
}
