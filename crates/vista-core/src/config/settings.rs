use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::warn;
use vista_types::{GridFit, GridInset, GridLayout};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub shortcuts: ShortcutConfig,
}

impl Config {
    /// Load config from file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid JSON or
    /// holds out-of-range values.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("search.titleWeight", self.search.title_weight),
            ("search.subtitleWeight", self.search.subtitle_weight),
            ("search.keywordWeight", self.search.keyword_weight),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::Config(format!(
                    "{name} must be a non-negative number, got {weight}"
                )));
            }
        }
        if self.grid.columns == 0 {
            return Err(Error::Config("grid.columns must be at least 1".to_string()));
        }
        if !self.grid.aspect_ratio.is_finite() || self.grid.aspect_ratio <= 0.0 {
            return Err(Error::Config(format!(
                "grid.aspectRatio must be positive, got {}",
                self.grid.aspect_ratio
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    #[serde(default = "default_title_weight")]
    pub title_weight: f64,

    #[serde(default = "default_subtitle_weight")]
    pub subtitle_weight: f64,

    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,

    /// Debounce window for throttled search input
    #[serde(default = "default_throttle")]
    pub throttle_ms: u64,

    /// Order sections by their best match while a query is active
    #[serde(default = "default_true")]
    pub sort_sections: bool,
}

impl SearchConfig {
    #[must_use]
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

fn default_title_weight() -> f64 {
    1.0
}
fn default_subtitle_weight() -> f64 {
    0.6
}
fn default_keyword_weight() -> f64 {
    0.3
}
fn default_throttle() -> u64 {
    300
}
fn default_true() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            title_weight: default_title_weight(),
            subtitle_weight: default_subtitle_weight(),
            keyword_weight: default_keyword_weight(),
            throttle_ms: default_throttle(),
            sort_sections: true,
        }
    }
}

/// Document-level grid defaults, used when neither the grid nor its section sets a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    #[serde(default = "default_columns")]
    pub columns: u32,

    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f64,

    #[serde(default = "default_fit")]
    pub fit: String,

    #[serde(default = "default_inset")]
    pub inset: String,
}

impl GridConfig {
    /// Fully populated layout to inherit from.
    #[must_use]
    pub fn layout(&self) -> GridLayout {
        let fit = GridFit::from_wire(&self.fit).unwrap_or_else(|| {
            warn!("Unknown grid.fit '{}', using contain", self.fit);
            GridFit::Contain
        });
        let inset = GridInset::from_wire(&self.inset).unwrap_or_else(|| {
            warn!("Unknown grid.inset '{}', using none", self.inset);
            GridInset::None
        });
        GridLayout {
            columns: Some(self.columns),
            aspect_ratio: Some(self.aspect_ratio),
            fit: Some(fit),
            inset: Some(inset),
        }
    }
}

fn default_columns() -> u32 {
    6
}
fn default_aspect_ratio() -> f64 {
    1.0
}
fn default_fit() -> String {
    "contain".to_string()
}
fn default_inset() -> String {
    "none".to_string()
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            aspect_ratio: default_aspect_ratio(),
            fit: default_fit(),
            inset: default_inset(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutConfig {
    /// Chords reserved, in order, for the first actions of a view's panel
    #[serde(default = "default_action_shortcuts")]
    pub default_action_shortcuts: Vec<String>,

    /// Overrides for named shortcuts, e.g. `{"copy": "ctrl+c"}`
    #[serde(default)]
    pub named: HashMap<String, String>,
}

fn default_action_shortcuts() -> Vec<String> {
    vec!["enter".to_string(), "shift+enter".to_string()]
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            default_action_shortcuts: default_action_shortcuts(),
            named: HashMap::new(),
        }
    }
}
