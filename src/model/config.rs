use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::task::{DEFAULT_PROJECT, Importance};

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Kitty keyboard protocol: true = force on, false = force off, absent = detect terminal support.
    /// Needed for Ctrl+Shift shortcuts and Ctrl+Enter on most terminals.
    #[serde(default)]
    pub kitty_keyboard: Option<bool>,
    /// Hex overrides for the dark palette
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Hex overrides for the light palette
    #[serde(default)]
    pub light_colors: HashMap<String, String>,
    #[serde(default)]
    pub tag_colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            kitty_keyboard: None,
            colors: HashMap::new(),
            light_colors: HashMap::new(),
            tag_colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Initial importance in the creation form
    #[serde(default = "default_importance")]
    pub importance: Importance,
    /// Project given to new tasks
    #[serde(default = "default_project")]
    pub project: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            importance: default_importance(),
            project: default_project(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exports are written to (default: current directory)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter used when TASKLET_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_importance() -> Importance {
    Importance::Focus
}

fn default_project() -> String {
    DEFAULT_PROJECT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
