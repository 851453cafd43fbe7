use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User configuration (stored in ~/.config/taskboard/config.toml)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Log filter used when TASKBOARD_LOG is not set (e.g. "info", "taskboard=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// UI theme/colors
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            theme: ThemeConfig::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Theme configuration with hex colors
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemeConfig {
    /// Border color of the focused column (hex, e.g. "#5f5fd7")
    #[serde(default = "default_color_focused")]
    pub color_focused: String,

    /// Column header color (hex, e.g. "#a0d2fa")
    #[serde(default = "default_color_normal")]
    pub color_normal: String,

    /// Help text and inactive form fields (hex, e.g. "#626262")
    #[serde(default = "default_color_dimmed")]
    pub color_dimmed: String,

    /// Task titles (hex, e.g. "#f2ece6")
    #[serde(default = "default_color_text")]
    pub color_text: String,

    /// Task descriptions (hex, e.g. "#9c9991")
    #[serde(default = "default_color_description")]
    pub color_description: String,

    /// Highlighted row in the focused column (hex, e.g. "#ee6ff8")
    #[serde(default = "default_color_selected")]
    pub color_selected: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            color_focused: default_color_focused(),
            color_normal: default_color_normal(),
            color_dimmed: default_color_dimmed(),
            color_text: default_color_text(),
            color_description: default_color_description(),
            color_selected: default_color_selected(),
        }
    }
}

fn default_color_focused() -> String {
    "#5f5fd7".to_string() // xterm 62
}

fn default_color_normal() -> String {
    "#a0d2fa".to_string() // Light Blue Gray
}

fn default_color_dimmed() -> String {
    "#626262".to_string() // xterm 241
}

fn default_color_text() -> String {
    "#f2ece6".to_string()
}

fn default_color_description() -> String {
    "#9c9991".to_string()
}

fn default_color_selected() -> String {
    "#ee6ff8".to_string() // Magenta
}

impl ThemeConfig {
    /// Parse a hex color string to RGB tuple
    pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults
    /// when the file does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            toml::from_str(&content).context("Failed to parse config")
        } else {
            Ok(Self::default())
        }
    }

    /// Get the path to the config file
    /// Always uses ~/.config/taskboard/ on all platforms
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("Could not determine home directory")?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskboard")
            .join("config.toml"))
    }

    /// Get the path to the data directory (log files)
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "taskboard")
            .context("Could not determine data directory")?;
        Ok(dirs.data_dir().to_path_buf())
    }
}
