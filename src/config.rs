//! Configuration handling for the demo

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default log filter when neither `RUST_LOG` nor the config file sets one
pub const DEFAULT_LOG_FILTER: &str = "typed_form_tui=info";

/// User configuration for the demo
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DemoConfig {
    /// Number of grid columns
    pub grid_columns: Option<u16>,
    /// Height of one grid row in terminal rows
    pub row_height: Option<u16>,
    /// Gap between tiles in terminal cells
    pub gutter: Option<u16>,
    /// Show the console panel next to the card
    pub show_console: Option<bool>,
    /// `tracing` filter directive
    pub log_filter: Option<String>,
}

impl DemoConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "typed-form", "typed-form-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: DemoConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn grid_columns(&self) -> u16 {
        self.grid_columns.unwrap_or(2).max(1)
    }

    pub fn row_height(&self) -> u16 {
        self.row_height.unwrap_or(4).max(1)
    }

    pub fn gutter(&self) -> u16 {
        self.gutter.unwrap_or(1)
    }

    pub fn show_console(&self) -> bool {
        self.show_console.unwrap_or(true)
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
