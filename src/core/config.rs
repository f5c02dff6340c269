//! Application configuration management

use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Formatting options forwarded to the external renderer. Values are the
/// raw strings the renderer expects; they are not interpreted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingOptions {
    pub english_font: String,
    pub chinese_font: String,
    pub body_size: String,
    pub line_height: String,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            english_font: "'Garamond', 'Georgia', serif".to_string(),
            chinese_font: "'SimSun', '宋体', serif".to_string(),
            body_size: "12".to_string(),
            line_height: "1.8".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the external document renderer
    pub renderer_url: String,
    /// Template selector, forwarded opaquely
    pub template: String,
    /// Page break selector, forwarded opaquely when set
    pub page_break_mode: Option<String>,
    /// Whether full exports carry a table of contents
    pub include_toc: bool,
    pub formatting: FormattingOptions,
    /// Locally held credential for the AI assist services
    pub api_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            renderer_url: "http://127.0.0.1:5000".to_string(),
            template: "nctu".to_string(),
            page_break_mode: None,
            include_toc: false,
            formatting: FormattingOptions::default(),
            api_key: None,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "folio", "Folio")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific file, falling back to defaults
    /// when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Store the AI credential, trimmed. An empty key is rejected and the
    /// stored value left unchanged.
    pub fn set_api_key(&mut self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        self.api_key = Some(key.to_string());
        true
    }

    pub fn clear_api_key(&mut self) {
        self.api_key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_rejected() {
        let mut config = AppConfig::default();
        assert!(!config.set_api_key("   "));
        assert_eq!(config.api_key, None);

        assert!(config.set_api_key("  abc123  "));
        assert_eq!(config.api_key.as_deref(), Some("abc123"));

        config.clear_api_key();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.template = "academic".to_string();
        config.include_toc = true;
        config.page_break_mode = Some("blank".to_string());
        config.set_api_key("k123");
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.template, "academic");
        assert!(loaded.include_toc);
        assert_eq!(loaded.page_break_mode.as_deref(), Some("blank"));
        assert_eq!(loaded.api_key.as_deref(), Some("k123"));
        assert_eq!(loaded.formatting, config.formatting);
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded.template, "nctu");
        assert_eq!(loaded.api_key, None);
    }

    #[test]
    fn formatting_serializes_with_wire_names() {
        let value = serde_json::to_value(FormattingOptions::default()).unwrap();
        assert_eq!(value["bodySize"], "12");
        assert_eq!(value["lineHeight"], "1.8");
        assert!(value.get("englishFont").is_some());
        assert!(value.get("chineseFont").is_some());
    }
}
