//! Dashboard settings.
//!
//! Built once in `main` and handed to the app; nothing mutates it afterwards.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming an optional JSON settings file.
pub const CONFIG_ENV: &str = "TOMATES_CONFIG";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Bin count for the diameter and weight histograms.
    pub histogram_bins: usize,
    /// Defect value that counts a tomato as defective.
    pub affirmative_defect: String,
    /// Suggested file name for filtered exports.
    pub export_file_name: String,
    /// Rows in the "smallest tomatoes" table.
    pub smallest_count: usize,
    /// Storage key of the light/dark preference.
    pub theme_key: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            histogram_bins: 10,
            affirmative_defect: "Sí".to_string(),
            export_file_name: "tomates_filtrado.csv".to_string(),
            smallest_count: 10,
            theme_key: "tomates_theme".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read settings from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Settings for this run: the file named by [`CONFIG_ENV`] if set and
    /// valid, otherwise the defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::from_file(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring settings file: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "histogram_bins": 20, "affirmative_defect": "yes" }}"#).unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.histogram_bins, 20);
        assert_eq!(config.affirmative_defect, "yes");
        assert_eq!(config.export_file_name, "tomates_filtrado.csv");
        assert_eq!(config.theme_key, "tomates_theme");
    }

    #[test]
    fn invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "histogram_bins = 20").unwrap();
        assert!(DashboardConfig::from_file(file.path()).is_err());
    }
}
