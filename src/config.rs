use crate::model::ui::Theme;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted client preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Theme,

    /// File the config was loaded from and is saved back to
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".lead-dash"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Config {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    /// Load from `path`; a missing or unreadable file yields defaults bound to `path`
    pub fn load_from(path: &Path) -> Config {
        let mut config = fs::read_to_string(path)
            .ok()
            .and_then(|contents| serde_json::from_str::<Config>(&contents).ok())
            .unwrap_or_default();
        config.path = Some(path.to_path_buf());
        config
    }

    /// Save the config to the file it was loaded from
    pub fn save(&self) -> anyhow::Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Directory CSV exports are written to
    pub fn export_dir(&self) -> PathBuf {
        self.path
            .as_ref()
            .and_then(|p| p.parent())
            .map(Path::to_path_buf)
            .unwrap_or_else(env::temp_dir)
            .join("exports")
    }
}
