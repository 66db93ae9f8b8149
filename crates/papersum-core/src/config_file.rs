use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api: Option<ApiSection>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub fps: Option<u32>,
}

impl ConfigFile {
    pub fn base_url(&self) -> Option<&str> {
        self.api.as_ref().and_then(|a| a.base_url.as_deref())
    }

    pub fn timeout_secs(&self) -> Option<u64> {
        self.api.as_ref().and_then(|a| a.timeout_secs)
    }

    pub fn theme(&self) -> Option<&str> {
        self.display.as_ref().and_then(|d| d.theme.as_deref())
    }

    pub fn fps(&self) -> Option<u32> {
        self.display.as_ref().and_then(|d| d.fps)
    }
}

/// Platform config directory path: `<config_dir>/papersum/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("papersum").join("config.toml"))
}

/// Load config by cascading CWD `.papersum.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".papersum.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        api: Some(ApiSection {
            base_url: overlay
                .api
                .as_ref()
                .and_then(|a| a.base_url.clone())
                .or_else(|| base.api.as_ref().and_then(|a| a.base_url.clone())),
            timeout_secs: overlay
                .api
                .as_ref()
                .and_then(|a| a.timeout_secs)
                .or_else(|| base.api.as_ref().and_then(|a| a.timeout_secs)),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
                .or_else(|| base.display.as_ref().and_then(|d| d.theme.clone())),
            fps: overlay
                .display
                .as_ref()
                .and_then(|d| d.fps)
                .or_else(|| base.display.as_ref().and_then(|d| d.fps)),
        }),
    }
}

/// Save the current config to the platform config directory.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf, String> {
    let path = config_path().ok_or_else(|| "Could not determine config directory".to_string())?;
    save_to_path(config, &path)?;
    Ok(path)
}

/// Save a config to an explicit path, creating parent directories.
pub fn save_to_path(config: &ConfigFile, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    let content =
        toml::to_string_pretty(config).map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))
}
