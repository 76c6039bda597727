/// Player configuration
use crate::error::{AppError, Result};
use flow_api_client::{ApiConfig, ParseMode};
use flow_playback::{PlaybackConfig, PlaybackMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "flow.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlowConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_downloads")]
    pub downloads: DownloadSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_app_id")]
    pub app_id: String,

    #[serde(default = "default_permissions")]
    pub permissions: String,

    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    #[serde(default = "default_display")]
    pub display: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_revoke")]
    pub revoke: bool,

    #[serde(default = "default_oauth_url")]
    pub oauth_url: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub parse_mode: ParseMode,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_volume")]
    pub volume: u8,

    #[serde(default)]
    pub shuffle: bool,

    #[serde(default, rename = "loop")]
    pub loop_enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadSettings {
    #[serde(default = "default_download_directory")]
    pub directory: PathBuf,
}

impl FlowConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `flow.toml` is read if present.
    /// `FLOW_`-prefixed variables override both, with `__` between levels
    /// (e.g. `FLOW_PLAYBACK__VOLUME=40`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (prefixed with FLOW_)
        settings = settings.add_source(
            config::Environment::with_prefix("FLOW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.app_id.trim().is_empty() {
            return Err(AppError::Config(
                "Application id is required (set FLOW_API__APP_ID)".to_string(),
            ));
        }

        for (name, url) in [
            ("api.oauth_url", &self.api.oauth_url),
            ("api.base_url", &self.api.base_url),
            ("api.redirect_uri", &self.api.redirect_uri),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AppError::Config(format!(
                    "{} must start with http:// or https:// (got {:?})",
                    name, url
                )));
            }
        }

        if self.playback.volume > 100 {
            return Err(AppError::Config(format!(
                "playback.volume must be 0-100 (got {})",
                self.playback.volume
            )));
        }

        Ok(())
    }

    /// Settings handed to the API client
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            app_id: self.api.app_id.clone(),
            permissions: self.api.permissions.clone(),
            redirect_uri: self.api.redirect_uri.clone(),
            display: self.api.display.clone(),
            version: self.api.version.clone(),
            revoke: self.api.revoke,
            oauth_url: self.api.oauth_url.clone(),
            base_url: self.api.base_url.clone(),
            parse_mode: self.api.parse_mode,
            timeout_secs: self.api.timeout_secs,
        }
    }

    /// Initial session settings; the mode follows the toggle buttons
    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            volume: self.playback.volume,
            mode: PlaybackMode::from_toggles(self.playback.shuffle, self.playback.loop_enabled),
        }
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        app_id: default_app_id(),
        permissions: default_permissions(),
        redirect_uri: default_redirect_uri(),
        display: default_display(),
        version: default_version(),
        revoke: default_revoke(),
        oauth_url: default_oauth_url(),
        base_url: default_base_url(),
        parse_mode: ParseMode::default(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_app_id() -> String {
    "4809611".to_string()
}

fn default_permissions() -> String {
    "audio,offline".to_string()
}

fn default_redirect_uri() -> String {
    "https://oauth.vk.com/blank.html".to_string()
}

fn default_display() -> String {
    "page".to_string()
}

fn default_version() -> String {
    "5.28".to_string()
}

fn default_revoke() -> bool {
    true
}

fn default_oauth_url() -> String {
    "https://oauth.vk.com/authorize".to_string()
}

fn default_base_url() -> String {
    "https://api.vk.com/method".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        volume: default_volume(),
        shuffle: false,
        loop_enabled: false,
    }
}

fn default_volume() -> u8 {
    100
}

fn default_downloads() -> DownloadSettings {
    DownloadSettings {
        directory: default_download_directory(),
    }
}

fn default_download_directory() -> PathBuf {
    PathBuf::from("./downloads")
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            playback: default_playback(),
            downloads: default_downloads(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = FlowConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.app_id, "4809611");
        assert_eq!(config.api.parse_mode, ParseMode::Strict);
        assert_eq!(config.playback.volume, 100);
        assert_eq!(config.downloads.directory, PathBuf::from("./downloads"));
    }

    #[test]
    fn api_config_matches_client_defaults() {
        assert_eq!(FlowConfig::default().api_config(), ApiConfig::default());
    }

    #[test]
    fn playback_mode_follows_toggles() {
        let mut config = FlowConfig::default();
        assert_eq!(config.playback_config().mode, PlaybackMode::LoopAll);

        config.playback.shuffle = true;
        assert_eq!(config.playback_config().mode, PlaybackMode::Shuffle);

        config.playback.loop_enabled = true;
        assert_eq!(config.playback_config().mode, PlaybackMode::RepeatCurrent);
    }

    #[test]
    fn load_from_file_fills_missing_fields() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api]
parse_mode = "positional"
base_url = "http://localhost:9000/method"

[playback]
volume = 35
loop = true
"#
        )
        .unwrap();

        let config = FlowConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.api.parse_mode, ParseMode::Positional);
        assert_eq!(config.api.base_url, "http://localhost:9000/method");
        assert_eq!(config.api.app_id, "4809611");
        assert_eq!(config.playback.volume, 35);
        assert!(config.playback.loop_enabled);
        assert!(!config.playback.shuffle);
    }

    #[test]
    fn missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = FlowConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = FlowConfig::default();
        config.api.app_id = " ".into();
        assert!(config.validate().is_err());

        let mut config = FlowConfig::default();
        config.api.base_url = "ftp://example.com".into();
        assert!(config.validate().is_err());

        let mut config = FlowConfig::default();
        config.playback.volume = 101;
        assert!(config.validate().is_err());
    }
}
