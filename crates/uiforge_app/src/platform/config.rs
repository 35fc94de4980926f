use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use serde::{Deserialize, Serialize};
use uiforge_engine::BackendSettings;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "uiforge.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub output_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let backend = BackendSettings::default();
        Self {
            backend_url: backend.base_url,
            output_dir: PathBuf::from("./output"),
            connect_timeout_secs: backend.connect_timeout.as_secs(),
            max_response_bytes: backend.max_response_bytes,
            log_destination: LogDestination::File,
        }
    }
}

impl AppConfig {
    /// Reads `path`, falling back to defaults when it is missing or broken.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Self::default();
            }
            Err(err) => {
                engine_warn!("Failed to read config from {:?}: {}", path, err);
                return Self::default();
            }
        };

        match ron::from_str(&content) {
            Ok(config) => {
                engine_info!("Loaded config from {:?}", path);
                config
            }
            Err(err) => {
                engine_warn!("Failed to parse config from {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            base_url: self.backend_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            max_response_bytes: self.max_response_bytes,
        }
    }

    /// The component stylesheet as served by the backend.
    pub fn stylesheet_href(&self) -> String {
        format!(
            "{}{}",
            self.backend_url.trim_end_matches('/'),
            uiforge_engine::COMPONENT_STYLESHEET
        )
    }
}
