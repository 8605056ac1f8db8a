use serde::{Deserialize, Serialize};
use std::fs;

/// Logging/app configuration. Loaded from an optional YAML file; a missing
/// file falls back to defaults so the binary works out of the box.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "logs".to_string(),
            log_file: "ikbench.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(config_path: &str) -> Self {
        match fs::read_to_string(config_path) {
            Ok(content) => serde_yaml::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse config yaml {}: {}", config_path, e)),
            Err(_) => Self::default(),
        }
    }
}
