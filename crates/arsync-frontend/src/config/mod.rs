//! Application configuration module
//!
//! Tracking, renderer and asset settings, stored as RON.

mod manager;

pub use manager::{ConfigError, ConfigManager};

use std::path::PathBuf;

use arsync_core::TrackingConfig;
use arsync_renderer::RendererConfig;
use serde::{Deserialize, Serialize};

fn default_model_path() -> PathBuf {
    PathBuf::from("frame.glb")
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    /// Tracking provider settings
    #[serde(default)]
    pub tracking: TrackingConfig,
    /// Renderer settings
    #[serde(default)]
    pub renderer: RendererConfig,
    /// glTF model shown on detection
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// Session script replayed by the scripted provider
    #[serde(default)]
    pub session_path: Option<PathBuf>,
    /// Finish loading the model before subscribing to tracking events
    #[serde(default)]
    pub preload_model: bool,
}

impl AppConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 0,
            tracking: TrackingConfig::default(),
            renderer: RendererConfig::default(),
            model_path: default_model_path(),
            session_path: None,
            preload_model: false,
        }
    }
}
