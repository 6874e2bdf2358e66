//! Viewer settings
//!
//! Persisted in LocalStorage on the web; read from an optional JSON file on
//! native.

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_INTERVAL_MS};
use crate::error::EngineError;
use crate::sim::Dimensions;

/// Viewer settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mirror length and separation at startup
    pub dimensions: Dimensions,
    /// Repaint interval
    pub interval_ms: u32,
    /// Start the loop right after initialization
    pub autoplay: bool,
    /// Canvas size in pixels
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            interval_ms: DEFAULT_INTERVAL_MS,
            autoplay: true,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "mirror_cavity_settings";

    /// Parse and validate settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Pretty JSON, the format `from_json` reads
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.dimensions.validate()?;
        if self.interval_ms == 0 {
            return Err(EngineError::InvalidInterval(self.interval_ms));
        }
        Ok(())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Cannot save settings: {e}"),
            }
        }
    }

    /// Load settings from a JSON file; `None` means defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: Option<&std::path::Path>) -> Result<Self, EngineError> {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
