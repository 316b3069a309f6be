//! Render settings.
//!
//! Image size and ambient level, with defaults matching a small preview
//! render. Settings can be read from a JSON file of the form:
//!
//! ```json
//! { "image": { "width": 400, "height": 300 }, "scene": { "ambient": 0.1 } }
//! ```
//!
//! Missing sections or fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 300;
pub const DEFAULT_AMBIENT: f64 = 0.1;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Parameters of a single render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SettingsFile", into = "SettingsFile")]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,

    /// Fraction of the surface color applied regardless of lighting
    pub ambient: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            ambient: DEFAULT_AMBIENT,
        }
    }
}

impl RenderSettings {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_ambient(mut self, ambient: f64) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reject zero-sized images.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Parse and validate settings from JSON text.
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        let settings: RenderSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> SettingsResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading render settings: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// On-disk layout of the settings file.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
struct SettingsFile {
    image: ImageSection,
    scene: SceneSection,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct ImageSection {
    width: u32,
    height: u32,
}

impl Default for ImageSection {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct SceneSection {
    ambient: f64,
}

impl Default for SceneSection {
    fn default() -> Self {
        Self {
            ambient: DEFAULT_AMBIENT,
        }
    }
}

impl From<SettingsFile> for RenderSettings {
    fn from(file: SettingsFile) -> Self {
        Self {
            width: file.image.width,
            height: file.image.height,
            ambient: file.scene.ambient,
        }
    }
}

impl From<RenderSettings> for SettingsFile {
    fn from(settings: RenderSettings) -> Self {
        Self {
            image: ImageSection {
                width: settings.width,
                height: settings.height,
            },
            scene: SceneSection {
                ambient: settings.ambient,
            },
        }
    }
}
