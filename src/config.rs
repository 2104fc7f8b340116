// config.rs - Compiled-in viewer constants, optionally overridden from JSON
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};

pub const DEFAULT_FOV: f32 = 75.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 1000.0;
pub const DEFAULT_CAMERA_POSITION: [f32; 3] = [0.0, 0.0, 5.0];
pub const BACKGROUND_COLOR: u32 = 0x1a1a1a;
pub const ACCENT_COLOR: u32 = 0x6188ea;

/// Per-cycle rotation increments (radians)
pub const ROTATION_DELTA_X: f32 = 0.002;
pub const ROTATION_DELTA_Y: f32 = 0.005;

pub const NORMALIZED_SCALE: f32 = 2.0;
pub const NORMALIZED_POSITION: [f32; 3] = [0.0, -1.0, 0.0];
pub const FRAMING_PADDING: f32 = 1.5;

pub const DEFAULT_MODEL_PATH: &str = "assets/model.glb";
pub const DEFAULT_COUNTDOWN_TARGET: &str = "2025-09-05T00:00:00";
pub const COUNTDOWN_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: DEFAULT_FOV,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            position: DEFAULT_CAMERA_POSITION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub damping_factor: f32,
    pub auto_rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.05,
            auto_rotate_speed: 2.0,
            min_distance: 2.0,
            max_distance: 10.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    pub color: u32,
    pub intensity: f32,
    pub position: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub key: LightConfig,
    pub fill: LightConfig,
    pub rim: LightConfig,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: 0x404040,
            ambient_intensity: 0.6,
            key: LightConfig {
                color: 0xffffff,
                intensity: 0.8,
                position: [10.0, 10.0, 5.0],
            },
            fill: LightConfig {
                color: ACCENT_COLOR,
                intensity: 0.3,
                position: [-5.0, 5.0, -5.0],
            },
            rim: LightConfig {
                color: 0xffffff,
                intensity: 0.2,
                position: [0.0, -10.0, -5.0],
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiConfig {
    pub start_delay_ms: u64,
    pub repeat_interval_ms: u64,
    pub repeat_duration_ms: u64,
    pub repeat_base_count: u32,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 1000,
            repeat_interval_ms: 400,
            repeat_duration_ms: 3000,
            repeat_base_count: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub lighting: LightingConfig,
    pub background: u32,
    pub object_color: u32,
    pub rotation_delta: [f32; 2],
    pub auto_rotate: bool,
    pub normalized_scale: f32,
    pub normalized_position: [f32; 3],
    pub framing_padding: f32,
    pub model_path: PathBuf,
    pub loading_hide_delay_ms: u64,
    pub loading_fade_ms: u64,
    pub countdown_target: String,
    pub confetti: ConfettiConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
            lighting: LightingConfig::default(),
            background: BACKGROUND_COLOR,
            object_color: ACCENT_COLOR,
            rotation_delta: [ROTATION_DELTA_X, ROTATION_DELTA_Y],
            auto_rotate: true,
            normalized_scale: NORMALIZED_SCALE,
            normalized_position: NORMALIZED_POSITION,
            framing_padding: FRAMING_PADDING,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            loading_hide_delay_ms: 1000,
            loading_fade_ms: 300,
            countdown_target: DEFAULT_COUNTDOWN_TARGET.to_string(),
            confetti: ConfettiConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Read a JSON config; missing fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ViewerError::Config {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        Self::from_json(&text).map_err(|e| match e {
            ViewerError::Config { source, .. } => ViewerError::Config {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ViewerError::Config {
            path: PathBuf::new(),
            source: e.into(),
        })
    }

    /// Parsed countdown target
    pub fn countdown_target(&self) -> Result<chrono::NaiveDateTime> {
        chrono::NaiveDateTime::parse_from_str(&self.countdown_target, COUNTDOWN_FORMAT).map_err(
            |e| ViewerError::Config {
                path: PathBuf::from("countdown_target"),
                source: e.into(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = ViewerConfig::default();
        assert_eq!(config.camera.fov, 75.0);
        assert_eq!(config.camera.position, [0.0, 0.0, 5.0]);
        assert_eq!(config.rotation_delta, [0.002, 0.005]);
        assert_eq!(config.controls.damping_factor, 0.05);
        assert_eq!(config.lighting.fill.color, 0x6188ea);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{ "camera": { "fov": 60.0 }, "auto_rotate": false }"#)
            .unwrap();
        assert_eq!(config.camera.fov, 60.0);
        assert_eq!(config.camera.near, 0.1);
        assert!(!config.auto_rotate);
        assert_eq!(config.normalized_scale, NORMALIZED_SCALE);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = ViewerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ViewerError::Config { .. }));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = ViewerConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ViewerError::Config { .. }));
    }

    #[test]
    fn default_countdown_target_parses() {
        let target = ViewerConfig::default().countdown_target().unwrap();
        assert_eq!(target.to_string(), "2025-09-05 00:00:00");
    }
}
