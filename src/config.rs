use bevy::prelude::Resource;
use serde::Deserialize;

use crate::error::FieldError;

const DEFAULT_CONFIG_JSON: &str = include_str!("../assets/field_config.json");

/// Everything tunable about a particle field, loaded once at startup
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Asset path of the source image, relative to `assets/`
    pub image_path: String,
    /// Show the field as soon as it is built
    pub auto_show: bool,
    pub sampling: SamplingConfig,
    pub touch: TouchConfig,
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
}

/// Which source pixels become particles
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Red channel must be strictly above this (0-255)
    pub threshold: u8,
    pub discard_dark: bool,
}

/// Touch trail and displacement bitmap settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    /// Side length of the square displacement bitmap
    pub size: usize,
    /// Ticks a touch point survives
    pub max_age: u32,
    /// Brush radius as a fraction of `size`
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub show_duration: f32,
    pub hide_duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    /// Distance from the camera to the field plane
    pub distance: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            image_path: "images/sample.png".to_string(),
            auto_show: true,
            sampling: SamplingConfig::default(),
            touch: TouchConfig::default(),
            animation: AnimationConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            threshold: 34,
            discard_dark: true,
        }
    }
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            size: 64,
            max_age: 120,
            radius: 0.15,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            show_duration: 1.0,
            hide_duration: 0.8,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 50.0,
            distance: 300.0,
        }
    }
}

impl FieldConfig {
    /// Parse the configuration embedded in the binary
    pub fn load() -> Result<Self, FieldError> {
        Self::from_json(DEFAULT_CONFIG_JSON)
    }

    /// Parse a JSON document; missing keys fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace the image path when one was given on the command line
    pub fn with_image_override(mut self, path: Option<String>) -> Self {
        if let Some(path) = path {
            self.image_path = path;
        }
        self
    }
}
