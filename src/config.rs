//! Pipeline configuration.
//!
//! Loads tuning constants from a JSON file at startup. All thresholds assume
//! screenshots downscaled to `max_height`, so they need recalibrating if that
//! changes.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Inclusive HSV range used to isolate the leaderboard background.
///
/// Hue follows the 8-bit convention (0-180), saturation and value are 0-255.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    pub hue: [u8; 2],
    pub saturation: [u8; 2],
    pub value: [u8; 2],
    /// Number of 3x3 erosion passes applied to the mask
    pub erode_iterations: u8,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            hue: [160, 180],
            saturation: [40, 255],
            value: [40, 255],
            erode_iterations: 1,
        }
    }
}

/// How contour rectangles are merged before row grouping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionMode {
    /// Single greedy pass, first match wins. Misses transitive merges.
    #[default]
    Greedy,
    /// Repeats the greedy pass until the rectangle count stops shrinking.
    FixedPoint,
}

/// Complete pipeline configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Screenshots taller than this are downscaled before processing
    #[serde(default = "default_max_height")]
    pub max_height: u32,
    /// Optional width bound, applied together with `max_height`
    #[serde(default)]
    pub max_width: Option<u32>,
    #[serde(default)]
    pub mask: MaskConfig,
    /// Contours enclosing less area than this are treated as noise
    #[serde(default = "default_min_contour_area")]
    pub min_contour_area: f64,
    /// Max difference between top edges for two boxes to share a row
    #[serde(default = "default_row_y_threshold")]
    pub row_y_threshold: i32,
    /// Max horizontal gap between two boxes that still get fused
    #[serde(default = "default_fuse_x_gap")]
    pub fuse_x_gap: i32,
    #[serde(default)]
    pub fusion_mode: FusionMode,
    /// Cut points of the podium row, as fractions of its width
    #[serde(default = "default_podium_splits")]
    pub podium_splits: [f64; 2],
    /// Fraction of a regular row skipped on the left (rank badge and avatar)
    #[serde(default = "default_row_text_offset")]
    pub row_text_offset: f64,
    /// Read the podium only on the first image (every image in debug mode)
    #[serde(default = "default_podium_first_image_only")]
    pub podium_first_image_only: bool,
    /// Language hint passed to the recognizer
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,
    /// Explicit Tesseract executable, skipping the usual lookup
    #[serde(default)]
    pub tesseract_path: Option<String>,
}

fn default_max_height() -> u32 {
    1024
}

fn default_min_contour_area() -> f64 {
    800.0
}

fn default_row_y_threshold() -> i32 {
    10
}

fn default_fuse_x_gap() -> i32 {
    5
}

fn default_podium_splits() -> [f64; 2] {
    [0.30, 0.66]
}

fn default_row_text_offset() -> f64 {
    0.3
}

fn default_podium_first_image_only() -> bool {
    true
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_height: default_max_height(),
            max_width: None,
            mask: MaskConfig::default(),
            min_contour_area: default_min_contour_area(),
            row_y_threshold: default_row_y_threshold(),
            fuse_x_gap: default_fuse_x_gap(),
            fusion_mode: FusionMode::default(),
            podium_splits: default_podium_splits(),
            row_text_offset: default_row_text_offset(),
            podium_first_image_only: default_podium_first_image_only(),
            ocr_language: default_ocr_language(),
            tesseract_path: None,
        }
    }
}

/// Loads configuration.
///
/// An explicit path must exist and parse. Without one, `config.json` next to
/// the executable is tried and any problem with it falls back to defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<PipelineConfig> {
    if let Some(path) = explicit {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        crate::log(&format!("Config loaded from {}", path.display()));
        return Ok(config);
    }

    let config_path = crate::paths::get_default_config_path();
    crate::log(&format!("Looking for config at: {}", config_path.display()));

    if config_path.exists() {
        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log("Config loaded from config.json");
                    return Ok(config);
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse config.json: {}. Using defaults.",
                        e
                    ));
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read config.json: {}. Using defaults.",
                    e
                ));
            }
        }
    } else {
        crate::log("config.json not found. Using default config.");
    }

    Ok(PipelineConfig::default())
}
