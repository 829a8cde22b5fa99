//! Leaderboard segmentation.
//!
//! Turns a screenshot into one rectangle per leaderboard row:
//! - Downscaling to a bounded size
//! - HSV thresholding of the reddish row background
//! - Outer contour extraction and area filtering
//! - Fusing fragments split by icons, then grouping into rows
//! - Splitting the first row into the three podium slots

pub mod contours;
pub mod fuse;
pub mod geometry;
pub mod mask;
pub mod overlay;
pub mod podium;
pub mod prepare;
pub mod rows;

pub use geometry::Rect;
pub use podium::{row_text_region, split_podium, validate_podium};
pub use prepare::{crop_rect, downscale_image};

use image::{GrayImage, RgbImage};

use crate::config::PipelineConfig;
use fuse::FuseParams;

/// Result of segmenting one screenshot.
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Binary mask the rows were found in
    pub mask: GrayImage,
    /// One bounding rect per row, podium first
    pub rows: Vec<Rect>,
}

/// High-level function: prepared screenshot → leaderboard rows.
///
/// Expects an image already passed through [`downscale_image`], since the
/// area and distance thresholds are tuned for that size.
pub fn segment_leaderboard(img: &RgbImage, config: &PipelineConfig) -> Segmentation {
    let mask = mask::build_region_mask(img, &config.mask);

    let boxes = contours::extract_boxes(&mask, config.min_contour_area);
    let rects: Vec<Rect> = boxes.iter().map(|b| b.rect).collect();

    let params = FuseParams {
        y_threshold: config.row_y_threshold,
        x_gap: config.fuse_x_gap,
    };
    let fused = fuse::fuse(&rects, &params, config.fusion_mode);
    let rows = rows::row_bounds(&fused, config.row_y_threshold);

    crate::log(&format!(
        "Segmentation: {} contours, {} fused boxes, {} rows",
        rects.len(),
        fused.len(),
        rows.len()
    ));

    Segmentation { mask, rows }
}
