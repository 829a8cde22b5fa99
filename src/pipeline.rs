//! Pipeline driver.
//!
//! Processes every screenshot in a directory one after another and collects
//! the scores into a [`Leaderboard`]. Each image runs through segmentation,
//! OCR and score parsing before the next one starts.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::ocr::{recognize_regions, TextRecognizer};
use crate::scores::{parse_regions, Leaderboard, NameCorrection, ScoreEntry};
use crate::vision::overlay::{self, LAST_ROW_COLOR, PODIUM_COLOR, ROW_COLOR};
use crate::vision::{
    downscale_image, row_text_region, segment_leaderboard, split_podium, validate_podium, Rect,
};

/// What happened to one screenshot.
#[derive(Debug, Clone)]
pub struct ImageReport {
    /// Regions sent to OCR
    pub regions: usize,
    /// Whether the podium slots were among them
    pub podium_read: bool,
    /// Corrected entries, in the order they were read
    pub entries: Vec<ScoreEntry>,
}

/// Totals for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub images_found: usize,
    pub images_processed: usize,
    pub images_skipped: usize,
    /// Regions sent to OCR across all processed images
    pub regions_read: usize,
}

/// Lists the image files in `dir`, sorted by file name.
///
/// Subdirectories and files without a known image extension are skipped.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut images = Vec::new();
    for entry in entries {
        let path = entry.context("Failed to read directory entry")?.path();
        if !path.is_file() {
            continue;
        }
        if image::ImageFormat::from_path(&path).is_err() {
            crate::log(&format!("Skipping non-image file: {}", path.display()));
            continue;
        }
        images.push(path);
    }

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

pub struct Pipeline<'a, R: TextRecognizer + ?Sized> {
    config: &'a PipelineConfig,
    recognizer: &'a R,
    names: &'a NameCorrection,
    /// Where mask and overlay images go; `None` disables debug output
    debug_dir: Option<PathBuf>,
}

impl<'a, R: TextRecognizer + ?Sized> Pipeline<'a, R> {
    pub fn new(config: &'a PipelineConfig, recognizer: &'a R, names: &'a NameCorrection) -> Self {
        Self {
            config,
            recognizer,
            names,
            debug_dir: None,
        }
    }

    /// Enables debug mode: per-image score dumps, the podium on every image,
    /// and mask/overlay images written to `dir`.
    pub fn with_debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug_dir = Some(dir.into());
        self
    }

    fn debug(&self) -> bool {
        self.debug_dir.is_some()
    }

    /// Processes every image in `input_dir` into `board`.
    ///
    /// An image that can't be decoded or segmented is logged and skipped;
    /// the run carries on with the next one.
    pub fn run(&self, input_dir: &Path, board: &mut Leaderboard) -> Result<RunSummary> {
        let images = list_images(input_dir)?;
        crate::log(&format!(
            "Found {} images in {}",
            images.len(),
            input_dir.display()
        ));

        let mut summary = RunSummary {
            images_found: images.len(),
            ..RunSummary::default()
        };
        let mut podium_done = false;

        for path in &images {
            let read_podium = !self.config.podium_first_image_only || self.debug() || !podium_done;

            match self.process_image(path, read_podium) {
                Ok(report) => {
                    podium_done |= report.podium_read;
                    board.extend(&report.entries);
                    summary.images_processed += 1;
                    summary.regions_read += report.regions;
                }
                Err(e) => {
                    crate::log(&format!("Skipping {}: {:#}", path.display(), e));
                    summary.images_skipped += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Runs one screenshot through the whole pipeline.
    pub fn process_image(&self, path: &Path, read_podium: bool) -> Result<ImageReport> {
        crate::log(&format!("Processing {}", path.display()));

        let img = image::open(path)
            .with_context(|| format!("Failed to decode image: {}", path.display()))?
            .to_rgb8();
        let img = downscale_image(img, self.config.max_width, Some(self.config.max_height));

        let segmentation = segment_leaderboard(&img, self.config);
        validate_podium(&segmentation.rows)?;
        let (podium, rows) = segmentation
            .rows
            .split_first()
            .ok_or_else(|| anyhow!("No leaderboard rows detected"))?;

        let podium_regions: Vec<Rect> = if read_podium {
            split_podium(podium, self.config.podium_splits).to_vec()
        } else {
            Vec::new()
        };
        let row_regions: Vec<Rect> = rows
            .iter()
            .map(|row| row_text_region(row, self.config.row_text_offset))
            .collect();

        let regions: Vec<Rect> = podium_regions
            .iter()
            .chain(row_regions.iter())
            .copied()
            .collect();
        let tokens = recognize_regions(self.recognizer, &img, &regions);
        let entries = parse_regions(&tokens, self.names);

        if let Some(dir) = &self.debug_dir {
            for entry in &entries {
                crate::log(&format!("{} — {}", entry.name, entry.score));
            }
            crate::log(&format!("Total hits recorded: {}", entries.len()));

            let mut annotated = img.clone();
            for region in &podium_regions {
                overlay::draw_box(&mut annotated, region, PODIUM_COLOR);
            }
            for (i, region) in row_regions.iter().enumerate() {
                let color = if i + 1 == row_regions.len() {
                    LAST_ROW_COLOR
                } else {
                    ROW_COLOR
                };
                overlay::draw_box(&mut annotated, region, color);
            }

            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            if let Err(e) = overlay::save_debug_images(dir, &stem, &segmentation.mask, &annotated)
            {
                crate::log(&format!("Failed to save debug images for {}: {}", stem, e));
            }
        }

        crate::log(&format!(
            "{}: {} regions, {} scores",
            path.display(),
            regions.len(),
            entries.len()
        ));

        Ok(ImageReport {
            regions: regions.len(),
            podium_read: read_podium,
            entries,
        })
    }
}
