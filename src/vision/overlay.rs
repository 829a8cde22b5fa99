use anyhow::{Context, Result};
use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use std::path::{Path, PathBuf};

use super::geometry::Rect;

pub const PODIUM_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const ROW_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const LAST_ROW_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

/// Draws a rectangle outline two pixels thick.
pub fn draw_box(canvas: &mut RgbImage, rect: &Rect, color: Rgb<u8>) {
    for inset in 0..2 {
        let width = rect.width - 2 * inset;
        let height = rect.height - 2 * inset;
        if width <= 0 || height <= 0 {
            break;
        }
        let outline = imageproc::rect::Rect::at(rect.x + inset, rect.y + inset)
            .of_size(width as u32, height as u32);
        draw_hollow_rect_mut(canvas, outline, color);
    }
}

/// Writes the mask and the annotated screenshot for one image into `dir`.
///
/// Files are named `<stem>_mask.png` and `<stem>_debug.png`.
pub fn save_debug_images(
    dir: &Path,
    stem: &str,
    mask: &GrayImage,
    annotated: &RgbImage,
) -> Result<(PathBuf, PathBuf)> {
    let mask_path = dir.join(format!("{}_mask.png", stem));
    let debug_path = dir.join(format!("{}_debug.png", stem));

    mask.save(&mask_path)
        .with_context(|| format!("Failed to save mask: {}", mask_path.display()))?;
    annotated
        .save(&debug_path)
        .with_context(|| format!("Failed to save debug image: {}", debug_path.display()))?;

    Ok((mask_path, debug_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_draw_box_outline_only() {
        let mut canvas = RgbImage::new(20, 20);
        draw_box(&mut canvas, &Rect::new(2, 2, 10, 10), ROW_COLOR);

        assert_eq!(*canvas.get_pixel(2, 2), ROW_COLOR);
        assert_eq!(*canvas.get_pixel(3, 3), ROW_COLOR);
        assert_eq!(*canvas.get_pixel(11, 11), ROW_COLOR);
        assert_eq!(*canvas.get_pixel(6, 6), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_save_debug_images() {
        let dir = tempdir().unwrap();
        let mask = GrayImage::new(8, 8);
        let annotated = RgbImage::new(8, 8);

        let (mask_path, debug_path) =
            save_debug_images(dir.path(), "shot_01", &mask, &annotated).unwrap();

        assert!(mask_path.ends_with("shot_01_mask.png"));
        assert!(mask_path.exists());
        assert!(debug_path.exists());
    }
}
