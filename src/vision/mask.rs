use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::morphology::erode_mut;

use crate::config::MaskConfig;

/// Converts one RGB pixel to 8-bit HSV.
///
/// Hue is halved to fit a byte (0-179), saturation and value span 0-255.
/// Rounding is half-up, matching the usual 8-bit conversion tables.
pub fn rgb_to_hsv(pixel: &Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0.map(i32::from);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v == 0 {
        0
    } else {
        ((255 * diff) as f64 / v as f64 + 0.5).floor() as i32
    };

    let h = if diff == 0 {
        0
    } else {
        let numerator = if v == r {
            g - b
        } else if v == g {
            b - r + 2 * diff
        } else {
            r - g + 4 * diff
        };
        let h = ((30 * numerator) as f64 / diff as f64 + 0.5).floor() as i32;
        if h < 0 { h + 180 } else { h }
    };

    [h.min(180) as u8, s as u8, v as u8]
}

fn in_range(value: u8, range: [u8; 2]) -> bool {
    range[0] <= value && value <= range[1]
}

/// Builds a binary mask of the reddish leaderboard background.
///
/// Pixels whose HSV value falls inside every configured range become 255,
/// all others 0. The mask is then eroded with a 3x3 square to cut thin
/// bridges between neighbouring rows.
pub fn build_region_mask(img: &RgbImage, config: &MaskConfig) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut mask = GrayImage::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let [h, s, v] = rgb_to_hsv(pixel);
        let matched =
            in_range(h, config.hue) && in_range(s, config.saturation) && in_range(v, config.value);
        if matched {
            mask.put_pixel(x, y, Luma([255]));
        }
    }

    for _ in 0..config.erode_iterations {
        erode_mut(&mut mask, Norm::LInf, 1);
    }

    mask
}
