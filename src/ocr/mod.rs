pub mod engine;
pub mod setup;

pub use engine::{TesseractEngine, TextRecognizer};

use image::RgbImage;

use crate::vision::{crop_rect, Rect};

/// Crops each region and runs it through the recognizer.
///
/// Returns one token list per region, in region order. A region that falls
/// outside the image or that the recognizer fails on yields an empty list,
/// which the pairing step later drops.
pub fn recognize_regions<R: TextRecognizer + ?Sized>(
    recognizer: &R,
    img: &RgbImage,
    regions: &[Rect],
) -> Vec<Vec<String>> {
    regions
        .iter()
        .map(|region| {
            let Some(cropped) = crop_rect(img, region) else {
                crate::log(&format!("OCR: region {:?} is outside the image", region));
                return Vec::new();
            };
            match recognizer.recognize(&cropped) {
                Ok(tokens) => tokens,
                Err(e) => {
                    crate::log(&format!("OCR failed for region {:?}: {}", region, e));
                    Vec::new()
                }
            }
        })
        .collect()
}
