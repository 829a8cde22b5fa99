use image::RgbImage;

use super::geometry::Rect;

/// Downscales an image to fit within `max_width` x `max_height`, keeping the
/// aspect ratio. Never upscales; with no bounds the image is returned as is.
///
/// Each output pixel is the average of the source area it covers, so the
/// flat leaderboard colours keep their hue right up to the row edges.
pub fn downscale_image(img: RgbImage, max_width: Option<u32>, max_height: Option<u32>) -> RgbImage {
    let (w, h) = img.dimensions();
    if (max_width.is_none() && max_height.is_none()) || w == 0 || h == 0 {
        return img;
    }

    let scale_w = max_width.map_or(f64::INFINITY, |mw| mw as f64 / w as f64);
    let scale_h = max_height.map_or(f64::INFINITY, |mh| mh as f64 / h as f64);
    let scale = scale_w.min(scale_h).min(1.0);
    if scale >= 1.0 {
        return img;
    }

    let new_w = ((w as f64 * scale) as u32).max(1);
    let new_h = ((h as f64 * scale) as u32).max(1);

    crate::log(&format!(
        "Downscaling {}x{} to {}x{} (scale {:.3})",
        w, h, new_w, new_h, scale
    ));

    image::imageops::thumbnail(&img, new_w, new_h)
}

/// Crops a pixel rect out of an image, clamped to the image bounds.
///
/// Returns `None` when the rect lies entirely outside the image.
pub fn crop_rect(img: &RgbImage, rect: &Rect) -> Option<RgbImage> {
    let (w, h) = img.dimensions();
    let (x, y, cw, ch) = rect.clamp_to(w, h)?;
    Some(image::imageops::crop_imm(img, x, y, cw, ch).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_downscale_keeps_aspect_ratio() {
        let img = RgbImage::new(1000, 2048);
        let out = downscale_image(img, None, Some(1024));
        assert_eq!(out.dimensions(), (500, 1024));
    }

    #[test]
    fn test_downscale_never_upscales() {
        let img = RgbImage::new(300, 600);
        let out = downscale_image(img, None, Some(1024));
        assert_eq!(out.dimensions(), (300, 600));
    }

    #[test]
    fn test_downscale_uses_tighter_bound() {
        let img = RgbImage::new(2000, 1000);
        let out = downscale_image(img, Some(500), Some(1000));
        assert_eq!(out.dimensions(), (500, 250));
    }

    #[test]
    fn test_downscale_averages_covered_area() {
        // Alternating black and grey columns average out to one flat grey
        let img = RgbImage::from_fn(4, 2, |x, _| {
            if x % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([200, 100, 50])
            }
        });

        let out = downscale_image(img, Some(2), None);

        assert_eq!(out.dimensions(), (2, 1));
        assert_eq!(out.get_pixel(0, 0), &Rgb([100, 50, 25]));
        assert_eq!(out.get_pixel(1, 0), &Rgb([100, 50, 25]));
    }

    #[test]
    fn test_downscale_keeps_flat_colour() {
        let img = RgbImage::from_pixel(400, 120, Rgb([200, 30, 80]));
        let out = downscale_image(img, Some(100), None);
        assert_eq!(out.dimensions(), (100, 30));
        assert!(out.pixels().all(|p| *p == Rgb([200, 30, 80])));
    }

    #[test]
    fn test_downscale_without_bounds() {
        let img = RgbImage::new(4000, 3000);
        let out = downscale_image(img, None, None);
        assert_eq!(out.dimensions(), (4000, 3000));
    }

    #[test]
    fn test_crop_rect() {
        let img = RgbImage::from_fn(100, 200, |x, y| Rgb([x as u8, y as u8, 0]));

        let cropped = crop_rect(&img, &Rect::new(10, 50, 50, 20)).unwrap();

        assert_eq!(cropped.dimensions(), (50, 20));
        assert_eq!(cropped.get_pixel(0, 0)[0], 10);
        assert_eq!(cropped.get_pixel(0, 0)[1], 50);
    }

    #[test]
    fn test_crop_rect_clamps() {
        let img = RgbImage::new(100, 100);
        let cropped = crop_rect(&img, &Rect::new(90, 90, 50, 50)).unwrap();
        assert_eq!(cropped.dimensions(), (10, 10));

        assert!(crop_rect(&img, &Rect::new(200, 0, 10, 10)).is_none());
    }
}
