use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};

use super::geometry::{polygon_area, Rect};

/// An outer contour reduced to what the pipeline needs downstream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContourBox {
    pub area: f64,
    pub rect: Rect,
}

/// Finds the outermost contours of a binary mask and returns their bounding
/// boxes in reading order (top to bottom, then left to right).
///
/// Holes and anything nested inside another blob are ignored. Contours
/// enclosing less than `min_area` pixels are dropped. The reading order is
/// what puts the podium first, so callers rely on it.
pub fn extract_boxes(mask: &GrayImage, min_area: f64) -> Vec<ContourBox> {
    let mut boxes: Vec<ContourBox> = find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(|c| {
            let area = polygon_area(&c.points);
            if area < min_area {
                return None;
            }
            Rect::bounding(&c.points).map(|rect| ContourBox { area, rect })
        })
        .collect();

    // Largest first, then a stable re-sort into reading order so equal
    // positions keep the size ranking.
    boxes.sort_by(|a, b| b.area.total_cmp(&a.area));
    boxes.sort_by_key(|b| (b.rect.y, b.rect.x));

    boxes
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn fill(mask: &mut GrayImage, rect: Rect) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                mask.put_pixel(x as u32, y as u32, Luma([255]));
            }
        }
    }

    #[test]
    fn test_boxes_in_reading_order() {
        let mut mask = GrayImage::new(200, 200);
        fill(&mut mask, Rect::new(100, 120, 60, 40));
        fill(&mut mask, Rect::new(10, 120, 60, 40));
        fill(&mut mask, Rect::new(10, 10, 180, 80));

        let boxes = extract_boxes(&mask, 800.0);
        let rects: Vec<Rect> = boxes.iter().map(|b| b.rect).collect();

        assert_eq!(
            rects,
            vec![
                Rect::new(10, 10, 180, 80),
                Rect::new(10, 120, 60, 40),
                Rect::new(100, 120, 60, 40),
            ]
        );
        // Traced through pixel centres: (w - 1) * (h - 1)
        assert_eq!(boxes[0].area, 179.0 * 79.0);
    }

    #[test]
    fn test_small_contours_filtered() {
        let mut mask = GrayImage::new(100, 100);
        fill(&mut mask, Rect::new(5, 5, 20, 20));
        fill(&mut mask, Rect::new(5, 40, 50, 30));

        let boxes = extract_boxes(&mask, 800.0);

        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].rect, Rect::new(5, 40, 50, 30));
    }

    #[test]
    fn test_area_threshold_is_inclusive() {
        let mut mask = GrayImage::new(100, 100);
        // 41x21 block traces an area of 40 * 20 = 800
        fill(&mut mask, Rect::new(5, 5, 41, 21));

        let boxes = extract_boxes(&mask, 800.0);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].area, 800.0);

        assert!(extract_boxes(&mask, 800.5).is_empty());
    }

    #[test]
    fn test_holes_and_nested_blobs_ignored() {
        let mut mask = GrayImage::new(120, 120);
        fill(&mut mask, Rect::new(10, 10, 100, 100));
        // Punch a hole and put an island back inside it
        for y in 30..90 {
            for x in 30..90 {
                mask.put_pixel(x, y, Luma([0]));
            }
        }
        fill(&mut mask, Rect::new(45, 45, 30, 30));

        let boxes = extract_boxes(&mask, 100.0);

        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].rect, Rect::new(10, 10, 100, 100));
    }

    #[test]
    fn test_empty_mask() {
        let mask = GrayImage::new(50, 50);
        assert!(extract_boxes(&mask, 800.0).is_empty());
    }
}
