use crate::config::FusionMode;

use super::geometry::Rect;

/// Thresholds for merging fragments of one leaderboard row.
#[derive(Clone, Copy, Debug)]
pub struct FuseParams {
    /// Top edges must differ by less than this
    pub y_threshold: i32,
    /// Horizontal spans may be apart by at most this
    pub x_gap: i32,
}

impl Default for FuseParams {
    fn default() -> Self {
        Self {
            y_threshold: 10,
            x_gap: 5,
        }
    }
}

fn should_fuse(a: &Rect, b: &Rect, params: &FuseParams) -> bool {
    (a.y - b.y).abs() < params.y_threshold
        && a.x <= b.right() + params.x_gap
        && b.x <= a.right() + params.x_gap
}

/// Merges rectangles that sit at about the same height and touch or overlap
/// horizontally. Icons and avatars often split a row's background into
/// several contours; this glues them back together.
///
/// Single greedy pass: each input rect is merged into the first fused rect it
/// matches, otherwise appended. A later rect that bridges two already fused
/// rects only joins the first of them.
pub fn fuse_rects(rects: &[Rect], params: &FuseParams) -> Vec<Rect> {
    let mut fused: Vec<Rect> = Vec::new();

    for rect in rects {
        match fused.iter_mut().find(|f| should_fuse(rect, f, params)) {
            Some(existing) => *existing = existing.union(rect),
            None => fused.push(*rect),
        }
    }

    fused
}

/// Repeats [`fuse_rects`] on its own output until nothing merges anymore,
/// closing the transitive gaps the single pass leaves behind.
pub fn fuse_rects_fixed_point(rects: &[Rect], params: &FuseParams) -> Vec<Rect> {
    let mut current = fuse_rects(rects, params);
    loop {
        let next = fuse_rects(&current, params);
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

/// Dispatches on the configured fusion mode.
pub fn fuse(rects: &[Rect], params: &FuseParams, mode: FusionMode) -> Vec<Rect> {
    match mode {
        FusionMode::Greedy => fuse_rects(rects, params),
        FusionMode::FixedPoint => fuse_rects_fixed_point(rects, params),
    }
}
