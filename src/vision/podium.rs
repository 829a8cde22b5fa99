//! The podium is the first leaderboard row: three players side by side with
//! first place in the middle, second on the left and third on the right.

use anyhow::{anyhow, ensure, Result};

use super::geometry::Rect;

/// Cut point `fraction` of the way across `rect`, truncated to a pixel.
fn cut_at(rect: &Rect, fraction: f64) -> i32 {
    (rect.x as f64 + rect.width as f64 * fraction) as i32
}

/// Splits the podium row into its three player slots.
///
/// `splits` are the two interior cut points as fractions of the width
/// (default 30% and 66%). The result is ordered by rank, not position:
/// `[first (middle), second (left), third (right)]`.
pub fn split_podium(podium: &Rect, splits: [f64; 2]) -> [Rect; 3] {
    let first_cut = cut_at(podium, splits[0]);
    let second_cut = cut_at(podium, splits[1]);
    let (y1, y2) = (podium.y, podium.bottom());

    [
        Rect::from_corners(first_cut, y1, second_cut, y2),
        Rect::from_corners(podium.x, y1, first_cut, y2),
        Rect::from_corners(second_cut, y1, podium.right(), y2),
    ]
}

/// Region of a regular row that holds the name and score, skipping the rank
/// badge and avatar on the left.
pub fn row_text_region(row: &Rect, offset: f64) -> Rect {
    Rect::from_corners(cut_at(row, offset), row.y, row.right(), row.bottom())
}

/// Checks that the first row can be treated as the podium.
///
/// Row order comes from contour reading order, so row 0 must exist and no
/// other row may start above it.
pub fn validate_podium(rows: &[Rect]) -> Result<()> {
    let (podium, rest) = rows
        .split_first()
        .ok_or_else(|| anyhow!("No leaderboard rows detected"))?;
    ensure!(
        rest.iter().all(|r| r.y >= podium.y),
        "First row at y={} is not the topmost row",
        podium.y
    );
    Ok(())
}
