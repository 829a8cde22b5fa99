use super::geometry::Rect;

/// Groups rectangles into rows by the y coordinate of their top edge.
///
/// A rect joins the first existing row whose *first* member's top edge is
/// less than `y_threshold` away, otherwise it starts a new row. Rows come out
/// in creation order, so with reading-ordered input the topmost row is first.
pub fn group_by_rows(rects: &[Rect], y_threshold: i32) -> Vec<Vec<Rect>> {
    let mut rows: Vec<Vec<Rect>> = Vec::new();

    for rect in rects {
        let row = rows
            .iter_mut()
            .find(|row| (rect.y - row[0].y).abs() < y_threshold);
        match row {
            Some(row) => row.push(*rect),
            None => rows.push(vec![*rect]),
        }
    }

    rows
}

/// Groups rectangles into rows and collapses each row to its bounding box.
pub fn row_bounds(rects: &[Rect], y_threshold: i32) -> Vec<Rect> {
    group_by_rows(rects, y_threshold)
        .iter()
        .filter_map(|row| Rect::enclosing(row))
        .collect()
}
