//! Pointer position to data entity.
//!
//! Every query answers `None` for "nothing here": negative or out-of-range
//! coordinates, gaps between bands, or an empty entity set.

use chrono::{DateTime, Utc};

use crate::plotting::rhythm::RhythmGrid;
use crate::plotting::scales::{BandScale, TimeScale};

/// Band under `y`, rejecting exact band boundaries.
pub fn row_at(rows: &BandScale, y: f64) -> Option<usize> {
    let bw = rows.bandwidth();
    if rows.is_empty() || bw <= 0.0 || y < 0.0 {
        return None;
    }
    let offset = y - rows.start();
    if offset < 0.0 {
        return None;
    }
    let f = offset.abs() / bw;
    let row = f.floor();
    if (0.5 - (row - f).abs()).abs() >= 0.5 {
        return None;
    }
    let row = row as usize;
    (row < rows.len()).then_some(row)
}

/// Position in `items` (ascending by `time_of`) closest in time to `target`.
///
/// Ties go to the earlier item. A target past the end picks the last one, so
/// the pointer just right of the final commit still matches it.
pub fn nearest_by_time<T>(
    items: &[T],
    target: DateTime<Utc>,
    time_of: impl Fn(&T) -> DateTime<Utc>,
) -> Option<usize> {
    if items.is_empty() {
        return None;
    }
    let idx = items.partition_point(|item| time_of(item) < target);
    if idx == 0 {
        return Some(0);
    }
    if idx >= items.len() {
        return Some(items.len() - 1);
    }
    let after = (time_of(&items[idx]) - target).num_milliseconds().abs();
    let before = (time_of(&items[idx - 1]) - target).num_milliseconds().abs();
    Some(if after < before { idx } else { idx - 1 })
}

/// Nearest item to the pointer's time, if it is drawn within `tolerance` pixels of `x`.
pub fn nearest_at_x<T>(
    time: &TimeScale,
    items: &[T],
    x: f64,
    tolerance: f64,
    time_of: impl Fn(&T) -> DateTime<Utc>,
) -> Option<usize> {
    let (r0, r1) = time.range();
    if x < r0 || x > r1 {
        return None;
    }
    let best = nearest_by_time(items, time.invert(x), &time_of)?;
    let drawn_at = time.apply(time_of(&items[best]));
    ((drawn_at - x).abs() <= tolerance).then_some(best)
}

/// Rhythm cell under the pointer, by row-major index.
pub fn rhythm_cell_at(grid: &RhythmGrid, x: f64, y: f64) -> Option<usize> {
    if x < 0.0 || y < 0.0 || grid.side <= 0.0 || grid.count == 0 {
        return None;
    }
    let row = (y / grid.side).floor() as usize;
    let col = (x / grid.side).floor() as usize;
    if col >= grid.per_row {
        return None;
    }
    let idx = row * grid.per_row + col;
    (idx < grid.count).then_some(idx)
}

/// Column of a horizontal band scale under `x`.
pub fn column_at(columns: &BandScale, x: f64) -> Option<usize> {
    let bw = columns.bandwidth();
    if columns.is_empty() || bw <= 0.0 || x < 0.0 {
        return None;
    }
    let offset = x - columns.start();
    if offset < 0.0 {
        return None;
    }
    let col = (offset / bw).floor() as usize;
    (col < columns.len()).then_some(col)
}

/// Whether a point lies inside the plotted `width` x `height` area.
pub fn in_bounds(x: f64, y: f64, width: f64, height: f64) -> bool {
    (0.0..=width).contains(&x) && (0.0..=height).contains(&y)
}
