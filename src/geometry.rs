//! Rectangle math over sparse cell collections.
//!
//! Every function returns a fresh map; nothing here keeps a reference into
//! the caller's data.

use crate::{CellMap, Coord};

/// An axis-aligned rectangle, `[x, x + width) × [y, y + height)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, cell: Coord) -> bool {
        let (dx, dy) = (
            cell.x as i64 - self.x as i64,
            cell.y as i64 - self.y as i64,
        );
        (0..self.width as i64).contains(&dx) && (0..self.height as i64).contains(&dy)
    }
}

/// Tightest rectangle containing all `cells`; `(0, 0, 0, 0)` when empty.
///
/// A side spanning the whole `i32` range saturates at `u32::MAX`.
pub fn bounding_rect<I>(cells: I) -> Rect
where
    I: IntoIterator<Item = Coord>,
{
    let mut cells = cells.into_iter();
    let Some(first) = cells.next() else {
        return Rect::default();
    };

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for cell in cells {
        min_x = min_x.min(cell.x);
        min_y = min_y.min(cell.y);
        max_x = max_x.max(cell.x);
        max_y = max_y.max(cell.y);
    }

    Rect {
        x: min_x,
        y: min_y,
        width: max_x.abs_diff(min_x).saturating_add(1),
        height: max_y.abs_diff(min_y).saturating_add(1),
    }
}

/// Per-axis minimum of `cells`. The result need not be one of the cells.
pub fn top_left<I>(cells: I) -> Coord
where
    I: IntoIterator<Item = Coord>,
{
    let rect = bounding_rect(cells);
    Coord::new(rect.x, rect.y)
}

pub fn select_within(cells: &CellMap, rect: Rect) -> CellMap {
    cells
        .iter()
        .filter(|(&cell, _)| rect.contains(cell))
        .map(|(&cell, &state)| (cell, state))
        .collect()
}

/// Cells lying in at least one of the two rectangles.
pub fn select_within_either(cells: &CellMap, a: Rect, b: Rect) -> CellMap {
    cells
        .iter()
        .filter(|(&cell, _)| a.contains(cell) || b.contains(cell))
        .map(|(&cell, &state)| (cell, state))
        .collect()
}

/// Translates the alive cells so that their top-left corner lands on the
/// origin. Zero-state entries are dropped.
pub fn align_to_origin(cells: &CellMap) -> CellMap {
    let alive = || cells.iter().filter(|(_, &state)| state != 0);
    let corner = top_left(alive().map(|(&cell, _)| cell));
    let (dx, dy) = (corner.x.wrapping_neg(), corner.y.wrapping_neg());
    alive()
        .map(|(&cell, &state)| (cell.offset(dx, dy), state))
        .collect()
}
