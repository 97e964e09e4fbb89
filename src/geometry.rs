// src/geometry.rs
//! Window-size arithmetic for keeping the terminal grid in step with the
//! toplevel window.

use crate::constants::MIN_RESIZE_CELLS;

/// Outer window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

/// Cell grid of the terminal: dimensions and the pixel size of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGrid {
    pub columns: i64,
    pub rows: i64,
    pub char_width: i64,
    pub char_height: i64,
}

impl CellGrid {
    pub fn pixel_width(&self) -> i64 {
        self.columns * self.char_width
    }

    pub fn pixel_height(&self) -> i64 {
        self.rows * self.char_height
    }

    /// The part of `window` not covered by cells: padding, borders,
    /// decorations.
    pub fn overhead(&self, window: WindowSize) -> (i64, i64) {
        (
            i64::from(window.width) - self.pixel_width(),
            i64::from(window.height) - self.pixel_height(),
        )
    }

    /// Same grid dimensions with a different cell size.
    pub fn with_char_size(self, char_width: i64, char_height: i64) -> Self {
        Self {
            char_width,
            char_height,
            ..self
        }
    }
}

fn to_size(width: i64, height: i64) -> WindowSize {
    WindowSize {
        width: width.clamp(1, i64::from(i32::MAX)) as i32,
        height: height.clamp(1, i64::from(i32::MAX)) as i32,
    }
}

/// Window size that shows `columns` x `rows` cells, keeping the current
/// overhead. Requests below two cells per axis are raised to two.
pub fn resize_for_cells(window: WindowSize, grid: CellGrid, columns: u32, rows: u32) -> WindowSize {
    let columns = i64::from(columns.max(MIN_RESIZE_CELLS));
    let rows = i64::from(rows.max(MIN_RESIZE_CELLS));
    let (extra_w, extra_h) = grid.overhead(window);

    to_size(
        columns * grid.char_width + extra_w,
        rows * grid.char_height + extra_h,
    )
}

/// Window size after the cell size changed from `before` to `after`, so
/// the grid keeps its columns and rows. `window` is the size measured
/// while `before` was in effect.
pub fn rescale(window: WindowSize, before: CellGrid, after: CellGrid) -> WindowSize {
    let (extra_w, extra_h) = before.overhead(window);

    to_size(
        before.columns * after.char_width + extra_w,
        before.rows * after.char_height + extra_h,
    )
}
