use serde::Serialize;

use crate::error::{Result, SegmentError};
use crate::types::Point;

/// Dense row-major grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

/// Grayscale intensities, one byte per pixel.
pub type IntensityGrid = Grid<u8>;

/// Boolean partition of the pixels.
pub type Mask = Grid<bool>;

impl<T: Copy> Grid<T> {
    pub fn new(rows: usize, cols: usize, cells: Vec<T>) -> Result<Grid<T>> {
        if rows == 0 || cols == 0 {
            return Err(SegmentError::InvalidDimensions(format!(
                "{rows}x{cols} grid has no pixels"
            )));
        }
        if rows.checked_mul(cols) != Some(cells.len()) {
            return Err(SegmentError::InvalidDimensions(format!(
                "{rows}x{cols} grid needs {} cells, got {}",
                rows.saturating_mul(cols),
                cells.len()
            )));
        }
        Ok(Grid { rows, cols, cells })
    }

    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Grid<T>> {
        let len = rows.checked_mul(cols).ok_or_else(|| {
            SegmentError::InvalidDimensions(format!("{rows}x{cols} grid is too large"))
        })?;
        Grid::new(rows, cols, vec![value; len])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row < self.rows && point.col < self.cols
    }

    /// Flattened index of `point`, or `None` outside the grid.
    pub fn index_of(&self, point: Point) -> Option<usize> {
        self.contains(point).then(|| point.row * self.cols + point.col)
    }

    pub fn point_of(&self, index: usize) -> Point {
        Point::new(index / self.cols, index % self.cols)
    }

    pub fn get(&self, point: Point) -> Option<T> {
        self.index_of(point).map(|index| self.cells[index])
    }

    pub fn set(&mut self, point: Point, value: T) -> bool {
        match self.index_of(point) {
            Some(index) => {
                self.cells[index] = value;
                true
            }
            None => false,
        }
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        (row < self.rows).then(|| &self.cells[row * self.cols..(row + 1) * self.cols])
    }
}

impl Grid<bool> {
    pub fn count(&self, value: bool) -> usize {
        self.cells.iter().filter(|c| **c == value).count()
    }
}
