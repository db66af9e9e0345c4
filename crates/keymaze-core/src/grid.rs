//! The [`PixelGrid`] type — a flat row-major grid of [`Color`] codes.

use crate::color::Color;
use crate::error::GridError;
use crate::geom::{Point, Range};

/// A 2D grid of color codes backed by a flat row-major buffer.
///
/// This is the single mutable resource of a solver run: the analyzer and the
/// pathfinder only read it, the trail renderer writes [`Color::TRAIL`] cells
/// back through [`set`](PixelGrid::set).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    cells: Vec<Color>,
    width: i32,
    height: i32,
}

impl PixelGrid {
    /// Create a new grid of the given dimensions, filled with [`Color::FLOOR`].
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        Self {
            cells: vec![Color::FLOOR; (w as usize) * (h as usize)],
            width: w,
            height: h,
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The bounding range `[0,0)-[width,height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Whether `p` is inside this grid's bounds.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some((p.y as usize) * (self.width as usize) + p.x as usize)
        } else {
            None
        }
    }

    /// Read the color at `p`, or `None` if `p` is out of bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Color> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Read the color at `p`.
    pub fn at(&self, p: Point) -> Result<Color, GridError> {
        self.index(p)
            .map(|i| self.cells[i])
            .ok_or(GridError::OutOfBounds { pos: p })
    }

    /// Write the color at `p`.
    pub fn set(&mut self, p: Point, color: Color) -> Result<(), GridError> {
        match self.index(p) {
            Some(i) => {
                self.cells[i] = color;
                Ok(())
            }
            None => Err(GridError::OutOfBounds { pos: p }),
        }
    }

    /// Fill every cell of `r` (clamped to the grid) with `color`.
    pub fn fill_range(&mut self, r: Range, color: Color) {
        for p in r.iter() {
            if let Some(i) = self.index(p) {
                self.cells[i] = color;
            }
        }
    }

    /// Row-major iterator over `(Point, Color)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Color)> + '_ {
        self.bounds().iter().map(|p| (p, self.cells[(p.y as usize) * (self.width as usize) + p.x as usize]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_floor() {
        let g = PixelGrid::new(4, 3);
        assert_eq!(g.width(), 4);
        assert_eq!(g.height(), 3);
        assert!(g.iter().all(|(_, c)| c == Color::FLOOR));
    }

    #[test]
    fn get_set_round_trip() {
        let mut g = PixelGrid::new(4, 3);
        let p = Point::new(2, 1);
        g.set(p, Color::WALL).unwrap();
        assert_eq!(g.get(p), Some(Color::WALL));
        assert_eq!(g.at(p).unwrap(), Color::WALL);
    }

    #[test]
    fn out_of_bounds_access_is_an_error() {
        let mut g = PixelGrid::new(4, 3);
        let p = Point::new(4, 0);
        assert_eq!(g.get(p), None);
        assert_eq!(g.at(p), Err(GridError::OutOfBounds { pos: p }));
        assert_eq!(
            g.set(Point::new(0, -1), Color::WALL),
            Err(GridError::OutOfBounds {
                pos: Point::new(0, -1)
            })
        );
    }

    #[test]
    fn fill_range_clamps_to_bounds() {
        let mut g = PixelGrid::new(4, 4);
        g.fill_range(Range::new(2, 2, 10, 10), Color::WALL);
        assert_eq!(g.get(Point::new(3, 3)), Some(Color::WALL));
        assert_eq!(g.get(Point::new(1, 1)), Some(Color::FLOOR));
    }
}
