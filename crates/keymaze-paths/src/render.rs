//! Rasterizes a solved route back onto the pixel grid as a trail.

use keymaze_core::{Color, GridError, PixelGrid, Point};

use crate::distance::chebyshev;
use crate::search::Solution;

/// All grid cells on the straight or diagonal run from `a` to `b`,
/// inclusive of both endpoints.
///
/// Cells are produced by evenly stepping both axes over the Chebyshev
/// distance and rounding half away from zero, so a run between two route
/// waypoints (which is always axis-aligned or exactly diagonal) visits each
/// cell exactly once.
pub fn line(a: Point, b: Point) -> Vec<Point> {
    let steps = chebyshev(a, b);
    if steps == 0 {
        return vec![a];
    }

    let dx = (b.x - a.x) as f32;
    let dy = (b.y - a.y) as f32;
    let mut cells = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        cells.push(Point::new(
            a.x + (dx * t).round() as i32,
            a.y + (dy * t).round() as i32,
        ));
    }
    cells
}

/// Paint the full route onto the grid in [`Color::TRAIL`].
///
/// Idempotent: repainting an already painted route changes nothing. Fails
/// only if a waypoint lies outside the grid, which a solution produced from
/// the same grid never does.
pub fn draw_trail(solution: &Solution, grid: &mut PixelGrid) -> Result<(), GridError> {
    for segment in &solution.segments {
        for pair in segment.windows(2) {
            for cell in line(pair[0], pair[1]) {
                grid.set(cell, Color::TRAIL)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_single_cell() {
        let p = Point::new(4, 7);
        assert_eq!(line(p, p), vec![p]);
    }

    #[test]
    fn line_horizontal() {
        assert_eq!(
            line(Point::new(2, 5), Point::new(5, 5)),
            vec![
                Point::new(2, 5),
                Point::new(3, 5),
                Point::new(4, 5),
                Point::new(5, 5),
            ]
        );
    }

    #[test]
    fn line_diagonal() {
        assert_eq!(
            line(Point::new(3, 3), Point::new(0, 0)),
            vec![
                Point::new(3, 3),
                Point::new(2, 2),
                Point::new(1, 1),
                Point::new(0, 0),
            ]
        );
    }

    #[test]
    fn line_shallow_slope_rounds_midpoints() {
        assert_eq!(
            line(Point::new(0, 0), Point::new(3, 1)),
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(3, 1),
            ]
        );
    }

    #[test]
    fn draw_trail_paints_every_run_cell() {
        let mut grid = PixelGrid::new(10, 10);
        let solution = Solution {
            segments: vec![vec![Point::new(0, 0), Point::new(4, 4), Point::new(4, 8)]],
            inventory: Vec::new(),
        };
        draw_trail(&solution, &mut grid).unwrap();
        for i in 0..=4 {
            assert_eq!(grid.get(Point::new(i, i)), Some(Color::TRAIL));
        }
        for y in 4..=8 {
            assert_eq!(grid.get(Point::new(4, y)), Some(Color::TRAIL));
        }
        assert_eq!(grid.get(Point::new(5, 0)), Some(Color::FLOOR));
    }

    #[test]
    fn draw_trail_is_idempotent() {
        let solution = Solution {
            segments: vec![vec![Point::new(1, 1), Point::new(1, 6), Point::new(5, 6)]],
            inventory: Vec::new(),
        };
        let mut once = PixelGrid::new(8, 8);
        draw_trail(&solution, &mut once).unwrap();
        let mut twice = once.clone();
        draw_trail(&solution, &mut twice).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn draw_trail_rejects_out_of_bounds_waypoints() {
        let solution = Solution {
            segments: vec![vec![Point::new(0, 0), Point::new(20, 0)]],
            inventory: Vec::new(),
        };
        let mut grid = PixelGrid::new(8, 8);
        assert!(draw_trail(&solution, &mut grid).is_err());
    }
}
