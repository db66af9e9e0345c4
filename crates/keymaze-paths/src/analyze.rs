//! The grid analyzer — turns a raw color grid into a semantic [`MazeModel`].

use std::collections::BTreeMap;

use keymaze_core::{Color, PixelGrid, Point};

/// Side length of a key pad in cells. Also used by the pathfinder as the
/// Manhattan pickup radius around a pad center.
pub const KEY_PAD: i32 = 20;

/// Analysis failure: the structural invariants of a maze raster were violated.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeError {
    /// No `START` cell anywhere in the grid.
    #[error("no start cell found in the maze")]
    NoStartFound,
}

/// Semantic model of a maze raster, built once per loaded grid.
///
/// `goals` holds one representative cell per connected goal zone, and each
/// entry of `keys` is the center of one isolated 20×20 pad of that color.
/// Both are in row-major scan order, so the model is deterministic for a
/// given grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeModel {
    pub start: Point,
    pub goals: Vec<Point>,
    pub keys: BTreeMap<Color, Vec<Point>>,
}

impl MazeModel {
    /// Scan the grid once and classify every special region.
    ///
    /// Fails with [`AnalyzeError::NoStartFound`] if the grid has no `START`
    /// cell. A grid without goals or keys is legal; the pathfinder reports
    /// those as "no route" instead.
    pub fn analyze(grid: &PixelGrid) -> Result<MazeModel, AnalyzeError> {
        let bounds = grid.bounds();
        let width = bounds.width() as usize;
        let mut visited = vec![false; bounds.len()];

        let mut start = None;
        let mut goals = Vec::new();
        let mut keys: BTreeMap<Color, Vec<Point>> = BTreeMap::new();

        for p in bounds.iter() {
            if visited[(p.y as usize) * width + p.x as usize] {
                continue;
            }
            let Some(color) = grid.get(p) else {
                continue;
            };

            if color.is_zone() && is_key_pad(grid, p, color, &mut visited) {
                let center = p.shift(KEY_PAD / 2, KEY_PAD / 2);
                log::debug!("key pad {color} with center {center}");
                keys.entry(color).or_default().push(center);
            } else if start.is_none() && color == Color::START {
                start = Some(p);
            } else if color == Color::GOAL {
                goals.push(p);
                // One representative per zone: swallow the rest of the
                // connected figure so it is never re-classified.
                fill_zone(grid, p, color, &mut visited);
            }
        }

        let start = start.ok_or(AnalyzeError::NoStartFound)?;
        log::info!(
            "maze analyzed: start {start}, {} goal zone(s), {} key color(s)",
            goals.len(),
            keys.len()
        );
        Ok(MazeModel { start, goals, keys })
    }

    /// Total number of registered key pads across all colors.
    pub fn pad_count(&self) -> usize {
        self.keys.values().map(Vec::len).sum()
    }
}

/// Whether `top_left` is the corner of an isolated `KEY_PAD`×`KEY_PAD`
/// monochrome block of `color`.
///
/// The whole one-cell outer frame must lie inside the grid: a pad touching
/// the grid edge is rejected outright, which keeps the frame arithmetic free
/// of per-side special cases. Block cells are marked visited as they are
/// scanned, even when the candidate is later rejected; a rejected block is
/// zone-colored throughout, so those cells carry no other classification.
fn is_key_pad(grid: &PixelGrid, top_left: Point, color: Color, visited: &mut [bool]) -> bool {
    let width = grid.width() as usize;
    if top_left.x < 1
        || top_left.y < 1
        || top_left.x + KEY_PAD >= grid.width()
        || top_left.y + KEY_PAD >= grid.height()
    {
        return false;
    }

    // The block itself must be monochrome.
    for y in top_left.y..top_left.y + KEY_PAD {
        for x in top_left.x..top_left.x + KEY_PAD {
            if grid.get(Point::new(x, y)) != Some(color) {
                return false;
            }
            visited[(y as usize) * width + x as usize] = true;
        }
    }

    // The frame must contain no cell of the same color.
    for x in top_left.x - 1..=top_left.x + KEY_PAD {
        if grid.get(Point::new(x, top_left.y - 1)) == Some(color)
            || grid.get(Point::new(x, top_left.y + KEY_PAD)) == Some(color)
        {
            return false;
        }
    }
    for y in top_left.y..top_left.y + KEY_PAD {
        if grid.get(Point::new(top_left.x - 1, y)) == Some(color)
            || grid.get(Point::new(top_left.x + KEY_PAD, y)) == Some(color)
        {
            return false;
        }
    }

    true
}

/// Flood-fill the 8-connected same-color zone containing `pos`, marking every
/// cell visited.
fn fill_zone(grid: &PixelGrid, pos: Point, color: Color, visited: &mut [bool]) {
    let width = grid.width() as usize;
    let idx = |p: Point| (p.y as usize) * width + p.x as usize;

    let mut stack = vec![pos];
    visited[idx(pos)] = true;

    while let Some(cur) = stack.pop() {
        for n in cur.neighbors_8() {
            if grid.get(n) == Some(color) && !visited[idx(n)] {
                visited[idx(n)] = true;
                stack.push(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keymaze_core::Range;

    const BLUE: Color = Color(0x0000_00FF);
    const GREEN: Color = Color(0x0000_8000);

    fn put(grid: &mut PixelGrid, p: Point, c: Color) {
        grid.set(p, c).unwrap();
    }

    fn pad_at(grid: &mut PixelGrid, top_left: Point, c: Color) {
        grid.fill_range(
            Range::new(
                top_left.x,
                top_left.y,
                top_left.x + KEY_PAD,
                top_left.y + KEY_PAD,
            ),
            c,
        );
    }

    #[test]
    fn no_start_is_an_error() {
        let grid = PixelGrid::new(10, 10);
        assert_eq!(MazeModel::analyze(&grid), Err(AnalyzeError::NoStartFound));
    }

    #[test]
    fn start_and_goal_are_recorded() {
        let mut grid = PixelGrid::new(10, 10);
        put(&mut grid, Point::new(1, 2), Color::START);
        put(&mut grid, Point::new(8, 8), Color::GOAL);
        let model = MazeModel::analyze(&grid).unwrap();
        assert_eq!(model.start, Point::new(1, 2));
        assert_eq!(model.goals, vec![Point::new(8, 8)]);
        assert!(model.keys.is_empty());
    }

    #[test]
    fn first_start_in_scan_order_wins() {
        let mut grid = PixelGrid::new(10, 10);
        put(&mut grid, Point::new(5, 3), Color::START);
        put(&mut grid, Point::new(2, 7), Color::START);
        let model = MazeModel::analyze(&grid).unwrap();
        assert_eq!(model.start, Point::new(5, 3));
    }

    #[test]
    fn connected_goal_zone_yields_one_representative() {
        let mut grid = PixelGrid::new(20, 20);
        put(&mut grid, Point::new(0, 0), Color::START);
        // An L-shaped goal zone, 8-connected.
        grid.fill_range(Range::new(5, 5, 9, 7), Color::GOAL);
        grid.fill_range(Range::new(8, 7, 10, 10), Color::GOAL);
        let model = MazeModel::analyze(&grid).unwrap();
        assert_eq!(model.goals, vec![Point::new(5, 5)]);
    }

    #[test]
    fn disjoint_goal_zones_yield_one_entry_each() {
        let mut grid = PixelGrid::new(20, 20);
        put(&mut grid, Point::new(0, 0), Color::START);
        put(&mut grid, Point::new(3, 3), Color::GOAL);
        put(&mut grid, Point::new(15, 15), Color::GOAL);
        let model = MazeModel::analyze(&grid).unwrap();
        assert_eq!(model.goals, vec![Point::new(3, 3), Point::new(15, 15)]);
    }

    #[test]
    fn isolated_pad_registers_its_center() {
        let mut grid = PixelGrid::new(30, 30);
        put(&mut grid, Point::new(0, 0), Color::START);
        pad_at(&mut grid, Point::new(5, 5), BLUE);
        let model = MazeModel::analyze(&grid).unwrap();
        assert_eq!(model.keys[&BLUE], vec![Point::new(15, 15)]);
        assert_eq!(model.pad_count(), 1);
    }

    #[test]
    fn undersized_block_is_not_a_pad() {
        let mut grid = PixelGrid::new(30, 30);
        put(&mut grid, Point::new(0, 0), Color::START);
        // 19×19 only.
        grid.fill_range(Range::new(5, 5, 5 + KEY_PAD - 1, 5 + KEY_PAD - 1), BLUE);
        let model = MazeModel::analyze(&grid).unwrap();
        assert!(model.keys.is_empty());
    }

    #[test]
    fn broken_frame_isolation_is_not_a_pad() {
        let mut grid = PixelGrid::new(30, 30);
        put(&mut grid, Point::new(0, 0), Color::START);
        pad_at(&mut grid, Point::new(5, 5), BLUE);
        // Same-color cell on the left frame column.
        put(&mut grid, Point::new(4, 10), BLUE);
        let model = MazeModel::analyze(&grid).unwrap();
        assert!(model.keys.is_empty());
    }

    #[test]
    fn pad_touching_the_grid_edge_is_rejected() {
        let mut grid = PixelGrid::new(30, 30);
        put(&mut grid, Point::new(25, 25), Color::START);
        pad_at(&mut grid, Point::new(0, 0), BLUE);
        let model = MazeModel::analyze(&grid).unwrap();
        assert!(model.keys.is_empty());
    }

    #[test]
    fn same_color_pads_accumulate_in_scan_order() {
        let mut grid = PixelGrid::new(60, 30);
        put(&mut grid, Point::new(0, 0), Color::START);
        pad_at(&mut grid, Point::new(2, 5), BLUE);
        pad_at(&mut grid, Point::new(30, 5), BLUE);
        let model = MazeModel::analyze(&grid).unwrap();
        assert_eq!(
            model.keys[&BLUE],
            vec![Point::new(12, 15), Point::new(40, 15)]
        );
    }

    #[test]
    fn different_colors_are_distinct_keys() {
        let mut grid = PixelGrid::new(60, 30);
        put(&mut grid, Point::new(0, 0), Color::START);
        pad_at(&mut grid, Point::new(2, 5), BLUE);
        pad_at(&mut grid, Point::new(30, 5), GREEN);
        let model = MazeModel::analyze(&grid).unwrap();
        assert_eq!(model.keys.len(), 2);
        assert_eq!(model.keys[&BLUE], vec![Point::new(12, 15)]);
        assert_eq!(model.keys[&GREEN], vec![Point::new(40, 15)]);
    }
}
