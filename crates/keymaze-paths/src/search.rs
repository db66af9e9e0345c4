//! The key-gated jump-point pathfinder.
//!
//! A multi-phase best-first search: the outer loop restarts a bounded
//! jump-point search from every *checkpoint* (key pickup or goal) it
//! discovers, carrying a grow-only key inventory across phases. Locked
//! zones behave as walls until their key color is collected, at which point
//! they become transparent floor for the rest of the run.

use std::collections::{BinaryHeap, VecDeque};

use keymaze_core::{Color, PixelGrid, Point, Range};

use crate::analyze::{KEY_PAD, MazeModel};
use crate::distance::manhattan;

/// Sentinel cost meaning "not yet reached".
const UNREACHABLE: i32 = i32::MAX;

const DIRS8: [Point; 8] = [
    Point::new(1, 0),
    Point::new(-1, 0),
    Point::new(0, 1),
    Point::new(0, -1),
    Point::new(1, 1),
    Point::new(1, -1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

// ---------------------------------------------------------------------------
// Solution
// ---------------------------------------------------------------------------

/// A solved route: ordered path segments covering start → … → goal, plus the
/// keys collected along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// One waypoint list per leg, each running launch point → checkpoint,
    /// with collinear interior points compressed out.
    pub segments: Vec<Vec<Point>>,
    /// Key colors in pickup order. Never contains duplicates.
    pub inventory: Vec<Color>,
}

impl Solution {
    /// Every waypoint in travel order, with the shared boundary point of
    /// consecutive segments deduplicated.
    pub fn waypoints(&self) -> Vec<Point> {
        let mut out = Vec::new();
        for seg in &self.segments {
            for &p in seg {
                if out.last() != Some(&p) {
                    out.push(p);
                }
            }
        }
        out
    }

    /// The goal cell the route ends on.
    pub fn goal(&self) -> Option<Point> {
        self.segments.last().and_then(|seg| seg.last()).copied()
    }
}

// ---------------------------------------------------------------------------
// Internal search machinery
// ---------------------------------------------------------------------------

/// A jump point that terminates an inner search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Checkpoint {
    Key { color: Color, pos: Point },
    Goal { pos: Point },
}

impl Checkpoint {
    fn pos(self) -> Point {
        match self {
            Checkpoint::Key { pos, .. } | Checkpoint::Goal { pos } => pos,
        }
    }
}

/// Outcome of walking one ray.
enum Ray {
    /// The ray hit a wall, a locked zone, or the grid edge.
    Dead,
    /// An ordinary jump point (forced neighbor or branch cell).
    Jump(Point),
    /// A checkpoint: key pickup or goal cell.
    Checkpoint(Checkpoint),
}

/// Read-only state shared by every ray of one pathfinding run.
struct SearchCtx<'a> {
    model: &'a MazeModel,
    grid: &'a PixelGrid,
    /// Keys collected so far. Grows only; consulted by every walkability
    /// and forced-neighbor decision.
    inventory: Vec<Color>,
}

impl SearchCtx<'_> {
    fn walkable(&self, p: Point) -> bool {
        matches!(self.grid.get(p), Some(c) if c != Color::WALL)
    }

    /// Hard obstacle for the forced-neighbor rule: a wall, the grid edge, or
    /// a locked zone whose key is not held.
    fn blocking(&self, p: Point) -> bool {
        match self.grid.get(p) {
            None => true,
            Some(c) => c == Color::WALL || (c.is_zone() && !self.has_key(c)),
        }
    }

    /// The standard JPS forced-neighbor test, extended with locked-zone
    /// semantics: `walk` must be enterable while `neighbor` blocks the
    /// straight continuation.
    fn forced(&self, walk: Point, neighbor: Point) -> bool {
        self.walkable(walk) && self.blocking(neighbor)
    }

    fn has_key(&self, color: Color) -> bool {
        self.inventory.contains(&color)
    }

    /// Whether `p` is close enough to a registered pad center of `color` to
    /// claim that key on touch.
    fn near_pad(&self, p: Point, color: Color) -> bool {
        self.model
            .keys
            .get(&color)
            .is_some_and(|pads| pads.iter().any(|&center| manhattan(p, center) <= KEY_PAD))
    }

    /// Guide priority: minimum Manhattan distance to any uncollected pad
    /// center or goal. Not a strict lower bound on the remaining route; the
    /// restart-based outer loop only needs *a* valid route.
    fn heuristic(&self, p: Point) -> i32 {
        let mut best = UNREACHABLE;
        for (&color, pads) in &self.model.keys {
            if self.has_key(color) {
                continue;
            }
            for &pad in pads {
                best = best.min(manhattan(p, pad));
            }
        }
        for &goal in &self.model.goals {
            best = best.min(manhattan(p, goal));
        }
        best
    }
}

/// Per-cell search bookkeeping, invalidated lazily via a generation counter.
#[derive(Clone)]
struct Node {
    g: i32,
    parent: usize,
    generation: u32,
    open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the node array, ordered by `f` for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    idx: usize,
    f: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first. Ties are
        // broken arbitrarily; callers must not rely on their order.
        other.f.cmp(&self.f)
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Arena of search nodes for a grid rectangle, indexed by flattened
/// `row * width + col`. Owns its storage so repeated searches incur no
/// allocations after the first.
struct SearchRange {
    rng: Range,
    width: usize,
    nodes: Vec<Node>,
    generation: u32,
}

impl SearchRange {
    fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            nodes: vec![Node::default(); rng.len()],
            generation: 0,
        }
    }

    /// Replace the underlying range, reallocating only on growth.
    fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;
        if new_len <= self.nodes.len() {
            self.generation = self.generation.wrapping_add(1);
        } else {
            self.nodes.clear();
            self.nodes.resize(new_len, Node::default());
            self.generation = 0;
        }
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// Key-gated jump-point pathfinder.
///
/// Reusable across runs: every [`find_path`](Solver::find_path) invocation
/// starts from a fresh inventory and segment list, so a failed or successful
/// run leaks nothing into the next.
pub struct Solver {
    range: SearchRange,
}

impl Solver {
    /// Create a solver sized for the given grid rectangle.
    pub fn new(bounds: Range) -> Self {
        Self {
            range: SearchRange::new(bounds),
        }
    }

    /// Search for a route from the model's start to any goal, collecting
    /// keys as needed.
    ///
    /// Returns `None` when the maze has no goals, the start lies outside the
    /// grid, or the launch-point queue exhausts without reaching a goal.
    /// This is a normal negative result, not an error.
    pub fn find_path(&mut self, model: &MazeModel, grid: &PixelGrid) -> Option<Solution> {
        self.range.set_range(grid.bounds());
        if model.goals.is_empty() {
            log::debug!("maze has no goal zones; nothing to search for");
            return None;
        }
        grid.get(model.start)?;

        let mut ctx = SearchCtx {
            model,
            grid,
            inventory: Vec::new(),
        };
        let mut segments: Vec<Vec<Point>> = Vec::new();
        let mut launches: VecDeque<Point> = VecDeque::from([model.start]);

        while let Some(launch) = launches.pop_front() {
            let Some((checkpoint, segment)) = self.inner_search(&ctx, launch) else {
                continue;
            };
            segments.push(segment);
            match checkpoint {
                Checkpoint::Goal { pos } => {
                    log::debug!("goal reached at {pos} after {} segment(s)", segments.len());
                    return Some(Solution {
                        segments,
                        inventory: ctx.inventory,
                    });
                }
                Checkpoint::Key { color, pos } => {
                    log::debug!("collected {color} key at {pos}");
                    if !ctx.inventory.contains(&color) {
                        ctx.inventory.push(color);
                    }
                    launches.push_back(pos);
                }
            }
        }

        // Exhausted without a goal: discard everything.
        None
    }

    /// One bounded best-first search over jump points from `launch`.
    ///
    /// Ends as soon as a checkpoint is relaxed, returning it together with
    /// the compressed waypoint segment launch → checkpoint.
    fn inner_search(&mut self, ctx: &SearchCtx, launch: Point) -> Option<(Checkpoint, Vec<Point>)> {
        let sr = &mut self.range;
        sr.generation = sr.generation.wrapping_add(1);
        let cur_gen = sr.generation;

        let launch_idx = sr.idx(launch)?;
        {
            let n = &mut sr.nodes[launch_idx];
            n.g = 0;
            n.parent = usize::MAX;
            n.generation = cur_gen;
            n.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: launch_idx,
            f: ctx.heuristic(launch),
        });

        let mut dirs: Vec<Point> = Vec::with_capacity(8);

        while let Some(cur) = open.pop() {
            let ci = cur.idx;
            if sr.nodes[ci].generation != cur_gen || !sr.nodes[ci].open {
                continue;
            }
            sr.nodes[ci].open = false;

            let cp = sr.point(ci);
            let cur_g = sr.nodes[ci].g;

            dirs.clear();
            if sr.nodes[ci].parent == usize::MAX {
                // Launch cell: no travel direction yet, fan out everywhere.
                dirs.extend_from_slice(&DIRS8);
            } else {
                let pp = sr.point(sr.nodes[ci].parent);
                pruned_dirs(ctx, cp, pp, &mut dirs);
            }

            let mut found: Option<Checkpoint> = None;
            for &dir in dirs.iter() {
                let (jp, checkpoint) = match jump(ctx, cp, dir) {
                    Ray::Dead => continue,
                    Ray::Jump(p) => (p, None),
                    Ray::Checkpoint(c) => (c.pos(), Some(c)),
                };
                let Some(ji) = sr.idx(jp) else {
                    continue;
                };

                let tentative = cur_g + manhattan(cp, jp);
                let n = &mut sr.nodes[ji];
                if n.generation != cur_gen {
                    n.generation = cur_gen;
                    n.g = UNREACHABLE;
                }
                if tentative < n.g {
                    n.g = tentative;
                    n.parent = ci;
                    n.open = true;
                    open.push(NodeRef {
                        idx: ji,
                        f: tentative + ctx.heuristic(jp),
                    });
                }

                if let Some(c) = checkpoint {
                    found = Some(c);
                    break;
                }
            }

            if let Some(checkpoint) = found {
                let segment = reconstruct(sr, checkpoint.pos());
                return Some((checkpoint, segment));
            }
        }

        None
    }
}

/// JPS neighbor pruning relative to the travel direction `p - parent`.
fn pruned_dirs(ctx: &SearchCtx, p: Point, parent: Point, buf: &mut Vec<Point>) {
    let d = Point::new((p.x - parent.x).signum(), (p.y - parent.y).signum());

    if d.x != 0 && d.y != 0 {
        // Diagonal move: the two axis components, the continuation, and any
        // forced turns.
        buf.push(Point::new(d.x, 0));
        buf.push(Point::new(0, d.y));
        buf.push(d);
        if ctx.forced(p + Point::new(-d.x, d.y), p + Point::new(-d.x, 0)) {
            buf.push(Point::new(-d.x, d.y));
        }
        if ctx.forced(p + Point::new(d.x, -d.y), p + Point::new(0, -d.y)) {
            buf.push(Point::new(d.x, -d.y));
        }
    } else {
        // Straight move: continuation plus forced diagonals past lateral
        // blockers.
        buf.push(d);
        let laterals = if d.x != 0 {
            [Point::new(0, 1), Point::new(0, -1)]
        } else {
            [Point::new(1, 0), Point::new(-1, 0)]
        };
        for l in laterals {
            if ctx.forced(p + d + l, p + l) {
                buf.push(d + l);
            }
        }
    }
}

/// Walk one ray from `from` along `dir` until a jump point, a checkpoint, or
/// a dead end.
///
/// Obstacles block cells, not edges: a diagonal ray may pass between two
/// corner-touching walls, since only the cells it lands on are tested.
///
/// Locked-zone semantics along the ray: a zone-colored cell entered from a
/// differently colored cell is transparent when its key is held, a key
/// pickup when it lies within the pickup radius of a matching pad center,
/// and a blocker otherwise. Staying inside one zone (same color as the
/// previous cell) never re-triggers the pickup test.
///
/// Diagonal rays probe their two axis components at every step; a probe hit
/// makes the diagonal cell an ordinary jump point, and whatever the probe
/// saw is rediscovered when that cell is expanded. Probes carry no side
/// effects, so the recursion (depth two: diagonal → axis) is harmless.
fn jump(ctx: &SearchCtx, from: Point, dir: Point) -> Ray {
    let Some(mut last_color) = ctx.grid.get(from) else {
        return Ray::Dead;
    };
    let mut cur = from + dir;

    loop {
        let Some(color) = ctx.grid.get(cur) else {
            return Ray::Dead;
        };
        if color == Color::WALL {
            return Ray::Dead;
        }

        if color.is_zone() && color != last_color {
            if ctx.has_key(color) {
                // Unlocked: plain floor from here on.
            } else if ctx.near_pad(cur, color) {
                return Ray::Checkpoint(Checkpoint::Key { color, pos: cur });
            } else {
                return Ray::Dead;
            }
        } else if color == Color::GOAL {
            return Ray::Checkpoint(Checkpoint::Goal { pos: cur });
        }

        if dir.x != 0 && dir.y != 0 {
            if ctx.forced(cur + Point::new(-dir.x, dir.y), cur + Point::new(-dir.x, 0))
                || ctx.forced(cur + Point::new(dir.x, -dir.y), cur + Point::new(0, -dir.y))
            {
                return Ray::Jump(cur);
            }
            if !matches!(jump(ctx, cur, Point::new(dir.x, 0)), Ray::Dead)
                || !matches!(jump(ctx, cur, Point::new(0, dir.y)), Ray::Dead)
            {
                return Ray::Jump(cur);
            }
        } else {
            let laterals = if dir.x != 0 {
                [Point::new(0, 1), Point::new(0, -1)]
            } else {
                [Point::new(1, 0), Point::new(-1, 0)]
            };
            if ctx.forced(cur + dir + laterals[0], cur + laterals[0])
                || ctx.forced(cur + dir + laterals[1], cur + laterals[1])
            {
                return Ray::Jump(cur);
            }
        }

        last_color = color;
        cur = cur + dir;
    }
}

/// Walk the parent chain from `from` back to the launch point (parent-less
/// node), then return it in travel order with collinear interior points
/// compressed out.
fn reconstruct(sr: &SearchRange, from: Point) -> Vec<Point> {
    let Some(mut ci) = sr.idx(from) else {
        return Vec::new();
    };

    let mut chain = Vec::new();
    loop {
        chain.push(sr.point(ci));
        let parent = sr.nodes[ci].parent;
        if parent == usize::MAX {
            break;
        }
        ci = parent;
    }
    chain.reverse();
    compress(&chain)
}

/// Keep only waypoints where the direction of travel changes.
fn compress(chain: &[Point]) -> Vec<Point> {
    if chain.len() <= 2 {
        return chain.to_vec();
    }
    let mut out = vec![chain[0]];
    let mut last_dir = step_dir(chain[0], chain[1]);
    for w in chain.windows(2).skip(1) {
        let d = step_dir(w[0], w[1]);
        if d != last_dir {
            out.push(w[0]);
            last_dir = d;
        }
    }
    out.push(chain[chain.len() - 1]);
    out
}

/// Unit direction of the straight or diagonal run from `a` to `b`.
fn step_dir(a: Point, b: Point) -> Point {
    Point::new((b.x - a.x).signum(), (b.y - a.y).signum())
}
