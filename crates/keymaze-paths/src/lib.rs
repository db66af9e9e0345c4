//! Maze analysis and key-gated pathfinding over pixel grids.
//!
//! The pipeline has three stages:
//!
//! 1. [`MazeModel::analyze`] scans a [`PixelGrid`](keymaze_core::PixelGrid)
//!    for the start cell, goal zones, and fixed-size key pads.
//! 2. [`Solver::find_path`] runs a restartable jump-point search in which
//!    locked color zones open up as their keys are collected.
//! 3. [`draw_trail`] rasterizes the resulting [`Solution`] back onto the
//!    grid.

mod analyze;
mod distance;
mod render;
mod search;

pub use analyze::{AnalyzeError, KEY_PAD, MazeModel};
pub use distance::{chebyshev, manhattan};
pub use render::{draw_trail, line};
pub use search::{Solution, Solver};
