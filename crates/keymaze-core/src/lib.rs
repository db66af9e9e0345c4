//! **keymaze-core** — foundational types for the keymaze solver.
//!
//! This crate provides the pieces the analyzer and pathfinder build on:
//! geometry primitives, the maze color vocabulary, the pixel grid with its
//! bounds-checked accessor contract, and raster load/save.

pub mod color;
pub mod error;
pub mod geom;
pub mod grid;
pub mod raster;

pub use color::Color;
pub use error::{GridError, RasterError};
pub use geom::{Point, Range};
pub use grid::PixelGrid;
pub use raster::route_output_path;
