//! Keymaze — solves key-gated pixel mazes from image files.

pub mod pipeline;
pub mod report;
