//! Error taxonomy for the core crates.

use thiserror::Error;

use crate::geom::Point;

/// Accessor misuse on a [`PixelGrid`](crate::PixelGrid).
///
/// Under correct boundary handling this never surfaces; raising it indicates
/// a bug in the caller, not bad input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("pixel access out of bounds at {pos}")]
    OutOfBounds { pos: Point },
}

/// Failure to decode or encode a raster file.
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("image decode/encode failed")]
    Image(#[from] image::ImageError),

    #[error("i/o error")]
    Io(#[from] std::io::Error),

    #[error("raster of {width}x{height} pixels is not a usable grid")]
    BadDimensions { width: u32, height: u32 },
}
