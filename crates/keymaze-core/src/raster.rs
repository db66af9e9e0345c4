//! Raster load/save for [`PixelGrid`].
//!
//! The maze format is a plain true-color image (BMP in the classic inputs,
//! but any format the `image` crate decodes losslessly works). Row padding
//! and bottom-up row order are the codec's concern; once decoded, the grid
//! is top-down row-major color codes.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use crate::color::Color;
use crate::error::RasterError;
use crate::geom::Point;
use crate::grid::PixelGrid;

impl PixelGrid {
    /// Decode the raster at `path` into a grid of color codes.
    pub fn load(path: impl AsRef<Path>) -> Result<PixelGrid, RasterError> {
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(RasterError::BadDimensions { width, height });
        }

        let mut grid = PixelGrid::new(width as i32, height as i32);
        for (x, y, px) in img.enumerate_pixels() {
            let Rgb([r, g, b]) = *px;
            // In-bounds by construction, so set cannot fail.
            let _ = grid.set(Point::new(x as i32, y as i32), Color::from_rgb(r, g, b));
        }
        Ok(grid)
    }

    /// Encode the grid as a true-color raster at `path`.
    ///
    /// The format is picked from the file extension, as `image` does.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RasterError> {
        let mut img = RgbImage::new(self.width() as u32, self.height() as u32);
        for (p, color) in self.iter() {
            let (r, g, b) = color.rgb();
            img.put_pixel(p.x as u32, p.y as u32, Rgb([r, g, b]));
        }
        img.save(path)?;
        Ok(())
    }
}

/// Derive the route image path next to `input`: `maze.bmp` → `maze_route.bmp`.
pub fn route_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "maze".to_string());
    let mut name = format!("{stem}_route");
    if let Some(ext) = input.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    input.with_file_name(name)
}
