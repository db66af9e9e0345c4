//! The image → analysis → search → render pipeline.

use std::path::PathBuf;

use anyhow::Context;
use keymaze_core::{PixelGrid, route_output_path};
use keymaze_paths::{MazeModel, Solver, draw_trail};

use crate::report;

/// Pipeline inputs.
pub struct Options {
    /// Maze image to solve.
    pub input: PathBuf,
    /// Where to write the route-annotated image. Defaults to
    /// `<stem>_route.<ext>` next to the input.
    pub output: Option<PathBuf>,
}

/// Pipeline result. A maze without a route is a normal outcome, not an
/// error; errors are reserved for bad input and I/O failures.
pub enum Outcome {
    Solved {
        output: PathBuf,
        report: PathBuf,
        waypoints: usize,
        keys: usize,
    },
    NoPath {
        report: PathBuf,
    },
}

/// Load, analyze, solve, and render one maze image.
pub fn run(opts: &Options) -> anyhow::Result<Outcome> {
    let mut grid = PixelGrid::load(&opts.input)
        .with_context(|| format!("failed to load maze image {}", opts.input.display()))?;
    log::info!(
        "loaded {}x{} maze from {}",
        grid.width(),
        grid.height(),
        opts.input.display()
    );

    let model = MazeModel::analyze(&grid)
        .with_context(|| format!("malformed maze image {}", opts.input.display()))?;
    log::info!(
        "found {} goal zone(s) and {} key pad(s)",
        model.goals.len(),
        model.pad_count()
    );

    let mut solver = Solver::new(grid.bounds());
    let Some(solution) = solver.find_path(&model, &grid) else {
        let report = report::write_no_solution(&opts.input)?;
        return Ok(Outcome::NoPath { report });
    };

    draw_trail(&solution, &mut grid).context("route left the grid while rendering")?;
    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| route_output_path(&opts.input));
    grid.save(&output)
        .with_context(|| format!("failed to write route image {}", output.display()))?;
    let report = report::write_solution(&opts.input, &solution)?;

    Ok(Outcome::Solved {
        output,
        report,
        waypoints: solution.waypoints().len(),
        keys: solution.inventory.len(),
    })
}
