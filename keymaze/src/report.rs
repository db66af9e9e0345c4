//! Plain-text waypoint reports written alongside the route image.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use keymaze_paths::Solution;

/// `<stem>_route_points.txt` next to the input image.
pub fn points_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("maze");
    input.with_file_name(format!("{stem}_route_points.txt"))
}

/// Write the route waypoints in travel order, one `x y` pair per line.
pub fn write_solution(input: &Path, solution: &Solution) -> anyhow::Result<PathBuf> {
    let path = points_output_path(input);
    let mut text = String::new();
    for p in solution.waypoints() {
        text.push_str(&format!("{} {}\n", p.x, p.y));
    }
    fs::write(&path, text)
        .with_context(|| format!("failed to write route points {}", path.display()))?;
    Ok(path)
}

/// Record that the maze has no route.
pub fn write_no_solution(input: &Path) -> anyhow::Result<PathBuf> {
    let path = points_output_path(input);
    fs::write(&path, "No solution\n")
        .with_context(|| format!("failed to write route points {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_path_sits_next_to_the_input() {
        assert_eq!(
            points_output_path(Path::new("mazes/big.png")),
            PathBuf::from("mazes/big_route_points.txt")
        );
        assert_eq!(
            points_output_path(Path::new("flat.bmp")),
            PathBuf::from("flat_route_points.txt")
        );
    }
}
