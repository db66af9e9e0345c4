//! Command-line maze solver: image in, route-annotated image out.
//!
//! Exit codes: 0 solved, 1 no route, 2 bad arguments or malformed input.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use keymaze_lib::pipeline::{self, Options, Outcome};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = match parse_args(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: keymaze <maze-image> [output-image]");
            return ExitCode::from(2);
        }
    };

    match pipeline::run(&opts) {
        Ok(Outcome::Solved {
            output,
            report,
            waypoints,
            keys,
        }) => {
            println!("solved: {waypoints} waypoint(s), {keys} key(s) collected");
            println!("route image: {}", output.display());
            println!("route points: {}", report.display());
            ExitCode::SUCCESS
        }
        Ok(Outcome::NoPath { report }) => {
            println!("no route from start to any goal");
            println!("route points: {}", report.display());
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let input = args
        .next()
        .ok_or_else(|| "missing maze image argument".to_string())?;
    let output = args.next().map(PathBuf::from);
    if args.next().is_some() {
        return Err("too many arguments".to_string());
    }
    Ok(Options {
        input: PathBuf::from(input),
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> std::vec::IntoIter<String> {
        args.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parse_input_only() {
        let opts = parse_args(strings(&["maze.png"])).unwrap();
        assert_eq!(opts.input, PathBuf::from("maze.png"));
        assert_eq!(opts.output, None);
    }

    #[test]
    fn parse_input_and_output() {
        let opts = parse_args(strings(&["maze.png", "out.png"])).unwrap();
        assert_eq!(opts.output, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn parse_rejects_bad_arity() {
        assert!(parse_args(strings(&[])).is_err());
        assert!(parse_args(strings(&["a", "b", "c"])).is_err());
    }
}
