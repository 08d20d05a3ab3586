use std::env;
use std::path::{Path, PathBuf};
use std::process;

use log::info;
use serde::Serialize;

use graphcut::graph::{FlowSummary, MinCutEngine, Segmentation};
use graphcut::io;
use graphcut::types::{Connectivity, Point};
use graphcut::{Result, SegmentError, SegmentOptions};

fn usage() {
    println!("Usage: cli [--csv] [--eight] [--scaling] [--config <options.json>] [--max-augmentations <n>] <input> <source row,col> <sink row,col> [--out <boundary.png>] [--report <report.json>]");
    println!("Option --csv reads the input as comma-separated intensities instead of an image.");
    println!("Option --eight connects diagonal neighbours (default: 4-connectivity).");
    println!("Option --scaling enables capacity scaling.");
    println!("Option --config reads engine options from a JSON file; flags override it.");
}

#[derive(Serialize)]
struct Report<'a> {
    options: SegmentOptions,
    summary: FlowSummary,
    segmentation: &'a Segmentation,
}

struct Args {
    csv: bool,
    eight: bool,
    scaling: bool,
    config: Option<PathBuf>,
    max_augmentations: Option<u64>,
    out: Option<PathBuf>,
    report: Option<PathBuf>,
    positional: Vec<String>,
}

fn parse_args(raw: Vec<String>) -> Result<Args> {
    let mut args = Args {
        csv: false,
        eight: false,
        scaling: false,
        config: None,
        max_augmentations: None,
        out: None,
        report: None,
        positional: Vec::new(),
    };
    let mut iter = raw.into_iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .ok_or_else(|| SegmentError::InvalidArgument(format!("{flag} needs a value")))
        };
        match arg.as_str() {
            "--csv" => args.csv = true,
            "--eight" => args.eight = true,
            "--scaling" => args.scaling = true,
            "--config" => args.config = Some(PathBuf::from(value("--config")?)),
            "--out" => args.out = Some(PathBuf::from(value("--out")?)),
            "--report" => args.report = Some(PathBuf::from(value("--report")?)),
            "--max-augmentations" => {
                let n = value("--max-augmentations")?;
                args.max_augmentations = Some(n.parse().map_err(|_| {
                    SegmentError::InvalidArgument(format!(
                        "Expected number of augmentations, but got: {n}"
                    ))
                })?);
            }
            flag if flag.starts_with("--") => {
                return Err(SegmentError::InvalidArgument(format!("Unknown option {flag}")))
            }
            other => args.positional.push(other.to_string()),
        }
    }
    Ok(args)
}

fn main() {
    env_logger::init();
    let raw = env::args().skip(1).collect::<Vec<_>>();
    let args = match parse_args(raw) {
        Ok(args) if args.positional.len() == 3 => args,
        Ok(_) => {
            usage();
            process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            usage();
            process::exit(2);
        }
    };
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Engine options from `--config` (or the defaults), with flags taking precedence.
fn resolve_options(args: &Args) -> Result<SegmentOptions> {
    let mut options = match &args.config {
        Some(path) => SegmentOptions::from_json_file(path)?,
        None => SegmentOptions::default(),
    };
    if args.eight {
        options = options.with_connectivity(Connectivity::Eight);
    }
    if args.scaling {
        options = options.with_capacity_scaling(true);
    }
    if args.max_augmentations.is_some() {
        options = options.with_max_augmentations(args.max_augmentations);
    }
    Ok(options)
}

fn run(args: Args) -> Result<()> {
    let options = resolve_options(&args)?;

    let input = Path::new(&args.positional[0]);
    let source: Point = args.positional[1].parse()?;
    let sink: Point = args.positional[2].parse()?;

    println!("Segmenting {} from {source} to {sink}", input.display());
    let grid = if args.csv {
        io::read_grid_csv(input)?
    } else {
        io::load_grayscale_image(input)?
    };
    info!("Read {}x{} grid", grid.rows(), grid.cols());

    let mut engine = MinCutEngine::new(&grid, source, sink, options)?;
    let summary = engine.run()?;
    let segmentation = engine.extract_cut()?;
    println!("Found cut: {}", segmentation.cut_value);

    let result = json::object! {
        cutValue: segmentation.cut_value,
        maxFlow: summary.max_flow,
        augmentations: summary.augmentations,
        mode: summary.mode.to_string(),
        connectivity: options.connectivity.to_string(),
        cutEdges: segmentation.cut_edges.len(),
        boundaryPixels: segmentation.boundary_pixel_count(),
        sourceRegionPixels: segmentation.reachable.count(true),
    };
    println!("{result}");

    if let Some(out) = &args.out {
        io::write_boundary_image(&segmentation.boundary, out)?;
        println!("Wrote boundary image {}.", out.display());
    }
    if let Some(report) = &args.report {
        let value = Report {
            options,
            summary,
            segmentation: &segmentation,
        };
        io::write_json_file(report, &value)?;
        println!("Wrote report {}.", report.display());
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::{parse_args, resolve_options};
    use graphcut::types::Connectivity;
    use graphcut::{SegmentError, SegmentOptions};

    fn raw(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn positionals_and_flags() {
        let args = parse_args(raw(&[
            "--csv",
            "grid.csv",
            "1,2",
            "--out",
            "cut.png",
            "3,4",
            "--report",
            "report.json",
        ]))
        .unwrap();
        assert!(args.csv);
        assert!(!args.eight);
        assert_eq!(args.positional, ["grid.csv", "1,2", "3,4"]);
        assert_eq!(args.out.unwrap().to_str(), Some("cut.png"));
        assert_eq!(args.report.unwrap().to_str(), Some("report.json"));
    }

    #[test]
    fn unknown_flag() {
        assert!(matches!(
            parse_args(raw(&["img.png", "--verbose", "0,0", "1,1"])),
            Err(SegmentError::InvalidArgument(message)) if message.contains("--verbose")
        ));
    }

    #[test]
    fn flag_without_value() {
        assert!(matches!(
            parse_args(raw(&["img.png", "0,0", "1,1", "--out"])),
            Err(SegmentError::InvalidArgument(message)) if message.contains("--out")
        ));
        assert!(matches!(
            parse_args(raw(&["--max-augmentations", "many", "img.png"])),
            Err(SegmentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn defaults_without_config() {
        let args = parse_args(raw(&["img.png", "0,0", "1,1"])).unwrap();
        assert_eq!(resolve_options(&args).unwrap(), SegmentOptions::default());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = std::env::temp_dir().join(format!("graphcut-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let config = dir.join("options.json");
        fs::write(
            &config,
            r#"{"connectivity": "four", "capacity_scaling": false, "max_augmentations": 10}"#,
        )
        .unwrap();
        let config = config.to_str().unwrap();

        let args = parse_args(raw(&["--config", config, "img.png", "0,0", "1,1"])).unwrap();
        let from_file = resolve_options(&args).unwrap();
        assert_eq!(from_file.connectivity, Connectivity::Four);
        assert!(!from_file.capacity_scaling);
        assert_eq!(from_file.max_augmentations, Some(10));

        let args = parse_args(raw(&[
            "--config",
            config,
            "--eight",
            "--scaling",
            "--max-augmentations",
            "500",
            "img.png",
            "0,0",
            "1,1",
        ]))
        .unwrap();
        let merged = resolve_options(&args).unwrap();
        assert_eq!(merged.connectivity, Connectivity::Eight);
        assert!(merged.capacity_scaling);
        assert_eq!(merged.max_augmentations, Some(500));

        // Flags that are absent leave the file's values alone.
        let args =
            parse_args(raw(&["--config", config, "--scaling", "a", "0,0", "1,1"])).unwrap();
        let partial = resolve_options(&args).unwrap();
        assert_eq!(partial.connectivity, Connectivity::Four);
        assert!(partial.capacity_scaling);
        assert_eq!(partial.max_augmentations, Some(10));
    }

    #[test]
    fn missing_config_file() {
        let args = parse_args(raw(&[
            "--config",
            "/nonexistent/options.json",
            "a",
            "0,0",
            "1,1",
        ]))
        .unwrap();
        assert!(matches!(resolve_options(&args), Err(SegmentError::Io(_))));
    }
}
