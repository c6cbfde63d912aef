use clap::Parser;
use independent_set::*;
use log::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

/// Maximum independent sets of graph datasets, by integer programming,
/// compared with the rounding of the linear relaxation.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Graphs in the GML format (optionally gzipped).
    /// Defaults to those of `data/karate.gml` and `data/power.gml` that exist,
    /// each possibly as a `.gml.gz` file.
    datasets: Vec<PathBuf>,

    /// Give up a solver call after this many seconds.
    #[arg(long, value_name = "SECONDS", value_parser = parse_seconds)]
    time_limit: Option<Duration>,

    /// Also write both programs of each dataset in the LP format in this directory.
    #[arg(long, value_name = "DIR")]
    export_lp: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Log debugging information.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_seconds(s: &str) -> std::result::Result<Duration, String> {
    let secs = s.parse::<f64>().map_err(|e| format!("{e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("{e}"))
}

const DEFAULT_DATASETS: [&str; 2] = ["data/karate", "data/power"];

fn default_datasets() -> Result<Vec<PathBuf>> {
    let mut res = Vec::new();
    for stem in DEFAULT_DATASETS {
        match [".gml", ".gml.gz"]
            .iter()
            .map(|ext| PathBuf::from(format!("{stem}{ext}")))
            .find(|path| path.is_file())
        {
            Some(path) => res.push(path),
            None => warn!("Skipping {stem}.gml: file not found"),
        }
    }
    if res.is_empty() {
        return Err(Error::NoDataset);
    }
    Ok(res)
}

fn export(dir: &Path, name: &str, graph: &Graph) -> Result<()> {
    fs::create_dir_all(dir)?;
    for (pb, suffix) in [
        (IndependentSetProblem::integer(graph), "ip"),
        (IndependentSetProblem::relaxed(graph), "lp"),
    ] {
        let path = dir.join(format!("{name}.{suffix}.lp"));
        info!("Writing {}", path.display());
        pb.write_lp(&path)?;
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<Report> {
    let solver = match cli.time_limit {
        Some(limit) => Solver::with_time_limit(limit),
        None => Solver::default(),
    };
    let datasets = if cli.datasets.is_empty() {
        default_datasets()?
    } else {
        cli.datasets.clone()
    };
    // Load everything first, so that a bad file is reported before solving
    let graphs = datasets
        .iter()
        .map(|path| {
            let graph = gml::load(path).map_err(|source| Error::Load {
                path: path.clone(),
                source,
            })?;
            Ok((gml::dataset_name(path), graph))
        })
        .collect::<Result<Vec<_>>>()?;
    let mut report = Report::default();
    for (name, graph) in &graphs {
        if let Some(dir) = &cli.export_lp {
            export(dir, name, graph)?;
        }
        report.analyses.push(analyse(name, graph, &solver)?);
    }
    Ok(report)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.verbose {
        init_debug_log()
    } else {
        init_default_log()
    }
    match run(&cli) {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(s) => println!("{s}"),
                    Err(e) => {
                        error!("{e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print!("{report}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
