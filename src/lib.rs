//! Trajectory construction from AIS position reports.
//!
//! Reports are grouped per vessel, cleaned of speed outliers and split into
//! alternating moving and stopped trajectories:
//!
//! ```text
//! csv -> ingest -> dispatcher -> outlier -> segmenter -> assembler -> export
//! ```

pub mod assembler;
pub mod config;
pub mod dispatcher;
pub mod export;
pub mod ingest;
pub mod mode;
pub mod model;
pub mod outlier;
pub mod projection;
pub mod segmenter;
pub mod speed;
pub mod temporal;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use config::{IngestConfig, TrajectoryConfig};
use dispatcher::build_trajectories;
use log::info;
use std::time::Instant;

pub use dispatcher::{BuildOutcome, VesselSummary};
pub use model::{AisPoint, TrajectoryRecord};

#[derive(Debug)]
pub struct Config {
    paths: Vec<String>,
    output: String,
    jobs: usize,
    trajectory: TrajectoryConfig,
    ingest: IngestConfig,
}

pub fn get_arg() -> Result<Config> {
    config_from(&command().get_matches())
}

fn command() -> Command {
    Command::new("ais-trajectory")
        .version("0.1")
        .about("build vessel trajectories from AIS files [csv]")
        .arg(
            Arg::new("paths")
                .short('f')
                .long("file-path")
                .action(ArgAction::Append)
                .required(true)
                .help("get file path to parse"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .default_value("trajectories.csv")
                .help("where to write the trajectory rows"),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .value_parser(value_parser!(usize))
                .help("worker threads, defaults to available parallelism"),
        )
        .arg(
            Arg::new("speed-threshold")
                .long("speed-threshold")
                .value_parser(value_parser!(f64))
                .default_value("100")
                .help("knots above which a report is an outlier"),
        )
        .arg(
            Arg::new("speed-tolerance")
                .long("speed-tolerance")
                .value_parser(value_parser!(f64))
                .default_value("2")
                .help("knots the reported speed may differ from the calculated one"),
        )
        .arg(
            Arg::new("stopped-speed")
                .long("stopped-speed")
                .value_parser(value_parser!(f64))
                .default_value("0.5")
                .help("knots below which a vessel may be stopped"),
        )
        .arg(
            Arg::new("stopped-duration")
                .long("stopped-duration")
                .value_parser(value_parser!(i64))
                .default_value("300")
                .help("seconds of slow reports before a stop is inferred"),
        )
        .arg(
            Arg::new("gap")
                .long("gap")
                .value_parser(value_parser!(i64))
                .default_value("900")
                .help("seconds between reports that split a trajectory"),
        )
        .arg(
            Arg::new("min-points")
                .long("min-points")
                .value_parser(value_parser!(usize))
                .default_value("2")
                .help("trajectories need more points than this"),
        )
}

fn config_from(matches: &ArgMatches) -> Result<Config> {
    let files = matches
        .get_many::<String>("paths")
        .unwrap_or_default()
        .cloned()
        .collect::<Vec<String>>();

    let jobs = match matches.get_one::<usize>("jobs") {
        Some(&jobs) => jobs,
        None => std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1),
    };

    let trajectory = TrajectoryConfig {
        speed_threshold_knots: *matches
            .get_one::<f64>("speed-threshold")
            .context("missing speed threshold")?,
        computed_vs_reported_knots: *matches
            .get_one::<f64>("speed-tolerance")
            .context("missing speed tolerance")?,
        stopped_knots_threshold: *matches
            .get_one::<f64>("stopped-speed")
            .context("missing stopped speed")?,
        stopped_duration_seconds: *matches
            .get_one::<i64>("stopped-duration")
            .context("missing stopped duration")?,
        point_time_gap_seconds: *matches.get_one::<i64>("gap").context("missing gap")?,
        min_points_per_trajectory: *matches
            .get_one::<usize>("min-points")
            .context("missing minimum points")?,
    };
    trajectory.validate()?;

    Ok(Config {
        paths: files,
        output: matches
            .get_one::<String>("output")
            .cloned()
            .unwrap_or_default(),
        jobs,
        trajectory,
        ingest: IngestConfig::default(),
    })
}

fn timed<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    info!("{} took {:?}", name, start.elapsed());
    result
}

pub fn run(config: Config) -> Result<()> {
    info!("config is {:?}", config);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()
        .context("failed to build worker pool")?;

    let points = pool.install(|| timed("reading", || read_all(&config.paths, &config.ingest)))?;

    let outcome = timed("trajectory construction", || {
        pool.install(|| build_trajectories(points, &config.trajectory))
    });
    info!(
        "built {} trajectories for {} vessels ({} outliers removed, {} points in dropped spans)",
        outcome.trajectories.len(),
        outcome.vessels.len(),
        outcome.outliers(),
        outcome.dropped_points()
    );

    timed("writing", || {
        export::write_trajectories(&config.output, &outcome.trajectories)
    })
}

fn read_all(paths: &[String], ingest: &IngestConfig) -> Result<Vec<AisPoint>> {
    use rayon::prelude::*;

    let summaries = paths
        .par_iter()
        .map(|x| ingest::read_points(x, ingest))
        .collect::<Result<Vec<_>>>()?;

    Ok(summaries.into_iter().flat_map(|s| s.points).collect())
}
