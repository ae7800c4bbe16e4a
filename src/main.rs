use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use teamzones::codec::{encode_area_points, parse_area_points};
use teamzones::config::FileConfig;
use teamzones::domain::{DEFAULT_FILL_COLOR, load_team_records};
use teamzones::{Label, TeamArea, TeamRecord, TerritoryLocator};

/// Find which team territory contains a map point
///
/// Examples:
///   # Which team owns this spot?
///   teamzones --teams teams.json --lat 55.7522 --lon 37.6156
///
///   # List every team whose territory covers the point (overlaps included)
///   teamzones --teams teams.json --lat 55.7522 --lon 37.6156 --all
///
///   # Print label anchors for all territories as JSON
///   teamzones --teams teams.json --labels --json
///
///   # Rewrite all areas as {"lat", "lon"} objects
///   teamzones --teams teams.json --normalize > teams.normalized.json
#[derive(Parser, Debug)]
#[command(name = "teamzones")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches teamzones.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Team list: JSON array of cached team rows
    #[arg(short = 't', long)]
    teams: Option<PathBuf>,

    /// Latitude of the query point (use with --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the query point (use with --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Report every containing team instead of the first one
    #[arg(short = 'a', long)]
    all: bool,

    /// Print label anchors (vertex mean) for every territory
    #[arg(short = 'l', long)]
    labels: bool,

    /// Print the team list with every area rewritten in the object layout
    #[arg(long, conflicts_with_all = ["lat", "lon", "all", "labels"])]
    normalize: bool,

    /// Machine-readable JSON output
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// CLI flags layered over the config file
#[derive(Debug, PartialEq)]
struct Settings {
    teams: PathBuf,
    point: Option<(f64, f64)>,
    all: bool,
    labels: bool,
    normalize: bool,
    json: bool,
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct TeamMatch<'a> {
    team_id: &'a str,
    team_name: &'a str,
    color: i32,
}

impl<'a> From<&'a TeamArea> for TeamMatch<'a> {
    fn from(area: &'a TeamArea) -> Self {
        Self {
            team_id: &area.team_id,
            team_name: &area.team_name,
            color: area.fill_color(DEFAULT_FILL_COLOR),
        }
    }
}

/// Everything `--json` prints, as one document
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<Label>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<Vec<TeamMatch<'a>>>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = load_file_config(&args)?;
    let settings = resolve_settings(&args, file_config.as_ref())?;
    init_tracing(settings.verbose);

    let stdout = io::stdout();
    run(&settings, &mut stdout.lock())
}

fn load_file_config(args: &Args) -> Result<Option<FileConfig>> {
    match args.config {
        Some(ref path) => {
            if !path.exists() {
                bail!("Config file not found: {:?}", path);
            }
            Ok(Some(FileConfig::from_file(path)?))
        }
        None => Ok(FileConfig::load()),
    }
}

fn resolve_settings(args: &Args, file_config: Option<&FileConfig>) -> Result<Settings> {
    let teams = args
        .teams
        .clone()
        .or_else(|| file_config.and_then(|c| c.teams.clone()));
    let Some(teams) = teams else {
        bail!("No team list given: pass --teams or set `teams` in teamzones.toml");
    };

    let point = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Some((lat, lon)),
        _ => None,
    };
    if point.is_none() && !args.labels && !args.normalize {
        bail!("Nothing to do: pass --lat/--lon to locate a point, --labels, or --normalize");
    }

    Ok(Settings {
        teams,
        point,
        all: args.all,
        labels: args.labels,
        normalize: args.normalize,
        json: args.json || file_config.map(|c| c.json).unwrap_or(false),
        verbose: args.verbose || file_config.map(|c| c.verbose).unwrap_or(false),
    })
}

fn run(settings: &Settings, out: &mut impl Write) -> Result<()> {
    let records = load_team_records(&settings.teams).context("Failed to load teams")?;

    if settings.normalize {
        let normalized = normalize_records(&records);
        writeln!(out, "{}", serde_json::to_string_pretty(&normalized)?)?;
        return Ok(());
    }

    let (locator, report) = TerritoryLocator::from_records(&records);
    tracing::info!(
        path = %settings.teams.display(),
        loaded = report.loaded,
        skipped_degenerate = report.skipped_degenerate,
        skipped_unparseable = report.skipped_unparseable,
        "loaded team territories"
    );

    let labels = settings.labels.then(|| locator.labels());
    let matches: Option<Vec<&TeamArea>> = settings.point.map(|point| {
        if settings.all {
            locator.locate_all(point)
        } else {
            locator.locate(point).into_iter().collect()
        }
    });

    if settings.json {
        let report = JsonReport {
            labels,
            matches: matches.map(|m| m.into_iter().map(TeamMatch::from).collect()),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    if let Some(labels) = labels {
        print_labels(out, &labels)?;
    }
    if let (Some(point), Some(matches)) = (settings.point, matches) {
        print_matches(out, point, &matches)?;
    }

    Ok(())
}

/// Rewrite decodable area strings in the object layout; rows that fail to
/// decode are kept untouched.
fn normalize_records(records: &[TeamRecord]) -> Vec<TeamRecord> {
    records
        .iter()
        .map(|record| match parse_area_points(&record.area_points) {
            Ok(points) => TeamRecord {
                area_points: encode_area_points(&points),
                ..record.clone()
            },
            Err(e) => {
                tracing::warn!(team_id = %record.id, error = %e, "leaving unreadable area as-is");
                record.clone()
            }
        })
        .collect()
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn print_labels(out: &mut impl Write, labels: &[Label]) -> io::Result<()> {
    for label in labels {
        writeln!(
            out,
            "{}\t{}\t{:.6}\t{:.6}",
            label.team_id, label.team_name, label.lat, label.lon
        )?;
    }
    Ok(())
}

fn print_matches(out: &mut impl Write, point: (f64, f64), matches: &[&TeamArea]) -> io::Result<()> {
    let (lat, lon) = point;
    if matches.is_empty() {
        writeln!(out, "({:.6}, {:.6}): no team", lat, lon)?;
    }
    for area in matches {
        writeln!(
            out,
            "({:.6}, {:.6}): {} [{}]",
            lat, lon, area.team_name, area.team_id
        )?;
    }
    Ok(())
}
