use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{builder::Builder, settings::Style, Table, Tabled};
use tracing::{error, warn};

use vdotrs::config::AppConfig;
use vdotrs::error::ErrorSeverity;
use vdotrs::export::{csv as csv_export, json as json_export, ExportFormat};
use vdotrs::logging::{init_logging, LogFormat, LogLevel};
use vdotrs::units::Unit;
use vdotrs::{
    calculate_split_by_name, derive_paces_from_vdot, estimate_vdot, group_athletes, project_time,
    split_matrix, try_parse_duration, try_project_time, Athlete, Distance, PaceError, PaceReport,
    VdotError, Workout,
};

/// vdotrs - VDOT pace engine CLI
///
/// Turns a race performance into a VDOT fitness index, training paces
/// for every zone, and target splits for workout intervals.
#[derive(Parser)]
#[command(name = "vdotrs")]
#[command(version)]
#[command(about = "VDOT training pace and split calculator", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format (pretty, json, compact)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show training and race paces per mile
    Paces {
        /// 5K race time (MM:SS or H:MM:SS)
        #[arg(required_unless_present = "vdot")]
        five_k: Option<String>,

        /// Use a known VDOT instead of a 5K time
        #[arg(long, conflicts_with = "five_k")]
        vdot: Option<f64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Estimate VDOT from a race performance
    Vdot {
        /// Race distance
        #[arg(short, long)]
        distance: f64,

        /// Distance unit (m, km, mi)
        #[arg(short, long, default_value = "m")]
        unit: Unit,

        /// Finish time (MM:SS or H:MM:SS)
        #[arg(short, long)]
        time: String,
    },

    /// Predict a race time for a distance at a given VDOT
    Predict {
        #[arg(long)]
        vdot: f64,

        /// Race distance
        #[arg(short, long)]
        distance: f64,

        /// Distance unit (m, km, mi)
        #[arg(short, long, default_value = "m")]
        unit: Unit,

        /// Reject VDOT values that cannot be projected for this distance
        #[arg(long)]
        strict: bool,
    },

    /// Target split for a single interval
    Split {
        /// Interval distance
        #[arg(short, long)]
        distance: f64,

        /// Distance unit (m, km, mi)
        #[arg(short, long, default_value = "m")]
        unit: Unit,

        /// Zone name, e.g. "CV", "Tempo", "1600m Race"
        #[arg(short, long)]
        zone: String,

        #[arg(long)]
        vdot: f64,
    },

    /// Zone x distance split table
    Matrix {
        #[arg(long, required_unless_present = "five_k")]
        vdot: Option<f64>,

        /// 5K race time to derive VDOT from
        #[arg(long, conflicts_with = "vdot")]
        five_k: Option<String>,

        /// Also write the matrix to a file (.csv or .json)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Splits and volume for a workout JSON file
    Workout {
        /// Workout JSON (title, description, items)
        #[arg(short, long)]
        file: PathBuf,

        #[arg(long)]
        vdot: f64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Group athletes by VDOT with per-athlete splits for one interval
    Group {
        /// Athletes JSON array (id, name, vdot)
        #[arg(short, long)]
        athletes: PathBuf,

        /// Workout JSON whose interval is split
        #[arg(short, long)]
        workout: PathBuf,

        /// Index of the workout interval to split
        #[arg(short, long, default_value = "0")]
        interval: usize,

        /// Athletes per group (defaults to the configured size)
        #[arg(short, long)]
        size: Option<usize>,
    },

    /// Configure application settings
    Config {
        /// List all configuration options
        #[arg(short, long)]
        list: bool,

        /// Set a configuration value (KEY=VALUE)
        #[arg(short, long)]
        set: Option<String>,

        /// Get a configuration value
        #[arg(short, long)]
        get: Option<String>,
    },
}

#[derive(Tabled)]
struct PaceRow {
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Pace /mi")]
    pace: String,
}

#[derive(Tabled)]
struct IntervalRow {
    #[tabled(rename = "Interval")]
    label: String,
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Split")]
    split: String,
    #[tabled(rename = "Recovery")]
    recovery: String,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        report_error(&err);
        std::process::exit(1);
    }
}

/// Log a failed command at its severity and print a user-facing message
fn report_error(err: &anyhow::Error) {
    let pace = err.downcast_ref::<PaceError>().cloned().map(VdotError::from);

    let message = match err.downcast_ref::<VdotError>().or(pace.as_ref()) {
        Some(vdot_error) => {
            match vdot_error.severity() {
                ErrorSeverity::Error => error!(error = %vdot_error, "Command failed"),
                ErrorSeverity::Warning => warn!(error = %vdot_error, "Command rejected input"),
            }
            vdot_error.user_message()
        }
        None => {
            error!(error = %err, "Command failed");
            format!("{:#}", err)
        }
    };

    eprintln!("{} {}", "Error:".red().bold(), message);
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_config_path);
    let mut config = AppConfig::load_or_default(Some(&config_path));

    let mut log_config = config.logging.clone();
    log_config.level = LogLevel::from_verbosity(cli.verbose, log_config.level);
    if let Some(format) = cli.log_format {
        log_config.format = format;
    }
    init_logging(&log_config)?;

    if cli.verbose > 0 {
        eprintln!("{}", format!("Log level: {}", log_config.level.to_filter()).dimmed());
    }

    match cli.command {
        Commands::Paces { five_k, vdot, json } => {
            let vdot = match (vdot, five_k) {
                (Some(vdot), _) => vdot,
                (None, Some(time)) => vdot_from_five_k(&time)?,
                (None, None) => return Err(anyhow!("Provide a 5K time or --vdot")),
            };
            let report = derive_paces_from_vdot(vdot);

            if json || config.display.json_output {
                println!("{}", json_export::to_json(&report)?);
            } else {
                print_pace_report(&report);
            }
        }

        Commands::Vdot { distance, unit, time } => {
            let seconds = try_parse_duration(&time)?;
            let meters = Distance::new(distance, unit).to_meters();
            let vdot = estimate_vdot(meters, seconds);
            println!("{} {:.1}", "VDOT:".green().bold(), vdot);
        }

        Commands::Predict {
            vdot,
            distance,
            unit,
            strict,
        } => {
            let meters = Distance::new(distance, unit).to_meters();
            let seconds = if strict {
                try_project_time(vdot, meters)?
            } else {
                project_time(vdot, meters)
            };
            println!(
                "{} {} in {}",
                "Predicted:".blue().bold(),
                Distance::new(distance, unit),
                vdotrs::format_duration(seconds, seconds < 180.0)
            );
        }

        Commands::Split {
            distance,
            unit,
            zone,
            vdot,
        } => {
            let split = calculate_split_by_name(distance, unit, &zone, vdot);
            println!("{}", split.cyan().bold());
        }

        Commands::Matrix {
            vdot,
            five_k,
            output,
        } => {
            let vdot = match (vdot, five_k) {
                (Some(vdot), _) => vdot,
                (None, Some(time)) => vdot_from_five_k(&time)?,
                (None, None) => return Err(anyhow!("Provide --vdot or --five-k")),
            };
            let matrix = split_matrix(
                vdot,
                &config.display.matrix_zones,
                &config.display.split_distances,
            );

            let mut builder = Builder::default();
            let mut header = vec!["Zone".to_string()];
            header.extend(matrix.columns.iter().map(|c| c.label.clone()));
            builder.push_record(header);
            for row in &matrix.rows {
                let mut record = vec![row.zone.short_name().to_string()];
                record.extend(row.splits.iter().cloned());
                builder.push_record(record);
            }
            let mut table = builder.build();
            table.with(Style::rounded());

            println!("{} {:.1}", "VDOT".magenta().bold(), vdot);
            println!("{}", table);

            if let Some(path) = output {
                ExportFormat::from_path(&path)
                    .and_then(|format| match format {
                        ExportFormat::Csv => csv_export::export_split_matrix(&matrix, &path),
                        ExportFormat::Json => json_export::export_json(&matrix, &path),
                    })
                    .map_err(|e| VdotError::export(&path, e))?;
                println!("{}", format!("✓ Matrix written to {}", path.display()).green());
            }
        }

        Commands::Workout { file, vdot, json } => {
            let workout: Workout = read_json(&file)?;
            let splits = workout.splits(vdot);

            if json || config.display.json_output {
                println!("{}", json_export::to_json(&splits)?);
            } else {
                println!("{}", workout.title.yellow().bold());
                if !workout.description.is_empty() {
                    println!("{}", workout.description.dimmed());
                }

                let rows: Vec<IntervalRow> = splits
                    .into_iter()
                    .map(|s| IntervalRow {
                        label: s.label,
                        zone: s.zone.to_string(),
                        split: s.split,
                        recovery: s.recovery.unwrap_or_default(),
                    })
                    .collect();
                let mut table = Table::new(rows);
                table.with(Style::rounded());
                println!("{}", table);
            }
            println!("{} {:.1} mi", "Volume:".yellow(), workout.total_volume_miles());
        }

        Commands::Group {
            athletes,
            workout,
            interval,
            size,
        } => {
            let athletes: Vec<Athlete> = read_json(&athletes)?;
            let workout: Workout = read_json(&workout)?;
            let item = workout.items.get(interval).ok_or_else(|| {
                anyhow!(
                    "Workout has {} intervals, index {} is out of range",
                    workout.items.len(),
                    interval
                )
            })?;

            let groups = group_athletes(
                &athletes,
                size.unwrap_or(config.grouping.group_size),
                &config.grouping.group_names,
            );
            if groups.is_empty() {
                println!("{}", "No athletes with a VDOT to group".yellow());
            }

            println!("{} {} @ {}", "Interval:".white().bold(), item.label(), item.zone);
            for group in &groups {
                println!("\n{}", group.name.green().bold());
                for split in group.splits_for(item) {
                    println!("  {:<24} {}", split.athlete, split.split);
                }
            }
        }

        Commands::Config { list, set, get } => {
            if list {
                for key in AppConfig::KEYS {
                    println!("{} = {}", key, config.get(key)?);
                }
            } else if let Some(key_value) = set {
                let (key, value) = key_value
                    .split_once('=')
                    .ok_or_else(|| anyhow!("Expected KEY=VALUE, got {}", key_value))?;
                config.set(key.trim(), value)?;
                config.save_to_file(&config_path)?;
                println!("{}", format!("✓ {} updated", key.trim()).white());
            } else if let Some(key) = get {
                println!("{}", config.get(&key)?);
            } else {
                println!("Config file: {}", config_path.display());
            }
        }
    }

    Ok(())
}

fn vdot_from_five_k(time: &str) -> Result<f64> {
    let seconds = try_parse_duration(time)?;
    Ok(estimate_vdot(5000.0, seconds))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_pace_report(report: &PaceReport) {
    println!("{} {:.1}", "VDOT".green().bold(), report.vdot);

    let rows: Vec<PaceRow> = report
        .entries()
        .map(|(zone, pace)| PaceRow {
            zone: zone.to_string(),
            pace: pace.to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}
