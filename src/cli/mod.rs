//! Command-line interface for the temperature logger pipeline.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::PathBuf;
use std::time::Instant;

use crate::config::PipelineConfig;
use crate::core::{loaders, segment, writers};
use crate::processors::{assemble, discovery, validate};

#[derive(Parser)]
#[command(name = "templog-pipeline")]
#[command(about = "Temperature logger batch pipeline", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a directory of logger CSV exports into one day table
    Process {
        /// Directory containing logger CSV exports
        input_dir: PathBuf,
        /// Output CSV file for the day table
        output: PathBuf,
        /// First data row of interest (1-indexed, overrides config)
        #[arg(long)]
        start_row: Option<usize>,
        /// Last data row of interest (1-indexed, overrides config)
        #[arg(long)]
        end_row: Option<usize>,
        /// End each day with the value that starts the following day
        #[arg(long)]
        repeat_last_values: bool,
        /// Also export the validated raw readings to this CSV file
        #[arg(long)]
        raw_output: Option<PathBuf>,
    },

    /// Show sampling metadata for logger CSV exports
    Inspect {
        /// Logger CSV files to inspect
        files: Vec<PathBuf>,
    },

    /// Write a default YAML config file
    InitConfig {
        /// Destination path for the config file
        path: PathBuf,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<62} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.len() > 39 {
            format!("{}...", &value[..36])
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<39} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => match PipelineConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                PipelineConfig::default()
            }
        },
        None => PipelineConfig::default(),
    };

    // Dispatch to subcommands
    match cli.command {
        Commands::Process {
            input_dir,
            output,
            start_row,
            end_row,
            repeat_last_values,
            raw_output,
        } => {
            cmd_process(
                &input_dir,
                &output,
                start_row,
                end_row,
                repeat_last_values,
                raw_output,
                &config,
            );
        }
        Commands::Inspect { files } => {
            cmd_inspect(&files);
        }
        Commands::InitConfig { path } => {
            cmd_init_config(&path, &config);
        }
    }
}

fn cmd_process(
    input_dir: &PathBuf,
    output: &PathBuf,
    start_row: Option<usize>,
    end_row: Option<usize>,
    repeat_last_values: bool,
    raw_output: Option<PathBuf>,
    config: &PipelineConfig,
) {
    let start = Instant::now();

    // CLI values override config values
    let effective_start = start_row.unwrap_or(config.rows.start_row);
    let effective_end = match end_row.or(config.rows.end_row) {
        Some(row) => row,
        None => {
            error!("end_row must be set via --end-row or the config file");
            std::process::exit(1);
        }
    };
    let effective_repeat = repeat_last_values || config.segmentation.repeat_last_values;

    println!("Processing logger exports...");
    println!("Input directory: {}", input_dir.display());
    println!("Output: {}", output.display());
    println!("Row window: [{}, {}]", effective_start, effective_end);
    println!("Repeat last values: {}", effective_repeat);

    let spinner = create_spinner("Scanning directory for CSV files...");

    let csv_files = match discovery::find_csv_files(input_dir) {
        Ok(files) => files,
        Err(e) => {
            spinner.finish_and_clear();
            error!("Discovery failed: {}", e);
            std::process::exit(1);
        }
    };

    spinner.set_message("Extracting source files...");

    let mut sources = Vec::with_capacity(csv_files.len());
    for path in &csv_files {
        match loaders::load_series(path, effective_start, effective_end) {
            Ok(series) => {
                info!(
                    "Extracted {} readings from {}",
                    series.len(),
                    path.display()
                );
                sources.push(series);
            }
            Err(e) => {
                spinner.finish_and_clear();
                error!("Extraction failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    spinner.set_message("Validating batch consistency...");

    let spec = match validate::confirm_spec(&sources) {
        Ok(spec) => spec,
        Err(e) => {
            spinner.finish_and_clear();
            error!("Validation failed: {}", e);
            std::process::exit(1);
        }
    };

    let day_length = match segment::samples_per_day(&spec) {
        Ok(len) => len,
        Err(e) => {
            spinner.finish_and_clear();
            error!("Segmentation failed: {}", e);
            std::process::exit(1);
        }
    };

    spinner.set_message("Segmenting into experimental days...");

    let mut buckets_per_source = Vec::with_capacity(sources.len());
    for series in &sources {
        match segment::segment_days(&series.values(), day_length, effective_repeat) {
            Ok(buckets) => {
                info!(
                    "{}: {} day bucket(s)",
                    series.source.display(),
                    buckets.len()
                );
                buckets_per_source.push(buckets);
            }
            Err(e) => {
                spinner.finish_and_clear();
                error!("Segmentation failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    let table = assemble::assemble(&buckets_per_source);

    if let Some(raw_path) = &raw_output {
        if let Err(e) = writers::write_raw_series(raw_path, &sources) {
            spinner.finish_and_clear();
            error!("Raw export failed: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = writers::write_day_table(output, &table, &config.output.missing_marker) {
        spinner.finish_and_clear();
        error!("Table write failed: {}", e);
        std::process::exit(1);
    }

    spinner.finish_and_clear();

    let total_readings: usize = sources.iter().map(|s| s.len()).sum();

    print_summary(
        "Processing Complete",
        &[
            ("Input directory", input_dir.display().to_string()),
            ("Source files", csv_files.len().to_string()),
            ("Readings", total_readings.to_string()),
            ("Sample rate", format!("{} minute(s)", spec.interval_minutes)),
            ("Units", spec.unit.clone()),
            ("Samples per day", day_length.to_string()),
            ("Day columns", table.num_columns().to_string()),
            ("Table rows", table.num_rows().to_string()),
            ("Output", output.display().to_string()),
            ("Duration", format!("{:.2?}", start.elapsed())),
        ],
    );
}

fn cmd_inspect(files: &[PathBuf]) {
    if files.is_empty() {
        error!("No files to inspect");
        std::process::exit(1);
    }

    for path in files {
        match loaders::sniff_metadata(path) {
            Ok((spec, total_rows)) => {
                print_summary(
                    &format!("{}", path.display()),
                    &[
                        ("Sample rate", format!("{} minute(s)", spec.interval_minutes)),
                        ("Units", spec.unit.clone()),
                        ("Total rows", total_rows.to_string()),
                        (
                            "Samples per day",
                            match segment::samples_per_day(&spec) {
                                Ok(len) => len.to_string(),
                                Err(_) => "not an exact day divisor".to_string(),
                            },
                        ),
                    ],
                );
            }
            Err(e) => {
                error!("Inspection failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn cmd_init_config(path: &PathBuf, config: &PipelineConfig) {
    match config.to_yaml(path) {
        Ok(()) => {
            println!("Wrote config to {}", path.display());
        }
        Err(e) => {
            error!("Failed to write config: {}", e);
            std::process::exit(1);
        }
    }
}
