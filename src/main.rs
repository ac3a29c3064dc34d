use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::warn;
use schooldir::directory::{LOAD_WARNING, LoadedDirectory, load_from_path};
use schooldir::output;
use schooldir::utils::{self, AppConfig, LogTarget};
use std::path::PathBuf;
use termcolor::ColorChoice;

#[derive(Parser)]
#[command(name = "schooldir")]
#[command(about = "Terminal-first school registry lookup and student registration")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Schools file (overrides the configured data_path)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Config file (defaults to config.json in the app data directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reject rows that do not have exactly seven columns
    #[arg(long, global = true)]
    strict: bool,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    color: ColorWhen,
}

#[derive(Subcommand)]
enum Commands {
    /// Search schools by UDISE code, school name or district
    Search {
        /// Search query
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,

        /// Maximum number of results (defaults to the configured result_limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up a school by its exact UDISE code
    Lookup {
        /// UDISE code (case-sensitive)
        code: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show schools file statistics
    Stats {
        /// Also list rows that were tolerated or rejected
        #[arg(long)]
        issues: bool,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fill in the student registration form (interactive)
    Register,
    /// Show the effective configuration
    Config {
        /// Write the default configuration if no config file exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl From<ColorWhen> for ColorChoice {
    fn from(when: ColorWhen) -> Self {
        match when {
            ColorWhen::Auto => ColorChoice::Auto,
            ColorWhen::Always => ColorChoice::Always,
            ColorWhen::Never => ColorChoice::Never,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => utils::get_config_path()?,
    };
    let mut config = AppConfig::load_from(&config_path)?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    if cli.strict {
        config.strict_columns = true;
    }
    let color: ColorChoice = cli.color.into();

    let interactive = matches!(cli.command, None | Some(Commands::Register));
    if interactive {
        let log_path = utils::get_log_path()?;
        utils::init_logging(&config.log_level, LogTarget::File(&log_path))?;
    } else {
        utils::init_logging(&config.log_level, LogTarget::Stderr)?;
    }

    match cli.command {
        Some(Commands::Search { query, limit, json }) => {
            let query = query.join(" ");
            let directory = load_or_warn(&config, color)?.directory;
            let limit = limit.unwrap_or(config.result_limit);
            let results = directory.search_with_limit(&query, limit);

            if json {
                output::print_json(&results)?;
            } else {
                output::print_search_results(&results, &query, color)?;
            }

            if results.is_empty() {
                std::process::exit(1);
            }
        }
        Some(Commands::Lookup { code, json }) => {
            let directory = load_or_warn(&config, color)?.directory;

            match directory.find_by_exact_code(&code) {
                Some(record) if json => output::print_json(record)?,
                Some(record) => output::print_record(record, color)?,
                None => {
                    eprintln!("No school found for UDISE code {}", code);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Stats { issues, json }) => {
            let loaded = load_from_path(&config.data_path, config.parse_mode())?;
            let stats = loaded.directory.stats();

            if json {
                output::print_json(&stats)?;
            } else {
                println!("Schools file: {}", loaded.source.display());
                output::print_stats(&stats, color)?;
                println!(
                    "  {} rows with problems ({} rejected), loaded in {:.1}ms",
                    loaded.issues.len(),
                    loaded.rejected,
                    loaded.elapsed.as_secs_f64() * 1000.0
                );
            }

            if issues {
                output::print_issues(&loaded.issues, color)?;
            }
        }
        Some(Commands::Config { init }) => {
            if init && !config_path.exists() {
                AppConfig::default().save_to(&config_path)?;
                println!("Wrote default configuration");
            }
            println!("Config file: {}", config_path.display());
            println!(
                "{}",
                serde_json::to_string_pretty(&config).context("Failed to serialize config")?
            );
        }
        Some(Commands::Register) | None => {
            run_register(&config)?;
        }
    }

    Ok(())
}

/// Load the schools file; on failure warn and carry on with an empty directory
fn load_or_warn(config: &AppConfig, color: ColorChoice) -> Result<LoadedDirectory> {
    let spinner = utils::progress::load_spinner(&config.data_path);
    let result = load_from_path(&config.data_path, config.parse_mode());
    spinner.finish_and_clear();

    match result {
        Ok(loaded) => Ok(loaded),
        Err(e) => {
            warn!("{:#}", e);
            output::print_warning(LOAD_WARNING, color)?;
            Ok(LoadedDirectory::empty(&config.data_path, config.parse_mode()))
        }
    }
}

#[cfg(feature = "interactive")]
fn run_register(config: &AppConfig) -> Result<()> {
    let completed = schooldir::tui::run(
        config.data_path.clone(),
        config.parse_mode(),
        config.lookup_policy(),
    )?;

    match completed {
        Some(form) => {
            println!("Registration successful! Welcome to GAME RURAL INDIA.");
            output::print_json(&form)?;
        }
        None => {
            println!("Registration cancelled");
        }
    }

    Ok(())
}

#[cfg(not(feature = "interactive"))]
fn run_register(_config: &AppConfig) -> Result<()> {
    anyhow::bail!("Interactive registration requires the `interactive` feature")
}
