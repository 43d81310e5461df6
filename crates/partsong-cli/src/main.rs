use anyhow::Result;
use clap::Parser;
use partsong_core::ExerciseId;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "partsong", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Exercise data file (default: ~/.local/share/partsong/exercises.toml)
    #[arg(long, global = true)]
    exercises: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Check a chord progression against the part-writing rules
    ///
    /// Reads a progression document (TOML or JSON, chosen by file extension)
    /// and runs every rule introduced up to and including the given chapter.
    /// Errors are reported in priority order: structural problems such as
    /// voice range and crossing first, then voice-leading problems such as
    /// parallel fifths and octaves.
    ///
    /// With --structure, each chord is also checked on its own for triad
    /// shape, spacing and doubling. Those findings are informational and do
    /// not affect the exit status.
    ///
    /// Exit status is non-zero when any rule error is found.
    Check {
        /// Path to the progression document
        file: PathBuf,

        /// Chapter whose cumulative rule set to apply (default: from config)
        #[arg(long)]
        chapter: Option<u32>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Also report per-chord structure findings
        #[arg(long)]
        structure: bool,
    },
    /// List the rules active at a chapter
    Rules {
        /// Chapter to list (default: every registered rule)
        #[arg(long)]
        chapter: Option<u32>,
    },
    /// Work with exercise data
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommand,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ExerciseCommand {
    /// List every exercise, grouped by chapter
    List {
        /// Exercise data file (overrides --exercises and config)
        file: Option<PathBuf>,
    },
    /// Show one exercise with its constraints and hints
    Show {
        /// Exercise id, e.g. 1-2
        id: ExerciseId,
    },
    /// Check the exercise data file for structural problems
    Lint,
    /// Check a solution against an exercise and score it
    Submit {
        /// Exercise id, e.g. 1-2
        id: ExerciseId,

        /// Path to the progression document holding the solution
        file: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Create the config file with defaults
    Init,
    /// Print an example config file
    Example,
}

fn log_level(verbose: u8, configured: &str) -> twyg::LogLevel {
    match verbose {
        0 => match configured.to_ascii_lowercase().as_str() {
            "trace" => twyg::LogLevel::Trace,
            "debug" => twyg::LogLevel::Debug,
            "info" => twyg::LogLevel::Info,
            "error" => twyg::LogLevel::Error,
            _ => twyg::LogLevel::Warn,
        },
        1 => twyg::LogLevel::Info,
        2 => twyg::LogLevel::Debug,
        _ => twyg::LogLevel::Trace,
    }
}

fn setup_logging(verbose: u8, config: &Config) -> Result<()> {
    let opts = twyg::OptsBuilder::new()
        .coloured(true)
        .level(log_level(verbose, &config.log_level))
        .report_caller(verbose > 1)
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid logging options: {e}"))?;
    twyg::setup(opts).map_err(|e| anyhow::anyhow!("Failed to set up logging: {e}"))?;
    Ok(())
}

fn status(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::load()?.with_exercises_path(cli.exercises);
    setup_logging(cli.verbose, &config)?;

    let passed = match cli.command {
        Commands::Check {
            file,
            chapter,
            json,
            structure,
        } => {
            let chapter = chapter.unwrap_or(config.default_chapter);
            commands::check::run_check(&file, chapter, json, structure)?
        }
        Commands::Rules { chapter } => {
            commands::rules::list_rules(chapter);
            true
        }
        Commands::Exercise { command } => match command {
            ExerciseCommand::List { file } => {
                let path = file.unwrap_or_else(|| config.exercises_path.clone());
                commands::exercise::list_exercises(&path)?;
                true
            }
            ExerciseCommand::Show { id } => {
                commands::exercise::show_exercise(&config.exercises_path, id)?;
                true
            }
            ExerciseCommand::Lint => commands::exercise::lint_exercises(&config.exercises_path)?,
            ExerciseCommand::Submit { id, file, json } => {
                commands::exercise::submit_solution(&config, id, &file, json)?
            }
        },
        Commands::Config { command } => {
            match command {
                ConfigCommand::Show => commands::config::show_config(&config)?,
                ConfigCommand::Path => commands::config::show_path(),
                ConfigCommand::Init => commands::config::init_config()?,
                ConfigCommand::Example => commands::config::show_example(),
            }
            true
        }
    };

    Ok(status(passed))
}
