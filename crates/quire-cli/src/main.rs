//! Quire Command-Line Interface
//!
//! Translates Qobj jobs to cQASM and remaps Quantum Inspire results onto
//! classical bits.

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{backends, compile, convert, version};

/// Quire - cQASM translation and result remapping for Quantum Inspire
#[derive(Parser)]
#[command(name = "quire")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Backend configuration file (JSON)
    #[arg(short, long, global = true, env = "QUIRE_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a Qobj job to cQASM
    Compile {
        /// Input file (Qobj or single experiment JSON)
        #[arg(short, long)]
        input: String,

        /// Output file; several experiments get numbered files
        #[arg(short, long)]
        output: Option<String>,

        /// Emit measure statements instead of relying on full-state projection
        #[arg(long)]
        no_full_state_projection: bool,

        /// Text of the header comment line
        #[arg(long)]
        header_comment: Option<String>,
    },

    /// Convert a raw backend result into classical counts and memory
    Convert {
        /// Raw result file (JSON)
        #[arg(short, long)]
        input: String,

        /// Experiment the result belongs to (JSON)
        #[arg(short, long)]
        experiment: String,

        /// Per-shot register values (JSON array)
        #[arg(long)]
        raw_data: Option<String>,

        /// Seed for the single-shot draw when no raw data is given
        #[arg(long)]
        seed: Option<u64>,

        /// Output file; defaults to stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show the configured backend
    Backends,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Compile {
            input,
            output,
            no_full_state_projection,
            header_comment,
        } => {
            compile::execute(
                &input,
                output.as_deref(),
                config,
                !no_full_state_projection,
                header_comment.as_deref(),
            )
            .await
        }

        Commands::Convert {
            input,
            experiment,
            raw_data,
            seed,
            output,
        } => {
            convert::execute(
                &input,
                &experiment,
                raw_data.as_deref(),
                seed,
                output.as_deref(),
            )
            .await
        }

        Commands::Backends => backends::execute(config).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compile_minimal() {
        let cli = Cli::try_parse_from(["quire", "compile", "-i", "bell.json"]).unwrap();
        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Compile {
                input,
                output,
                no_full_state_projection,
                header_comment,
            } => {
                assert_eq!(input, "bell.json");
                assert!(output.is_none());
                assert!(!no_full_state_projection);
                assert!(header_comment.is_none());
            }
            _ => panic!("expected compile"),
        }
    }

    #[test]
    fn test_parse_convert_full() {
        let cli = Cli::try_parse_from([
            "quire",
            "-vv",
            "convert",
            "-i",
            "result.json",
            "-e",
            "bell.json",
            "--raw-data",
            "shots.json",
            "--seed",
            "7",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Convert {
                input,
                experiment,
                raw_data,
                seed,
                output,
            } => {
                assert_eq!(input, "result.json");
                assert_eq!(experiment, "bell.json");
                assert_eq!(raw_data.as_deref(), Some("shots.json"));
                assert_eq!(seed, Some(7));
                assert!(output.is_none());
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["quire", "backends", "--config", "qi.json"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("qi.json"));
        assert!(matches!(cli.command, Commands::Backends));
    }

    #[test]
    fn test_convert_requires_experiment() {
        assert!(Cli::try_parse_from(["quire", "convert", "-i", "result.json"]).is_err());
    }
}
