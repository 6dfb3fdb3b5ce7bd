//! CLI frontend for the DX exploding-dice check engine.

mod commands;
mod parse;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dx_mechanics::config::{DEFAULT_MAX_OUTPUT_LENGTH, DEFAULT_ROUND_CAP};
use dx_mechanics::{Die, EngineConfig};

#[derive(Parser)]
#[command(
    name = "dx",
    about = "DX — exploding-dice checks with critical cascades",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a check such as 10DX+5@8>=15 or 5DX7+7-3 (at most 10000 dice)
    Roll {
        /// The check to roll
        command: String,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,

        /// Longest trace, in characters, before the compact form is used
        #[arg(long, default_value_t = DEFAULT_MAX_OUTPUT_LENGTH)]
        max_output: usize,

        /// Most batches a cascade may roll
        #[arg(long, default_value_t = DEFAULT_ROUND_CAP)]
        round_cap: u32,

        /// Die to roll (e.g. d10, d6, d20)
        #[arg(long, default_value = "d10")]
        die: String,

        /// Print the structured result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Roll a check many times and summarise the results (at most 10000 dice)
    Simulate {
        /// The check to roll
        command: String,

        /// Number of checks to roll
        #[arg(short = 'n', long, default_value = "1000")]
        trials: u32,

        /// RNG seed for a deterministic run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Most batches a cascade may roll
        #[arg(long, default_value_t = DEFAULT_ROUND_CAP)]
        round_cap: u32,

        /// Die to roll (e.g. d10, d6, d20)
        #[arg(long, default_value = "d10")]
        die: String,
    },
}

fn config_for_die(tag: &str) -> Result<EngineConfig, String> {
    let die = Die::from_str_tag(tag).ok_or_else(|| format!("invalid die '{tag}'"))?;
    EngineConfig::default().with_die(die).map_err(|e| e.to_string())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roll {
            command,
            seed,
            max_output,
            round_cap,
            die,
            json,
        } => config_for_die(&die).and_then(|config| {
            let mut config = config
                .with_max_output_length(max_output)
                .with_round_cap(round_cap);
            config.seed = seed;
            commands::roll::run(&command, &config, json)
        }),
        Commands::Simulate {
            command,
            trials,
            seed,
            round_cap,
            die,
        } => config_for_die(&die).and_then(|config| {
            let mut config = config.with_round_cap(round_cap);
            config.seed = seed;
            commands::simulate::run(&command, trials, &config)
        }),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
