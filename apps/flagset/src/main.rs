//! # flagset
//!
//! Command-line host for the bitmask flag registry.
//!
//! ```text
//! flagset -d languages.json merge EN,FR,DE,EN      # 7 (0x7) [EN, FR, DE]
//! flagset -d languages.json difference 7 EN        # 6 (0x6) [FR, DE]
//! flagset -d languages.json has EN,FR EN           # true
//! flagset -d languages.json --json resolve 0x6
//! ```

use clap::{Parser, Subcommand};
use flagset::cli::{
    MaskOp, cmd_combine, cmd_decode, cmd_encode, cmd_has, cmd_inspect, cmd_merge, cmd_resolve,
    cmd_snapshot,
};
use flagset::CliResult;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "flagset",
    about = "Compose, inspect and combine bitmask flags from a definitions file.",
    version,
    arg_required_else_help = true
)]
struct Cli {
    /// Definitions file: JSON object of name -> bit, or a binary snapshot.
    #[arg(short, long, value_name = "FILE", global = true, default_value = "flags.json")]
    definitions: PathBuf,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Load definitions without checking for multi-bit values or shared bits.
    #[arg(long, global = true)]
    unchecked: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the definitions in order.
    Inspect,
    /// OR names into a mask.
    Merge {
        /// Comma-separated names.
        names: String,
    },
    /// Turn a mask back into names.
    Resolve { mask: String },
    /// Check that CURRENT holds every flag of NEEDED.
    Has {
        current: String,
        needed: String,
        /// Succeed on any shared flag instead.
        #[arg(long)]
        any: bool,
    },
    /// Symmetric difference (CURRENT ^ NEEDED).
    Difference { current: String, needed: String },
    /// Union (CURRENT | NEEDED).
    Add { current: String, needed: String },
    /// Toggle NEEDED in CURRENT (CURRENT ^ NEEDED).
    Remove { current: String, needed: String },
    /// Clear NEEDED from CURRENT (CURRENT & !NEEDED).
    Clear { current: String, needed: String },
    /// Flags of NEEDED that CURRENT lacks (NEEDED & !CURRENT).
    Missing { current: String, needed: String },
    /// Print the base64 varint encoding of a mask or names.
    Encode { operand: String },
    /// Decode a base64 varint mask.
    Decode { encoded: String },
    /// Write the definitions as a binary snapshot.
    Snapshot {
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    let defs = cli.definitions.as_path();
    let (unchecked, json) = (cli.unchecked, cli.json);

    match cli.command {
        Command::Inspect => cmd_inspect(defs, unchecked, json),
        Command::Merge { names } => cmd_merge(defs, unchecked, json, &names),
        Command::Resolve { mask } => cmd_resolve(defs, unchecked, json, &mask),
        Command::Has {
            current,
            needed,
            any,
        } => cmd_has(defs, unchecked, json, &current, &needed, any),
        Command::Difference { current, needed } => {
            cmd_combine(defs, unchecked, json, MaskOp::Difference, &current, &needed)
        }
        Command::Add { current, needed } => {
            cmd_combine(defs, unchecked, json, MaskOp::Add, &current, &needed)
        }
        Command::Remove { current, needed } => {
            cmd_combine(defs, unchecked, json, MaskOp::Remove, &current, &needed)
        }
        Command::Clear { current, needed } => {
            cmd_combine(defs, unchecked, json, MaskOp::Clear, &current, &needed)
        }
        Command::Missing { current, needed } => {
            cmd_combine(defs, unchecked, json, MaskOp::Missing, &current, &needed)
        }
        Command::Encode { operand } => cmd_encode(defs, unchecked, json, &operand),
        Command::Decode { encoded } => cmd_decode(defs, unchecked, json, &encoded),
        Command::Snapshot { output } => cmd_snapshot(defs, unchecked, &output),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(?cli, "starting");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
