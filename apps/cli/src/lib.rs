//! # PriceDesk CLI Library
//!
//! Argument parsing, logging setup and the two run modes.
//!
//! ## Module Organization
//! ```text
//! pricedesk_cli/
//! ├── lib.rs          ◄─── You are here (arguments, tracing, run)
//! ├── shell.rs        ◄─── Interactive line loop
//! ├── render.rs       ◄─── Text tables
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── ProductList + VAT switch
//! │   └── config.rs   ◄─── Environment configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── add / edit / delete / show
//! │   ├── upload.rs   ◄─── CSV upload
//! │   ├── export.rs   ◄─── CSV export
//! │   ├── options.rs  ◄─── vat on / off
//! │   └── calc.rs     ◄─── One-shot mode
//! └── error.rs        ◄─── CliError for commands
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod shell;
pub mod state;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::commands::calc::{run_calc, write_calc_error, OutputFormat};
use crate::error::CliError;
use crate::state::{AppConfig, Session};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "pricedesk",
    version,
    about = "Discount, profit and margin calculator for product lists"
)]
pub struct Cli {
    /// Calculate without VAT (overrides PRICEDESK_INCLUDE_VAT)
    #[arg(long, global = true)]
    pub no_vat: bool,

    /// Currency symbol for tables (overrides PRICEDESK_CURRENCY_SYMBOL)
    #[arg(long, global = true)]
    pub currency: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a CSV file once and print the results
    Calc(CalcArgs),
    /// Start the interactive shell (default)
    Shell(ShellArgs),
}

#[derive(Args, Debug)]
pub struct CalcArgs {
    /// CSV file with Product Name, Retail Price, Discount %, Cost Price[, Stock Qty]
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Also write the results to this CSV file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// What to print on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Default)]
pub struct ShellArgs {
    /// Start with an example product in the list
    #[arg(long)]
    pub example: bool,

    /// Upload this CSV file before the first prompt
    #[arg(long)]
    pub upload: Option<PathBuf>,
}

impl Cli {
    /// Applies flag overrides on top of the environment configuration.
    pub fn config(&self, mut config: AppConfig) -> AppConfig {
        if self.no_vat {
            config.include_vat = false;
        }
        if let Some(symbol) = &self.currency {
            config.currency_symbol = symbol.clone();
        }
        config
    }
}

/// Parses arguments and runs the selected mode.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let config = cli.config(AppConfig::from_env());
    info!(include_vat = config.include_vat, "starting pricedesk");

    let result = match cli.command {
        Some(Command::Calc(args)) => start_calc(&args, &config),
        Some(Command::Shell(args)) => start_shell(&args, &config),
        None => start_shell(&ShellArgs::default(), &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = ?err.code, "{}", err.message);
            eprintln!("error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn start_calc(args: &CalcArgs, config: &AppConfig) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = run_calc(
        &args.input,
        args.output.as_deref(),
        args.format,
        &config.options(),
        config,
        &mut out,
    );

    // JSON consumers read the failure from stdout; stderr still gets the text line.
    if let (Err(err), OutputFormat::Json) = (&result, args.format) {
        write_calc_error(&mut out, err, args.format)?;
    }
    result
}

fn start_shell(args: &ShellArgs, config: &AppConfig) -> Result<(), CliError> {
    let mut session = Session::new(config);
    if args.example {
        session = session.with_example();
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(path) = &args.upload {
        match commands::upload::upload_file(&mut session, path) {
            Ok(reply) => writeln!(out, "{}", reply)?,
            Err(err) => writeln!(out, "error: {}", err)?,
        }
    }

    shell::run_shell(stdin.lock(), &mut out, &mut session, config)?;
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - Default: `warn,pricedesk=info`
/// - `RUST_LOG=pricedesk=debug` shows every command and list change
///
/// Logs go to stderr so stdout stays clean for tables and CSV.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,pricedesk=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
