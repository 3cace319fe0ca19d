use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use pocket_ledger::cli::{
    handle_deposit_command, handle_list_command, handle_pay_command, handle_report_command,
    EntryArgs, ListArgs, ReportCommands,
};
use pocket_ledger::config::{LedgerPaths, Settings};
use pocket_ledger::menu::Session;
use pocket_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "pocket-ledger",
    version,
    about = "Terminal personal finance ledger",
    long_about = "pocket-ledger records deposits and payments in a plain pipe-delimited \
                  file and reports over them: month and year to date, previous month \
                  and year, per-vendor listings and custom searches."
)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu (default)
    Menu,

    /// Record a deposit
    Deposit(EntryArgs),

    /// Pay towards an outstanding obligation
    Pay(EntryArgs),

    /// Show the ledger, newest first
    List(ListArgs),

    /// Reports over the ledger
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show current configuration and paths, writing default settings on first use
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level);
    debug!("Log level set to {}", cli.log_level);

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone(), &settings)?;

    match cli.command {
        None | Some(Commands::Menu) => {
            let stdin = io::stdin();
            Session::new(&storage, &settings, stdin.lock(), io::stdout()).run()?;
        }
        Some(Commands::Deposit(args)) => handle_deposit_command(&storage, &settings, args)?,
        Some(Commands::Pay(args)) => handle_pay_command(&storage, &settings, args)?,
        Some(Commands::List(args)) => handle_list_command(&storage, &settings, args)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }

            println!("pocket-ledger Configuration");
            println!("===========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Ledger file:     {}", storage.ledger.path().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        // Library and binary share the crate name, so one directive covers both.
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
