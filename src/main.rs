use clap::{Parser, Subcommand};
use anyhow::Result;
use colored::Colorize;

mod api;
mod commands;
mod config;
mod constants;
mod names;
mod output;
mod project_file;
mod resolver;
mod types;

use output::{Output, Verbosity};

#[derive(Parser)]
#[command(name = "graphcool", author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print results and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project from a schema, or copy an existing one
    Init(commands::init::InitArgs),

    /// Store an authentication token
    Login {
        /// Token to store (prompted for when omitted)
        #[arg(long)]
        token: Option<String>,
    },

    /// Remove the stored authentication token
    Logout,

    /// Check current version info
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; it only supplies GRAPHCOOL_* overrides.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let out = Output::new(Verbosity::from_flags(cli.verbose, cli.quiet));

    let result = match cli.command {
        Commands::Init(args) => commands::init::handle_init(args, &out).await,
        Commands::Login { token } => commands::login::handle_login(token, &out).await,
        Commands::Logout => commands::logout::handle_logout(&out).await,
        Commands::Version => {
            out.write(format!("graphcool version: {}", env!("CARGO_PKG_VERSION").cyan()));
            Ok(())
        }
    };

    if let Err(e) = result {
        out.write_error(format!("{}: {:#}", "Error".red().bold(), e));
        std::process::exit(1);
    }

    Ok(())
}
