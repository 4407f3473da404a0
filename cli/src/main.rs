// citrate/cli/src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod request;
mod utils;

use commands::{account, authorization, tx};

#[derive(Parser)]
#[command(
    name = "citrate-tx",
    version,
    about = "Citrate transaction encoder and signer",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, env = "CITRATE_TX_CONFIG")]
    config: Option<PathBuf>,

    /// Chain id, overriding the config file
    #[arg(long, global = true)]
    chain_id: Option<u64>,

    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the signing preimage of a transaction and its hash
    Encode {
        /// Transaction request (JSON)
        #[arg(short, long)]
        tx: PathBuf,
    },

    /// Sign a transaction and print the raw bytes
    Sign {
        /// Transaction request (JSON)
        #[arg(short, long)]
        tx: PathBuf,

        /// Private key (hex encoded)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Sign an EIP-7702 authorization
    SignAuthorization {
        /// Contract the account delegates to
        #[arg(short, long)]
        address: String,

        /// Account nonce the authorization is valid for
        #[arg(short, long)]
        nonce: u64,

        /// Private key (hex encoded)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Recover the account that signed an authorization
    RecoverAuthorization {
        /// Authorization object (JSON)
        #[arg(short, long)]
        json: PathBuf,
    },

    /// Print the address of a private key
    Address {
        /// Private key (hex encoded)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let log_level = match cli.verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Commands::Init { force } = cli.command {
        let path = config::Config::init(cli.config.as_deref(), force)?;
        println!("{}", "✓ Configuration initialized successfully".green());
        println!("Config: {:?}", path);
        return Ok(());
    }

    let config = config::Config::load(cli.config.as_deref(), cli.chain_id)?;

    match cli.command {
        Commands::Encode { tx: path } => tx::execute_encode(&path, &config)?,
        Commands::Sign { tx: path, key } => tx::execute_sign(&path, key.as_deref(), &config)?,
        Commands::SignAuthorization {
            address,
            nonce,
            key,
        } => authorization::execute_sign(&address, nonce, key.as_deref(), &config)?,
        Commands::RecoverAuthorization { json } => authorization::execute_recover(&json)?,
        Commands::Address { key } => account::execute_address(key.as_deref(), &config)?,
        Commands::Init { .. } => {}
    }

    Ok(())
}
