mod orders;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "guestdesk-cli")]
#[command(about = "Guest desk order normalization tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize a saved orders response and print the canonical orders
    Orders {
        /// Path to the saved response body
        file: PathBuf,
        /// Content type the body was served with
        #[arg(long, default_value = "application/json")]
        content_type: String,
    },
    /// Print one order with its line items and totals
    Detail {
        /// Path to the saved response body
        file: PathBuf,
        /// Order id to look up
        #[arg(long)]
        id: String,
        /// Content type the body was served with
        #[arg(long, default_value = "application/json")]
        content_type: String,
    },
    /// Decode a scanned ticket QR value
    Qr {
        /// Raw QR payload
        value: String,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = guestdesk_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Orders { file, content_type }) => {
            orders::run_orders(&config, &file, &content_type)?;
        }
        Some(Commands::Detail {
            file,
            id,
            content_type,
        }) => orders::run_detail(&config, &file, &id, &content_type)?,
        Some(Commands::Qr { value }) => orders::run_qr(&value)?,
        None => println!("guestdesk-cli: pass --help to list commands"),
    }

    Ok(())
}
