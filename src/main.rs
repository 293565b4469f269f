mod cli;
mod commands;
mod convert;
mod error;
mod mcp;
mod output;
mod pdf;
mod plan;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is for progress output and the MCP transport
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Convert {
            path,
            output_dir,
            naming,
            pdfium_lib,
        } => {
            let options = convert::ConvertOptions {
                output_dir,
                mode: naming.mode(),
                scale: naming.scale,
                pdfium_library: pdfium_lib,
            };
            commands::convert::run(&path, &options)?;
        }
        Commands::Plan { path, naming, json } => {
            commands::plan::run(&path, naming.mode(), naming.scale, json)?;
        }
    }

    Ok(())
}
