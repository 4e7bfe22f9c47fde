mod application;
mod cli;
mod data;
mod domain;
mod infra;
mod ml;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli    = Cli::parse();
    let _guard = infra::logging::init(&cli.log_config())?;

    if let Err(e) = cli.run().await {
        tracing::error!("{e:#}");
        return Err(e);
    }
    Ok(())
}
