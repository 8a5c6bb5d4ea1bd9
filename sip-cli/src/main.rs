//! SIP CLI - Command line tool for fetching, charting and exporting solar
//! irradiance data.

use clap::Parser;
use sip_core::client::DEFAULT_BASE_URL;

#[derive(Parser)]
#[command(
    name = "sip-cli",
    version,
    about = "Solar irradiance portal toolkit"
)]
struct Cli {
    /// Base URL of the irradiance backend
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: sip_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    sip_cmd::run(cli.command, &cli.base_url).await
}
