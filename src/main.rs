use clap::Parser;
use experiment_mutex::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli::exclusion::run(cli).await
}
