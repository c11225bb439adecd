use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dream_ai::run(dream_ai::Cli::parse()).await
}
