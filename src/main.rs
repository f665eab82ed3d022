use anyhow::Result;
use meetup_archive::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
