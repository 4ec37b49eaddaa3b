use anyhow::Result;
use dwt::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
