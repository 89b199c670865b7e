use anyhow::Result;
use clap::Parser;
use log::warn;

use leavevc::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::parse();
    config.logger().init()?;

    let mut discord = config.discord().await?;
    warn!("Initialized discord client.");

    discord.start().await?;

    Ok(())
}
