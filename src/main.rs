use anyhow::Result;
use tracing::info;

use encar_bot::bot;
use encar_bot::config::BotConfig;
use encar_bot::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // The token is required; startup stops here without it
    let config = BotConfig::from_env()?;

    init_tracing(config.log_format)?;

    info!("Starting Encar listing Telegram bot");

    bot::run(config).await
}
