use airdrop_estimator::{
    allocation::calculate_allocation,
    apis::{client::HttpClient, coingecko::CoinGeckoClient, mocaverse::MocaverseClient},
    config::{self, Config},
};
use anyhow::{anyhow, Context, Result};
use clap::Parser;

/// Fetch the upstream values once and print them
#[derive(Parser, Debug)]
#[command(name = "debug_upstream", about = "Query the stake and price endpoints once")]
struct Args {
    /// Configuration file
    #[arg(long, default_value = config::CONFIG_FILE_PATH)]
    config: String,

    /// Only query the stake endpoint
    #[arg(long, conflicts_with = "price_only")]
    stake_only: bool,

    /// Only query the price endpoint
    #[arg(long)]
    price_only: bool,

    /// Also estimate the allocation for this burn amount
    #[arg(long)]
    user_burn: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config: Config = config::load_config_from_path(&args.config).map_err(|e| anyhow!(e))?;
    let http_client = HttpClient::new(config.upstream.request_timeout_secs).map_err(|e| anyhow!(e))?;
    println!("Request timeout: {}s", http_client.timeout().as_secs());

    let mut total_burnt = None;
    let mut price = None;

    if !args.price_only {
        let mocaverse = MocaverseClient::new(http_client.clone(), config.upstream.stake_url.clone());
        println!("Stake endpoint: {}", mocaverse.project_url());
        let value = mocaverse
            .fetch_stake_burnt()
            .await
            .context("stake fetch failed")?;
        println!("  stakingPowerBurnt = {}", value);
        total_burnt = Some(value);
    }

    if !args.stake_only {
        let coingecko = CoinGeckoClient::new(
            http_client,
            config.upstream.price_url.clone(),
            config.token.price_id.clone(),
            config.upstream.price_format,
        );
        println!("Price endpoint: {} ({:?})", coingecko.price_url(), config.upstream.price_format);
        let value = coingecko.fetch_price().await.context("price fetch failed")?;
        println!("  {} price = {} USD", config.token.price_id, value);
        price = Some(value);
    }

    if let Some(user_burn) = args.user_burn {
        let allocation = calculate_allocation(
            config.token.total_token_offered as f64,
            user_burn,
            total_burnt,
            price,
        )?;
        println!(
            "Estimate for user_burn={}: {} {} worth {} USD",
            user_burn, allocation.tokens_received, config.token.name, allocation.airdrop_value
        );
    }

    Ok(())
}
