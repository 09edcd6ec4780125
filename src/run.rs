// Server lifecycle using ServiceManager

use crate::{
    allocation::AllocationEstimator,
    apis::{UpstreamClient, UpstreamSource},
    arguments,
    config::{self, Config},
    logger::{self, LogTag},
    pricing::PriceCache,
    services::{
        implementations::{PriceService, WebserverService},
        ServiceManager,
    },
    webserver::AppState,
};
use std::sync::Arc;
use std::time::Duration;

/// Interval between service health reports
const HEALTH_REPORT_INTERVAL: Duration = Duration::from_secs(300);

/// Load configuration and apply command-line overrides
pub fn load_config() -> Result<Config, String> {
    let path = arguments::get_config_path_override()
        .unwrap_or_else(|| config::CONFIG_FILE_PATH.to_string());

    let mut config = config::load_config_from_path(&path)?;

    if let Some(host) = arguments::get_host_override()? {
        config.webserver.host = host;
    }
    if let Some(port) = arguments::get_port_override()? {
        config.webserver.port = port;
    }

    logger::debug(
        LogTag::Config,
        &format!("Configuration loaded from {}: {:?}", path, config),
    );

    Ok(config)
}

/// Run the estimator until a shutdown signal arrives
pub async fn run_server() -> Result<(), String> {
    let config = load_config()?;

    logger::info(
        LogTag::System,
        &format!(
            "Estimating {} airdrop ({} tokens offered)",
            config.token.name, config.token.total_token_offered
        ),
    );

    let upstream: Arc<dyn UpstreamSource> =
        Arc::new(UpstreamClient::new(&config.upstream, &config.token)?);
    let price_cache = Arc::new(PriceCache::new());
    let estimator = Arc::new(AllocationEstimator::new(
        config.token.clone(),
        upstream.clone(),
        price_cache.clone(),
    ));
    let state = Arc::new(AppState::new(estimator, price_cache.clone()));

    let mut service_manager = ServiceManager::new();
    register_all_services(&mut service_manager, &config, upstream, price_cache, state);

    service_manager.start_all().await?;

    logger::info(LogTag::System, "All services started");

    report_health_until_shutdown(&service_manager).await?;

    logger::info(LogTag::System, "Initiating graceful shutdown...");
    service_manager.stop_all().await?;
    logger::info(LogTag::System, "Shut down successfully");

    Ok(())
}

/// Register all available services
fn register_all_services(
    manager: &mut ServiceManager,
    config: &Config,
    upstream: Arc<dyn UpstreamSource>,
    price_cache: Arc<PriceCache>,
    state: Arc<AppState>,
) {
    manager.register(Box::new(PriceService::new(
        upstream,
        price_cache,
        Duration::from_secs(config.pricing.refresh_interval_secs),
    )));
    manager.register(Box::new(WebserverService::new(
        state,
        config.webserver.host.clone(),
        config.webserver.port,
    )));

    logger::debug(
        LogTag::System,
        &format!("Services registered: {:?}", manager.service_names()),
    );
}

/// Log service health periodically until a shutdown signal arrives
async fn report_health_until_shutdown(manager: &ServiceManager) -> Result<(), String> {
    let shutdown = wait_for_shutdown_signal();
    tokio::pin!(shutdown);

    let mut ticker = tokio::time::interval_at(
        tokio::time::Instant::now() + HEALTH_REPORT_INTERVAL,
        HEALTH_REPORT_INTERVAL,
    );

    loop {
        tokio::select! {
            result = &mut shutdown => return result,
            _ = ticker.tick() => {
                let not_healthy = manager.log_health().await;
                if !not_healthy.is_empty() {
                    logger::warning(
                        LogTag::System,
                        &format!("Services needing attention: {:?}", not_healthy),
                    );
                }
            }
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM on Unix)
async fn wait_for_shutdown_signal() -> Result<(), String> {
    logger::info(
        LogTag::System,
        "Waiting for shutdown signal (press Ctrl+C twice to force kill)",
    );

    #[cfg(unix)]
    let signal_name = {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint =
            signal(SignalKind::interrupt()).map_err(|e| format!("Failed to bind SIGINT: {}", e))?;
        let mut sigterm = signal(SignalKind::terminate())
            .map_err(|e| format!("Failed to bind SIGTERM: {}", e))?;

        tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        }
    };

    #[cfg(not(unix))]
    let signal_name = {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| format!("Failed to listen for shutdown signal: {}", e))?;
        "CTRL_C"
    };

    logger::warning(
        LogTag::System,
        &format!(
            "Shutdown signal received ({}). Press Ctrl+C again to force kill.",
            signal_name
        ),
    );

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            logger::error(LogTag::System, "Second Ctrl+C detected, forcing exit.");
            // 130 is the conventional exit code for SIGINT
            std::process::exit(130);
        }
    });

    Ok(())
}
