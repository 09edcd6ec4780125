use airdrop_estimator::{
    arguments::{patterns, print_help},
    logger::{self, LogTag},
};

#[tokio::main]
async fn main() {
    logger::init();

    if patterns::is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    logger::info(
        LogTag::System,
        &format!("airdrop-estimator v{} starting up...", env!("CARGO_PKG_VERSION")),
    );

    if let Err(e) = airdrop_estimator::run::run_server().await {
        logger::error(LogTag::System, &format!("Fatal error: {}", e));
        std::process::exit(1);
    }
}
