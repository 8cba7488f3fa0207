use dotenvy::dotenv;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

use common::AppConfig;
use common::actors::{Actor, ActorType};
use common::logger;
use market_data::QuoteCache;
use market_data::remote::CoinGeckoClient;
use strategy::services::SignalAssembler;

use crate::actors::supervisor::Supervisor;
use crate::services::signal_publisher::SignalBoard;
use crate::services::{ReportService, SignalPublisher};

mod actors;
mod services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = AppConfig::from_env()?;
    logger::setup_logger(&config.log_level);
    debug!("Loaded configuration: {:?}", config);

    let client = CoinGeckoClient::new(&config.base_url, config.fetch_timeout)?;
    let cache = Arc::new(QuoteCache::new(client, config.cache_ttl));
    let assembler = Arc::new(SignalAssembler::new(cache));

    info!(
        "Tracking {} assets from {} (cache TTL {:?})",
        common::TRACKED_ASSETS.len(),
        config.base_url,
        config.cache_ttl
    );

    let (board_tx, _) = broadcast::channel::<SignalBoard>(16);

    let mut supervisor = Supervisor::new();

    let tx_for_publisher = board_tx.clone();
    let refresh_interval = config.refresh_interval;
    let force_refresh = config.force_refresh;
    supervisor.register_actor(
        ActorType::SignalPublisher,
        Box::new(move || -> Box<dyn Actor> {
            Box::new(SignalPublisher::new(
                assembler.clone(),
                refresh_interval,
                force_refresh,
                tx_for_publisher.clone(),
            ))
        }),
    );

    let tx_for_report = board_tx.clone();
    supervisor.register_actor(
        ActorType::Report,
        Box::new(move || -> Box<dyn Actor> { Box::new(ReportService::new(tx_for_report.subscribe())) }),
    );

    supervisor
        .start(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    info!("Signal service stopped");
    Ok(())
}
