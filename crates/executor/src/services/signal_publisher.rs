use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::actors::{Actor, ActorType, ControlMessage};
use common::models::SignalRecord;
use market_data::MarketDataFetcher;
use strategy::services::SignalAssembler;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

pub type SignalBoard = Arc<Vec<SignalRecord>>;

/// Regenerates the full signal board on every refresh tick and broadcasts it.
pub struct SignalPublisher<F> {
    id: Uuid,
    assembler: Arc<SignalAssembler<F>>,
    refresh_interval: Duration,
    force_refresh: bool,
    board_tx: broadcast::Sender<SignalBoard>,
}

impl<F: MarketDataFetcher + 'static> SignalPublisher<F> {
    pub fn new(
        assembler: Arc<SignalAssembler<F>>,
        refresh_interval: Duration,
        force_refresh: bool,
        board_tx: broadcast::Sender<SignalBoard>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            assembler,
            refresh_interval,
            force_refresh,
            board_tx,
        }
    }

    async fn publish(&self) -> usize {
        let board = Arc::new(self.assembler.generate_all(self.force_refresh).await);
        let count = board.len();

        match self.board_tx.send(board) {
            Ok(receivers) => debug!("Board of {} signals sent to {} receivers", count, receivers),
            Err(_) => debug!("No board subscribers, dropping {} signals", count),
        }
        count
    }
}

#[async_trait]
impl<F: MarketDataFetcher + 'static> Actor for SignalPublisher<F> {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> ActorType {
        ActorType::SignalPublisher
    }

    async fn run(&mut self, supervisor_tx: mpsc::Sender<ControlMessage>) -> anyhow::Result<()> {
        let _heartbeat = self.spawn_heartbeat(supervisor_tx.clone());

        info!(
            "Starting Signal Publisher (every {:?}, force refresh: {})",
            self.refresh_interval, self.force_refresh
        );

        let mut ticker = time::interval(self.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.publish().await;
        }
    }
}
