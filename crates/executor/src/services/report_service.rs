use anyhow::bail;
use async_trait::async_trait;
use common::actors::{Actor, ActorType, ControlMessage};
use common::models::SignalRecord;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::services::signal_publisher::SignalBoard;

/// Logs every board the publisher broadcasts.
pub struct ReportService {
    id: Uuid,
    board_rx: broadcast::Receiver<SignalBoard>,
}

impl ReportService {
    pub fn new(board_rx: broadcast::Receiver<SignalBoard>) -> Self {
        Self {
            id: Uuid::new_v4(),
            board_rx,
        }
    }

    fn report(board: &[SignalRecord]) {
        for record in board {
            info!("{}", summary_line(record));
        }

        let buy_side = board.iter().filter(|r| r.signal_class.is_buy_side()).count();
        info!("{}/{} signals are BUY or STRONG BUY", buy_side, board.len());

        let fallback = board.iter().filter(|r| r.fallback).count();
        if fallback > 0 {
            warn!(
                "{}/{} signals are based on fallback data",
                fallback,
                board.len()
            );
        }

        match serde_json::to_string(board) {
            Ok(json) => debug!("Signal board: {}", json),
            Err(e) => error!("Failed to serialize signal board: {}", e),
        }
    }
}

/// Small prices need more decimals to be readable.
pub fn format_price(price: f64) -> String {
    if price < 1.0 {
        format!("${:.4}", price)
    } else {
        format!("${:.2}", price)
    }
}

pub fn summary_line(record: &SignalRecord) -> String {
    format!(
        "{:<6} {:>12} {:>+7.2}% {:<11} conf {:>3.0}% risk {:>2}/10 {} tp {} sl {} rr {:.2}{}",
        record.symbol,
        format_price(record.price),
        record.change_24h,
        record.signal_class.to_string(),
        record.confidence * 100.0,
        record.risk_score,
        record.position_tier,
        format_price(record.targets.take_profit),
        format_price(record.targets.stop_loss),
        record.targets.risk_reward,
        if record.fallback { " [fallback]" } else { "" },
    )
}

#[async_trait]
impl Actor for ReportService {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> ActorType {
        ActorType::Report
    }

    async fn run(&mut self, supervisor_tx: mpsc::Sender<ControlMessage>) -> anyhow::Result<()> {
        let heartbeat = self.spawn_heartbeat(supervisor_tx.clone());

        info!("Starting Report Service");

        loop {
            match self.board_rx.recv().await {
                Ok(board) => Self::report(&board),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("Report service lagged: missed {} boards", n);
                }
                Err(broadcast::error::RecvError::Closed) => {
                    drop(heartbeat);
                    supervisor_tx
                        .send(ControlMessage::Error(
                            self.name(),
                            "Signal board channel closed unexpectedly.".to_string(),
                        ))
                        .await?;
                    bail!("Signal board channel closed unexpectedly.");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::models::{IndicatorBundle, PositionTier, QuoteSource, SignalClass, Targets};
    use std::sync::Arc;

    fn record(symbol: &str, price: f64, fallback: bool) -> SignalRecord {
        SignalRecord {
            symbol: symbol.to_string(),
            price,
            change_24h: -3.25,
            signal_class: SignalClass::StrongBuy,
            confidence: 0.85,
            risk_score: 6,
            position_tier: PositionTier::Medium,
            targets: Targets {
                take_profit: price * 1.1,
                stop_loss: price * 0.9,
                risk_reward: 1.0,
            },
            indicators: IndicatorBundle::neutral(),
            source: if fallback { QuoteSource::Fallback } else { QuoteSource::Live },
            timestamp: Utc::now(),
            fallback,
        }
    }

    #[test]
    fn prices_under_a_dollar_keep_four_decimals() {
        assert_eq!(format_price(0.085), "$0.0850");
        assert_eq!(format_price(43450.0), "$43450.00");
    }

    #[test]
    fn summary_line_shows_label_and_fallback_marker() {
        let line = summary_line(&record("DOGE", 0.085, true));

        assert!(line.starts_with("DOGE"));
        assert!(line.contains("STRONG BUY"));
        assert!(line.contains("-3.25%"));
        assert!(line.contains("risk  6/10"));
        assert!(line.contains("Medium ($200-$600)"));
        assert!(line.ends_with("[fallback]"));

        let live = summary_line(&record("BTC", 43450.0, false));
        assert!(!live.contains("[fallback]"));
    }

    #[tokio::test]
    async fn closed_channel_reports_error_to_supervisor() {
        let (board_tx, board_rx) = broadcast::channel::<SignalBoard>(4);
        let (supervisor_tx, mut supervisor_rx) = mpsc::channel(16);
        let mut service = ReportService::new(board_rx);

        board_tx.send(Arc::new(vec![record("BTC", 43450.0, false)])).unwrap();
        drop(board_tx);

        let result = service.run(supervisor_tx).await;
        assert!(result.is_err());

        let mut saw_error = false;
        while let Ok(msg) = supervisor_rx.try_recv() {
            if let ControlMessage::Error(ActorType::Report, _) = msg {
                saw_error = true;
            }
        }
        assert!(saw_error);
    }
}
