//! Feed polling task
//!
//! Fixed-interval background poll of the device feed. A successful tick
//! marks the connection indicator and applies the reading through the
//! monitor; a failed tick marks disconnected and skips the update, and
//! the next success self-heals.

use chrono::Utc;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

use super::client::FeedClient;
use crate::sim::Monitor;

/// Polls the device feed and routes readings into the monitor.
pub struct FeedPoller {
    client: FeedClient,
    monitor: Arc<Mutex<Monitor>>,
}

impl FeedPoller {
    pub fn new(client: FeedClient, monitor: Arc<Mutex<Monitor>>) -> Self {
        Self { client, monitor }
    }

    /// One poll tick. Never fails: failures degrade to the disconnected
    /// indicator.
    pub async fn poll_once(&self) {
        match self.client.fetch().await {
            Ok(reading) => {
                let now_ms = Utc::now().timestamp_millis();
                if let Ok(mut monitor) = self.monitor.lock() {
                    monitor.apply_reading(&reading, now_ms);
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "feed poll failed");
                if let Ok(mut monitor) = self.monitor.lock() {
                    monitor.mark_disconnected();
                }
            }
        }
    }

    /// Spawn the recurring poll loop.
    pub fn start(self) -> JoinHandle<()> {
        let interval_ms = self.client.config().poll_interval_ms.max(1);

        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_millis(interval_ms));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                self.poll_once().await;
            }
        })
    }
}
