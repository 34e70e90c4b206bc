//! The relay loop: read lines from a file, publish each one, report the
//! delivery outcome.
//!
//! Each publish is awaited before the next line is read, so at most one
//! message is ever in flight and acknowledgments arrive in file order. A
//! failed delivery is logged and counted but never aborts the run; only
//! file access and read errors are fatal.

use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::config::{Config, RelayConfig};
use crate::kafka::LineProducer;
use crate::{Error, Result};

/// Acknowledgment returned by the broker for one delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
}

/// The seam between the relay loop and the broker client.
///
/// The production implementation is [`LineProducer`]; tests substitute a
/// recording implementation to observe send order without a broker.
#[async_trait]
pub trait Publisher {
    /// Sends one message and waits for the broker's acknowledgment.
    async fn publish(&self, topic: &str, key: &str, value: &str) -> Result<Delivery>;
}

/// Counters for one complete run over an input file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelaySummary {
    /// Lines read from the file, including skipped ones.
    pub lines: u64,
    pub delivered: u64,
    pub failed: u64,
    pub skipped: u64,
}

pub struct Relay<P> {
    config: RelayConfig,
    publisher: P,
}

impl Relay<LineProducer> {
    /// Builds a relay with a single long-lived producer, reused across all
    /// sends of the run.
    pub fn new(config: &Config) -> Result<Self> {
        let producer = LineProducer::new(&config.kafka)?;
        Ok(Self::with_publisher(config.relay.clone(), producer))
    }
}

impl<P: Publisher> Relay<P> {
    pub fn with_publisher(config: RelayConfig, publisher: P) -> Self {
        Self { config, publisher }
    }

    /// Relays every line of `path` to the configured topic, in file order.
    ///
    /// Returns the run counters, or an error if the file cannot be opened
    /// or reading fails mid-iteration. The file handle is released on every
    /// exit path.
    pub async fn run(&self, path: impl AsRef<Path>) -> Result<RelaySummary> {
        let path = path.as_ref();
        let file = File::open(path).await.map_err(|source| Error::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        let mut lines = BufReader::new(file).lines();
        let mut summary = RelaySummary::default();

        while let Some(line) = lines.next_line().await? {
            let trimmed = line.trim();
            info!("s={}", trimmed);
            summary.lines += 1;

            if self.config.skip_empty && trimmed.is_empty() {
                debug!("skipping empty line");
                summary.skipped += 1;
                continue;
            }

            match self
                .publisher
                .publish(&self.config.topic, &self.config.key, trimmed)
                .await
            {
                Ok(delivery) => {
                    summary.delivered += 1;
                    info!(
                        "record produced to topic={} partition={} offset={}",
                        delivery.topic, delivery.partition, delivery.offset
                    );
                }
                Err(e) => {
                    summary.failed += 1;
                    warn!("delivery failed: {}", e);
                }
            }
        }

        Ok(summary)
    }
}
