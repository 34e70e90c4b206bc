pub mod config;
pub mod error;
pub mod relay;

pub mod kafka;

pub use config::{Config, KafkaConfig, RelayConfig};
pub use error::{Error, Result};
pub use relay::{Delivery, Publisher, Relay, RelaySummary};
