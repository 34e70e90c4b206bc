//! Runtime configuration for the relay.
//!
//! Broker settings are resolved once at startup from environment variables,
//! with defaults declared as named constants. Resolution and validation are
//! separate steps: [`KafkaConfig::from_env`] resolves and then validates,
//! so an `SSL` setup with no CA certificate is rejected before a producer
//! is ever built.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

use crate::{Error, Result};

/// Broker address list used when `KAFKA_BOOTSTRAP_SERVERS` is unset.
pub const DEFAULT_BROKERS: &str = "localhost:9093";
/// Transport mode used when `KAFKA_SECURITY_PROTOCOL` is unset.
pub const DEFAULT_SECURITY_PROTOCOL: SecurityProtocol = SecurityProtocol::Ssl;
/// Client identity reported to the broker when `KAFKA_CLIENT_ID` is unset.
pub const DEFAULT_CLIENT_ID: &str = "line-relay";
/// Idempotent-producer setting when `KAFKA_ENABLE_IDEMPOTENCE` is unset.
pub const DEFAULT_ENABLE_IDEMPOTENCE: bool = true;
/// Delivery timeout handed to the client when `KAFKA_MESSAGE_TIMEOUT_MS` is unset.
pub const DEFAULT_MESSAGE_TIMEOUT_MS: u64 = 30_000;

/// Topic published to when `--topic` is not given.
pub const DEFAULT_TOPIC: &str = "local-input-topic";
/// Message key used when `--key` is not given.
pub const DEFAULT_KEY: &str = "orders";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub kafka: KafkaConfig,
    pub relay: RelayConfig,
}

/// Connection options for the broker client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KafkaConfig {
    pub brokers: Vec<String>,
    pub security_protocol: SecurityProtocol,
    /// Trust anchor for TLS. Required when `security_protocol` is `Ssl`;
    /// there is no embedded default path.
    pub ssl_ca_location: Option<String>,
    pub client_id: String,
    pub enable_idempotence: bool,
    pub message_timeout_ms: u64,
}

/// What the relay sends and where.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    pub topic: String,
    /// Key attached to every message of a run.
    pub key: String,
    /// Skip lines that are empty after trimming instead of sending
    /// empty-value messages.
    pub skip_empty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SecurityProtocol {
    Plaintext,
    Ssl,
}

impl SecurityProtocol {
    /// librdkafka spelling of the protocol name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityProtocol::Plaintext => "PLAINTEXT",
            SecurityProtocol::Ssl => "SSL",
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PLAINTEXT" => Ok(SecurityProtocol::Plaintext),
            "SSL" => Ok(SecurityProtocol::Ssl),
            other => Err(Error::Config(format!(
                "unsupported security protocol '{}' (expected PLAINTEXT or SSL)",
                other
            ))),
        }
    }
}

impl fmt::Display for SecurityProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl KafkaConfig {
    /// Resolves and validates broker settings from the process environment.
    pub fn from_env() -> Result<Self> {
        let config = Self::resolve(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves settings from any lookup function, applying defaults for
    /// unset variables. Does not validate.
    fn resolve(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let brokers = get("KAFKA_BOOTSTRAP_SERVERS")
            .unwrap_or_else(|| DEFAULT_BROKERS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        if brokers.is_empty() {
            return Err(Error::Config(
                "KAFKA_BOOTSTRAP_SERVERS must name at least one broker".to_string(),
            ));
        }

        let security_protocol = match get("KAFKA_SECURITY_PROTOCOL") {
            Some(value) => SecurityProtocol::parse(&value)?,
            None => DEFAULT_SECURITY_PROTOCOL,
        };

        let enable_idempotence = match get("KAFKA_ENABLE_IDEMPOTENCE") {
            Some(value) => value
                .trim()
                .to_ascii_lowercase()
                .parse::<bool>()
                .map_err(|_| {
                    Error::Config(format!(
                        "KAFKA_ENABLE_IDEMPOTENCE must be 'true' or 'false', got '{}'",
                        value
                    ))
                })?,
            None => DEFAULT_ENABLE_IDEMPOTENCE,
        };

        let message_timeout_ms = match get("KAFKA_MESSAGE_TIMEOUT_MS") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!(
                    "KAFKA_MESSAGE_TIMEOUT_MS must be an integer, got '{}'",
                    value
                ))
            })?,
            None => DEFAULT_MESSAGE_TIMEOUT_MS,
        };

        Ok(Self {
            brokers,
            security_protocol,
            ssl_ca_location: get("KAFKA_SSL_CA_LOCATION"),
            client_id: get("KAFKA_CLIENT_ID").unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
            enable_idempotence,
            message_timeout_ms,
        })
    }

    /// Rejects combinations the producer cannot be built from.
    fn validate(&self) -> Result<()> {
        if self.security_protocol == SecurityProtocol::Ssl && self.ssl_ca_location.is_none() {
            return Err(Error::Config(
                "KAFKA_SSL_CA_LOCATION must be set when the security protocol is SSL".to_string(),
            ));
        }
        Ok(())
    }
}
