use async_trait::async_trait;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::ClientConfig;

use crate::config::KafkaConfig;
use crate::relay::{Delivery, Publisher};
use crate::{Error, Result};

/// Broker client wrapper. Constructed once per run and reused for every
/// send; the connection is released when the producer is dropped.
pub struct LineProducer {
    producer: FutureProducer,
}

impl LineProducer {
    pub fn new(config: &KafkaConfig) -> Result<Self> {
        let mut client_config = ClientConfig::new();
        client_config
            .set("bootstrap.servers", config.brokers.join(","))
            .set("security.protocol", config.security_protocol.as_str())
            .set("client.id", &config.client_id)
            .set("enable.idempotence", config.enable_idempotence.to_string())
            .set("message.timeout.ms", config.message_timeout_ms.to_string());

        if let Some(ca_location) = &config.ssl_ca_location {
            client_config.set("ssl.ca.location", ca_location);
        }

        let producer: FutureProducer = client_config.create()?;

        Ok(Self { producer })
    }
}

#[async_trait]
impl Publisher for LineProducer {
    async fn publish(&self, topic: &str, key: &str, value: &str) -> Result<Delivery> {
        let record = FutureRecord::to(topic).key(key).payload(value);

        // No timeout here: message.timeout.ms bounds the wait.
        let (partition, offset) = self
            .producer
            .send(record, rdkafka::util::Timeout::Never)
            .await
            .map_err(|(e, _)| Error::Kafka(e))?;

        Ok(Delivery {
            topic: topic.to_string(),
            partition,
            offset,
        })
    }
}
