use line_relay::config::SecurityProtocol;
use line_relay::{Config, KafkaConfig, Relay, RelayConfig};
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::Message;
use std::env;
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

/// Get test configuration from environment variables
fn get_test_config(topic: &str) -> Config {
    let kafka = KafkaConfig {
        brokers: env::var("TEST_KAFKA_BROKERS")
            .unwrap_or_else(|_| "localhost:9092".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect(),
        security_protocol: SecurityProtocol::Plaintext, // No TLS for tests
        ssl_ca_location: None,
        client_id: format!("line-relay-test-{}", std::process::id()),
        enable_idempotence: true,
        message_timeout_ms: 10_000,
    };

    Config {
        kafka,
        relay: RelayConfig {
            topic: topic.to_string(),
            key: "orders".to_string(),
            skip_empty: false,
        },
    }
}

#[tokio::test]
#[ignore] // Requires running Kafka; run with: cargo test -- --ignored
async fn test_end_to_end_relay() {
    tracing_subscriber::fmt()
        .with_env_filter("line_relay=debug,rdkafka=info")
        .try_init()
        .ok();

    let topic = format!("line_relay_test_{}", std::process::id());
    let config = get_test_config(&topic);

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("orders_list");
    std::fs::write(&input, "alpha\nbeta\ngamma\n").unwrap();

    let relay = Relay::new(&config).unwrap();
    let summary = relay.run(&input).await.unwrap();

    assert_eq!(summary.lines, 3);
    assert_eq!(summary.delivered, 3);
    assert_eq!(summary.failed, 0);

    // Consume the messages back and check value and ordering
    let consumer: StreamConsumer = ClientConfig::new()
        .set("bootstrap.servers", config.kafka.brokers.join(","))
        .set("group.id", format!("line-relay-verify-{}", std::process::id()))
        .set("auto.offset.reset", "earliest")
        .set("enable.auto.commit", "false")
        .create()
        .unwrap();
    consumer.subscribe(&[topic.as_str()]).unwrap();

    let mut received = Vec::new();
    while received.len() < 3 {
        match timeout(Duration::from_secs(10), consumer.recv()).await {
            Ok(Ok(message)) => {
                let payload = message
                    .payload()
                    .map(|p| String::from_utf8_lossy(p).to_string())
                    .unwrap_or_default();
                let key = message
                    .key()
                    .map(|k| String::from_utf8_lossy(k).to_string())
                    .unwrap_or_default();
                assert_eq!(key, "orders");
                received.push(payload);
            }
            Ok(Err(e)) => panic!("consumer error: {}", e),
            Err(_) => panic!("timed out waiting for messages"),
        }
    }

    assert_eq!(received, vec!["alpha", "beta", "gamma"]);
}

#[tokio::test]
#[ignore] // May fail if system has specific network configurations
async fn test_producer_creation() {
    let config = get_test_config("unused");
    let result = Relay::new(&config);

    // Should succeed even if Kafka is not running (just creates the producer)
    assert!(result.is_ok());
}
