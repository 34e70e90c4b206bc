use clap::Parser;
use line_relay::config::{DEFAULT_KEY, DEFAULT_TOPIC};
use line_relay::{Config, KafkaConfig, Relay, RelayConfig, Result};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "line-relay")]
#[command(about = "Relay lines from a text file to a Kafka topic", long_about = None)]
struct Args {
    #[arg(value_name = "FILE", help = "Input file, one message per line")]
    file: PathBuf,

    #[arg(short, long, default_value = DEFAULT_TOPIC, help = "Topic to publish to")]
    topic: String,

    #[arg(short, long, default_value = DEFAULT_KEY, help = "Key attached to every message")]
    key: String,

    #[arg(long, help = "Skip lines that are empty after trimming")]
    skip_empty: bool,

    #[arg(short, long, help = "Enable JSON output for logs")]
    json_logs: bool,

    #[arg(short, long, help = "Verbose logging")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.json_logs, args.verbose);

    info!("Starting line-relay");

    let kafka = match KafkaConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let config = Config {
        kafka,
        relay: RelayConfig {
            topic: args.topic,
            key: args.key,
            skip_empty: args.skip_empty,
        },
    };

    info!(
        kafka_brokers = ?config.kafka.brokers,
        security_protocol = %config.kafka.security_protocol,
        client_id = %config.kafka.client_id,
        topic = %config.relay.topic,
        key = %config.relay.key,
        input_file = ?args.file,
        "Configuration summary"
    );

    let relay = Relay::new(&config)?;

    match relay.run(&args.file).await {
        Ok(summary) => {
            if summary.failed > 0 {
                warn!(
                    lines = summary.lines,
                    delivered = summary.delivered,
                    failed = summary.failed,
                    skipped = summary.skipped,
                    "Relay finished with delivery failures"
                );
            } else {
                info!(
                    lines = summary.lines,
                    delivered = summary.delivered,
                    skipped = summary.skipped,
                    "Relay finished"
                );
            }
            Ok(())
        }
        Err(e) => {
            error!("Relay failed: {}", e);
            Err(e)
        }
    }
}

fn init_logging(json: bool, verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("line_relay=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("line_relay=info,warn"))
    };

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
