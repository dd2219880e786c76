//! Loyalty events demo: schema-registered producer and consumer
//!
//! `loyalty produce` publishes a batch of `CustomerLoyalty` events, letting
//! the pipeline register the value schema on first use. `loyalty consume`
//! joins a consumer group and prints decoded events until Ctrl-C.

use clap::{Parser, Subcommand};
use log::{error, info, warn};
use schemastream::{
    BrokerSecurity, CommonKafkaConfig, ConsumerConfig, EventConsumer, EventProducer,
    ProducerConfig, RegistryClient, RegistryCredential, RegistryEndpoint, SaslMechanism,
    SchemaResolver,
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomerLoyalty {
    customer_id: i32,
    points_added: i32,
    description: String,
}

const LOYALTY_SCHEMA: &str = r#"{
    "type": "record",
    "name": "CustomerLoyalty",
    "namespace": "schemastream.events",
    "fields": [
        {"name": "customerId", "type": "int"},
        {"name": "pointsAdded", "type": "int"},
        {"name": "description", "type": "string"}
    ]
}"#;

#[derive(Parser)]
#[command(name = "loyalty", about = "Schema-registered loyalty event producer/consumer")]
struct Cli {
    /// Kafka bootstrap list
    #[arg(long, env = "KAFKA_BROKERS", default_value = "localhost:9092")]
    brokers: String,

    /// Topic carrying loyalty events
    #[arg(long, env = "LOYALTY_TOPIC", default_value = "loyalty")]
    topic: String,

    /// Schema registry base URL
    #[arg(long, env = "SCHEMA_REGISTRY_URL", default_value = "http://localhost:8081")]
    registry_url: String,

    /// Subject the value schema is registered under
    #[arg(long, env = "SCHEMA_SUBJECT", default_value = "loyalty-value")]
    subject: String,

    /// SASL username; enables SASL_SSL together with --sasl-password
    #[arg(long, env = "KAFKA_SASL_USERNAME")]
    sasl_username: Option<String>,

    /// SASL password
    #[arg(long, env = "KAFKA_SASL_PASSWORD", hide_env_values = true)]
    sasl_password: Option<String>,

    /// CA certificate bundle for the broker TLS connection
    #[arg(long, env = "KAFKA_CA_CERT")]
    ca_cert: Option<String>,

    /// Registry basic-auth username
    #[arg(long, env = "SCHEMA_REGISTRY_USERNAME")]
    registry_username: Option<String>,

    /// Registry basic-auth password
    #[arg(long, env = "SCHEMA_REGISTRY_PASSWORD", hide_env_values = true)]
    registry_password: Option<String>,

    /// Pre-acquired bearer token for the registry
    #[arg(long, env = "SCHEMA_REGISTRY_TOKEN", hide_env_values = true)]
    registry_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a batch of loyalty events
    Produce {
        /// Number of events to send
        #[arg(long, default_value_t = 4)]
        count: i32,

        /// Customer the points are credited to
        #[arg(long, default_value_t = 1)]
        customer_id: i32,
    },
    /// Consume loyalty events until Ctrl-C
    Consume {
        /// Consumer group to join
        #[arg(long, env = "CONSUMER_GROUP", default_value = "loyalty-consumer")]
        group: String,
    },
}

impl Cli {
    fn common_kafka_config(&self) -> CommonKafkaConfig {
        let security = match (&self.sasl_username, &self.sasl_password) {
            (Some(username), Some(password)) => BrokerSecurity::SaslSsl {
                mechanism: SaslMechanism::Plain,
                username: username.clone(),
                password: password.clone(),
                ca_cert_path: self.ca_cert.clone(),
            },
            _ => BrokerSecurity::Plaintext,
        };
        CommonKafkaConfig::new(self.brokers.clone()).security(security)
    }

    fn registry_endpoint(&self) -> RegistryEndpoint {
        let credential = if let Some(token) = &self.registry_token {
            RegistryCredential::BearerToken(token.clone())
        } else if let (Some(username), Some(password)) =
            (&self.registry_username, &self.registry_password)
        {
            RegistryCredential::Basic {
                username: username.clone(),
                password: password.clone(),
            }
        } else {
            RegistryCredential::None
        };
        RegistryEndpoint::new(self.registry_url.clone()).credential(credential)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let endpoint = cli.registry_endpoint();
    endpoint.validate()?;
    let registry: Arc<dyn SchemaResolver> = Arc::new(RegistryClient::from_endpoint(&endpoint)?);

    match &cli.command {
        Command::Produce { count, customer_id } => {
            produce(&cli, registry, *count, *customer_id).await
        }
        Command::Consume { group } => consume(&cli, registry, group).await,
    }
}

async fn produce(
    cli: &Cli,
    registry: Arc<dyn SchemaResolver>,
    count: i32,
    customer_id: i32,
) -> Result<(), Box<dyn Error>> {
    let config = ProducerConfig::new(
        cli.brokers.clone(),
        cli.topic.clone(),
        cli.subject.clone(),
        LOYALTY_SCHEMA,
    )
    .common(cli.common_kafka_config())
    .auto_register(true);

    let producer = EventProducer::<CustomerLoyalty>::connect(config, registry).await?;
    info!(
        "Sending {} events to topic '{}' with schema id {}",
        count,
        cli.topic,
        producer.schema_id()
    );

    let mut handles = Vec::with_capacity(count as usize);
    for i in 0..count {
        let event = CustomerLoyalty {
            customer_id,
            points_added: i,
            description: format!("Points added: {}", i),
        };
        handles.push(producer.send(None, &event)?);
    }

    let mut failed = 0;
    for handle in handles {
        let outcome = handle.outcome().await;
        match (&outcome.partition, &outcome.error) {
            (Some(partition), None) => info!(
                "Delivered to partition {} offset {}",
                partition,
                outcome.offset.unwrap_or(-1)
            ),
            (_, Some(e)) => {
                error!("Delivery failed: {}", e);
                failed += 1;
            }
            _ => {}
        }
    }

    producer.close(Duration::from_secs(30)).await?;
    if failed > 0 {
        return Err(format!("{} of {} deliveries failed", failed, count).into());
    }
    info!("All {} events delivered", count);
    Ok(())
}

async fn consume(
    cli: &Cli,
    registry: Arc<dyn SchemaResolver>,
    group: &str,
) -> Result<(), Box<dyn Error>> {
    let config = ConsumerConfig::new(cli.brokers.clone(), group, cli.topic.clone())
        .common(cli.common_kafka_config());

    let consumer = EventConsumer::<CustomerLoyalty>::connect(config, registry)?;
    println!("Consuming messages from topic: {}", cli.topic);

    let token = consumer.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, shutting down");
            token.cancel();
        }
    });

    loop {
        match consumer.poll(Duration::from_secs(5)).await {
            Ok(Some(message)) => {
                let loyalty = message.value();
                println!(
                    "Customer {} received {} points",
                    loyalty.customer_id, loyalty.points_added
                );
                consumer.commit()?;
            }
            Ok(None) => continue,
            Err(e) if e.is_per_message() => {
                warn!("Skipping undecodable message: {}", e);
            }
            Err(schemastream::ConsumerError::Canceled) => break,
            Err(e) => {
                error!("Consume error: {}", e);
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }

    consumer.close();
    Ok(())
}
