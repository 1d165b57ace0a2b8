use std::sync::Arc;

use async_trait::async_trait;
use domain::Order;
use lapin::options::{
    BasicPublishOptions, ConfirmSelectOptions, ExchangeDeclareOptions, QueueBindOptions,
    QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties, ExchangeKind};

use crate::message::{self, CONTENT_TYPE};
use crate::{OrderPublisher, PublishError, Result};

/// AMQP delivery mode for messages that survive a broker restart.
const PERSISTENT: u8 = 2;

/// Where order-created messages are routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmqpSettings {
    /// Durable direct exchange the message is published to.
    pub exchange: String,
    /// Routing key binding the exchange to the queue.
    pub routing_key: String,
    /// Durable queue bound to the exchange.
    pub queue: String,
}

impl Default for AmqpSettings {
    fn default() -> Self {
        Self {
            exchange: "orders_exchange".to_string(),
            routing_key: "order_created".to_string(),
            queue: "order_created_queue".to_string(),
        }
    }
}

/// Publishes order-created notifications to a RabbitMQ-compatible broker.
///
/// Construction declares the topology (durable direct exchange, durable queue,
/// binding) and turns on publisher confirms, so a publish only succeeds once
/// the broker has acknowledged the message. There is no retry: a failed
/// publish is reported to the caller and not attempted again.
#[derive(Clone)]
pub struct AmqpOrderPublisher {
    connection: Arc<Connection>,
    channel: Channel,
    settings: Arc<AmqpSettings>,
}

impl AmqpOrderPublisher {
    /// Connects to the broker at `uri` and declares the topology.
    pub async fn connect(uri: &str, settings: AmqpSettings) -> Result<Self> {
        let connection = Connection::connect(uri, ConnectionProperties::default()).await?;
        Self::from_connection(connection, settings).await
    }

    /// Opens a channel on an existing connection and declares the topology.
    pub async fn from_connection(connection: Connection, settings: AmqpSettings) -> Result<Self> {
        let channel = connection.create_channel().await?;

        channel
            .exchange_declare(
                &settings.exchange,
                ExchangeKind::Direct,
                ExchangeDeclareOptions {
                    durable: true,
                    ..ExchangeDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await?;

        channel
            .queue_declare(
                &settings.queue,
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await?;

        channel
            .queue_bind(
                &settings.queue,
                &settings.exchange,
                &settings.routing_key,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await?;

        channel
            .confirm_select(ConfirmSelectOptions::default())
            .await?;

        tracing::info!(
            exchange = %settings.exchange,
            queue = %settings.queue,
            routing_key = %settings.routing_key,
            "AMQP publisher ready"
        );

        Ok(Self {
            connection: Arc::new(connection),
            channel,
            settings: Arc::new(settings),
        })
    }

    /// Returns the routing settings in use.
    pub fn settings(&self) -> &AmqpSettings {
        &self.settings
    }

    /// Closes the channel, then the connection.
    pub async fn close(&self) -> Result<()> {
        self.channel.close(200, "publisher closed").await?;
        self.connection.close(200, "publisher closed").await?;
        Ok(())
    }
}

#[async_trait]
impl OrderPublisher for AmqpOrderPublisher {
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    async fn publish_created_order(&self, order: &Order) -> Result<()> {
        let body = message::encode(order)?;

        let confirmation = self
            .channel
            .basic_publish(
                &self.settings.exchange,
                &self.settings.routing_key,
                BasicPublishOptions::default(),
                &body,
                BasicProperties::default()
                    .with_content_type(CONTENT_TYPE.into())
                    .with_delivery_mode(PERSISTENT),
            )
            .await?
            .await?;

        if confirmation.is_nack() {
            return Err(PublishError::Rejected {
                order_id: order.id().clone(),
            });
        }

        tracing::info!(exchange = %self.settings.exchange, "order published");
        Ok(())
    }
}
