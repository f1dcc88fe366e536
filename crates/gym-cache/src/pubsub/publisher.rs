//! Redis Pub/Sub publisher.
//!
//! Live clients subscribe to their recipient channel; the inbox row written
//! by the Postgres sink stays the durable copy.

use async_trait::async_trait;
use redis::AsyncCommands;
use serde::Serialize;

use gym_core::traits::{NotificationSink, RepoResult};
use gym_core::NewNotification;

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;

#[derive(Clone, Debug)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish a JSON payload, returning the number of receivers
    pub async fn publish<T: Serialize + ?Sized>(
        &self,
        channel: &PubSubChannel,
        payload: &T,
    ) -> RedisResult<u32> {
        let payload = serde_json::to_string(payload)?;
        self.publish_raw(channel, &payload).await
    }

    pub async fn publish_raw(&self, channel: &PubSubChannel, message: &str) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();

        let receivers: u32 = conn.publish(&channel_name, message).await?;

        tracing::debug!(channel = %channel_name, receivers, "Published message");
        Ok(receivers)
    }
}

/// Notification sink publishing to the recipient's channel
#[derive(Clone, Debug)]
pub struct RedisNotificationSink {
    publisher: Publisher,
}

impl RedisNotificationSink {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            publisher: Publisher::new(pool),
        }
    }

    pub fn channel_for(notification: &NewNotification) -> PubSubChannel {
        PubSubChannel::recipient(notification.recipient_role, notification.recipient_id)
    }
}

#[async_trait]
impl NotificationSink for RedisNotificationSink {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn deliver(&self, notification: &NewNotification) -> RepoResult<()> {
        let channel = Self::channel_for(notification);
        self.publisher.publish(&channel, notification).await?;
        Ok(())
    }
}
