//! Redis Pub/Sub publishing for live notification fan-out.

mod channels;
mod publisher;

pub use channels::{PubSubChannel, CLASS_CHANNEL_PREFIX, NOTIFICATION_CHANNEL_PREFIX};
pub use publisher::{Publisher, RedisNotificationSink};
