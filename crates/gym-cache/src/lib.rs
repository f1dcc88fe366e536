//! # gym-cache
//!
//! Redis layer: a pooled connection manager and pub/sub publishing used to
//! push notifications to live clients.
//!
//! ```ignore
//! use gym_cache::{RedisNotificationSink, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let sink = RedisNotificationSink::new(pool.clone());
//! ```

pub mod pool;
pub mod pubsub;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use pubsub::{
    PubSubChannel, Publisher, RedisNotificationSink, CLASS_CHANNEL_PREFIX,
    NOTIFICATION_CHANNEL_PREFIX,
};
