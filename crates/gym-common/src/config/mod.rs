//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CalendarConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, NotificationConfig, RateLimitConfig, RedisConfig, ServerConfig,
};
