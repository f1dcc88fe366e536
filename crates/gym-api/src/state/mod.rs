//! Application state
//!
//! Shared by every handler: the service context, token verification, and
//! the store handles used by the readiness probe.

use std::sync::Arc;

use gym_cache::RedisPool;
use gym_common::{AppConfig, JwtService};
use gym_db::PgPool;
use gym_service::ServiceContext;

#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    jwt_service: Arc<JwtService>,
    config: Arc<AppConfig>,
    pool: PgPool,
    redis: Option<RedisPool>,
}

impl AppState {
    pub fn new(
        service_context: ServiceContext,
        jwt_service: JwtService,
        config: AppConfig,
        pool: PgPool,
        redis: Option<RedisPool>,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            jwt_service: Arc::new(jwt_service),
            config: Arc::new(config),
            pool,
            redis,
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// PostgreSQL pool, for health probes only; services go through the context
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// `None` when no Redis is configured
    pub fn redis(&self) -> Option<&RedisPool> {
        self.redis.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("redis", &self.redis.is_some())
            .finish()
    }
}
