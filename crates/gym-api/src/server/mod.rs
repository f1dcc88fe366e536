//! Server setup and initialization
//!
//! Wires the PostgreSQL adapters, the optional Redis publisher and the
//! notification worker into a service context, then serves the router.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use gym_cache::{RedisNotificationSink, RedisPool};
use gym_common::{AppConfig, AppError, JwtService};
use gym_core::{NotificationSink, WeeklyGrid};
use gym_db::{
    create_pool, run_migrations, PgBookingStore, PgClassScheduleRepository, PgMemberRepository,
    PgMembershipRepository, PgNotificationRepository, PgPool, PgReservationRepository, PoolConfig,
};
use gym_service::{NotificationDispatcher, ServiceContext};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_health_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware.
///
/// Health probes get request tracing but bypass rate limiting.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
        config.api.request_timeout_secs,
    )?;
    let health = apply_health_middleware(health_routes());

    Ok(api.merge(health).with_state(state))
}

/// Connect the stores and build the service context
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let redis = match &config.redis {
        Some(redis_config) => {
            let redis_pool =
                RedisPool::from_config(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
            if let Err(e) = redis_pool.health_check().await {
                warn!(error = %e, "Redis is not reachable yet");
            }
            Some(redis_pool)
        }
        None => {
            info!("REDIS_URL not set; live notification publishing disabled");
            None
        }
    };

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);
    let grid = WeeklyGrid::from_hours(
        config.calendar.start_hour,
        config.calendar.end_hour,
        config.calendar.slot_minutes,
    )?;

    let service_context = build_service_context(
        &pool,
        redis.clone(),
        config.notifications.queue_capacity,
        grid,
    )?;

    Ok(AppState::new(service_context, jwt_service, config, pool, redis))
}

fn build_service_context(
    pool: &PgPool,
    redis: Option<RedisPool>,
    queue_capacity: usize,
    grid: WeeklyGrid,
) -> Result<ServiceContext, AppError> {
    let notification_repo = Arc::new(PgNotificationRepository::new(pool.clone()));

    let mut sinks: Vec<Arc<dyn NotificationSink>> = Vec::with_capacity(2);
    sinks.push(notification_repo.clone());
    if let Some(redis_pool) = redis {
        sinks.push(Arc::new(RedisNotificationSink::new(redis_pool)));
    }
    // The worker runs for the lifetime of the process
    let (notifier, _worker) = NotificationDispatcher::spawn(sinks, queue_capacity);

    ServiceContext::builder()
        .class_repo(Arc::new(PgClassScheduleRepository::new(pool.clone())))
        .reservation_repo(Arc::new(PgReservationRepository::new(pool.clone())))
        .membership_repo(Arc::new(PgMembershipRepository::new(pool.clone())))
        .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
        .notification_repo(notification_repo)
        .booking_store(Arc::new(PgBookingStore::new(pool.clone())))
        .notifier(notifier)
        .calendar_grid(grid)
        .build()
        .map_err(AppError::from)
}

/// Run the HTTP server until it fails or the process is signalled
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
