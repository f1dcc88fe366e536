//! # gym-db
//!
//! Database layer implementing the gym-core ports with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and runtime SQL migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations and the locked booking transaction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gym_db::pool::{create_pool, PoolConfig};
//! use gym_db::repositories::PgBookingStore;
//! use gym_core::traits::BookingStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::default()).await?;
//!     let store = PgBookingStore::new(pool);
//!     let mut tx = store.begin().await?;
//!     // lock, check, insert...
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgBookingStore, PgBookingTx, PgClassScheduleRepository, PgMemberRepository,
    PgMembershipRepository, PgNotificationRepository, PgReservationRepository,
};
