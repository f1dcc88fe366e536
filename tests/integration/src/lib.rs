//! Integration test utilities for the class booking API
//!
//! Spawns the real server against PostgreSQL and seeds the rows the API
//! does not create itself (trainers, members, memberships).

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
