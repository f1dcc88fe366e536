//! Route handlers
//!
//! Thin adapters: extract, call one service operation, respond.

pub mod classes;
pub mod health;
pub mod members;
pub mod notifications;
pub mod reservations;
pub mod trainers;
