//! Axum extractors for request handling
//!
//! Bearer authentication, validated bodies and queries, typed path ids.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::AuthUser;
pub use path::IdPath;
pub use query::{QueryParams, ValidatedQuery};
pub use validated::ValidatedJson;
