//! Infrastructure layer: database and cache integrations.
//!
//! - [`cache`] - Rotation cache backends (Redis, in-memory, null)
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod persistence;
