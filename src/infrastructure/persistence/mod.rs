//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries
//! are bound at runtime (no compile-time verification) so the crate builds
//! without a provisioned database; the schema lives in `migrations/` and is
//! applied at startup.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link + destination storage, the source of truth
//! - [`PgClickRepository`] - Click append, counter increments, retention purge

pub mod pg_click_repository;
pub mod pg_link_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
