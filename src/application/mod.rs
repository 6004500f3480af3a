//! Application layer: business logic and service orchestration.
//!
//! Services wire domain traits to infrastructure implementations:
//!
//! - [`services::RedirectResolver`] - the redirect hot path
//! - [`services::LinkService`] - administrative link management
//! - [`services::CacheInvalidator`] - synchronous cache purge on mutation
//! - [`services::AuthService`] - admin token validation

pub mod services;
