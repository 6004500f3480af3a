//! Application services orchestrating domain and infrastructure.

pub mod auth_service;
pub mod invalidator;
pub mod link_service;
pub mod resolver;

pub use auth_service::AuthService;
pub use invalidator::CacheInvalidator;
pub use link_service::LinkService;
pub use resolver::{RedirectResolver, Resolution};
