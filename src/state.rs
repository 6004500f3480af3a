//! Shared application state injected into handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{AuthService, LinkService, RedirectResolver};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::RotationCache;

/// Application state shared across all request handlers.
///
/// Cheap to clone: everything is behind an `Arc` or a channel handle.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<RedirectResolver>,
    pub link_service: Arc<LinkService>,
    pub auth_service: Arc<AuthService>,
    /// Used by the health endpoint to probe the durable store.
    pub links: Arc<dyn LinkRepository>,
    pub cache: Arc<dyn RotationCache>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// When true, client IPs are read from forwarded headers.
    pub behind_proxy: bool,
}
