//! Click event model for asynchronous click tracking.

use crate::domain::entities::NewClick;

/// An in-memory representation of a click event for async processing.
///
/// Used to pass click information from the redirect handler to the background
/// worker via a channel. This decouples the HTTP response from database
/// writes, allowing fast redirects without blocking on accounting work.
///
/// # Design
///
/// - Carries the resolved destination (id + URL) so the worker never re-reads
///   the link on the hot path's behalf
/// - All client metadata is optional to handle missing headers gracefully
/// - Cloneable for sending across async boundaries
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub link_id: i64,
    pub destination_id: i64,
    pub destination_url: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl ClickEvent {
    pub fn new(
        link_id: i64,
        destination_id: i64,
        destination_url: String,
        ip_address: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            destination_id,
            destination_url,
            ip_address,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}

impl From<ClickEvent> for NewClick {
    fn from(ev: ClickEvent) -> Self {
        NewClick {
            link_id: ev.link_id,
            destination_id: ev.destination_id,
            destination_url: ev.destination_url,
            ip_address: ev.ip_address,
            user_agent: ev.user_agent,
            referer: ev.referer,
        }
    }
}
