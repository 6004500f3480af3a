//! Click entity representing a single served redirect.

use chrono::{DateTime, Utc};

/// A click event recorded when a rotation link serves a redirect.
///
/// Append-only analytical fact: created once per served redirect, never
/// mutated, and expired by the retention worker after a fixed window.
#[derive(Debug, Clone)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    /// Which destination in the ordered set was served.
    pub destination_id: i64,
    pub destination_url: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input data for recording a new click event.
///
/// All client metadata is optional to handle missing headers gracefully.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub destination_id: i64,
    pub destination_url: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}
