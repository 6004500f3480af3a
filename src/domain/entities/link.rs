//! Link entity: one public key, an ordered set of rotation destinations.

use chrono::{DateTime, Utc};

/// A single redirect target within a link's rotation.
///
/// Positions are dense and zero-based: a link with N destinations holds
/// positions `0..N`. `click_count` tracks clicks since the destination was
/// last assigned; wholesale replacement of a link's destinations resets it.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub id: i64,
    pub link_id: i64,
    pub url: String,
    pub position: i32,
    pub click_count: i64,
}

/// A rotation link identified by a unique human-chosen key.
///
/// Owns an ordered sequence of [`Destination`] entries. The link is the unit
/// of cache invalidation: any change to its destination set must purge both
/// the cached snapshot and the rotation cursor for its key.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub is_active: bool,
    pub total_clicks: i64,
    pub destinations: Vec<Destination>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if the link has at least one destination to serve.
    pub fn is_routable(&self) -> bool {
        self.is_active && !self.destinations.is_empty()
    }
}

/// Input data for creating a new link.
///
/// Destination URLs are assigned positions `0..N` in the order given.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub key: String,
    pub name: String,
    pub destination_urls: Vec<String>,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged. When `destination_urls` is `Some`, the
/// destination set is replaced wholesale: positions renumbered from 0 and
/// click counters reset.
#[derive(Debug, Clone, Default)]
pub struct LinkUpdate {
    pub key: Option<String>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub destination_urls: Option<Vec<String>>,
}
