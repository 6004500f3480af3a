//! Rotation snapshot and cursor arithmetic.
//!
//! A [`LinkSnapshot`] is the denormalized copy of a link's destination list
//! that lives in the rotation cache as JSON. The cursor is a separate cache
//! entry holding the position to serve on the next request; when it is absent
//! (cold cache, eviction, TTL expiry) rotation restarts at position 0.
//!
//! The selection rules here are pure functions so the accepted concurrency
//! model stays in the resolver: two racing requests may both serve the same
//! position, which is a tolerated approximation of round-robin, not a bug.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// One destination inside a cached snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationSnapshot {
    pub id: i64,
    pub url: String,
    pub position: i32,
}

/// Cached denormalized copy of a link's destination set.
///
/// Built from the durable store on a cache miss and written back with a
/// bounded TTL. Rebuilding twice from the same stored state yields identical
/// snapshots, so concurrent misses overwriting each other are harmless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSnapshot {
    pub id: i64,
    pub destinations: Vec<DestinationSnapshot>,
}

impl LinkSnapshot {
    /// Builds a snapshot from a durable link.
    pub fn from_link(link: &Link) -> Self {
        Self {
            id: link.id,
            destinations: link
                .destinations
                .iter()
                .map(|d| DestinationSnapshot {
                    id: d.id,
                    url: d.url.clone(),
                    position: d.position,
                })
                .collect(),
        }
    }

    pub fn destination_count(&self) -> usize {
        self.destinations.len()
    }

    /// Selects the destination to serve for the given cursor.
    ///
    /// Matches on `position == cursor`; if nothing matches (the destination
    /// set shrank while a stale cursor survived), falls back to the first
    /// destination rather than failing. Returns `None` only for an empty
    /// snapshot, which the resolver never caches.
    pub fn select(&self, cursor: u32) -> Option<&DestinationSnapshot> {
        self.destinations
            .iter()
            .find(|d| d.position == cursor as i32)
            .or_else(|| self.destinations.first())
    }
}

/// Computes the cursor for the request after this one: `(cursor + 1) mod n`.
///
/// A stale out-of-range cursor re-enters `[0, n)` here, so drift self-heals
/// after a single request.
pub fn next_cursor(cursor: u32, destination_count: usize) -> u32 {
    if destination_count == 0 {
        return 0;
    }
    (cursor.wrapping_add(1)) % destination_count as u32
}
