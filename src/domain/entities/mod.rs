//! Core domain entities representing the business data model.
//!
//! This module contains the fundamental data structures that represent the core
//! concepts of the link-rotation service. Entities are plain data structures
//! without business logic.
//!
//! # Entity Types
//!
//! - [`Link`] - A rotation link owning an ordered set of destinations
//! - [`Destination`] - One candidate redirect target with a fixed rotation position
//! - [`Click`] - A served-redirect event recorded for analytics
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewLink`, `NewClick` - For creating new records
//! - `LinkUpdate` - For partial updates (destinations are replaced wholesale)

pub mod click;
pub mod link;

pub use click::{Click, NewClick};
pub use link::{Destination, Link, LinkUpdate, NewLink};
