//! Domain layer containing business entities and logic.
//!
//! This module implements the core domain logic following Clean Architecture
//! principles. It defines entities, repository interfaces, and the rotation
//! model independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`rotation`] - Cached snapshot model and cursor arithmetic
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//! - [`retention`] - Click record expiry worker
//!
//! # Click Processing Flow
//!
//! 1. The redirect handler resolves a destination and responds
//! 2. A [`click_event::ClickEvent`] is pushed onto a bounded channel
//! 3. [`click_worker::run_click_worker`] appends the click and bumps counters
//! 4. [`retention::run_retention_worker`] expires old records

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
pub mod retention;
pub mod rotation;
