//! Small helpers shared across layers.

pub mod client_ip;
