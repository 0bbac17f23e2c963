//! # API Route Modules
//!
//! - `processes` — process discovery and synchronous execution.

pub mod processes;
