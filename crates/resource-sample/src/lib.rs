//! # Resource Sample Library
//!
//! This library exposes the demo's modules for integration testing.

pub mod lifecycle;
pub mod model;
pub mod server;
