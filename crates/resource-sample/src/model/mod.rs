//! Domain models built from [`ModelTemplate`](resource_framework::ModelTemplate)s.

pub mod user;

pub use user::*;
