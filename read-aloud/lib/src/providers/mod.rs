//! Speech platform implementations.

pub mod host;
