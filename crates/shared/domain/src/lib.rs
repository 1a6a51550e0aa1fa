//! # Domain Models
//!
//! Pure data shared by every NCSS crate: configuration structures, the feature slice
//! registry and API constants. No I/O, no networking, and `serde` as the only dependency.

pub mod config;
pub mod constants;
pub mod registry;
