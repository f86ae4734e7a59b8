//! # Domain Models
//!
//! Pure domain types with minimal dependencies (`serde`, `serde_json`).
//! Keep it lean: no I/O, networking, or business rules. Just data, the
//! normalization applied when records cross the storage boundary, and config shapes.

pub mod config;
pub mod constants;
mod de;
pub mod models;
pub mod registry;
