//! Kernel utilities shared across slices.
//! Keep this crate lightweight: config loading, the two record stores, and (with
//! the `server` feature) the axum state registry, error envelope and system routes.
//!
//! ## Config loading
//! ```rust,no_run
//! use evreg_kernel::config::load_config;
//! use evreg_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap_or_default();
//! assert!(cfg.server.port > 0);
//! ```

pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;
mod stores;

pub use evreg_domain as domain;
pub use evreg_storage as storage;
pub use stores::Stores;
