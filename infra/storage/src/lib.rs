//! File persistence for the registration backend.
//!
//! Two layers live here:
//!
//! 1. **[`Storage`]**: a sandboxed handle over a data directory. Paths are resolved
//!    against the root and may not escape it; writes use an atomic swap (unique temp
//!    file, `fsync`, `rename`) so a reader never sees a half-written file. Stale temp
//!    files left by a crash are purged when the handle is created.
//! 2. **[`Collection`]**: an ordered list of JSON records stored in one file. It is the
//!    load/save contract the feature slices build on, with a [`LoadPolicy`] deciding
//!    what an unreadable file means and a mutex serializing read-modify-write cycles.
//!
//! # Example
//!
//! ```rust
//! use evreg_storage::{Collection, LoadPolicy, Storage, StorageError};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), StorageError> {
//! # let tmp = tempfile::tempdir().unwrap();
//! let storage = Storage::builder().root(tmp.path().join("data")).connect().await?;
//! let events: Collection<serde_json::Value> =
//!     Collection::new(storage, "events.json", LoadPolicy::Tolerant);
//!
//! let guard = events.lock().await;
//! let mut items = guard.load().await?;
//! items.push(serde_json::json!({ "name": "Chess", "enabled": true }));
//! guard.save(&items).await?;
//! drop(guard);
//!
//! assert_eq!(events.load().await?.len(), 1);
//! # Ok(())
//! # }
//! ```

mod builder;
mod collection;
mod engine;
mod error;
mod maintenance;
mod security;

pub use builder::StorageBuilder;
pub use collection::{Collection, CollectionGuard, LoadPolicy};
pub use engine::Storage;
pub use error::{StorageError, StorageErrorExt};
