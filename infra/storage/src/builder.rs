use crate::engine::{Storage, StorageInner};
use crate::error::{StorageError, StorageErrorExt};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::fs;
use tracing::info;

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl private::Sealed for NoRoot {}
impl private::Sealed for WithRoot {}

/// Typed builder: `connect` only exists once a root directory was given.
#[allow(private_bounds)]
#[derive(Debug)]
pub struct StorageBuilder<S: private::Sealed = NoRoot> {
    state: S,
    create: bool,
}

impl Default for StorageBuilder<NoRoot> {
    fn default() -> Self {
        Self { state: NoRoot, create: true }
    }
}

#[allow(private_bounds)]
impl<S: private::Sealed> StorageBuilder<S> {
    /// Whether a missing root directory is created (default `true`).
    #[must_use]
    pub const fn create(mut self, enable: bool) -> Self {
        self.create = enable;
        self
    }
}

impl StorageBuilder<NoRoot> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn root(self, path: impl Into<PathBuf>) -> StorageBuilder<WithRoot> {
        StorageBuilder { state: WithRoot(path.into()), create: self.create }
    }
}

impl StorageBuilder<WithRoot> {
    /// Creates (optionally) and canonicalizes the root, then purges stale temp files.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the root is missing and `create(false)` was set,
    /// or if the process cannot create or resolve it.
    pub async fn connect(self) -> Result<Storage, StorageError> {
        let root = self.state.0;

        if self.create {
            fs::create_dir_all(&root)
                .await
                .context(format!("Failed to bootstrap storage root: {}", root.display()))?;
        }

        let canonical = fs::canonicalize(&root)
            .await
            .context(format!("Failed to resolve storage root: {}", root.display()))?;
        info!(path = %canonical.display(), "Storage root ready");

        let storage = Storage {
            inner: Arc::new(StorageInner { root: canonical, tmp_counter: AtomicU64::new(1) }),
        };
        storage.purge_tmp().await;

        Ok(storage)
    }
}
