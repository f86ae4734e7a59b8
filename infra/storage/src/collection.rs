//! Ordered JSON record lists, one file per collection.

use crate::engine::Storage;
use crate::error::{StorageError, StorageErrorExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// What loading a collection does when the file exists but does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Log a warning and treat the collection as empty.
    #[default]
    Tolerant,
    /// Fail with [`StorageError::Corrupted`].
    Strict,
}

struct CollectionInner {
    storage: Storage,
    file: Cow<'static, str>,
    policy: LoadPolicy,
    write_lock: Mutex<()>,
}

/// A list of `T` persisted as a pretty-printed JSON array.
///
/// Reads through [`Collection::load`] never block. Every read-modify-write cycle goes
/// through [`Collection::lock`], so two mutations of the same collection never interleave.
/// Clones share the lock.
pub struct Collection<T> {
    inner: Arc<CollectionInner>,
    marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner), marker: PhantomData }
    }
}

impl<T> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("file", &self.inner.file)
            .field("policy", &self.inner.policy)
            .finish_non_exhaustive()
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(storage: Storage, file: impl Into<Cow<'static, str>>, policy: LoadPolicy) -> Self {
        Self {
            inner: Arc::new(CollectionInner {
                storage,
                file: file.into(),
                policy,
                write_lock: Mutex::new(()),
            }),
            marker: PhantomData,
        }
    }

    /// File name relative to the storage root.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.inner.file
    }

    #[must_use]
    pub fn policy(&self) -> LoadPolicy {
        self.inner.policy
    }

    /// Reads the current contents without taking the write lock.
    ///
    /// A missing file is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupted`] under [`LoadPolicy::Strict`] when the file does
    /// not parse, and [`StorageError::Io`] when it cannot be read.
    pub async fn load(&self) -> Result<Vec<T>, StorageError> {
        let bytes = match self.inner.storage.read(self.file()).await {
            Ok(bytes) => bytes,
            Err(StorageError::FileNotFound { .. }) => {
                debug!(file = %self.file(), "Collection file missing, starting empty");
                return Ok(Vec::new());
            },
            Err(err) => return Err(err),
        };

        match serde_json::from_slice(&bytes) {
            Ok(items) => Ok(items),
            Err(err) => match self.inner.policy {
                LoadPolicy::Tolerant => {
                    warn!(file = %self.file(), error = %err, "Unreadable collection treated as empty");
                    Ok(Vec::new())
                },
                LoadPolicy::Strict => Err(StorageError::Corrupted {
                    message: err.to_string().into(),
                    context: Some(self.file().to_owned().into()),
                }),
            },
        }
    }

    /// Replaces the file contents with `items`.
    ///
    /// Callers mutating existing contents should hold a [`CollectionGuard`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Json`] if an item fails to serialize and [`StorageError::Io`]
    /// if the write fails.
    async fn save(&self, items: &[T]) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(items)
            .context(format!("Serializing {}", self.file()))?;
        self.inner.storage.write(self.file(), &bytes).await?;
        debug!(file = %self.file(), count = items.len(), "Collection saved");
        Ok(())
    }

    /// Waits for exclusive write access to this collection.
    pub async fn lock(&self) -> CollectionGuard<'_, T> {
        CollectionGuard { collection: self, _permit: self.inner.write_lock.lock().await }
    }
}

/// Exclusive access to a [`Collection`] for one read-modify-write cycle.
pub struct CollectionGuard<'a, T> {
    collection: &'a Collection<T>,
    _permit: MutexGuard<'a, ()>,
}

impl<T> fmt::Debug for CollectionGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionGuard").field("file", &self.collection.inner.file).finish()
    }
}

impl<T> CollectionGuard<'_, T>
where
    T: Serialize + DeserializeOwned,
{
    /// Same as [`Collection::load`].
    ///
    /// # Errors
    ///
    /// See [`Collection::load`].
    pub async fn load(&self) -> Result<Vec<T>, StorageError> {
        self.collection.load().await
    }

    /// Atomically replaces the collection with `items`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Json`] or [`StorageError::Io`] on failure; the previous
    /// contents stay intact on disk.
    pub async fn save(&self, items: &[T]) -> Result<(), StorageError> {
        self.collection.save(items).await
    }
}
