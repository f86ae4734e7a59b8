use crate::domain::config::{LoadPolicy as ConfiguredPolicy, StorageConfig};
use crate::domain::models::{Event, Registration};
use evreg_storage::{Collection, LoadPolicy, Storage, StorageError};
use tracing::info;

/// The two persisted collections every slice works on.
///
/// Operations touching both must lock `events` before `registrations`.
#[derive(Debug, Clone)]
pub struct Stores {
    pub events: Collection<Event>,
    pub registrations: Collection<Registration>,
}

impl Stores {
    /// Connects the data directory from `cfg` and binds both collections to it.
    ///
    /// # Errors
    /// Returns [`StorageError::Io`] if the data directory cannot be created or resolved.
    pub async fn open(cfg: &StorageConfig) -> Result<Self, StorageError> {
        let storage = Storage::builder().root(&cfg.data_dir).connect().await?;
        let stores = Self::with_storage(storage, cfg);
        info!(
            events = %stores.events.file(),
            registrations = %stores.registrations.file(),
            policy = ?cfg.load_policy,
            "Stores opened"
        );
        Ok(stores)
    }

    /// Binds both collections to an already connected storage root.
    #[must_use]
    pub fn with_storage(storage: Storage, cfg: &StorageConfig) -> Self {
        let policy = load_policy(cfg.load_policy);
        Self {
            events: Collection::new(storage.clone(), cfg.events_file.clone(), policy),
            registrations: Collection::new(storage, cfg.registrations_file.clone(), policy),
        }
    }
}

const fn load_policy(policy: ConfiguredPolicy) -> LoadPolicy {
    match policy {
        ConfiguredPolicy::Tolerant => LoadPolicy::Tolerant,
        ConfiguredPolicy::Strict => LoadPolicy::Strict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_binds_configured_files() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = StorageConfig {
            data_dir: tmp.path().join("data"),
            events_file: "ev.json".to_owned(),
            registrations_file: "reg.json".to_owned(),
            load_policy: ConfiguredPolicy::Strict,
        };

        let stores = Stores::open(&cfg).await.unwrap();
        assert_eq!(stores.events.file(), "ev.json");
        assert_eq!(stores.registrations.policy(), LoadPolicy::Strict);
        assert!(tmp.path().join("data").is_dir());
        assert!(stores.events.load().await.unwrap().is_empty());
    }
}
