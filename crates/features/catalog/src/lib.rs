//! Event catalog feature slice.
//!
//! Owns the event list and keeps registrations consistent with it: deleting an event
//! drops everyone registered for it, disabling one strips it from registrations.
//! Both collections are locked events first, registrations second.

#[cfg(feature = "server")]
pub mod api;
pub mod consistency;
mod error;

pub use crate::consistency::Sweep;
pub use crate::error::{
    CatalogError, CatalogErrorExt, DUPLICATE_EVENT_NAME, INVALID_EVENT, INVALID_INDEX,
};

use evreg_kernel::Stores;
use evreg_kernel::domain::models::Event;
use evreg_kernel::domain::registry::InitializedSlice;
use std::collections::HashMap;
use tracing::{info, warn};

/// Catalog feature state
#[evreg_derive::evreg_slice]
pub struct Catalog {
    stores: Stores,
}

impl Catalog {
    #[must_use]
    pub fn from_stores(stores: Stores) -> Self {
        Self::new(CatalogInner { stores })
    }

    /// All events in catalog order.
    ///
    /// # Errors
    /// [`CatalogError::Storage`] when the collection cannot be read.
    pub async fn list(&self) -> Result<Vec<Event>, CatalogError> {
        Ok(self.stores.events.load().await?)
    }

    /// Appends `event` to the catalog.
    ///
    /// # Errors
    /// [`CatalogError::InvalidEvent`] for a blank name, [`CatalogError::DuplicateEventName`]
    /// when the name is taken, [`CatalogError::Storage`] on load or save failure.
    pub async fn add(&self, event: Event) -> Result<Event, CatalogError> {
        if event.name.trim().is_empty() {
            warn!("Event rejected: blank name");
            return Err(CatalogError::InvalidEvent { message: INVALID_EVENT.into(), context: None });
        }

        let guard = self.stores.events.lock().await;
        let mut events = guard.load().await.context("Loading events")?;

        if events.iter().any(|e| e.name == event.name) {
            warn!(event = %event.name, "Event rejected: duplicate name");
            return Err(CatalogError::DuplicateEventName {
                message: DUPLICATE_EVENT_NAME.into(),
                context: Some(event.name.clone().into()),
            });
        }

        events.push(event.clone());
        guard.save(&events).await.context("Saving events")?;

        info!(event = %event.name, enabled = event.enabled, "Event added");
        Ok(event)
    }

    /// Removes the event at `index` and every registration that references it.
    ///
    /// Events are persisted first, then registrations, even when no registration
    /// referenced the event.
    ///
    /// # Errors
    /// [`CatalogError::InvalidIndex`] for a negative or out-of-range index (nothing is
    /// written), [`CatalogError::Storage`] on load or save failure.
    pub async fn delete(&self, index: i64) -> Result<Event, CatalogError> {
        let events_guard = self.stores.events.lock().await;
        let mut events = events_guard.load().await.context("Loading events")?;

        let position = usize::try_from(index)
            .ok()
            .filter(|&i| i < events.len())
            .ok_or_else(|| CatalogError::invalid_index(index, events.len()))?;

        let regs_guard = self.stores.registrations.lock().await;
        let mut registrations = regs_guard.load().await.context("Loading registrations")?;

        let removed = events.remove(position);
        events_guard.save(&events).await.context("Saving events")?;

        let dropped = consistency::drop_attendees(&mut registrations, &removed.name);
        regs_guard.save(&registrations).await.context("Saving registrations")?;

        info!(index, event = %removed.name, removed = dropped, "Event deleted");
        Ok(removed)
    }

    /// Flips `enabled` for every event named in `enabled_map` and strips newly disabled
    /// events from registrations. Re-enabling never brings dropped registrations back.
    ///
    /// The registration sweep, and its write, is skipped when nothing was newly disabled.
    ///
    /// # Errors
    /// [`CatalogError::Storage`] on load or save failure.
    pub async fn set_enabled(&self, enabled_map: &HashMap<String, bool>) -> Result<Sweep, CatalogError> {
        let events_guard = self.stores.events.lock().await;
        let mut events = events_guard.load().await.context("Loading events")?;

        let newly_disabled = consistency::apply_enabled_map(&mut events, enabled_map);
        events_guard.save(&events).await.context("Saving events")?;

        if newly_disabled.is_empty() {
            info!(updated = enabled_map.len(), "Event availability updated");
            return Ok(Sweep::default());
        }

        let regs_guard = self.stores.registrations.lock().await;
        let mut registrations = regs_guard.load().await.context("Loading registrations")?;
        let sweep = consistency::prune_disabled(&mut registrations, &newly_disabled);
        regs_guard.save(&registrations).await.context("Saving registrations")?;

        info!(
            disabled = ?newly_disabled,
            trimmed = sweep.trimmed,
            removed = sweep.dropped,
            "Event availability updated"
        );
        Ok(sweep)
    }
}

/// Initialize the catalog feature.
///
/// # Errors
/// Infallible today; kept fallible like every slice initializer.
pub fn init(stores: &Stores) -> Result<InitializedSlice, CatalogError> {
    tracing::info!("Catalog slice initialized");
    Ok(InitializedSlice::new(Catalog::from_stores(stores.clone())))
}
