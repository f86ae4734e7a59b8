//! Registration feature slice.
//!
//! Accepts sign-ups through the validator, lists them in stored order and removes
//! them by position. Removal here never cascades; event-driven cleanup lives in
//! the catalog slice.

#[cfg(feature = "server")]
pub mod api;
mod error;
pub mod validator;

pub use crate::error::{
    DUPLICATE_STUDENT_ID, FIELD_TOO_LONG, INVALID_INDEX, INVALID_STUDENT_ID, RegistrationError, RegistrationErrorExt,
};

use evreg_kernel::Stores;
use evreg_kernel::domain::models::Registration;
use evreg_kernel::domain::registry::InitializedSlice;
use tracing::{info, warn};

/// Registration feature state
#[evreg_derive::evreg_slice]
pub struct Registrar {
    stores: Stores,
}

impl Registrar {
    /// Builds the slice directly, without registering it.
    #[must_use]
    pub fn from_stores(stores: Stores) -> Self {
        Self::new(RegistrarInner { stores })
    }

    /// Validates and appends `registration`, then persists the collection.
    ///
    /// Nothing is written when validation fails.
    ///
    /// # Errors
    /// [`RegistrationError::InvalidStudentId`], [`RegistrationError::DuplicateStudentId`],
    /// or [`RegistrationError::Storage`] when loading or saving fails.
    pub async fn submit(&self, registration: Registration) -> Result<Registration, RegistrationError> {
        let guard = self.stores.registrations.lock().await;
        let mut registrations = guard.load().await.context("Loading registrations")?;

        if let Err(err) = validator::validate(&registrations, &registration) {
            warn!(student_id = %registration.student_id, error = %err, "Registration rejected");
            return Err(err);
        }

        registrations.push(registration.clone());
        guard.save(&registrations).await.context("Saving registrations")?;

        info!(student_id = %registration.student_id, events = ?registration.events, "Registration accepted");
        Ok(registration)
    }

    /// All registrations in stored order.
    ///
    /// # Errors
    /// [`RegistrationError::Storage`] when the collection cannot be read.
    pub async fn list(&self) -> Result<Vec<Registration>, RegistrationError> {
        Ok(self.stores.registrations.load().await?)
    }

    /// Removes the registration at `index` and returns it.
    ///
    /// # Errors
    /// [`RegistrationError::InvalidIndex`] for a negative or out-of-range index (nothing is
    /// written), [`RegistrationError::Storage`] on load or save failure.
    pub async fn delete(&self, index: i64) -> Result<Registration, RegistrationError> {
        let guard = self.stores.registrations.lock().await;
        let mut registrations = guard.load().await.context("Loading registrations")?;

        let position = usize::try_from(index)
            .ok()
            .filter(|&i| i < registrations.len())
            .ok_or_else(|| RegistrationError::invalid_index(index, registrations.len()))?;

        let removed = registrations.remove(position);
        guard.save(&registrations).await.context("Saving registrations")?;

        info!(index, student_id = %removed.student_id, "Registration deleted");
        Ok(removed)
    }
}

/// Initialize the registration feature.
///
/// # Errors
/// Infallible today; kept fallible like every slice initializer.
pub fn init(stores: &Stores) -> Result<InitializedSlice, RegistrationError> {
    tracing::info!("Registration slice initialized");
    Ok(InitializedSlice::new(Registrar::from_stores(stores.clone())))
}
