use crate::Stores;
use crate::domain::config::ApiConfig;
use crate::domain::registry::{FeatureSlice, InitializedSlice};
use axum::extract::FromRef;
use fxhash::FxHashMap;
use std::any::TypeId;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[evreg_derive::evreg_error]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("State missing feature slice{}: {message}", format_context(.context))]
    MissingSlice { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub stores: Stores,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

/// Shared axum state: configuration, the record stores and the feature slice registry.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }

    #[must_use]
    pub fn get_slice<T: FeatureSlice>(&self) -> Option<&T> {
        self.inner
            .slices
            .get(&TypeId::of::<T>())
            .and_then(|initialized| initialized.state.as_any().downcast_ref::<T>())
    }

    /// Returns a reference to the slice if it is registered.
    ///
    /// # Errors
    /// Returns [`ApiStateError::MissingSlice`] if the slice is not registered.
    pub fn try_get_slice<T: FeatureSlice>(&self) -> Result<&T, ApiStateError> {
        self.get_slice::<T>().ok_or_else(|| ApiStateError::MissingSlice {
            message: std::any::type_name::<T>().into(),
            context: None,
        })
    }

    /// Names of registered slices (for diagnostics).
    pub fn slice_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inner.slices.values().map(|slice| slice.name)
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for Stores {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.stores.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    stores: Option<Stores>,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn stores(mut self, stores: Stores) -> Self {
        self.stores = Some(stores);
        self
    }

    #[must_use]
    pub fn register_slice(mut self, slice: InitializedSlice) -> Self {
        self.slices.insert(slice.id, slice);
        self
    }

    /// # Errors
    /// Returns [`ApiStateError::Validation`] when the config or the stores are missing.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let config = self.config.ok_or_else(|| ApiStateError::Validation {
            message: "ApiConfig not provided".into(),
            context: None,
        })?;
        let stores = self.stores.ok_or_else(|| ApiStateError::Validation {
            message: "Stores not provided".into(),
            context: None,
        })?;

        Ok(ApiState { inner: Arc::new(ApiStateInner { config, stores, slices: self.slices }) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evreg_storage::Storage;

    #[derive(Debug)]
    struct CounterSlice {
        value: u8,
    }

    impl FeatureSlice for CounterSlice {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    #[test]
    fn build_requires_stores() {
        let err = ApiState::builder().config(ApiConfig::default()).build().unwrap_err();
        assert!(matches!(err, ApiStateError::Validation { .. }));
    }

    #[tokio::test]
    async fn registered_slices_are_retrievable() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = Storage::builder().root(tmp.path()).connect().await.unwrap();
        let config = ApiConfig::default();
        let stores = Stores::with_storage(storage, &config.storage);

        let state = ApiState::builder()
            .config(config)
            .stores(stores)
            .register_slice(InitializedSlice::new(CounterSlice { value: 7 }))
            .build()
            .unwrap();

        assert_eq!(state.try_get_slice::<CounterSlice>().unwrap().value, 7);
        assert_eq!(state.slice_names().count(), 1);
    }
}
