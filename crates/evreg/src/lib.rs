//! Facade crate for the event registration features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it composes other crates, it does not implement business logic.
//!
//! ## Usage
//! - Add `evreg` with the `server` feature for the HTTP surface.
//! - Open the [`kernel::Stores`], then call [`init`] to build every feature slice.

pub use evreg_domain as domain;
use evreg_domain::config::ApiConfig;
use evreg_domain::registry::InitializedSlice;
pub use evreg_kernel as kernel;
use evreg_kernel::Stores;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use evreg_kernel::server::router::system_router;
        use evreg_kernel::server::ApiState;
        use utoipa_axum::router::OpenApiRouter;

        /// Every feature endpoint plus the system routes.
        pub fn feature_router() -> OpenApiRouter<ApiState> {
            OpenApiRouter::new()
                .merge(system_router())
                .merge(crate::features::registration::api::router())
                .merge(crate::features::catalog::api::router())
                .merge(crate::features::reports::api::router())
                .merge(crate::features::identity::api::router())
                .merge(crate::features::contact::api::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use evreg_catalog as catalog;
    pub use evreg_contact as contact;
    pub use evreg_identity as identity;
    pub use evreg_registration as registration;
    pub use evreg_reports as reports;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "registration",
        "catalog",
        "reports",
        "identity",
        "contact",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize every feature slice.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(config: &ApiConfig, stores: &Stores) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let slices = vec![
        features::registration::init(stores)?,
        features::catalog::init(stores)?,
        features::reports::init(stores)?,
        features::identity::init(&config.security.admins)?,
        features::contact::init(&config.mail, &config.security.admins)?,
    ];

    Ok(slices)
}
