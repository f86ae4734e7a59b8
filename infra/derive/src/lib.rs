#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the registration backend crates.
//! They remove the boilerplate around error enums, API DTOs, `OpenAPI` handlers,
//! feature slices and the runtime entry point.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! evreg-derive.workspace = true
//! ```
//!
//! Examples in the docstrings are `ignore`d because they need the consuming crates
//! (`thiserror`, `utoipa`, `evreg-kernel`) in scope.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to bootstrap the Tokio runtime from a named profile.
///
/// Turns an `async fn main` returning `Result` into a plain `fn main` that builds
/// the runtime through `evreg_runtime::build_runtime_with_config`.
///
/// # Arguments
///
/// * `high_performance` - Server profile.
/// * `memory_efficient` - Small footprint profile for tooling.
/// * `default` - Worker threads detected from available parallelism.
///
/// # Examples
///
/// ```rust,ignore
/// #[evreg_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Defines a request/response DTO.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Serialize` and `Deserialize` when missing.
/// * **`OpenAPI`**: `utoipa::ToSchema` when the consuming crate enables `server`.
/// * **Serde Policy**: `rename_all = "camelCase"` and `deny_unknown_fields` unless overridden.
///
/// # Example
///
/// ```rust,ignore
/// use evreg_derive::api_model;
///
/// #[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
/// pub struct EnabledMapRequest {
///     pub enabled_map: std::collections::HashMap<String, bool>,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Bridges an Axum handler with `utoipa::path` documentation.
///
/// Accepts the regular `utoipa::path` arguments. The path attribute is only emitted
/// when the consuming crate enables its `server` feature.
///
/// # Example
///
/// ```rust,ignore
/// use evreg_derive::api_handler;
///
/// #[api_handler(
///     get,
///     path = "/events",
///     responses((status = OK, description = "Event catalog")),
///     tag = "Catalog"
/// )]
/// pub async fn list_events() -> Result<(), ()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Turns an enum into a crate error type.
///
/// # Features
///
/// * Injects `#[derive(Debug, thiserror::Error)]`.
/// * Generates a companion `<Name>Ext` trait adding `.context(...)` to results.
/// * Implements `From<Source>` for variants carrying a `source` field.
/// * Implements `From<&'static str>` and `From<String>` when an `Internal` variant exists.
///
/// # Requirements
///
/// 1. Only enums are accepted, with named-field variants.
/// 2. A `context` field must be `Option<Cow<'static, str>>`.
/// 3. Variants with a `source` must also carry a `context`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[evreg_derive::evreg_error]
/// pub enum CatalogError {
///     #[error("Invalid index{}: {message}", format_context(.context))]
///     InvalidIndex { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Storage failure{}: {source}", format_context(.context))]
///     Storage { source: evreg_storage::StorageError, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn evreg_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Defines a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is an `Arc` wrapper that
/// derefs to it and implements `FeatureSlice` for the kernel registry.
///
/// # Example
/// ```rust,ignore
/// #[evreg_derive::evreg_slice]
/// pub struct Catalog {
///     stores: Stores,
/// }
///
/// let catalog = Catalog::new(CatalogInner { stores });
/// ```
#[proc_macro_attribute]
pub fn evreg_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
