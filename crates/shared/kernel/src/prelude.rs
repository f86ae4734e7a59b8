//! Common imports for feature slices.

pub use crate::Stores;
pub use crate::domain::constants::*;
pub use crate::domain::models::{Event, Principal, PrincipalProfile, Registration};
pub use crate::domain::registry::{FeatureSlice, InitializedSlice};
#[cfg(feature = "server")]
pub use crate::server::{
    ApiError, ApiJson, ApiResult, ApiState, FailureResponse, IndexRequest, StatusResponse,
};
