mod dto;
mod error;
mod extract;
mod health;
pub mod router;
mod state;

pub use dto::IndexRequest;
pub use error::{ApiError, ApiResult, FailureResponse, StatusResponse};
pub use extract::ApiJson;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
