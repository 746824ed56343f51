//! HTTP plumbing shared by every slice.

mod error;
mod extract;
mod health;
pub mod router;
mod state;

pub use error::{ApiError, ApiErrorExt, ApiResult, ErrorBody, ErrorsBody};
pub use extract::{Json, Path};
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateErrorExt, ApiStateInner};
