//! Server-side kernel: API state, shared response helpers and the system router.

mod health;
mod response;
pub mod router;
mod state;

pub use response::{ErrorBody, TEXT_PLAIN_UTF8, error_response, plain_text};
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateErrorExt, ApiStateInner};
