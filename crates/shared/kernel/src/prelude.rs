//! Common imports for feature slices.

pub use crate::config::{ConfigError, ConfigErrorExt, load_config};
pub use crate::domain::config::ApiConfig;
pub use crate::domain::constants::*;
pub use crate::domain::registry::{FeatureSlice, InitializedSlice};

#[cfg(feature = "server")]
pub use crate::server::{
    ApiState, ApiStateError, ApiStateErrorExt, ErrorBody, error_response, plain_text,
};
