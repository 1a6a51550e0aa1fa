#[cfg(feature = "server")]
use ncss_kernel::server::ApiStateError;
use ncss_units::UnitError;
use std::borrow::Cow;

/// Failures of the conversion endpoints.
///
/// The first three variants are caused by the request and carry the exact message
/// returned to the client; everything else is a server fault.
#[ncss_derive::ncss_error]
pub enum ConvertError {
    /// Missing or malformed parameter (400).
    #[error("{message}")]
    InvalidRequest { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Unit expression that does not resolve (404).
    #[error("{message}")]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Units that cannot be converted into each other (400).
    #[error("{message}")]
    Conversion { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[cfg(feature = "server")]
    #[error("API state error{}: {source}", format_context(.context))]
    State { source: ApiStateError, context: Option<Cow<'static, str>> },

    #[error("Unit registry error{}: {source}", format_context(.context))]
    Units { source: UnitError, context: Option<Cow<'static, str>> },

    #[error("Internal conversion error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ConvertError {
    pub(crate) fn invalid_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidRequest { message: message.into(), context: None }
    }

    pub(crate) fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: message.into(), context: None }
    }

    pub(crate) fn conversion(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Conversion { message: message.into(), context: None }
    }
}

#[cfg(feature = "server")]
mod response {
    use super::ConvertError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use ncss_kernel::server::error_response;
    use tracing::{debug, error};

    impl ConvertError {
        #[must_use]
        pub const fn status(&self) -> StatusCode {
            match self {
                Self::InvalidRequest { .. } | Self::Conversion { .. } => StatusCode::BAD_REQUEST,
                Self::NotFound { .. } => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for ConvertError {
        fn into_response(self) -> Response {
            let status = self.status();
            match &self {
                Self::InvalidRequest { message, context }
                | Self::NotFound { message, context }
                | Self::Conversion { message, context } => {
                    debug!(%status, %message, context = ?context, "Conversion request rejected");
                    error_response(status, message.to_string())
                }
                _ => {
                    error!(error = %self, "Conversion request failed");
                    error_response(status, "Internal server error")
                }
            }
        }
    }
}
