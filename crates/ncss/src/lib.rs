//! Facade crate for NCSS features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `ncss` with the `server` feature.
//! - Call [`init`] to build every feature slice, then mount [`server::router::feature_router`].

pub use ncss_domain as domain;
use ncss_domain::config::ApiConfig;
use ncss_domain::registry::InitializedSlice;
pub use ncss_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use ncss_kernel::server::ApiState;
        pub use ncss_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// Routes of every enabled feature slice.
        pub fn feature_router() -> OpenApiRouter<ApiState> {
            OpenApiRouter::new().merge(crate::features::convert::convert_router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use ncss_convert as convert;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "convert",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled features.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(config: &ApiConfig) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let mut slices = Vec::new();

    // Conversion (numbers, units)
    slices.push(features::convert::init(config)?);

    Ok(slices)
}
