//! Conversion feature slice.
//!
//! * `/convert/number`: numbers to cardinal or ordinal English words, and words back to digits.
//! * `/convert/unit`: physical quantities between unit expressions, using a unit registry
//!   built once at startup from the built-in definitions plus `units.definitions`.
mod error;
#[cfg(feature = "server")]
mod handlers;
pub mod number;
#[cfg(feature = "server")]
mod router;
pub mod unit;

pub use error::{ConvertError, ConvertErrorExt};
pub use number::NumberTarget;
#[cfg(feature = "server")]
pub use router::convert_router;

use ncss_kernel::prelude::{ApiConfig, InitializedSlice};
use ncss_units::UnitRegistry;

/// Conversion feature state.
#[ncss_derive::ncss_slice]
pub struct Convert {
    /// Read-only registry shared by every request.
    pub units: UnitRegistry,
}

/// Initialize the conversion feature.
///
/// # Errors
/// Returns an error if a configured unit definition is malformed, references an unknown
/// unit, or redefines an existing one.
pub fn init(config: &ApiConfig) -> Result<InitializedSlice, ConvertError> {
    let definitions = &config.units.definitions;
    let units = UnitRegistry::builder()
        .definitions(definitions.iter().map(String::as_str))
        .build()
        .context("building unit registry")?;

    tracing::info!(units = units.len(), custom = definitions.len(), "Convert slice initialized");

    let slice = Convert::new(ConvertInner { units });
    Ok(InitializedSlice::new(slice))
}
