//! # Units
//!
//! Runtime unit registry for NCSS: a catalog of units loaded from plain-text definitions,
//! an expression parser for compound units, and dimension-checked conversion.
//!
//! ```rust
//! use ncss_units::UnitRegistry;
//!
//! let registry = UnitRegistry::builder().define("tims = 1.5 * m = tims").build().unwrap();
//!
//! let source = 3.14 * registry.parse_expression("km").unwrap();
//! let target = registry.parse_units("m").unwrap();
//! let converted = registry.convert(&source, &target).unwrap();
//!
//! assert_eq!(converted.to_string(), "3140.0 meter");
//! ```

mod definition;
mod dimension;
mod error;
mod parser;
mod quantity;
mod registry;

pub use crate::dimension::Dimensionality;
pub use crate::error::{UnitError, UnitErrorExt};
pub use crate::quantity::{Quantity, UnitsContainer, format_magnitude};
pub use crate::registry::{UnitDefinition, UnitRegistry, UnitRegistryBuilder};
