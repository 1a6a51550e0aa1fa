//! Physical unit conversion against the shared registry.

use crate::error::ConvertError;
use ncss_units::{Quantity, UnitError, UnitRegistry};
use tracing::debug;

const NO_QUANTITY: &str = "No quantity parameter given";
const NO_UNIT: &str = "No unit parameter given";
const NO_TARGET: &str = "No to parameter given";

fn required<'a>(param: Option<&'a str>, message: &'static str) -> Result<&'a str, ConvertError> {
    param.filter(|p| !p.is_empty()).ok_or_else(|| ConvertError::invalid_request(message))
}

/// Parses one unit expression; any failure means the client named a unit we do not know.
fn resolve(registry: &UnitRegistry, expression: &str) -> Result<Quantity, ConvertError> {
    registry.parse_expression(expression).map_err(|err| {
        debug!(%expression, error = %err, "Unit expression rejected");
        ConvertError::not_found(format!("Unit '{expression}' not found"))
    })
}

/// Converts `quantity` `unit` into `to` units and renders the result in pretty form
/// (`3140.0 meter`).
///
/// Parameters are checked in order (`quantity`, `unit`, `to`); an empty value counts as missing.
///
/// # Errors
/// * [`ConvertError::InvalidRequest`] for a missing parameter or a non-numeric quantity.
/// * [`ConvertError::NotFound`] when `unit` or `to` does not resolve.
/// * [`ConvertError::Conversion`] when the dimensions differ, an offset unit is misused, or
///   the combined dimensions leave the representable exponent range.
pub fn convert_unit(
    registry: &UnitRegistry,
    quantity: Option<&str>,
    unit: Option<&str>,
    to: Option<&str>,
) -> Result<String, ConvertError> {
    let quantity = required(quantity, NO_QUANTITY)?;
    let unit = required(unit, NO_UNIT)?;
    let to = required(to, NO_TARGET)?;

    let magnitude = quantity
        .trim()
        .parse::<f64>()
        .map_err(|_| ConvertError::invalid_request(format!("Quantity '{quantity}' is invalid")))?;

    let source = magnitude * resolve(registry, unit)?;
    let target = resolve(registry, to)?;

    let converted = registry.convert(&source, target.units()).map_err(|err| match err {
        UnitError::Dimensionality { .. } | UnitError::OffsetUnit { .. } | UnitError::Syntax { .. } => {
            debug!(%unit, %to, error = %err, "Incompatible units");
            ConvertError::conversion(format!("Cannot convert from {unit} to {to}"))
        }
        other => other.into(),
    })?;

    Ok(converted.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> UnitRegistry {
        UnitRegistry::builder().define("tims = 1.5 * m = tims").build().expect("registry")
    }

    fn convert(quantity: &str, unit: &str, to: &str) -> Result<String, ConvertError> {
        convert_unit(&registry(), Some(quantity), Some(unit), Some(to))
    }

    #[test]
    fn pretty_output() {
        assert_eq!(convert("3.14", "km", "m").expect("km"), "3140.0 meter");
        assert_eq!(convert("1", "tims", "m").expect("tims"), "1.5 meter");
        assert_eq!(convert(" 2 ", "hour", "minute").expect("padded quantity"), "120.0 minute");
    }

    #[test]
    fn parameters_are_checked_in_order() {
        let reg = registry();
        let cases = [
            ((None, None, None), NO_QUANTITY),
            ((Some(""), Some("m"), Some("km")), NO_QUANTITY),
            ((Some("1"), None, None), NO_UNIT),
            ((Some("1"), Some(""), Some("km")), NO_UNIT),
            ((Some("1"), Some("m"), None), NO_TARGET),
            ((Some("x"), Some("m"), Some("")), NO_TARGET),
        ];

        for ((quantity, unit, to), expected) in cases {
            let err = convert_unit(&reg, quantity, unit, to).expect_err("missing parameter");
            assert!(matches!(err, ConvertError::InvalidRequest { .. }));
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn invalid_quantity_is_quoted() {
        let err = convert("ten", "m", "km").expect_err("word quantity");
        assert_eq!(err.to_string(), "Quantity 'ten' is invalid");
    }

    #[test]
    fn unknown_units_name_the_failing_parameter() {
        let err = convert("1", "bogus", "m").expect_err("unknown source");
        assert!(matches!(err, ConvertError::NotFound { .. }));
        assert_eq!(err.to_string(), "Unit 'bogus' not found");

        let err = convert("1", "m", "furlongs_per_fortnight_squared").expect_err("unknown target");
        assert_eq!(err.to_string(), "Unit 'furlongs_per_fortnight_squared' not found");

        let err = convert("1", "m/", "km").expect_err("syntax error");
        assert!(matches!(err, ConvertError::NotFound { .. }));
    }

    #[test]
    fn incompatible_units_are_bad_requests() {
        let err = convert("1", "m", "s").expect_err("length to time");
        assert!(matches!(err, ConvertError::Conversion { .. }));
        assert_eq!(err.to_string(), "Cannot convert from m to s");

        let err = convert("1", "degC/s", "K/s").expect_err("offset unit in compound");
        assert!(matches!(err, ConvertError::Conversion { .. }));
    }

    #[test]
    fn hostile_expressions_are_client_errors() {
        let deep = format!("{}m", "-".repeat(60_000));
        let err = convert("1", &deep, "m").expect_err("deep nesting");
        assert!(matches!(err, ConvertError::NotFound { .. }));

        let err = convert("1", "m**2147483647 * m", "m").expect_err("exponent overflow");
        assert!(matches!(err, ConvertError::NotFound { .. }));

        let err = convert("1", "hectare**2000000000", "m").expect_err("dimension overflow");
        assert!(matches!(err, ConvertError::Conversion { .. }));
    }
}
