use crate::dimension::ExponentMap;
use crate::error::UnitError;
use std::fmt::{self, Display, Formatter};
use std::ops::Mul;

/// Product of canonical unit names raised to integer powers (`meter / second ** 2`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UnitsContainer(ExponentMap);

impl UnitsContainer {
    #[must_use]
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// A single unit with exponent one. `name` should be the canonical unit name.
    #[must_use]
    pub fn unit(name: impl Into<String>) -> Self {
        Self(ExponentMap::single(name))
    }

    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unit names with their exponents, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter()
    }

    /// # Errors
    /// [`UnitError::Syntax`] when an exponent leaves the `i32` range.
    pub fn powi(&self, power: i32) -> Result<Self, UnitError> {
        self.0.powi(power).map(Self)
    }

    /// # Errors
    /// [`UnitError::Syntax`] when an exponent leaves the `i32` range.
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, UnitError> {
        self.0.merge(&rhs.0, 1).map(Self)
    }

    /// # Errors
    /// [`UnitError::Syntax`] when an exponent leaves the `i32` range.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, UnitError> {
        self.0.merge(&rhs.0, -1).map(Self)
    }
}

impl Display for UnitsContainer {
    /// Pretty form: `kilometer·meter/second²`, `1/second`, `dimensionless`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("dimensionless");
        }

        let term = |name: &str, exponent: i32| {
            if exponent == 1 { name.to_owned() } else { format!("{name}{}", superscript(exponent)) }
        };
        let numerator: Vec<String> =
            self.iter().filter(|(_, e)| *e > 0).map(|(name, e)| term(name, e)).collect();

        if numerator.is_empty() {
            f.write_str("1")?;
        } else {
            f.write_str(&numerator.join("·"))?;
        }
        for (name, exponent) in self.iter().filter(|(_, e)| *e < 0) {
            write!(f, "/{}", term(name, -exponent))?;
        }
        Ok(())
    }
}

/// A magnitude attached to a unit expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    magnitude: f64,
    units: UnitsContainer,
}

impl Quantity {
    #[must_use]
    pub const fn new(magnitude: f64, units: UnitsContainer) -> Self {
        Self { magnitude, units }
    }

    /// A bare number.
    #[must_use]
    pub fn dimensionless(magnitude: f64) -> Self {
        Self::new(magnitude, UnitsContainer::dimensionless())
    }

    #[must_use]
    pub const fn magnitude(&self) -> f64 {
        self.magnitude
    }

    #[must_use]
    pub const fn units(&self) -> &UnitsContainer {
        &self.units
    }

    #[must_use]
    pub fn into_units(self) -> UnitsContainer {
        self.units
    }

    /// # Errors
    /// [`UnitError::Syntax`] when a unit exponent leaves the `i32` range.
    pub fn powi(&self, power: i32) -> Result<Self, UnitError> {
        Ok(Self::new(self.magnitude.powi(power), self.units.powi(power)?))
    }

    /// # Errors
    /// [`UnitError::Syntax`] when a unit exponent leaves the `i32` range.
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, UnitError> {
        Ok(Self::new(self.magnitude * rhs.magnitude, self.units.checked_mul(&rhs.units)?))
    }

    /// # Errors
    /// [`UnitError::Syntax`] when a unit exponent leaves the `i32` range.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, UnitError> {
        Ok(Self::new(self.magnitude / rhs.magnitude, self.units.checked_div(&rhs.units)?))
    }
}

impl Mul<Quantity> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        Quantity::new(self * rhs.magnitude, rhs.units)
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_magnitude(self.magnitude), self.units)
    }
}

/// Shortest round-trip decimal form of `value`.
///
/// Integral values keep a trailing `.0`; values at or above `1e16` or below `1e-4` switch
/// to exponent notation with an explicit sign and at least two exponent digits
/// (`3140.0`, `1e+16`, `2.5e-05`).
#[must_use]
pub fn format_magnitude(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "inf" } else { "-inf" }.to_owned();
    }

    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = exponent.strip_prefix('-').map_or(("+", exponent), |d| ("-", d));
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

fn superscript(exponent: i32) -> String {
    exponent
        .to_string()
        .chars()
        .map(|c| match c {
            '-' => '⁻',
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            other => other,
        })
        .collect()
}
