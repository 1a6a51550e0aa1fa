use crate::error::UnitError;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt::{self, Display, Formatter};

/// Name → integer exponent map shared by unit containers and dimensionalities.
///
/// Zero exponents are never stored, so two maps describing the same product compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub(crate) struct ExponentMap(BTreeMap<String, i32>);

impl ExponentMap {
    pub(crate) fn single(name: impl Into<String>) -> Self {
        Self(BTreeMap::from([(name.into(), 1)]))
    }

    fn add(&mut self, name: &str, exponent: i32) -> Result<(), UnitError> {
        if exponent == 0 {
            return Ok(());
        }
        match self.0.entry(name.to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(exponent);
            }
            Entry::Occupied(mut slot) => {
                let sum = slot.get().checked_add(exponent).ok_or_else(|| overflow(name))?;
                if sum == 0 {
                    slot.remove();
                } else {
                    *slot.get_mut() = sum;
                }
            }
        }
        Ok(())
    }

    /// `self * other` for `sign == 1`, `self / other` for `sign == -1`.
    ///
    /// # Errors
    /// [`UnitError::Syntax`] when a resulting exponent leaves the `i32` range.
    pub(crate) fn merge(&self, other: &Self, sign: i32) -> Result<Self, UnitError> {
        let mut out = self.clone();
        for (name, exponent) in &other.0 {
            out.add(name, exponent.checked_mul(sign).ok_or_else(|| overflow(name))?)?;
        }
        Ok(out)
    }

    /// # Errors
    /// [`UnitError::Syntax`] when a resulting exponent leaves the `i32` range.
    pub(crate) fn powi(&self, power: i32) -> Result<Self, UnitError> {
        if power == 0 {
            return Ok(Self::default());
        }
        self.0
            .iter()
            .map(|(name, exponent)| {
                exponent.checked_mul(power).map(|e| (name.clone(), e)).ok_or_else(|| overflow(name))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(Self)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(name, exponent)| (name.as_str(), *exponent))
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Product of base dimensions (`[length]`, `[time]`, ...) raised to integer powers.
///
/// Two unit expressions are convertible into each other exactly when their
/// dimensionalities are equal. The empty dimensionality is "dimensionless".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Dimensionality(pub(crate) ExponentMap);

impl Dimensionality {
    #[must_use]
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// A single base dimension, `name` given with its brackets (`[length]`).
    #[must_use]
    pub fn base(name: &str) -> Self {
        Self(ExponentMap::single(name))
    }

    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter()
    }

    pub(crate) fn merge(&self, other: &Self, sign: i32) -> Result<Self, UnitError> {
        self.0.merge(&other.0, sign).map(Self)
    }

    pub(crate) fn powi(&self, power: i32) -> Result<Self, UnitError> {
        self.0.powi(power).map(Self)
    }
}

fn overflow(name: &str) -> UnitError {
    UnitError::syntax(format!("exponent of '{name}' is out of range"))
}

impl Display for Dimensionality {
    /// `[length] / [time] ** 2`
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("dimensionless");
        }

        let term = |name: &str, exponent: i32| {
            if exponent == 1 { name.to_owned() } else { format!("{name} ** {exponent}") }
        };
        let numerator: Vec<String> =
            self.iter().filter(|(_, e)| *e > 0).map(|(name, e)| term(name, e)).collect();
        let denominator: Vec<String> =
            self.iter().filter(|(_, e)| *e < 0).map(|(name, e)| term(name, -e)).collect();

        if numerator.is_empty() {
            f.write_str("1")?;
        } else {
            f.write_str(&numerator.join(" * "))?;
        }
        for name in denominator {
            write!(f, " / {name}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_exponents_cancel() {
        let length = Dimensionality::base("[length]");
        let ratio = length.merge(&length, -1).expect("ratio");
        assert!(ratio.is_dimensionless());
        assert_eq!(ratio, Dimensionality::dimensionless());
    }

    #[test]
    fn displays_numerator_then_denominator() {
        let time_squared = Dimensionality::base("[time]").powi(2).expect("square");
        let accel = Dimensionality::base("[length]").merge(&time_squared, -1).expect("acceleration");
        assert_eq!(accel.to_string(), "[length] / [time] ** 2");

        let frequency = Dimensionality::dimensionless().merge(&Dimensionality::base("[time]"), -1).expect("frequency");
        assert_eq!(frequency.to_string(), "1 / [time]");
        assert_eq!(Dimensionality::dimensionless().to_string(), "dimensionless");
    }

    #[test]
    fn exponent_overflow_is_an_error() {
        let huge = ExponentMap::single("meter").powi(i32::MAX).expect("largest exponent");
        let err = huge.merge(&ExponentMap::single("meter"), 1).expect_err("sum overflows");
        assert!(matches!(err, UnitError::Syntax { .. }), "{err:?}");

        let big = ExponentMap::single("meter").powi(65_536).expect("2^16");
        assert!(matches!(big.powi(65_536), Err(UnitError::Syntax { .. })));
        assert!(matches!(big.merge(&ExponentMap::single("meter").powi(i32::MIN).expect("min"), -1), Err(_)));
    }

    #[test]
    fn zero_exponents_are_never_stored() {
        let meter = ExponentMap::single("meter");
        let cubed = meter.powi(3).expect("cube");
        let gone = cubed.merge(&cubed, -1).expect("cancel");
        assert!(gone.is_empty());
        assert_eq!(meter.powi(0).expect("zero power"), ExponentMap::default());
    }
}
