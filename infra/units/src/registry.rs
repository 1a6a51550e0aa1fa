use crate::definition::{Definition, Names, UnitBody};
use crate::dimension::Dimensionality;
use crate::error::{UnitError, UnitErrorExt};
use crate::parser;
use crate::quantity::{Quantity, UnitsContainer};
use fxhash::FxHashMap;
use std::borrow::Cow;
use tracing::{debug, trace};

const DEFAULT_DEFINITIONS: &str = include_str!("defaults.txt");

/// A registered unit, reduced to its base dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDefinition {
    name: String,
    symbol: Option<String>,
    aliases: Vec<String>,
    factor: f64,
    offset: f64,
    dimensionality: Dimensionality,
}

impl UnitDefinition {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Multiplier to the base units of its dimensionality.
    #[must_use]
    pub const fn factor(&self) -> f64 {
        self.factor
    }

    /// Zero point shift in base units; non-zero only for temperature scales.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub const fn dimensionality(&self) -> &Dimensionality {
        &self.dimensionality
    }

    fn is_offset(&self) -> bool {
        self.offset != 0.0
    }
}

#[derive(Debug, Clone)]
struct PrefixDefinition {
    names: Names,
    factor: f64,
}

/// A unit matched by name, carrying the prefix multiplier when one was stripped.
struct Resolved<'a> {
    name: Cow<'a, str>,
    unit: &'a UnitDefinition,
    prefix: f64,
}

/// Factor, offset and dimensionality of a whole unit expression.
#[derive(Debug)]
struct Reduced {
    factor: f64,
    offset: f64,
    dimensionality: Dimensionality,
}

/// Unit catalog: definitions, prefixes and lookup.
///
/// Built once through [`UnitRegistry::builder`] and then shared read-only.
///
/// Names resolve in this order, case-sensitively:
/// 1. exact name, alias or symbol;
/// 2. prefix + unit, pairing names with names (`kilometer`) or symbols with symbols (`km`);
/// 3. the same two steps on the singular form of a name ending in `s` (`meters`, `kilometers`).
///
/// Offset units never take a prefix.
#[derive(Debug, Default)]
pub struct UnitRegistry {
    units: Vec<UnitDefinition>,
    by_name: FxHashMap<String, usize>,
    by_symbol: FxHashMap<String, usize>,
    prefixes: Vec<PrefixDefinition>,
}

/// Collects definitions for a new [`UnitRegistry`].
#[derive(Debug)]
#[must_use = "The builder does nothing until `.build()` is called"]
pub struct UnitRegistryBuilder {
    defaults: bool,
    definitions: Vec<String>,
}

impl UnitRegistryBuilder {
    /// Whether the built-in SI, imperial and common units are loaded first (default `true`).
    pub const fn defaults(mut self, enabled: bool) -> Self {
        self.defaults = enabled;
        self
    }

    /// Adds one definition line, applied after the built-ins in insertion order.
    pub fn define(mut self, line: impl Into<String>) -> Self {
        self.definitions.push(line.into());
        self
    }

    pub fn definitions<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definitions.extend(lines.into_iter().map(Into::into));
        self
    }

    /// # Errors
    /// The first definition that fails to parse, references an unknown unit, or reuses a
    /// registered name ([`UnitError::Redefinition`]).
    pub fn build(self) -> Result<UnitRegistry, UnitError> {
        let mut registry = UnitRegistry::default();

        if self.defaults {
            registry.load(DEFAULT_DEFINITIONS).context("built-in definitions")?;
        }
        for line in &self.definitions {
            registry.define(line).context(format!("definition '{}'", line.trim()))?;
        }

        debug!(
            units = registry.units.len(),
            prefixes = registry.prefixes.len(),
            custom = self.definitions.len(),
            "Unit registry built"
        );
        Ok(registry)
    }
}

impl UnitRegistry {
    pub const fn builder() -> UnitRegistryBuilder {
        UnitRegistryBuilder { defaults: true, definitions: Vec::new() }
    }

    /// One definition per line; blank lines and `#` comments are skipped.
    fn load(&mut self, text: &str) -> Result<(), UnitError> {
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.define(line).context(format!("line {}", index + 1))?;
        }
        Ok(())
    }

    fn define(&mut self, line: &str) -> Result<(), UnitError> {
        match Definition::parse(line)? {
            Definition::Prefix { names, expression } => self.define_prefix(names, &expression),
            Definition::Unit { names, body } => self.define_unit(names, body),
        }
    }

    fn define_prefix(&mut self, names: Names, expression: &str) -> Result<(), UnitError> {
        let value = self.parse_expression(expression)?;
        if !value.units().is_dimensionless() {
            return Err(UnitError::definition(format!("prefix '{}' must be a plain number", names.name)));
        }

        let taken = |id: &str| {
            self.prefixes.iter().any(|p| {
                p.names.name == id || p.names.symbol.as_deref() == Some(id) || p.names.aliases.iter().any(|a| a == id)
            })
        };
        if let Some(id) = names.identifiers().into_iter().find(|id| taken(*id)) {
            return Err(UnitError::Redefinition { name: id.to_owned(), context: None });
        }

        trace!(prefix = %names.name, factor = value.magnitude(), "Prefix defined");
        self.prefixes.push(PrefixDefinition { names, factor: value.magnitude() });
        Ok(())
    }

    fn define_unit(&mut self, names: Names, body: UnitBody) -> Result<(), UnitError> {
        if let Some(id) = names.identifiers().into_iter().find(|id| self.is_registered(id)) {
            return Err(UnitError::Redefinition { name: id.to_owned(), context: None });
        }

        let (factor, offset, dimensionality) = match body {
            UnitBody::Base(dimensionality) => (1.0, 0.0, dimensionality),
            UnitBody::Derived { expression, offset } => {
                let value = self.parse_expression(&expression)?;
                let reduced = self.reduce(value.units())?;
                if reduced.offset != 0.0 {
                    return Err(UnitError::definition("cannot define a unit in terms of an offset unit"));
                }
                (value.magnitude() * reduced.factor, offset, reduced.dimensionality)
            }
        };

        if !factor.is_finite() || factor == 0.0 {
            return Err(UnitError::definition(format!("'{}' has a degenerate factor {factor}", names.name)));
        }

        let index = self.units.len();
        self.by_name.insert(names.name.clone(), index);
        for alias in &names.aliases {
            self.by_name.insert(alias.clone(), index);
        }
        if let Some(symbol) = &names.symbol {
            self.by_symbol.insert(symbol.clone(), index);
        }

        trace!(unit = %names.name, factor, offset, dimensionality = %dimensionality, "Unit defined");
        self.units.push(UnitDefinition {
            name: names.name,
            symbol: names.symbol,
            aliases: names.aliases,
            factor,
            offset,
            dimensionality,
        });
        Ok(())
    }

    fn is_registered(&self, id: &str) -> bool {
        self.by_name.contains_key(id) || self.by_symbol.contains_key(id)
    }

    /// Number of registered units, prefixed forms not counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The registered unit behind an exact name, alias or symbol.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&UnitDefinition> {
        self.exact(name).map(|resolved| resolved.unit)
    }

    /// Canonical name for `name` (`km` → `kilometer`, `feet` → `foot`), if it resolves.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<String> {
        self.lookup(name).map(|resolved| resolved.name.into_owned())
    }

    /// Parses a unit expression (`3.14 km`, `m/s**2`, `kilogram meter per second`) into a
    /// quantity over canonical unit names.
    ///
    /// # Errors
    /// [`UnitError::Syntax`] for malformed input, [`UnitError::UndefinedUnit`] for unknown names.
    pub fn parse_expression(&self, input: &str) -> Result<Quantity, UnitError> {
        parser::evaluate(input, &mut |name: &str| -> Result<Quantity, UnitError> {
            let resolved = self
                .lookup(name)
                .ok_or_else(|| UnitError::UndefinedUnit { name: name.to_owned(), context: None })?;
            Ok(Quantity::new(1.0, UnitsContainer::unit(resolved.name)))
        })
    }

    /// Like [`parse_expression`](Self::parse_expression), keeping only the units.
    ///
    /// # Errors
    /// Same as [`parse_expression`](Self::parse_expression).
    pub fn parse_units(&self, input: &str) -> Result<UnitsContainer, UnitError> {
        self.parse_expression(input).map(Quantity::into_units)
    }

    /// Base dimensions of a unit container.
    ///
    /// # Errors
    /// [`UnitError::UndefinedUnit`] for names not in this registry.
    pub fn dimensionality(&self, units: &UnitsContainer) -> Result<Dimensionality, UnitError> {
        self.reduce(units).map(|reduced| reduced.dimensionality)
    }

    /// Expresses `quantity` in `target` units.
    ///
    /// Multiplicative units scale by the ratio of their factors. When either side is an offset
    /// unit the conversion goes through the base unit: `base = m * factor + offset`.
    ///
    /// # Errors
    /// * [`UnitError::Dimensionality`] when the two sides measure different things.
    /// * [`UnitError::OffsetUnit`] for offset units raised to a power or combined with others.
    /// * [`UnitError::UndefinedUnit`] for containers built against another registry.
    pub fn convert(&self, quantity: &Quantity, target: &UnitsContainer) -> Result<Quantity, UnitError> {
        let from = self.reduce(quantity.units())?;
        let to = self.reduce(target)?;

        if from.dimensionality != to.dimensionality {
            return Err(UnitError::Dimensionality {
                from: quantity.units().to_string(),
                to: target.to_string(),
                from_dim: from.dimensionality,
                to_dim: to.dimensionality,
                context: None,
            });
        }

        let magnitude = if from.offset == 0.0 && to.offset == 0.0 {
            quantity.magnitude() * (from.factor / to.factor)
        } else {
            let base = quantity.magnitude() * from.factor + from.offset;
            (base - to.offset) / to.factor
        };

        Ok(Quantity::new(magnitude, target.clone()))
    }

    fn reduce(&self, units: &UnitsContainer) -> Result<Reduced, UnitError> {
        let mut reduced = Reduced { factor: 1.0, offset: 0.0, dimensionality: Dimensionality::dimensionless() };

        for (name, exponent) in units.iter() {
            let resolved = self
                .lookup(name)
                .ok_or_else(|| UnitError::UndefinedUnit { name: name.to_owned(), context: None })?;

            if resolved.unit.is_offset() {
                if units.len() != 1 || exponent != 1 {
                    return Err(UnitError::OffsetUnit { units: units.to_string(), context: None });
                }
                reduced.offset = resolved.unit.offset;
            }

            reduced.factor *= (resolved.prefix * resolved.unit.factor).powi(exponent);
            reduced.dimensionality = reduced.dimensionality.merge(&resolved.unit.dimensionality.powi(exponent)?, 1)?;
        }

        Ok(reduced)
    }

    fn lookup(&self, token: &str) -> Option<Resolved<'_>> {
        self.exact(token).or_else(|| self.prefixed(token, true)).or_else(|| {
            let singular = token.strip_suffix('s').filter(|s| !s.is_empty())?;
            self.exact_name(singular).or_else(|| self.prefixed(singular, false))
        })
    }

    fn exact(&self, token: &str) -> Option<Resolved<'_>> {
        self.exact_name(token).or_else(|| self.by_symbol.get(token).map(|&index| self.resolved(index)))
    }

    fn exact_name(&self, token: &str) -> Option<Resolved<'_>> {
        self.by_name.get(token).map(|&index| self.resolved(index))
    }

    fn resolved(&self, index: usize) -> Resolved<'_> {
        let unit = &self.units[index];
        Resolved { name: Cow::Borrowed(&unit.name), unit, prefix: 1.0 }
    }

    /// Splits `token` into prefix + unit. Symbol pairs are skipped for singularized names.
    fn prefixed(&self, token: &str, symbols: bool) -> Option<Resolved<'_>> {
        let unit_after = |prefix: &str, table: &FxHashMap<String, usize>| {
            token
                .strip_prefix(prefix)
                .filter(|rest| !rest.is_empty())
                .and_then(|rest| table.get(rest))
                .map(|&index| &self.units[index])
                .filter(|unit| !unit.is_offset())
        };

        self.prefixes.iter().find_map(|prefix| {
            let by_name = std::iter::once(&prefix.names.name)
                .chain(&prefix.names.aliases)
                .find_map(|name| unit_after(name.as_str(), &self.by_name));
            let by_symbol = || {
                prefix
                    .names
                    .symbol
                    .as_deref()
                    .filter(|_| symbols)
                    .and_then(|symbol| unit_after(symbol, &self.by_symbol))
            };

            by_name.or_else(by_symbol).map(|unit| Resolved {
                name: Cow::Owned(format!("{}{}", prefix.names.name, unit.name)),
                unit,
                prefix: prefix.factor,
            })
        })
    }
}
