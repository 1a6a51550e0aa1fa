//! Definition line syntax.
//!
//! ```text
//! kilo- = 1e3 = k-
//! meter = [length] = m = metre
//! inch = 2.54 * centimeter = in = inches
//! degree_Celsius = kelvin; offset: 273.15 = degC = celsius
//! ```
//!
//! Only the shape of a line is checked here; expressions are evaluated by the registry.

use crate::dimension::Dimensionality;
use crate::error::UnitError;
use crate::parser::{is_name_char, is_name_start};

const NO_SYMBOL: &str = "_";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Definition {
    Prefix { names: Names, expression: String },
    Unit { names: Names, body: UnitBody },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Names {
    pub(crate) name: String,
    pub(crate) symbol: Option<String>,
    pub(crate) aliases: Vec<String>,
}

impl Names {
    /// Name, symbol and aliases without duplicates (`tims = ... = tims` names itself twice).
    pub(crate) fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::with_capacity(2 + self.aliases.len());
        let all = std::iter::once(self.name.as_str())
            .chain(self.symbol.as_deref())
            .chain(self.aliases.iter().map(String::as_str));
        for id in all {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UnitBody {
    Base(Dimensionality),
    Derived { expression: String, offset: f64 },
}

impl Definition {
    pub(crate) fn parse(line: &str) -> Result<Self, UnitError> {
        let line = line.split_once('#').map_or(line, |(content, _)| content).trim();
        let parts: Vec<&str> = line.split('=').map(str::trim).collect();

        let [name, value, rest @ ..] = parts.as_slice() else {
            return Err(UnitError::definition("expected `name = value`"));
        };
        if value.is_empty() {
            return Err(UnitError::definition(format!("'{name}' has no value")));
        }

        if let Some(prefix) = name.strip_suffix('-') {
            let names = names(prefix, rest, true)?;
            return Ok(Self::Prefix { names, expression: (*value).to_owned() });
        }

        let names = names(name, rest, false)?;
        let body = if value.starts_with('[') {
            UnitBody::Base(base_dimension(value)?)
        } else {
            derived(value)?
        };
        Ok(Self::Unit { names, body })
    }
}

fn names(name: &str, rest: &[&str], prefix: bool) -> Result<Names, UnitError> {
    let strip = |raw: &str| -> Result<String, UnitError> {
        let id = if prefix {
            raw.strip_suffix('-')
                .ok_or_else(|| UnitError::definition(format!("prefix alias '{raw}' must end with '-'")))?
        } else {
            raw
        };
        identifier(id).map(str::to_owned)
    };

    let name = identifier(name)?.to_owned();
    let symbol = match rest.first() {
        None => None,
        Some(&NO_SYMBOL) => None,
        Some(raw) => Some(strip(*raw)?),
    };
    let aliases = rest.iter().skip(1).map(|raw| strip(*raw)).collect::<Result<Vec<_>, _>>()?;

    Ok(Names { name, symbol, aliases })
}

fn identifier(raw: &str) -> Result<&str, UnitError> {
    let mut chars = raw.chars();
    let valid = chars.next().is_some_and(is_name_start) && chars.all(is_name_char);
    if valid { Ok(raw) } else { Err(UnitError::definition(format!("invalid name '{raw}'"))) }
}

fn base_dimension(value: &str) -> Result<Dimensionality, UnitError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or_else(|| UnitError::definition(format!("invalid dimension '{value}'")))?
        .trim();

    if inner.is_empty() {
        return Ok(Dimensionality::dimensionless());
    }
    identifier(inner)?;
    Ok(Dimensionality::base(&format!("[{inner}]")))
}

fn derived(value: &str) -> Result<UnitBody, UnitError> {
    let mut pieces = value.split(';');
    let expression = pieces.next().unwrap_or_default().trim().to_owned();
    let mut offset = 0.0;

    for modifier in pieces {
        let (key, raw) = modifier
            .split_once(':')
            .ok_or_else(|| UnitError::definition(format!("invalid modifier '{}'", modifier.trim())))?;
        match key.trim() {
            "offset" => {
                offset = raw
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| UnitError::definition(format!("invalid offset '{}'", raw.trim())))?;
            }
            other => return Err(UnitError::definition(format!("unknown modifier '{other}'"))),
        }
    }

    if expression.is_empty() {
        return Err(UnitError::definition("missing expression"));
    }
    Ok(UnitBody::Derived { expression, offset })
}
