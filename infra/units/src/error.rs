use crate::dimension::Dimensionality;
use std::borrow::Cow;

/// Errors raised while defining units, parsing unit expressions or converting quantities.
#[ncss_derive::ncss_error]
pub enum UnitError {
    /// A name resolved to neither a unit, a prefixed unit, nor a plural of one.
    #[error("Undefined unit{}: '{name}'", format_context(.context))]
    UndefinedUnit { name: String, context: Option<Cow<'static, str>> },

    /// The expression is not well formed (stray operator, unbalanced parentheses, ...).
    #[error("Invalid unit expression{}: {message}", format_context(.context))]
    Syntax { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error(
        "Cannot convert from '{from}' ({from_dim}) to '{to}' ({to_dim}){}",
        format_context(.context)
    )]
    Dimensionality {
        from: String,
        to: String,
        from_dim: Dimensionality,
        to_dim: Dimensionality,
        context: Option<Cow<'static, str>>,
    },

    /// Offset units (degC, degF) only convert on their own, with exponent one.
    #[error("Ambiguous operation with offset unit{}: {units}", format_context(.context))]
    OffsetUnit { units: String, context: Option<Cow<'static, str>> },

    #[error("Invalid unit definition{}: {message}", format_context(.context))]
    Definition { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Redefinition of '{name}'{}", format_context(.context))]
    Redefinition { name: String, context: Option<Cow<'static, str>> },
}

impl UnitError {
    pub(crate) fn syntax(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Syntax { message: message.into(), context: None }
    }

    pub(crate) fn definition(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Definition { message: message.into(), context: None }
    }
}
