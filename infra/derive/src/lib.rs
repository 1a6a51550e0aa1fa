#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros used across the NCSS workspace.
//!
//! * [`macro@ncss_error`] turns an enum into a `thiserror` error with context support.
//! * [`macro@ncss_slice`] wraps a feature state struct into a cheaply clonable slice handle.
//! * [`macro@api_model`] and [`macro@api_handler`] attach serde/`OpenAPI` metadata to DTOs and handlers.
//! * [`macro@main`] bootstraps a Tokio runtime from a named profile.
//!
//! The examples below are `ignore`d because they only compile inside consuming crates.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to bootstrap a profiled Tokio runtime.
///
/// Turns an `async fn main` returning a `Result` into a synchronous `fn main` that builds
/// the runtime described by the selected `ncss_runtime::RuntimeConfig` preset.
///
/// Accepted profiles: `high_performance`, `memory_efficient`, `default` (or no argument).
///
/// ```rust,ignore
/// #[ncss_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro for API data transfer objects.
///
/// Adds `Debug`, `Serialize` and `Deserialize` when they are not derived yet, derives
/// `utoipa::ToSchema` when the consuming crate enables its `server` feature, and applies
/// `#[serde(rename_all = "camelCase", deny_unknown_fields)]` unless overridden:
///
/// ```rust,ignore
/// #[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
/// pub struct NumberQuery {
///     pub value: Option<String>,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro bridging axum handlers with `OpenAPI` documentation.
///
/// Arguments are forwarded verbatim to `utoipa::path` when the consuming crate enables
/// its `server` feature.
///
/// ```rust,ignore
/// #[api_handler(
///     get,
///     path = "/convert/number",
///     params(NumberQuery),
///     responses((status = OK, body = String, content_type = "text/plain")),
///     tag = CONVERT_TAG,
/// )]
/// pub async fn number_handler(Query(query): Query<NumberQuery>) -> Response {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Attribute macro for crate-level error enums.
///
/// # Generated items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * A `<Name>Ext` trait with `.context(..)` for `Result<T, Name>` and, for every variant
///   holding a `source` (or `#[source]`/`#[from]`) field, for `Result<T, SourceType>`.
/// * `From<SourceType>` for every such variant.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }` variant exists.
/// * A private `format_context` helper for use inside `#[error(..)]` strings.
///
/// # Requirements
///
/// Variants must use named fields. Variants with a source must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// ```rust,ignore
/// #[ncss_error]
/// pub enum UnitError {
///     #[error("Undefined unit{}: {name}", format_context(.context))]
///     UndefinedUnit { name: String, context: Option<Cow<'static, str>> },
///
///     #[error("Internal units error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn ncss_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro for feature slice handles.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is generated as an `Arc` wrapper
/// that derefs to the inner state and implements `ncss_kernel::domain::registry::FeatureSlice`.
///
/// ```rust,ignore
/// #[ncss_derive::ncss_slice]
/// pub struct Convert {
///     pub registry: UnitRegistry,
/// }
///
/// let slice = Convert::new(ConvertInner { registry });
/// ```
#[proc_macro_attribute]
pub fn ncss_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
