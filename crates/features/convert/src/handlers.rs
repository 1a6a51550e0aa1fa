use crate::Convert;
use crate::error::ConvertError;
use crate::number::{self, NumberTarget};
use crate::unit;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Response;
use ncss_derive::{api_handler, api_model};
use ncss_kernel::prelude::{ApiState, CONVERT_TAG, ErrorBody, plain_text};
use utoipa::IntoParams;

#[api_model(deny_unknown_fields = false)]
#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
/// Query of `/convert/number`
pub struct NumberQuery {
    /// Number (`11`) or number in words (`eleven`)
    pub value: Option<String>,
    /// Output form, `words` when omitted
    #[param(value_type = Option<NumberTarget>)]
    pub to: Option<String>,
}

#[api_model(deny_unknown_fields = false)]
#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
/// Query of `/convert/unit`
pub struct UnitQuery {
    /// Magnitude to convert, e.g. `3.14`
    pub quantity: Option<String>,
    /// Source unit expression, e.g. `km` or `m/s`
    pub unit: Option<String>,
    /// Target unit expression
    pub to: Option<String>,
}

/// Every `key=value` pair of the query string, in order.
type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

fn query_pairs(query: QueryPairs) -> Result<Vec<(String, String)>, ConvertError> {
    query
        .map(|Query(pairs)| pairs)
        .map_err(|rejection| ConvertError::invalid_request(format!("Invalid query string: {}", rejection.body_text())))
}

/// First value given for `key`; later repetitions are ignored.
fn first(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, value)| value.clone())
}

impl NumberQuery {
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self { value: first(pairs, "value"), to: first(pairs, "to") }
    }
}

impl UnitQuery {
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self { quantity: first(pairs, "quantity"), unit: first(pairs, "unit"), to: first(pairs, "to") }
    }
}

#[api_handler(
    get,
    path = "/convert/number",
    params(NumberQuery),
    responses(
        (status = OK, description = "Converted number", body = String, content_type = "text/plain"),
        (status = BAD_REQUEST, description = "Missing value, unknown target, unconvertible value or malformed query", body = ErrorBody),
    ),
    tag = CONVERT_TAG,
)]
pub(crate) async fn number_handler(query: QueryPairs) -> Result<Response, ConvertError> {
    let query = NumberQuery::from_pairs(&query_pairs(query)?);
    let converted = number::convert_number(query.value.as_deref(), query.to.as_deref())?;
    Ok(plain_text(converted))
}

#[api_handler(
    get,
    path = "/convert/unit",
    params(UnitQuery),
    responses(
        (status = OK, description = "Converted quantity, e.g. `3140.0 meter`", body = String, content_type = "text/plain"),
        (status = BAD_REQUEST, description = "Missing parameter, invalid quantity, incompatible units or malformed query", body = ErrorBody),
        (status = NOT_FOUND, description = "Unknown unit expression", body = ErrorBody),
    ),
    tag = CONVERT_TAG,
)]
pub(crate) async fn unit_handler(
    State(state): State<ApiState>,
    query: QueryPairs,
) -> Result<Response, ConvertError> {
    let query = UnitQuery::from_pairs(&query_pairs(query)?);
    let convert = state.try_get_slice::<Convert>()?;
    let converted = unit::convert_unit(
        &convert.units,
        query.quantity.as_deref(),
        query.unit.as_deref(),
        query.to.as_deref(),
    )?;
    Ok(plain_text(converted))
}
