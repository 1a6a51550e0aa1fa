//! Numbers to words and back.

use crate::error::ConvertError;
use num2words::Num2Words;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use text2num::{Language, text2digits};

pub(crate) const VALUE_REQUIRED: &str = "value to convert is required";
pub(crate) const UNKNOWN_TARGET: &str = "unknown 'to' value";
const INVALID_CARDINAL: &str = "Invalid number to convert to words";
const INVALID_ORDINAL: &str = "Invalid number to convert to rank";
const INVALID_WORDS: &str = "Invalid number word to convert to number";
const NEGATIVE_WORDS: [&str; 2] = ["minus ", "negative "];

/// Output form requested from `/convert/number`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NumberTarget {
    /// Cardinal words: `11` → `eleven`
    #[default]
    Words,
    /// Ordinal words: `11` → `eleventh`
    Rank,
    /// Digits from words: `eleven` → `11`
    Number,
}

/// Cardinal English words for a numeric string.
///
/// # Errors
/// [`ConvertError::InvalidRequest`] when `value` is not a number.
pub fn to_cardinal(value: &str) -> Result<String, ConvertError> {
    Num2Words::parse(value.trim())
        .ok_or_else(|| ConvertError::invalid_request(INVALID_CARDINAL))?
        .cardinal()
        .to_words()
        .map_err(|_| ConvertError::invalid_request(INVALID_CARDINAL))
}

/// Ordinal English words for a numeric string.
///
/// # Errors
/// [`ConvertError::InvalidRequest`] when `value` is not a number with an ordinal form.
pub fn to_ordinal(value: &str) -> Result<String, ConvertError> {
    Num2Words::parse(value.trim())
        .ok_or_else(|| ConvertError::invalid_request(INVALID_ORDINAL))?
        .ordinal()
        .to_words()
        .map_err(|_| ConvertError::invalid_request(INVALID_ORDINAL))
}

/// Digits for a number written in English words (`minus twenty-one` → `-21`).
///
/// # Errors
/// [`ConvertError::InvalidRequest`] when `value` is not a number in words, including text that
/// only contains one (`eleven apples`) or spells an ordinal (`eleventh`).
pub fn to_number(value: &str) -> Result<String, ConvertError> {
    let words = value.trim();
    let (sign, words) = NEGATIVE_WORDS
        .iter()
        .find_map(|prefix| words.strip_prefix(prefix))
        .map_or(("", words), |rest| ("-", rest.trim_start()));

    let digits = text2digits(words, &Language::english())
        .map_err(|_| ConvertError::invalid_request(INVALID_WORDS))?;
    let number = format!("{sign}{digits}");

    if is_numeral(&number) { Ok(number) } else { Err(ConvertError::invalid_request(INVALID_WORDS)) }
}

/// `-?digits(.digits)?`
fn is_numeral(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "0"));
    [whole, fraction].iter().all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}

/// Validates the query and dispatches on the requested target; a missing `to` means words.
///
/// # Errors
/// [`ConvertError::InvalidRequest`] for a missing `value`, an unknown `to`, or a value the
/// chosen conversion rejects.
pub fn convert_number(value: Option<&str>, to: Option<&str>) -> Result<String, ConvertError> {
    let value = value.filter(|v| !v.is_empty()).ok_or_else(|| ConvertError::invalid_request(VALUE_REQUIRED))?;
    let target = to.map_or(Ok(NumberTarget::default()), str::parse::<NumberTarget>).map_err(|_| {
        ConvertError::invalid_request(UNKNOWN_TARGET)
    })?;

    match target {
        NumberTarget::Words => to_cardinal(value),
        NumberTarget::Rank => to_ordinal(value),
        NumberTarget::Number => to_number(value),
    }
}
