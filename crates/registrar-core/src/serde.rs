use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOr<T> {
    Str(String),
    Value(T),
}

/// Deserializes an optional value that may arrive as a string.
///
/// Query strings and HTML forms send every value as text, and the record
/// store sometimes quotes numeric identifiers; empty or whitespace-only
/// strings are treated as `None`.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    let opt: Option<StringOr<T>> = Option::deserialize(deserializer)?;
    match opt {
        None => Ok(None),
        Some(StringOr::Value(value)) => Ok(Some(value)),
        Some(StringOr::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(StringOr::Str(s)) => s
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Deserializes `null` as the type's default value.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes an optional calendar date.
///
/// Accepts `YYYY-MM-DD` as well as full ISO-8601 timestamps, of which only
/// the date part is kept. Empty strings are `None`.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_date(&s).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Parses the leading `YYYY-MM-DD` of a date or timestamp string.
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    let value = value.trim();
    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
}
