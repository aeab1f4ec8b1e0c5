//! Reusable validation rules and formatters.
//!
//! Rules are plain predicates over a [`ParamValue`]; formatters map a value
//! to its wire form. Both plug into [`ParamSpec`](super::ParamSpec) builders.

use super::ParamValue;
use crate::geo;

/// Value is text.
#[must_use]
pub fn is_text(value: &ParamValue) -> bool {
    value.is_text()
}

/// Value is a finite number.
#[must_use]
pub fn is_number(value: &ParamValue) -> bool {
    value.is_number()
}

/// Value is a boolean.
#[must_use]
pub fn is_bool(value: &ParamValue) -> bool {
    value.is_bool()
}

/// Value is a list whose items are all text.
#[must_use]
pub fn is_text_list(value: &ParamValue) -> bool {
    value
        .as_list()
        .is_some_and(|items| items.iter().all(ParamValue::is_text))
}

/// Value is a list whose items are all numbers.
#[must_use]
pub fn is_number_list(value: &ParamValue) -> bool {
    value
        .as_list()
        .is_some_and(|items| items.iter().all(ParamValue::is_number))
}

/// Value is a 3 or 6 digit hex colour without a leading `#`.
#[must_use]
pub fn is_hex_color(value: &ParamValue) -> bool {
    value.as_str().is_some_and(geo::is_hex_color)
}

/// Value is a strict `latitude,longitude` pair.
#[must_use]
pub fn is_coordinate_pair(value: &ParamValue) -> bool {
    value.as_str().is_some_and(geo::is_coordinate_pair)
}

/// Number within `[min, max]`.
pub fn number_between(min: f64, max: f64) -> impl Fn(&ParamValue) -> bool + Send + Sync + 'static {
    move |value| {
        value
            .as_f64()
            .is_some_and(|n| n.is_finite() && n >= min && n <= max)
    }
}

/// Number of at least `min`.
pub fn number_at_least(min: f64) -> impl Fn(&ParamValue) -> bool + Send + Sync + 'static {
    number_between(min, f64::INFINITY)
}

/// Text equal to one of `options`.
pub fn text_one_of(
    options: &'static [&'static str],
) -> impl Fn(&ParamValue) -> bool + Send + Sync + 'static {
    move |value| value.as_str().is_some_and(|s| options.contains(&s))
}

/// List whose length lies in `[min, max]`.
pub fn list_len_between(
    min: usize,
    max: usize,
) -> impl Fn(&ParamValue) -> bool + Send + Sync + 'static {
    move |value| {
        value
            .as_list()
            .is_some_and(|items| (min..=max).contains(&items.len()))
    }
}

/// List whose items all satisfy `rule`.
pub fn list_all<F>(rule: F) -> impl Fn(&ParamValue) -> bool + Send + Sync + 'static
where
    F: Fn(&ParamValue) -> bool + Send + Sync + 'static,
{
    move |value| value.as_list().is_some_and(|items| items.iter().all(&rule))
}

/// List of text drawn from `options`.
pub fn list_subset_of(
    options: &'static [&'static str],
) -> impl Fn(&ParamValue) -> bool + Send + Sync + 'static {
    list_all(text_one_of(options))
}

/// Truncate numbers toward zero; other values pass through.
#[must_use]
pub fn truncate(value: &ParamValue) -> ParamValue {
    match value {
        ParamValue::Number(n) => ParamValue::Number(n.trunc()),
        other => other.clone(),
    }
}

/// Render the value as text, joining lists with commas.
#[must_use]
pub fn join(value: &ParamValue) -> ParamValue {
    ParamValue::Text(value.to_string())
}

/// Render numbers with a fixed number of decimals.
pub fn fixed_decimals(
    decimals: usize,
) -> impl Fn(&ParamValue) -> ParamValue + Send + Sync + 'static {
    move |value| match value {
        ParamValue::Number(n) => ParamValue::Text(format!("{n:.decimals$}")),
        other => other.clone(),
    }
}

/// Keep at most `max` characters of text.
pub fn truncate_text(max: usize) -> impl Fn(&ParamValue) -> ParamValue + Send + Sync + 'static {
    move |value| match value {
        ParamValue::Text(s) => ParamValue::Text(s.chars().take(max).collect()),
        other => other.clone(),
    }
}
