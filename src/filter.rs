//! Typed builder for `_queryFilter` expressions.
//!
//! ```
//! use idm_ts_gen::filter::{and, equals, presence};
//!
//! let filter = and(equals("userName", "bjensen"), presence("mail"));
//! assert_eq!(filter.to_string(), "(/userName eq 'bjensen' and /mail pr)");
//! ```

use serde::Deserialize;
use std::fmt;

/// A literal compared against a field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::String(s) => write!(f, "'{}'", s.replace('\'', "\\'")),
            FilterValue::Number(n) => write!(f, "{n}"),
            FilterValue::Bool(b) => write!(f, "{b}"),
            FilterValue::Null => write!(f, "''"),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::String(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value.into())
    }
}

impl From<u64> for FilterValue {
    fn from(value: u64) -> Self {
        FilterValue::Number(value.into())
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(FilterValue::Number)
            .unwrap_or(FilterValue::Null)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FilterValue::Null)
    }
}

/// A filter over the fields `F` of one object type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind")]
pub enum Filter<F = String> {
    #[serde(rename = "eq")]
    Equals { field: F, val: FilterValue },
    #[serde(rename = "gt")]
    Greater { field: F, val: FilterValue },
    #[serde(rename = "ge")]
    GreaterOrEqual { field: F, val: FilterValue },
    #[serde(rename = "lt")]
    Less { field: F, val: FilterValue },
    #[serde(rename = "le")]
    LessOrEqual { field: F, val: FilterValue },
    #[serde(rename = "co")]
    Contains { field: F, val: FilterValue },
    #[serde(rename = "sw")]
    StartsWith { field: F, val: FilterValue },
    #[serde(rename = "pr")]
    Presence { field: F },
    #[serde(rename = "true")]
    True,
    #[serde(rename = "false")]
    False,
    #[serde(rename = "!")]
    Not { filter: Box<Filter<F>> },
    #[serde(rename = "and")]
    And { a: Box<Filter<F>>, b: Box<Filter<F>> },
    #[serde(rename = "or")]
    Or { a: Box<Filter<F>>, b: Box<Filter<F>> },
}

impl<F> Filter<F> {
    pub fn kind(&self) -> &'static str {
        match self {
            Filter::Equals { .. } => "eq",
            Filter::Greater { .. } => "gt",
            Filter::GreaterOrEqual { .. } => "ge",
            Filter::Less { .. } => "lt",
            Filter::LessOrEqual { .. } => "le",
            Filter::Contains { .. } => "co",
            Filter::StartsWith { .. } => "sw",
            Filter::Presence { .. } => "pr",
            Filter::True => "true",
            Filter::False => "false",
            Filter::Not { .. } => "!",
            Filter::And { .. } => "and",
            Filter::Or { .. } => "or",
        }
    }
}

impl<F: fmt::Display> fmt::Display for Filter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match self {
            Filter::Equals { field, val }
            | Filter::Greater { field, val }
            | Filter::GreaterOrEqual { field, val }
            | Filter::Less { field, val }
            | Filter::LessOrEqual { field, val }
            | Filter::Contains { field, val }
            | Filter::StartsWith { field, val } => write!(f, "/{field} {kind} {val}"),
            Filter::Presence { field } => write!(f, "/{field} {kind}"),
            Filter::True | Filter::False => write!(f, "{kind}"),
            Filter::Not { filter } => write!(f, "{kind}({filter})"),
            Filter::And { a, b } | Filter::Or { a, b } => write!(f, "({a} {kind} {b})"),
        }
    }
}

pub fn equals<F>(field: F, val: impl Into<FilterValue>) -> Filter<F> {
    Filter::Equals {
        field,
        val: val.into(),
    }
}

pub fn greater<F>(field: F, val: impl Into<FilterValue>) -> Filter<F> {
    Filter::Greater {
        field,
        val: val.into(),
    }
}

pub fn greater_or_equal<F>(field: F, val: impl Into<FilterValue>) -> Filter<F> {
    Filter::GreaterOrEqual {
        field,
        val: val.into(),
    }
}

pub fn less<F>(field: F, val: impl Into<FilterValue>) -> Filter<F> {
    Filter::Less {
        field,
        val: val.into(),
    }
}

pub fn less_or_equal<F>(field: F, val: impl Into<FilterValue>) -> Filter<F> {
    Filter::LessOrEqual {
        field,
        val: val.into(),
    }
}

pub fn contains<F>(field: F, val: impl Into<FilterValue>) -> Filter<F> {
    Filter::Contains {
        field,
        val: val.into(),
    }
}

pub fn starts_with<F>(field: F, val: impl Into<FilterValue>) -> Filter<F> {
    Filter::StartsWith {
        field,
        val: val.into(),
    }
}

pub fn presence<F>(field: F) -> Filter<F> {
    Filter::Presence { field }
}

pub fn and<F>(a: Filter<F>, b: Filter<F>) -> Filter<F> {
    Filter::And {
        a: Box::new(a),
        b: Box::new(b),
    }
}

pub fn or<F>(a: Filter<F>, b: Filter<F>) -> Filter<F> {
    Filter::Or {
        a: Box::new(a),
        b: Box::new(b),
    }
}

pub fn not<F>(filter: Filter<F>) -> Filter<F> {
    Filter::Not {
        filter: Box::new(filter),
    }
}

pub fn true_val<F>() -> Filter<F> {
    Filter::True
}

pub fn false_val<F>() -> Filter<F> {
    Filter::False
}

/// True when every filter is, `None` when there are none.
pub fn all_of<F>(filters: impl IntoIterator<Item = Filter<F>>) -> Option<Filter<F>> {
    filters.into_iter().reduce(and)
}

/// True when any filter is, `None` when there are none.
pub fn any_of<F>(filters: impl IntoIterator<Item = Filter<F>>) -> Option<Filter<F>> {
    filters.into_iter().reduce(or)
}

/// `field` equals one of `vals`, like SQL's `IN`.
pub fn one_of<F: Clone, V: Into<FilterValue>>(
    field: F,
    vals: impl IntoIterator<Item = V>,
) -> Option<Filter<F>> {
    any_of(vals.into_iter().map(|val| equals(field.clone(), val)))
}
