//! A dynamic value domain for heterogeneous keys and elements.

use std::borrow::Cow;

use anyhow::{anyhow, bail, Result};
use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::hash::{float_text, Structural};

/// Any value the containers accept without committing to a concrete key
/// type: primitives, arrays, and records with named fields.
///
/// Equality is deep. Numbers compare through [`OrderedFloat`], so NaN is
/// equal to itself and usable as a key; records compare as field sets,
/// independent of the order their fields were inserted in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(OrderedFloat<f64>),
    Text(String),
    Array(Vec<Value>),
    Record(IndexMap<String, Value>),
}

impl Value {
    pub fn number(value: f64) -> Value {
        Value::Number(OrderedFloat(value))
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Value {
        Value::Array(items.into_iter().collect())
    }

    pub fn record<N: Into<String>>(fields: impl IntoIterator<Item = (N, Value)>) -> Value {
        Value::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Value {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Value {
        Value::number(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Value {
        Value::number(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Value {
        Value::number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::Text(value)
    }
}

impl Structural for Value {
    fn text(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed("null"),
            Value::Bool(true) => Cow::Borrowed("true"),
            Value::Bool(false) => Cow::Borrowed("false"),
            Value::Number(number) => float_text(number.0),
            Value::Text(text) => Cow::Borrowed(text),
            // One level up, an array reads as its element texts joined by
            // commas and a record as a fixed placeholder. Deep-equal values
            // produce identical texts either way, which is all the enclosing
            // composite's hash needs.
            Value::Array(items) => {
                let mut joined = String::new();
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        joined.push(',');
                    }
                    joined.push_str(&item.text());
                }
                Cow::Owned(joined)
            }
            Value::Record(_) => Cow::Borrowed("[record]"),
        }
    }

    fn fields(&self, visit: &mut dyn FnMut(&str, &dyn Structural)) -> bool {
        match self {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    visit(&index.to_string(), item);
                }
                true
            }
            Value::Record(fields) => {
                for (name, value) in fields {
                    visit(name, value);
                }
                true
            }
            _ => false,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Record(
                fields
                    .into_iter()
                    .map(|(name, value)| (name, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> serde_json::Value {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            // Non-finite numbers have no JSON form and dump as null.
            Value::Number(number) => serde_json::Number::from_f64(number.0)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Text(text) => serde_json::Value::String(text),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Record(fields) => serde_json::Value::Object(
                fields
                    .into_iter()
                    .map(|(name, value)| (name, value.into()))
                    .collect(),
            ),
        }
    }
}

/// Split a JSON array of `[key, value]` pairs into value pairs. Anything
/// other than an array of 2-element arrays is rejected before any pair is
/// handed to a container.
pub(crate) fn json_pairs(json: serde_json::Value) -> Result<Vec<(Value, Value)>> {
    let items = match json {
        serde_json::Value::Array(items) => items,
        other => bail!("expected a JSON array of [key, value] pairs, got {other}"),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let pair = match item {
                serde_json::Value::Array(pair) => pair,
                other => bail!("element {index} is not a [key, value] pair, got {other}"),
            };
            let [key, value] = <[serde_json::Value; 2]>::try_from(pair)
                .map_err(|parts| anyhow!("element {index} has {} parts, expected 2", parts.len()))?;
            Ok((Value::from(key), Value::from(value)))
        })
        .collect()
}

/// The set-side counterpart of [`json_pairs`]: any JSON array of elements.
pub(crate) fn json_elements(json: serde_json::Value) -> Result<Vec<Value>> {
    match json {
        serde_json::Value::Array(items) => Ok(items.into_iter().map(Value::from).collect()),
        other => bail!("expected a JSON array of elements, got {other}"),
    }
}
