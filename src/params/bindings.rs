//! Bindings collections and their resolution against a statement

use super::placeholder;
use super::value::BindValue;
use crate::{Error, Result};
use std::collections::HashMap;

/// Values bound to a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bindings {
    /// Positional values, bound to `?` markers 1..n in order
    Positional(Vec<BindValue>),
    /// Named values, bound to `:name` markers (keys stored without the colon)
    Named(HashMap<String, BindValue>),
}

impl Default for Bindings {
    fn default() -> Self {
        Self::Positional(Vec::new())
    }
}

impl Bindings {
    /// Empty bindings
    pub fn none() -> Self {
        Self::default()
    }

    /// Named bindings from `(name, value)` pairs; a leading `:` on a name is dropped
    pub fn named<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<BindValue>,
    {
        Self::Named(
            pairs
                .into_iter()
                .map(|(k, v)| (normalize_key(k), v.into()))
                .collect(),
        )
    }

    /// Positional bindings from values
    pub fn positional<V: Into<BindValue>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Build bindings from a JSON array (positional) or object (named)
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Null => Ok(Self::none()),
            serde_json::Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, v)| BindValue::from_json(&(i + 1).to_string(), v))
                .collect::<Result<Vec<_>>>()
                .map(Self::Positional),
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| {
                    let name = normalize_key(k);
                    BindValue::from_json(&name, v).map(|v| (name, v))
                })
                .collect::<Result<HashMap<_, _>>>()
                .map(Self::Named),
            serde_json::Value::Bool(_) => Err(unsupported_collection("bool")),
            serde_json::Value::Number(_) => Err(unsupported_collection("number")),
            serde_json::Value::String(_) => Err(unsupported_collection("string")),
        }
    }

    /// Number of bound values
    pub fn len(&self) -> usize {
        match self {
            Self::Positional(v) => v.len(),
            Self::Named(m) => m.len(),
        }
    }

    /// Whether no values are bound
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Line the bindings up with the markers in `sql`.
    ///
    /// Returns the statement text the driver should prepare (named markers
    /// rewritten to `?`) and the values in parameter order.
    pub fn resolve(self, sql: &str) -> Result<(String, Vec<BindValue>)> {
        let scanned = placeholder::scan(sql);

        match self {
            Self::Positional(values) => {
                if !scanned.named.is_empty() {
                    if values.is_empty() {
                        return Err(Error::Parameter(format!(
                            "statement uses named parameter :{} but no bindings were given",
                            scanned.named[0]
                        )));
                    }
                    return Err(Error::Parameter(
                        "positional bindings given for a statement with named parameters".into(),
                    ));
                }
                if values.len() != scanned.positional {
                    return Err(Error::Parameter(format!(
                        "statement has {} positional parameter(s) but {} value(s) were bound",
                        scanned.positional,
                        values.len()
                    )));
                }
                Ok((scanned.sql, values))
            }
            Self::Named(map) => {
                if scanned.positional > 0 {
                    return Err(Error::Parameter(
                        "named bindings given for a statement with positional parameters".into(),
                    ));
                }
                if let Some(unused) = map.keys().find(|k| !scanned.named.contains(k)) {
                    return Err(Error::Parameter(format!(
                        "parameter :{} is not defined in the statement",
                        unused
                    )));
                }
                let values = scanned
                    .named
                    .iter()
                    .map(|name| {
                        map.get(name).cloned().ok_or_else(|| {
                            Error::Parameter(format!("no value bound for parameter :{}", name))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok((scanned.sql, values))
            }
        }
    }
}

/// Strip a leading `:` from a parameter name
#[doc(hidden)]
pub fn normalize_key(name: impl Into<String>) -> String {
    let name = name.into();
    match name.strip_prefix(':') {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

fn unsupported_collection(kind: &'static str) -> Error {
    Error::UnsupportedBindingType {
        param: "bindings".into(),
        kind,
    }
}

/// Conversion into a [`Bindings`] collection
///
/// Implemented for `()` (no bindings), arrays and vectors of bindable values
/// (positional), hash maps keyed by name (named), [`Bindings`] itself, and
/// JSON arrays/objects.
pub trait IntoBindings {
    /// Perform the conversion
    fn into_bindings(self) -> Result<Bindings>;
}

impl IntoBindings for Bindings {
    fn into_bindings(self) -> Result<Bindings> {
        Ok(self)
    }
}

impl IntoBindings for () {
    fn into_bindings(self) -> Result<Bindings> {
        Ok(Bindings::none())
    }
}

impl<V: Into<BindValue>> IntoBindings for Vec<V> {
    fn into_bindings(self) -> Result<Bindings> {
        Ok(Bindings::positional(self))
    }
}

impl<V: Into<BindValue>, const N: usize> IntoBindings for [V; N] {
    fn into_bindings(self) -> Result<Bindings> {
        Ok(Bindings::positional(self))
    }
}

impl<K: Into<String>, V: Into<BindValue>> IntoBindings for HashMap<K, V> {
    fn into_bindings(self) -> Result<Bindings> {
        Ok(Bindings::named(self))
    }
}

impl IntoBindings for serde_json::Value {
    fn into_bindings(self) -> Result<Bindings> {
        Bindings::from_json(self)
    }
}

/// Build [`Bindings`] inline.
///
/// ```
/// use simple_mysql::{bindings, BindValue, Bindings};
///
/// let positional = bindings![10, "abc"];
/// assert_eq!(
///     positional,
///     Bindings::Positional(vec![BindValue::Int(10), BindValue::Str("abc".into())])
/// );
///
/// let named = bindings! { "id" => 5 };
/// assert_eq!(named.len(), 1);
/// ```
#[macro_export]
macro_rules! bindings {
    () => {
        $crate::Bindings::none()
    };
    ($($name:literal => $value:expr),+ $(,)?) => {
        $crate::Bindings::Named(
            [$(
                (
                    $crate::params::normalize_key($name),
                    $crate::BindValue::from($value),
                )
            ),+]
            .into_iter()
            .collect(),
        )
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Bindings::Positional(vec![$($crate::BindValue::from($value)),+])
    };
}
