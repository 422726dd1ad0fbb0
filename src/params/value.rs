//! Bound parameter values

use crate::{Error, Result};

/// Wire-level parameter kind a value is sent as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Signed 64-bit integer (`MYSQL_TYPE_LONGLONG`)
    Int,
    /// String (`MYSQL_TYPE_VAR_STRING`)
    Str,
    /// SQL NULL, flagged in the statement's null bitmap
    Null,
}

impl ParamKind {
    /// Name of the MySQL column type used on the wire
    pub fn wire_type(&self) -> &'static str {
        match self {
            Self::Int => "LONGLONG",
            Self::Str => "VAR_STRING",
            Self::Null => "NULL",
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Str => write!(f, "str"),
            Self::Null => write!(f, "null"),
        }
    }
}

/// A value bound to a statement parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    /// Integer parameter
    Int(i64),
    /// String parameter
    Str(String),
    /// NULL parameter
    Null,
}

impl BindValue {
    /// Parameter kind this value is bound as
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Int(_) => ParamKind::Int,
            Self::Str(_) => ParamKind::Str,
            Self::Null => ParamKind::Null,
        }
    }

    /// Convert a JSON scalar into a bound value.
    ///
    /// `param` names the parameter in the error when the value has no
    /// parameter kind (booleans, floats, arrays, objects, integers beyond
    /// `i64`).
    pub fn from_json(param: &str, value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        let unsupported = |kind| Error::UnsupportedBindingType {
            param: param.to_string(),
            kind,
        };

        match value {
            Value::Null => Ok(Self::Null),
            Value::String(s) => Ok(Self::Str(s)),
            Value::Number(n) => n.as_i64().map(Self::Int).ok_or_else(|| {
                if n.is_u64() {
                    unsupported("u64 out of i64 range")
                } else {
                    unsupported("float")
                }
            }),
            Value::Bool(_) => Err(unsupported("bool")),
            Value::Array(_) => Err(unsupported("array")),
            Value::Object(_) => Err(unsupported("object")),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BindValue {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<&String> for BindValue {
    fn from(v: &String) -> Self {
        Self::Str(v.clone())
    }
}

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
