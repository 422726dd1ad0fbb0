//! Result rows
//!
//! Each row is an ordered map from column name to a JSON value, so callers
//! can read fields by name or deserialize the whole row into their own type.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

/// A result row keyed by column name, in column order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    /// Value of the named column
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Column names in result order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no columns
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Underlying column map
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Deserialize the row into `T`
    ///
    /// ```
    /// use serde::Deserialize;
    /// use simple_mysql::Row;
    ///
    /// #[derive(Deserialize)]
    /// struct User {
    ///     id: i64,
    ///     name: String,
    /// }
    ///
    /// let row: Row = serde_json::from_str(r#"{"id": 1, "name": "abc"}"#).unwrap();
    /// let user: User = row.deserialize().unwrap();
    /// assert_eq!(user.id, 1);
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| Error::Decode(e.to_string()))
    }

    /// Decode a driver row
    pub(crate) fn from_mysql(row: &MySqlRow) -> Result<Self> {
        let mut fields = Map::with_capacity(row.columns().len());

        for (idx, column) in row.columns().iter().enumerate() {
            let value = decode_column(row, idx, column.type_info().name()).map_err(|e| {
                Error::Decode(format!("column `{}`: {}", column.name(), e))
            })?;
            fields.insert(column.name().to_string(), value);
        }

        Ok(Self(fields))
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn decode_column(
    row: &MySqlRow,
    idx: usize,
    type_name: &str,
) -> std::result::Result<Value, sqlx::Error> {
    if row.try_get_raw(idx)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match type_name {
        "BOOLEAN" => Value::Bool(row.try_get_unchecked::<bool, _>(idx)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => {
            Value::from(row.try_get_unchecked::<i64, _>(idx)?)
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => Value::from(row.try_get_unchecked::<u64, _>(idx)?),
        "FLOAT" => Value::from(f64::from(row.try_get_unchecked::<f32, _>(idx)?)),
        "DOUBLE" => Value::from(row.try_get_unchecked::<f64, _>(idx)?),
        "DATE" | "DATETIME" | "TIMESTAMP" | "TIME" => {
            let bytes = row.try_get_unchecked::<&[u8], _>(idx)?;
            match temporal_to_string(type_name, bytes) {
                Some(text) => Value::String(text),
                None => bytes_to_value(bytes),
            }
        }
        "JSON" => {
            row.try_get_unchecked::<sqlx::types::Json<Value>, _>(idx)?
                .0
        }
        "BIT" => Value::from(bits_to_u64(row.try_get_unchecked::<&[u8], _>(idx)?)),
        // DECIMAL stays exact: its digits as sent, like every text type
        _ => bytes_to_value(row.try_get_unchecked::<&[u8], _>(idx)?),
    };

    Ok(value)
}

/// Render a binary-protocol temporal payload the way MySQL prints it
///
/// The payload starts with its own length byte. Zero dates (`0000-00-00`)
/// arrive with length 0, and TIME carries a sign byte and a day count so
/// negative and over-24h values survive. Returns `None` for anything that is
/// not such a payload (text-protocol values are already strings).
fn temporal_to_string(type_name: &str, bytes: &[u8]) -> Option<String> {
    let (&len, body) = bytes.split_first()?;
    if body.len() != usize::from(len) {
        return None;
    }

    if type_name == "TIME" {
        return match body.len() {
            0 => Some("00:00:00".to_string()),
            8 | 12 => {
                let sign = if body[0] == 1 { "-" } else { "" };
                let days = u32::from_le_bytes([body[1], body[2], body[3], body[4]]);
                let hours = u64::from(days) * 24 + u64::from(body[5]);
                let mut text = format!("{}{:02}:{:02}:{:02}", sign, hours, body[6], body[7]);
                if body.len() == 12 {
                    push_micros(&mut text, &body[8..12]);
                }
                Some(text)
            }
            _ => None,
        };
    }

    let with_time = type_name != "DATE";
    let (year, month, day) = match body.len() {
        0 => (0, 0, 0),
        4 | 7 | 11 => (u16::from_le_bytes([body[0], body[1]]), body[2], body[3]),
        _ => return None,
    };

    let mut text = format!("{:04}-{:02}-{:02}", year, month, day);
    if with_time {
        let (hour, minute, second) = match body.len() {
            7 | 11 => (body[4], body[5], body[6]),
            _ => (0, 0, 0),
        };
        text.push_str(&format!(" {:02}:{:02}:{:02}", hour, minute, second));
        if body.len() == 11 {
            push_micros(&mut text, &body[7..11]);
        }
    }
    Some(text)
}

fn push_micros(text: &mut String, raw: &[u8]) {
    let micros = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
    if micros != 0 {
        text.push_str(&format!(".{:06}", micros));
    }
}

/// Big-endian BIT(n) payload as an integer
fn bits_to_u64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
}

/// Text when the bytes are UTF-8, otherwise the raw byte values
fn bytes_to_value(bytes: &[u8]) -> Value {
    match std::str::from_utf8(bytes) {
        Ok(s) => Value::String(s.to_string()),
        Err(_) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}
