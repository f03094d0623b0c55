// ==========================================
// gSSURGO Merge - Row Cell Values
// ==========================================

use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};

/// One column value bound for insertion into the store.
///
/// Text-file sources only ever produce `Null` and `Text`; template-database
/// sources carry typed values through unchanged. SQLite column affinity
/// converts numeric text on storage, so both paths land identically.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Text(String),
    Int(i64),
    Real(f64),
}

impl CellValue {
    /// Blank-to-null normalization for delimited text fields.
    pub fn from_text_field(raw: &str) -> CellValue {
        if raw.is_empty() {
            CellValue::Null
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Primary-key view of this cell, or `None` for null.
    pub fn as_key(&self) -> Option<KeyValue> {
        match self {
            CellValue::Null => None,
            CellValue::Text(s) => Some(KeyValue::normalize(s)),
            CellValue::Int(i) => Some(KeyValue::Int(*i)),
            CellValue::Real(f) => Some(KeyValue::Text(f.to_string())),
        }
    }
}

impl ToSql for CellValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            CellValue::Null => ToSqlOutput::Owned(Value::Null),
            CellValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            CellValue::Int(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            CellValue::Real(f) => ToSqlOutput::Owned(Value::Real(*f)),
        })
    }
}

impl From<rusqlite::types::Value> for CellValue {
    fn from(v: rusqlite::types::Value) -> Self {
        match v {
            Value::Null => CellValue::Null,
            Value::Integer(i) => CellValue::Int(i),
            Value::Real(f) => CellValue::Real(f),
            Value::Text(s) => CellValue::Text(s),
            Value::Blob(_) => CellValue::Null,
        }
    }
}

/// A lookup-table primary key compared by value, not source representation:
/// the text `"5"` and the integer `5` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyValue {
    Int(i64),
    Text(String),
}

impl KeyValue {
    pub fn normalize(raw: &str) -> KeyValue {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(i) => KeyValue::Int(i),
            Err(_) => KeyValue::Text(trimmed.to_string()),
        }
    }
}
