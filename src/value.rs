//! Scalar values as they come back from the row source.

use chrono::{DateTime, Utc};

/// One column of a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    /// Never produced by the mapped schema, but the store can hand one back.
    Blob(Vec<u8>),
}

/// One result row, positionally aligned with the SELECT field list.
pub type Row = Vec<Value>;

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Real(r) => Some(*r),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// SQLite-style truthiness: any non-zero integer.
    pub fn as_bool(&self) -> Option<bool> {
        self.as_i64().map(|i| i != 0)
    }

    /// Interprets the value as an epoch-millisecond timestamp.
    pub fn as_datetime_ms(&self) -> Option<DateTime<Utc>> {
        self.as_f64()
            .and_then(|ms| DateTime::from_timestamp_millis(ms as i64))
    }

    /// Renders the value as a SQL literal. String quotes are doubled; numbers
    /// render bare; NULL renders as the keyword.
    pub fn literal(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Real(r) => r.to_string(),
            Self::Text(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Blob(bytes) => {
                let mut hex = String::with_capacity(bytes.len() * 2 + 3);
                hex.push_str("X'");
                for byte in bytes {
                    hex.push_str(&format!("{byte:02X}"));
                }
                hex.push('\'');
                hex
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Integer(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_literal_doubles_quotes() {
        let value = Value::from("O'Brien");
        assert_eq!(value.literal(), "'O''Brien'");
    }

    #[test]
    fn numeric_literals_render_bare() {
        assert_eq!(Value::from(42i64).literal(), "42");
        assert_eq!(Value::from(0.5).literal(), "0.5");
        assert_eq!(Value::Null.literal(), "NULL");
    }

    #[test]
    fn datetime_from_epoch_millis() {
        let value = Value::Real(1_700_000_000_000.0);
        let dt = value.as_datetime_ms().unwrap();
        assert_eq!(dt.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn truthiness_follows_sqlite() {
        assert_eq!(Value::from(1i64).as_bool(), Some(true));
        assert_eq!(Value::from(0i64).as_bool(), Some(false));
        assert_eq!(Value::Null.as_bool(), None);
    }
}
