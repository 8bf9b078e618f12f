//! Record access: the only window the engine has into a row.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::value::CellValue;

/// A row the engine can filter, search, sort and render.
///
/// `field` backs sorting, the predicates and the default cell renderer;
/// `values` backs free-text search (every enumerable value of the record).
pub trait Record {
    fn field(&self, key: &str) -> Option<CellValue>;

    fn values(&self) -> Vec<CellValue>;

    /// Field as text for row ids. Implementations holding exact integers
    /// override this so large ids do not collapse through `f64`.
    fn field_text(&self, key: &str) -> Option<String> {
        self.field(key).map(|v| v.to_string())
    }
}

impl Record for serde_json::Value {
    fn field(&self, key: &str) -> Option<CellValue> {
        self.get(key).and_then(CellValue::from_json)
    }

    fn values(&self) -> Vec<CellValue> {
        match self {
            serde_json::Value::Object(map) => {
                map.values().filter_map(CellValue::from_json).collect()
            }
            other => CellValue::from_json(other).into_iter().collect(),
        }
    }

    fn field_text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
            other => CellValue::from_json(other).map(|v| v.to_string()),
        }
    }
}

impl Record for BTreeMap<String, CellValue> {
    fn field(&self, key: &str) -> Option<CellValue> {
        self.get(key).cloned()
    }

    fn values(&self) -> Vec<CellValue> {
        BTreeMap::values(self).cloned().collect()
    }
}

type KeyFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Produces a record's row identifier, used for selection.
pub enum KeySelector<T> {
    /// Stringified value of a named field (`""` when absent).
    Field(String),
    /// Arbitrary key function.
    Func(KeyFn<T>),
}

impl<T> KeySelector<T> {
    pub fn field(name: impl Into<String>) -> Self {
        KeySelector::Field(name.into())
    }

    pub fn func(f: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        KeySelector::Func(Arc::new(f))
    }
}

impl<T: Record> KeySelector<T> {
    pub fn key_of(&self, record: &T) -> String {
        match self {
            KeySelector::Field(name) => record.field_text(name).unwrap_or_default(),
            KeySelector::Func(f) => f(record),
        }
    }
}

impl<T> Clone for KeySelector<T> {
    fn clone(&self) -> Self {
        match self {
            KeySelector::Field(name) => KeySelector::Field(name.clone()),
            KeySelector::Func(f) => KeySelector::Func(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for KeySelector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySelector::Field(name) => f.debug_tuple("Field").field(name).finish(),
            KeySelector::Func(_) => f.write_str("Func(..)"),
        }
    }
}
