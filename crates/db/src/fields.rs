//! Field maps: the untyped bridge between request DTOs and the generic
//! repository.
//!
//! A [`FieldMap`] holds `column name -> value` pairs. Absent values are never
//! stored, so "unset" and "not supplied" collapse into the same thing and an
//! update can never write `NULL` over an existing value. The repository only
//! ever pushes column names taken from the entity schema into SQL, so keys
//! coming from callers are matched, not interpolated.

use std::collections::BTreeMap;

use filmcat_core::types::{Date, DbId, Timestamp};

/// Storage type of a column, used to reject values of the wrong kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Id,
    Text,
    Float,
    Date,
    Timestamp,
}

/// A single non-null column value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Id(DbId),
    Text(String),
    Float(f64),
    Date(Date),
    Timestamp(Timestamp),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Id(_) => FieldKind::Id,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::Timestamp(_) => FieldKind::Timestamp,
        }
    }
}

impl From<DbId> for FieldValue {
    fn from(v: DbId) -> Self {
        FieldValue::Id(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<Date> for FieldValue {
    fn from(v: Date) -> Self {
        FieldValue::Date(v)
    }
}

impl From<Timestamp> for FieldValue {
    fn from(v: Timestamp) -> Self {
        FieldValue::Timestamp(v)
    }
}

/// Ordered `column -> value` map. Used both as a write payload and as a set
/// of equality filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    fields: BTreeMap<String, FieldValue>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`FieldMap::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Builder-style [`FieldMap::set_opt`].
    pub fn with_opt<V: Into<FieldValue>>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        self.set_opt(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Store the value only when present; `None` is dropped.
    pub fn set_opt<V: Into<FieldValue>>(&mut self, name: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Equality filters share the field-map representation.
pub type Filters = FieldMap;

/// Conversion from a request payload into a write payload.
///
/// Create DTOs emit every field that has a value; update DTOs emit only the
/// fields the caller supplied.
pub trait IntoFieldMap {
    fn into_field_map(self) -> FieldMap;
}

impl IntoFieldMap for FieldMap {
    fn into_field_map(self) -> FieldMap {
        self
    }
}
