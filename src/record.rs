use crate::error::{ExtractError, ExtractResult};
use serde_json::Value;

/// Outcome of a nested key lookup on a raw record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lookup<'a> {
    Present(&'a Value),
    /// The last key (or an intermediate key) does not exist.
    Absent,
    /// An intermediate value on the path is not an object.
    TypeMismatch,
}

impl<'a> Lookup<'a> {
    /// Collapse `Absent` and a JSON `null` leaf into `None`.
    pub fn non_null(self) -> Option<&'a Value> {
        match self {
            Lookup::Present(Value::Null) | Lookup::Absent | Lookup::TypeMismatch => None,
            Lookup::Present(v) => Some(v),
        }
    }
}

/// Walk `path` through nested objects.
pub fn lookup<'a>(record: &'a Value, path: &[&str]) -> Lookup<'a> {
    let mut cur = record;
    for key in path {
        match cur {
            Value::Object(map) => match map.get(*key) {
                Some(v) => cur = v,
                None => return Lookup::Absent,
            },
            _ => return Lookup::TypeMismatch,
        }
    }
    Lookup::Present(cur)
}

/// True when `key` holds a nested object (e.g. the repost substructure).
pub fn has_object(record: &Value, key: &str) -> bool {
    matches!(record.get(key), Some(Value::Object(_)))
}

/// A record seen by one extractor: lookups raise errors tagged with the
/// column name and record index.
#[derive(Clone, Copy)]
pub(crate) struct RecordView<'a> {
    pub value: &'a Value,
    pub index: usize,
    pub column: &'static str,
}

impl<'a> RecordView<'a> {
    pub fn new(value: &'a Value, index: usize, column: &'static str) -> Self {
        Self { value, index, column }
    }

    pub fn structural(&self, path: &[&str]) -> ExtractError {
        ExtractError::Structural { column: self.column, index: self.index, path: path.join(".") }
    }

    fn mismatch(&self, path: &[&str], expected: &'static str) -> ExtractError {
        ExtractError::TypeMismatch {
            column: self.column,
            index: self.index,
            path: path.join("."),
            expected,
        }
    }

    pub fn lookup(&self, path: &[&str]) -> Lookup<'a> {
        lookup(self.value, path)
    }

    /// Required field of any non-null shape.
    pub fn required(&self, path: &[&str]) -> ExtractResult<&'a Value> {
        match self.lookup(path) {
            Lookup::Present(Value::Null) => Err(self.mismatch(path, "a non-null value")),
            Lookup::Present(v) => Ok(v),
            Lookup::Absent => Err(self.structural(path)),
            Lookup::TypeMismatch => Err(self.mismatch(path, "reachable through nested objects")),
        }
    }

    pub fn required_str(&self, path: &[&str]) -> ExtractResult<&'a str> {
        self.required(path)?.as_str().ok_or_else(|| self.mismatch(path, "a string"))
    }

    pub fn required_i64(&self, path: &[&str]) -> ExtractResult<i64> {
        self.required(path)?.as_i64().ok_or_else(|| self.mismatch(path, "an integer"))
    }

    /// Optional field: absence and `null` both map to `None`, a broken
    /// intermediate object is still an error.
    pub fn optional(&self, path: &[&str]) -> ExtractResult<Option<&'a Value>> {
        match self.lookup(path) {
            Lookup::TypeMismatch => Err(self.mismatch(path, "reachable through nested objects")),
            other => Ok(other.non_null()),
        }
    }

    pub fn optional_bool(&self, path: &[&str]) -> ExtractResult<Option<bool>> {
        match self.optional(path)? {
            None => Ok(None),
            Some(v) => v.as_bool().map(Some).ok_or_else(|| self.mismatch(path, "a boolean")),
        }
    }

    pub fn optional_str(&self, path: &[&str]) -> ExtractResult<Option<&'a str>> {
        match self.optional(path)? {
            None => Ok(None),
            Some(v) => v.as_str().map(Some).ok_or_else(|| self.mismatch(path, "a string")),
        }
    }

    /// Optional nested object (e.g. the repost): absent or `null` gives
    /// `None`, any other non-object value is a type mismatch.
    pub fn optional_object(&self, key: &str) -> ExtractResult<Option<&'a Value>> {
        match self.optional(&[key])? {
            None => Ok(None),
            Some(v) if v.is_object() => Ok(Some(v)),
            Some(_) => Err(self.mismatch(&[key], "an object")),
        }
    }
}
