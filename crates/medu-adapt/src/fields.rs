//! Path-tracking accessors over an untyped JSON object.
//!
//! Every accessor reports failures with the dotted path of the field, so an
//! adapter error always points at the exact offending location. JSON `null`
//! is treated the same as an absent field.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use medu_types::parse_timestamp;

use crate::error::{AdaptError, AdaptResult, EntryLocator};

#[derive(Clone, Copy)]
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: &'a str,
    locator: &'a EntryLocator,
}

/// Owned path plus the object it points at; borrowed as [`Fields`].
pub(crate) struct Node<'a> {
    pub value: &'a Value,
    pub path: String,
}

impl<'a> Fields<'a> {
    /// View `value` as an object located at `path`.
    pub fn of(value: &'a Value, path: &'a str, locator: &'a EntryLocator) -> AdaptResult<Self> {
        match value {
            Value::Object(map) => Ok(Self { map, path, locator }),
            other => Err(AdaptError::Malformed {
                locator: locator.clone(),
                path: path.to_string(),
                reason: format!("expected object, got {}", type_name(other)),
            }),
        }
    }

    pub fn locator(&self) -> &'a EntryLocator {
        self.locator
    }

    /// Dotted path of `key` under this object.
    pub fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a str> + 'a {
        let map = self.map;
        map.keys().map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys of this object other than `known`, with their values.
    pub fn other_fields(&self, known: &[&str]) -> BTreeMap<String, Value> {
        self.map
            .iter()
            .filter(|(k, v)| !known.contains(&k.as_str()) && !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn missing(&self, key: &str) -> AdaptError {
        AdaptError::MissingField {
            locator: self.locator.clone(),
            path: self.path_of(key),
        }
    }

    pub fn malformed(&self, key: &str, reason: impl Into<String>) -> AdaptError {
        AdaptError::Malformed {
            locator: self.locator.clone(),
            path: self.path_of(key),
            reason: reason.into(),
        }
    }

    pub fn required_str(&self, key: &str) -> AdaptResult<String> {
        self.optional_str(key)?.ok_or_else(|| self.missing(key))
    }

    pub fn optional_str(&self, key: &str) -> AdaptResult<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.malformed(key, format!("expected string, got {}", type_name(other)))),
        }
    }

    /// A list of strings. Absent means empty; a bare string is a list of one.
    pub fn string_list(&self, key: &str) -> AdaptResult<Vec<String>> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(vec![s.clone()]),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(self.malformed(
                        &format!("{key}[{i}]"),
                        format!("expected string, got {}", type_name(other)),
                    )),
                })
                .collect(),
            Some(other) => Err(self.malformed(
                key,
                format!("expected array of strings, got {}", type_name(other)),
            )),
        }
    }

    /// Elements of an array field with their paths. Absent means empty.
    pub fn array(&self, key: &str) -> AdaptResult<Vec<Node<'a>>> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items
                .iter()
                .enumerate()
                .map(|(i, value)| Node {
                    value,
                    path: format!("{}[{i}]", self.path_of(key)),
                })
                .collect()),
            Some(other) => Err(self.malformed(key, format!("expected array, got {}", type_name(other)))),
        }
    }

    /// A nested value with its path, if present.
    pub fn node(&self, key: &str) -> Option<Node<'a>> {
        self.get(key).map(|value| Node {
            value,
            path: self.path_of(key),
        })
    }

    pub fn optional_bool(&self, key: &str) -> AdaptResult<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.malformed(key, format!("expected boolean, got {}", type_name(other)))),
        }
    }

    /// A non-negative integer that fits in `u32`.
    pub fn required_u32(&self, key: &str) -> AdaptResult<u32> {
        let value = self.get(key).ok_or_else(|| self.missing(key))?;
        value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| self.malformed(key, format!("expected non-negative integer, got {value}")))
    }

    /// An integer, given either as a JSON number or a numeric string.
    pub fn optional_i32(&self, key: &str) -> AdaptResult<Option<i32>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let parsed = match value {
            Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        };
        parsed
            .map(Some)
            .ok_or_else(|| self.malformed(key, format!("expected integer, got {value}")))
    }

    pub fn required_timestamp(&self, key: &str) -> AdaptResult<DateTime<Utc>> {
        let raw = self.required_str(key)?;
        parse_timestamp(&raw).map_err(|e| self.malformed(key, e.to_string()))
    }
}

impl<'a> Node<'a> {
    pub fn fields<'b>(&'b self, locator: &'b EntryLocator) -> AdaptResult<Fields<'b>>
    where
        'a: 'b,
    {
        Fields::of(self.value, &self.path, locator)
    }
}

/// JSON type of `value`, as used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn locator() -> EntryLocator {
        EntryLocator::Id("topic-a".into())
    }

    #[test]
    fn nested_paths_are_dotted() {
        let value = json!({"levels": {"1": {"summary": 5}}});
        let loc = locator();
        let root = Fields::of(&value, "", &loc).unwrap();
        let levels = root.node("levels").unwrap();
        let levels = levels.fields(&loc).unwrap();
        let one = levels.node("1").unwrap();
        let one = one.fields(&loc).unwrap();
        let err = one.required_str("summary").unwrap_err();
        assert_eq!(err.path(), Some("levels.1.summary"));
    }

    #[test]
    fn null_counts_as_absent() {
        let value = json!({"nameEs": null});
        let loc = locator();
        let root = Fields::of(&value, "", &loc).unwrap();
        assert!(!root.has("nameEs"));
        assert_eq!(root.optional_str("nameEs").unwrap(), None);
        assert!(matches!(
            root.required_str("nameEs"),
            Err(AdaptError::MissingField { .. })
        ));
    }

    #[test]
    fn string_list_reports_bad_element_index() {
        let value = json!({"tags": ["a", 3]});
        let loc = locator();
        let root = Fields::of(&value, "", &loc).unwrap();
        let err = root.string_list("tags").unwrap_err();
        assert_eq!(err.path(), Some("tags[1]"));
    }

    #[test]
    fn string_list_accepts_single_string() {
        let value = json!({"authors": "MedlinePlus"});
        let loc = locator();
        let root = Fields::of(&value, "", &loc).unwrap();
        assert_eq!(root.string_list("authors").unwrap(), vec!["MedlinePlus"]);
    }

    #[test]
    fn numeric_accessors() {
        let value = json!({"version": 2, "bad": -1, "year": "2023"});
        let loc = locator();
        let root = Fields::of(&value, "", &loc).unwrap();
        assert_eq!(root.required_u32("version").unwrap(), 2);
        assert!(matches!(
            root.required_u32("bad"),
            Err(AdaptError::Malformed { .. })
        ));
        assert_eq!(root.optional_i32("year").unwrap(), Some(2023));
        assert_eq!(root.optional_i32("absent").unwrap(), None);
    }

    #[test]
    fn array_elements_carry_index_paths() {
        let value = json!({"media": [{"id": "m"}]});
        let loc = locator();
        let root = Fields::of(&value, "", &loc).unwrap();
        let nodes = root.array("media").unwrap();
        assert_eq!(nodes[0].path, "media[0]");
    }

    #[test]
    fn non_object_is_malformed() {
        let value = json!("text");
        let loc = locator();
        let err = Fields::of(&value, "levels.2", &loc).err().unwrap();
        assert_eq!(err.path(), Some("levels.2"));
    }
}
