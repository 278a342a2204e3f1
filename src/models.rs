use crate::errors::{AppError, AppResult};
use crate::utils::format_float;
use serde_json::Value as JsonValue;

/// Leaf value of a record.
///
/// Booleans are kept so that they can be rejected with the offending field
/// name attached; the EPrints schema has no boolean encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i128),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Returns the text written into an XML element, or `None` for values
    /// that have no textual form (null and booleans).
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Integer(number) => Some(number.to_string()),
            Self::Float(number) => Some(format_float(*number)),
            Self::Null | Self::Bool(_) => None,
        }
    }
}

/// A record value: scalar, ordered sequence or ordered mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

/// Ordered field name to value mapping. Iteration follows insertion order,
/// which for decoded JSON is the source key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    fields: Vec<(String, Value)>,
}

/// One bibliographic entry.
pub type Record = Mapping;

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Scalar(Scalar::Null),
            JsonValue::Bool(flag) => Value::Scalar(Scalar::Bool(flag)),
            JsonValue::Number(number) => {
                let integer = number
                    .as_i64()
                    .map(i128::from)
                    .or_else(|| number.as_u64().map(i128::from));
                match integer {
                    Some(integer) => Value::Scalar(Scalar::Integer(integer)),
                    // Without arbitrary precision every JSON number fits one of the three
                    None => Value::Scalar(Scalar::Float(number.as_f64().unwrap_or(f64::NAN))),
                }
            }
            JsonValue::String(text) => Value::Scalar(Scalar::Text(text)),
            JsonValue::Array(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(fields) => Value::Mapping(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<JsonValue> for Mapping {
    type Error = AppError;

    fn try_from(value: JsonValue) -> AppResult<Self> {
        match Value::from(value) {
            Value::Mapping(mapping) => Ok(mapping),
            other => Err(AppError::InvalidInput(format!(
                "Expected a JSON object as record, found {}",
                shape_name(&other)
            ))),
        }
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Scalar(Scalar::Null) => "null",
        Value::Scalar(Scalar::Bool(_)) => "a boolean",
        Value::Scalar(Scalar::Integer(_)) | Value::Scalar(Scalar::Float(_)) => "a number",
        Value::Scalar(Scalar::Text(_)) => "a string",
        Value::Sequence(_) => "an array",
        Value::Mapping(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_object_keeps_key_order() {
        let record = Record::try_from(json!({"zeta": 1, "alpha": 2, "mid": 3})).unwrap();
        let keys: Vec<&str> = record.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_json_numbers_split_into_integer_and_float() {
        assert_eq!(
            Value::from(json!(42)),
            Value::Scalar(Scalar::Integer(42))
        );
        assert_eq!(
            Value::from(json!(u64::MAX)),
            Value::Scalar(Scalar::Integer(i128::from(u64::MAX)))
        );
        assert_eq!(
            Value::from(json!(2.5)),
            Value::Scalar(Scalar::Float(2.5))
        );
    }

    #[test]
    fn test_render_scalars() {
        assert_eq!(Scalar::Text("abc".into()).render(), Some("abc".to_string()));
        assert_eq!(Scalar::Integer(-7).render(), Some("-7".to_string()));
        assert_eq!(Scalar::Float(3.0).render(), Some("3.0".to_string()));
        assert_eq!(Scalar::Null.render(), None);
        assert_eq!(Scalar::Bool(true).render(), None);
    }

    #[test]
    fn test_non_object_record_is_rejected() {
        let err = Record::try_from(json!([1, 2])).unwrap_err();
        match err {
            AppError::InvalidInput(msg) => assert!(msg.contains("an array")),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_insert_replaces_existing_key_in_place() {
        let mut mapping = Mapping::new();
        mapping.insert("a", Value::Scalar(Scalar::Integer(1)));
        mapping.insert("b", Value::Scalar(Scalar::Integer(2)));
        mapping.insert("a", Value::Scalar(Scalar::Integer(3)));
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("a"), Some(&Value::Scalar(Scalar::Integer(3))));
        assert_eq!(mapping.iter().next().map(|(key, _)| key), Some("a"));
    }
}
