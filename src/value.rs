use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Dynamically shaped payload value.
///
/// Mirrors the JSON data model with one extra variant, [`Value::Error`],
/// for structured errors that get flattened to a string when they appear
/// under the top-level `error` key of a payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Error(ErrorValue),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }
}

/// A structured error: the name of its kind and its message.
///
/// Serialized as `{"name": .., "message": ..}` when nested; rendered as
/// `"<name>: <message>"` by [`fmt::Display`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorValue {
    pub name: String,
    pub message: String,
}

impl ErrorValue {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Capture an error using the unqualified name of its type as the kind.
    ///
    /// `std::num::ParseIntError` becomes `ParseIntError`; generic
    /// parameters are stripped. Trait objects carry no concrete type, so
    /// `dyn Error + Send + Sync` becomes `Error`.
    pub fn of<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Self::new(short_type_name::<E>(), err.to_string())
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let full = full.strip_prefix("dyn ").unwrap_or(full);
    let base = full.split(['<', '+']).next().unwrap_or(full).trim_end();
    base.rsplit("::").next().unwrap_or(base)
}

impl From<ErrorValue> for Value {
    fn from(v: ErrorValue) -> Self {
        Value::Error(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Number(v.into())
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl From<f64> for Value {
    /// Non-finite floats have no JSON form and become [`Value::Null`].
    fn from(v: f64) -> Self {
        serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl From<Payload> for Value {
    fn from(v: Payload) -> Self {
        Value::Map(v.0)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Caller-supplied fields of one log call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, Value>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a payload from a JSON object. Returns `None` for any other
    /// JSON shape.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match Value::from(value) {
            Value::Map(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Attach `err` under the `error` key.
    pub fn with_error<E: std::error::Error + ?Sized>(self, err: &E) -> Self {
        self.with("error", ErrorValue::of(err))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub(crate) fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_value_uses_short_type_name() {
        let err = "x".parse::<i32>().unwrap_err();
        let value = ErrorValue::of(&err);
        assert_eq!(value.name, "ParseIntError");
        assert_eq!(value.to_string(), format!("ParseIntError: {}", err));
    }

    #[test]
    fn boxed_trait_object_uses_trait_name() {
        let boxed: Box<dyn std::error::Error + Send + Sync> = "x".parse::<i32>().unwrap_err().into();
        let payload = Payload::new().with_error(&*boxed);

        let expected = Value::from(ErrorValue::new("Error", boxed.to_string()));
        assert_eq!(payload.get("error"), Some(&expected));
    }

    #[test]
    fn generic_error_type_is_stripped() {
        #[derive(Debug)]
        struct Wrapped<T>(T);

        impl<T: fmt::Debug> fmt::Display for Wrapped<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "wrapped {:?}", self.0)
            }
        }

        impl<T: fmt::Debug> std::error::Error for Wrapped<T> {}

        let value = ErrorValue::of(&Wrapped(std::collections::HashMap::<u8, u8>::new()));
        assert_eq!(value.name, "Wrapped");
    }

    #[test]
    fn nested_error_serializes_as_object() {
        let value = Value::from(vec![Value::from(ErrorValue::new("TypeError", "bad input"))]);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!([{"name": "TypeError", "message": "bad input"}])
        );
    }

    #[test]
    fn non_finite_float_becomes_null() {
        assert_eq!(Value::from(f64::NAN), Value::Null);
        assert_eq!(serde_json::to_string(&Value::from(1.5)).unwrap(), "1.5");
    }

    #[test]
    fn payload_from_json_object() {
        let payload = Payload::from_json(json!({"user": "bob", "attempts": 3, "tags": ["a"]})).unwrap();
        assert_eq!(payload.get("user"), Some(&Value::from("bob")));
        assert_eq!(payload.get("attempts"), Some(&Value::from(3)));
        assert_eq!(payload.get("tags"), Some(&Value::from(vec!["a"])));
    }

    #[test]
    fn payload_from_json_rejects_non_objects() {
        assert!(Payload::from_json(json!("just a string")).is_none());
        assert!(Payload::from_json(json!([1, 2])).is_none());
    }

    #[test]
    fn payload_round_trips_plain_json() {
        let input = json!({"a": null, "b": true, "c": {"d": [1, "two"]}});
        let payload = Payload::from_json(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&payload).unwrap(), input);
    }
}
