use crate::level::Level;
use crate::value::{Payload, Value};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Identifier used when no request id could be resolved.
pub const UNKNOWN_REQUEST_ID: &str = "unknown";

/// One normalized log entry, ready to be shipped to a [`LogSink`].
///
/// Caller fields are flattened into the top level of the JSON object next
/// to the reserved `_time`, `level` and `request` keys. Reserved keys in
/// the caller payload never reach the wire; the assembled values win.
///
/// [`LogSink`]: crate::sink::LogSink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
    #[serde(rename = "_time", serialize_with = "serialize_time")]
    pub time: DateTime<Utc>,
    pub level: Level,
    pub request: BTreeMap<String, Value>,
}

impl Record {
    /// Build a record from a caller payload.
    ///
    /// **Parameters**
    /// - `level`: severity of the call.
    /// - `payload`: caller fields; a `request` map is merged into the
    ///   record's `request`, a structured `error` is flattened to a string.
    /// - `request_id`: already-resolved identifier written to `request.id`.
    /// - `time`: creation time, serialized as `_time`.
    pub fn assemble(level: Level, payload: Payload, request_id: String, time: DateTime<Utc>) -> Self {
        let mut fields = payload.into_inner();

        let mut request = match fields.remove("request") {
            Some(Value::Map(map)) => map,
            _ => BTreeMap::new(),
        };
        request.insert("id".to_string(), Value::String(request_id));

        fields.remove("_time");
        fields.remove("level");
        normalize_error(&mut fields);

        Record { fields, time, level, request }
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request.get("id").and_then(Value::as_str)
    }
}

/// Flatten a structured top-level `error` into `"<name>: <message>"`.
/// Every other shape under `error` is left untouched.
fn normalize_error(fields: &mut BTreeMap<String, Value>) {
    if let Some(Value::Error(err)) = fields.get("error") {
        let flat = err.to_string();
        fields.insert("error".to_string(), Value::String(flat));
    }
}

fn serialize_time<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true))
}
