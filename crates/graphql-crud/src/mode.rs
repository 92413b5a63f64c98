//! Operation modes and the relation envelopes they produce.

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};

use crate::error::DiffError;
use crate::value::is_truthy;

/// How a computed sub-value is wrapped before it lands in the parent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationMode {
    Identity,
    Create,
    Update,
    Connect,
    ConnectLocalId,
    Disconnect,
}

impl OperationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationMode::Identity => "identity",
            OperationMode::Create => "create",
            OperationMode::Update => "update",
            OperationMode::Connect => "connect",
            OperationMode::ConnectLocalId => "connectLocalId",
            OperationMode::Disconnect => "disconnect",
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationMode {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "identity" => Ok(OperationMode::Identity),
            "create" => Ok(OperationMode::Create),
            "update" => Ok(OperationMode::Update),
            "connect" => Ok(OperationMode::Connect),
            "connectLocalId" => Ok(OperationMode::ConnectLocalId),
            "disconnect" => Ok(OperationMode::Disconnect),
            other => Err(DiffError::UnknownMode(other.to_string())),
        }
    }
}

/// Wraps `value` in the envelope for `mode`.
///
/// Every mode except [`OperationMode::Identity`] yields `None` for a falsy
/// value, so an empty envelope is never produced.
pub fn envelope(mode: OperationMode, value: Option<Value>) -> Option<Value> {
    if mode == OperationMode::Identity {
        return value;
    }
    if !is_truthy(value.as_ref()) {
        return None;
    }
    let value = value?;
    let wrapped = match mode {
        OperationMode::Identity => value,
        OperationMode::Create => json!({ "create": value }),
        OperationMode::Update => json!({ "update": value }),
        OperationMode::Connect => json!({ "connect": pick(&value, "id") }),
        OperationMode::ConnectLocalId => json!({ "connect": pick(&value, "localId") }),
        OperationMode::Disconnect => json!({ "disconnect": true }),
    };
    Some(wrapped)
}

// `{id: value.id}` with a missing id serializes to `{}`.
fn pick(value: &Value, key: &str) -> Value {
    let mut out = serde_json::Map::new();
    if let Some(v) = value.get(key) {
        out.insert(key.to_string(), v.clone());
    }
    Value::Object(out)
}
