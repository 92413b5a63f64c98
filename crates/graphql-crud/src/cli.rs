//! Core logic behind the `graphql-crud-diff` binary.
//!
//! The input document carries both snapshots:
//!
//! ```json
//! { "initial": { "name": "A" }, "current": { "name": "B" } }
//! ```
//!
//! The output is the payload JSON, or `null` when there is nothing to send.

use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::DiffError;
use crate::options::DiffOptions;
use crate::payload::{
    build_create_payload_with_options, build_update_payload_with_options,
    build_upsert_payload_with_options,
};
use crate::relation::build_one_to_one_relation_overrides;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Diff(#[from] DiffError),
    #[error("Unknown payload kind: {0}")]
    UnknownKind(String),
}

// ── Request ───────────────────────────────────────────────────────────────

/// Which entry point to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Create,
    Update,
    Upsert,
}

impl FromStr for PayloadKind {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(PayloadKind::Create),
            "update" => Ok(PayloadKind::Update),
            "upsert" => Ok(PayloadKind::Upsert),
            other => Err(CliError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotPair {
    #[serde(default)]
    initial: Option<Value>,
    #[serde(default)]
    current: Value,
}

#[derive(Debug, Clone)]
pub struct CliRequest {
    pub kind: PayloadKind,
    pub id: Option<String>,
    pub relations: Vec<String>,
    pub offline_relations: Vec<String>,
    pub strict: bool,
    pub pretty: bool,
}

impl CliRequest {
    pub fn new(kind: PayloadKind) -> Self {
        CliRequest {
            kind,
            id: None,
            relations: Vec::new(),
            offline_relations: Vec::new(),
            strict: false,
            pretty: false,
        }
    }
}

/// Runs `request` against the JSON `input` and returns the rendered payload.
pub fn run(request: &CliRequest, input: &str) -> Result<String, CliError> {
    let pair: SnapshotPair = serde_json::from_str(input)?;
    let relation_keys = request.relations.iter().chain(request.offline_relations.iter());
    let overrides = build_one_to_one_relation_overrides(relation_keys, &request.offline_relations);
    let overrides = if overrides.is_empty() { None } else { Some(&overrides) };
    let options = DiffOptions::new().strict_changes(request.strict);
    let initial = pair.initial.as_ref();

    let payload = match request.kind {
        PayloadKind::Create => {
            build_create_payload_with_options(initial, &pair.current, overrides, options)?
                .map(Value::Object)
        }
        PayloadKind::Update => {
            build_update_payload_with_options(initial, &pair.current, overrides, options)?
                .map(Value::Object)
        }
        PayloadKind::Upsert => build_upsert_payload_with_options(
            request.id.as_deref(),
            initial,
            &pair.current,
            overrides,
            options,
        )?
        .map(|p| p.to_value()),
    };
    let payload = payload.unwrap_or(Value::Null);

    let out = if request.pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_with_relation() {
        let mut request = CliRequest::new(PayloadKind::Update);
        request.relations.push("manager".to_string());
        let out = run(
            &request,
            r#"{"initial": {"manager": {"id": "1"}}, "current": {"manager": {"id": "2"}}}"#,
        )
        .unwrap();
        assert_eq!(out, r#"{"manager":{"connect":{"id":"2"}}}"#);
    }

    #[test]
    fn test_offline_relation_connects_by_local_id() {
        let mut request = CliRequest::new(PayloadKind::Create);
        request.offline_relations.push("team".to_string());
        let out = run(&request, r#"{"current": {"team": {"localId": "t-1"}}}"#).unwrap();
        assert_eq!(out, r#"{"team":{"connect":{"localId":"t-1"}}}"#);
    }

    #[test]
    fn test_nothing_to_send_prints_null() {
        let mut request = CliRequest::new(PayloadKind::Upsert);
        request.id = Some("9".to_string());
        let out = run(&request, r#"{"initial": {"a": 1}, "current": {"a": 1}}"#).unwrap();
        assert_eq!(out, "null");
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("UPSERT".parse::<PayloadKind>().unwrap(), PayloadKind::Upsert);
        assert!(matches!("merge".parse::<PayloadKind>(), Err(CliError::UnknownKind(_))));
    }

    #[test]
    fn test_invalid_json() {
        let request = CliRequest::new(PayloadKind::Create);
        assert!(matches!(run(&request, "{"), Err(CliError::Json(_))));
    }

    #[test]
    fn test_shape_mismatch_surfaces() {
        let request = CliRequest::new(PayloadKind::Update);
        let err = run(&request, r#"{"initial": {"a": 1}, "current": {"a": {"b": 1}}}"#).unwrap_err();
        assert_eq!(err.to_string(), "SHAPE_MISMATCH: /a");
    }
}
