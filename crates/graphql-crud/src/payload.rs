//! Mutation payload entry points: create, update and upsert.
//!
//! Output follows the nested write grammar:
//!
//! ```text
//! MutationInput    := { field: Scalar | RelationEnvelope, ... }
//! RelationEnvelope := { create: MutationInput } | { update: MutationInput }
//!                   | { connect: { id } } | { connect: { localId } }
//!                   | { disconnect: true }
//! ```
//!
//! # Example
//!
//! ```
//! use graphql_crud::{build_one_to_one_relation_overrides, build_update_payload};
//! use serde_json::json;
//!
//! let overrides = build_one_to_one_relation_overrides(["manager"], Vec::<&str>::new());
//! let payload = build_update_payload(
//!     Some(&json!({"name": "A", "manager": {"id": "1"}})),
//!     &json!({"name": "B", "manager": {"id": "2"}}),
//!     Some(&overrides),
//! )
//! .unwrap();
//! assert_eq!(
//!     payload.map(serde_json::Value::Object),
//!     Some(json!({"name": "B", "manager": {"connect": {"id": "2"}}}))
//! );
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diff::diff;
use crate::entity::{is_id_valid, NEW_ID};
use crate::error::DiffError;
use crate::mode::OperationMode;
use crate::options::{DiffOptions, IgnoredKeys};
use crate::overrides::OverrideRegistry;
use crate::value::Snapshot;

/// Full create payload: every non-ignored field of `current`, changed or not.
pub fn build_create_payload(
    initial: Option<&Value>,
    current: &Value,
    overrides: Option<&OverrideRegistry>,
) -> Result<Option<Snapshot>, DiffError> {
    build_create_payload_with_options(initial, current, overrides, DiffOptions::default())
}

/// [`build_create_payload`] with explicit options. `include_unchanged` is
/// always forced on.
pub fn build_create_payload_with_options(
    initial: Option<&Value>,
    current: &Value,
    overrides: Option<&OverrideRegistry>,
    options: DiffOptions,
) -> Result<Option<Snapshot>, DiffError> {
    diff(
        initial,
        Some(current),
        OperationMode::Create,
        &IgnoredKeys::create(),
        overrides,
        &options.include_unchanged(true),
    )
}

/// Update payload: changed scalars and changed or override-triggered relations.
pub fn build_update_payload(
    initial: Option<&Value>,
    current: &Value,
    overrides: Option<&OverrideRegistry>,
) -> Result<Option<Snapshot>, DiffError> {
    build_update_payload_with_options(initial, current, overrides, DiffOptions::default())
}

pub fn build_update_payload_with_options(
    initial: Option<&Value>,
    current: &Value,
    overrides: Option<&OverrideRegistry>,
    options: DiffOptions,
) -> Result<Option<Snapshot>, DiffError> {
    diff(
        initial,
        Some(current),
        OperationMode::Update,
        &IgnoredKeys::update(),
        overrides,
        &options,
    )
}

/// Unique selector of an upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhereUnique {
    pub id: String,
}

/// Upsert variables: both branches plus the selector the server matches on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<Snapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<Snapshot>,
    #[serde(rename = "where")]
    pub where_: WhereUnique,
}

impl UpsertPayload {
    pub fn to_value(&self) -> Value {
        let mut out = Snapshot::new();
        if let Some(create) = &self.create {
            out.insert("create".to_string(), Value::Object(create.clone()));
        }
        if let Some(update) = &self.update {
            out.insert("update".to_string(), Value::Object(update.clone()));
        }
        let mut selector = Snapshot::new();
        selector.insert("id".to_string(), Value::String(self.where_.id.clone()));
        out.insert("where".to_string(), Value::Object(selector));
        Value::Object(out)
    }
}

/// Upsert payload, or `None` when `id` is a real id and nothing changed.
///
/// The update branch keeps `localId`, unlike [`build_update_payload`].
pub fn build_upsert_payload(
    id: Option<&str>,
    initial: Option<&Value>,
    current: &Value,
    overrides: Option<&OverrideRegistry>,
) -> Result<Option<UpsertPayload>, DiffError> {
    build_upsert_payload_with_options(id, initial, current, overrides, DiffOptions::default())
}

pub fn build_upsert_payload_with_options(
    id: Option<&str>,
    initial: Option<&Value>,
    current: &Value,
    overrides: Option<&OverrideRegistry>,
    options: DiffOptions,
) -> Result<Option<UpsertPayload>, DiffError> {
    let create = diff(
        initial,
        Some(current),
        OperationMode::Create,
        &IgnoredKeys::create(),
        overrides,
        &options.include_unchanged(true),
    )?;
    let update = diff(
        initial,
        Some(current),
        OperationMode::Update,
        &IgnoredKeys::create(),
        overrides,
        &options,
    )?;
    let needs_write = !is_id_valid(id) || update.is_some();
    tracing::debug!(
        id = id.unwrap_or_default(),
        has_update = update.is_some(),
        needs_write,
        "upsert gating"
    );
    if !needs_write {
        return Ok(None);
    }
    let id = id.filter(|id| !id.is_empty()).unwrap_or(NEW_ID);
    Ok(Some(UpsertPayload {
        create,
        update,
        where_: WhereUnique { id: id.to_string() },
    }))
}
