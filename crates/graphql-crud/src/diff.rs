//! The recursive diff engine.
//!
//! Compares two snapshots key by key over the union of their keys and folds
//! each field into an output record: a changed scalar, a relation wrapped in
//! the envelope for the current mode, or nothing. A record whose output has no
//! entries collapses to `None`.

use serde_json::Value;

use crate::error::{format_path, DiffError};
use crate::mode::{envelope, OperationMode};
use crate::options::{DiffOptions, IgnoredKeys};
use crate::overrides::{KeyDirective, OverrideRegistry};
use crate::value::{is_truthy, loosely_equal, Field, Snapshot};

// ── Public API ────────────────────────────────────────────────────────────

/// Diff `initial` against `current` in `mode`.
///
/// Both roots must be objects or absent (`None` / `null`). An absent initial
/// is a pure creation; an absent current is a pure removal.
pub fn diff(
    initial: Option<&Value>,
    current: Option<&Value>,
    mode: OperationMode,
    ignored: &IgnoredKeys,
    overrides: Option<&OverrideRegistry>,
    options: &DiffOptions,
) -> Result<Option<Snapshot>, DiffError> {
    let initial = root_record(initial)?;
    let current = root_record(current)?;
    let mut walker = Walker { overrides, options, path: Vec::new() };
    walker.records(initial, current, mode, ignored)
}

fn root_record(value: Option<&Value>) -> Result<Option<&Snapshot>, DiffError> {
    match Field::classify(value) {
        Field::Absent => Ok(None),
        Field::Record(map) => Ok(Some(map)),
        Field::Scalar(_) => Err(DiffError::NotARecord { path: format_path(&[]) }),
    }
}

// ── Core recursive differ ─────────────────────────────────────────────────

struct Walker<'a> {
    overrides: Option<&'a OverrideRegistry>,
    options: &'a DiffOptions,
    path: Vec<String>,
}

impl Walker<'_> {
    fn records(
        &mut self,
        initial: Option<&Snapshot>,
        current: Option<&Snapshot>,
        mode: OperationMode,
        ignored: &IgnoredKeys,
    ) -> Result<Option<Snapshot>, DiffError> {
        if self.path.len() > self.options.max_depth {
            return Err(DiffError::DepthLimitExceeded {
                path: format_path(&self.path),
                limit: self.options.max_depth,
            });
        }
        tracing::debug!(path = %format_path(&self.path), %mode, "diffing record");

        let mut output = Snapshot::new();
        for key in merged_keys(initial, current) {
            self.path.push(key.to_string());
            self.field(key, initial, current, mode, ignored, &mut output)?;
            self.path.pop();
        }

        tracing::debug!(
            path = %format_path(&self.path),
            entries = output.len(),
            "diffed record"
        );
        Ok(if output.is_empty() { None } else { Some(output) })
    }

    fn field(
        &mut self,
        key: &str,
        initial: Option<&Snapshot>,
        current: Option<&Snapshot>,
        mode: OperationMode,
        ignored: &IgnoredKeys,
        output: &mut Snapshot,
    ) -> Result<(), DiffError> {
        let initial_val = initial.and_then(|m| m.get(key));
        let current_val = current.and_then(|m| m.get(key));
        let field_override = self.overrides.and_then(|o| o.get(key)).cloned();
        let effective_mode = if field_override.is_some() { OperationMode::Identity } else { mode };

        let computed = match (Field::classify(initial_val), Field::classify(current_val)) {
            (Field::Record(_), Field::Scalar(_)) | (Field::Scalar(_), Field::Record(_)) => {
                return Err(DiffError::ShapeMismatch { path: format_path(&self.path) });
            }
            (i, c) if i.is_record() || c.is_record() => {
                let none = IgnoredKeys::none();
                let sub_ignored = if field_override.is_some() { &none } else { ignored };
                let sub = self.records(i.as_record(), c.as_record(), effective_mode, sub_ignored)?;
                envelope(effective_mode, sub.map(Value::Object))
            }
            _ => {
                let changed = !loosely_equal(initial_val, current_val);
                if (changed || self.options.include_unchanged) && !ignored.contains(key) {
                    current_val.cloned()
                } else {
                    None
                }
            }
        };
        tracing::trace!(
            path = %format_path(&self.path),
            has_override = field_override.is_some(),
            computed = ?computed,
            "computed field"
        );

        match field_override {
            Some(field_override) => {
                let resolution = field_override.resolve(mode, key, computed, initial_val, current_val);
                tracing::trace!(
                    path = %format_path(&self.path),
                    %mode,
                    resolution = ?resolution,
                    "override resolved"
                );
                let target = match resolution.key {
                    KeyDirective::Suppress => return Ok(()),
                    KeyDirective::Keep => key.to_string(),
                    KeyDirective::Rename(next) => next,
                };
                match resolution.value {
                    Some(value) => store(output, target, value),
                    None => {
                        output.remove(&target);
                    }
                }
            }
            None => {
                if let Some(value) = computed.filter(|v| self.keeps(v)) {
                    store(output, key.to_string(), value);
                }
            }
        }
        Ok(())
    }

    fn keeps(&self, value: &Value) -> bool {
        self.options.strict_changes || is_truthy(Some(value))
    }
}

/// Insertion order of `initial`, followed by keys only `current` has.
fn merged_keys<'a>(initial: Option<&'a Snapshot>, current: Option<&'a Snapshot>) -> Vec<&'a str> {
    let mut keys: Vec<&str> = initial.map(|m| m.keys().map(String::as_str).collect()).unwrap_or_default();
    if let Some(current) = current {
        for key in current.keys() {
            if !initial.is_some_and(|m| m.contains_key(key)) {
                keys.push(key);
            }
        }
    }
    keys
}

// Last write wins when two fields resolve to the same output key.
fn store(output: &mut Snapshot, key: String, value: Value) {
    if output.contains_key(&key) {
        tracing::debug!(key = %key, "output key collision, overwriting");
    }
    output.insert(key, value);
}

// ── Tests ─────────────────────────────────────────────────────────────────
