//! Per-field overrides of the engine's default diff and envelope decision.
//!
//! An override is looked up by field name. When one is registered for a key
//! the engine diffs that subtree in [`OperationMode::Identity`] with no
//! ignored keys and hands the raw result to the override, which owns the
//! final envelope and may rename or drop the field.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::mode::OperationMode;

/// What an override decides about the output key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeyDirective {
    /// Store under the original field name.
    #[default]
    Keep,
    /// Store under a different name.
    Rename(String),
    /// Omit the field from the output.
    Suppress,
}

/// The result of resolving one field through an override.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolution {
    pub key: KeyDirective,
    /// `None` stores nothing, even under a kept key.
    pub value: Option<Value>,
}

impl Resolution {
    /// Keep the key and store `value`.
    pub fn value(value: Value) -> Self {
        Resolution { key: KeyDirective::Keep, value: Some(value) }
    }

    /// Keep the key and store whatever `value` is, including nothing.
    pub fn pass(value: Option<Value>) -> Self {
        Resolution { key: KeyDirective::Keep, value }
    }

    pub fn rename(key: impl Into<String>, value: Option<Value>) -> Self {
        Resolution { key: KeyDirective::Rename(key.into()), value }
    }

    pub fn suppress() -> Self {
        Resolution { key: KeyDirective::Suppress, value: None }
    }

    pub fn is_suppressed(&self) -> bool {
        self.key == KeyDirective::Suppress
    }
}

/// A custom resolution for one field.
///
/// `mode` is the mode of the enclosing record (not the identity mode the
/// subtree was diffed in). `computed` is the engine's raw result for the field;
/// `initial` and `current` are the untouched snapshot values.
pub trait FieldOverride: Send + Sync {
    fn resolve(
        &self,
        mode: OperationMode,
        key: &str,
        computed: Option<Value>,
        initial: Option<&Value>,
        current: Option<&Value>,
    ) -> Resolution;
}

impl<F> FieldOverride for F
where
    F: Fn(OperationMode, &str, Option<Value>, Option<&Value>, Option<&Value>) -> Resolution
        + Send
        + Sync,
{
    fn resolve(
        &self,
        mode: OperationMode,
        key: &str,
        computed: Option<Value>,
        initial: Option<&Value>,
        current: Option<&Value>,
    ) -> Resolution {
        self(mode, key, computed, initial, current)
    }
}

/// Field name to override, in registration order.
#[derive(Clone, Default)]
pub struct OverrideRegistry {
    entries: IndexMap<String, Arc<dyn FieldOverride>>,
}

impl OverrideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, field: impl FieldOverride + 'static) -> Self {
        self.insert(key, field);
        self
    }

    /// Registers `field` for `key`, replacing any previous override.
    pub fn insert(&mut self, key: impl Into<String>, field: impl FieldOverride + 'static) {
        self.entries.insert(key.into(), Arc::new(field));
    }

    /// Like [`OverrideRegistry::with`], but pins the closure signature so
    /// inline closures need no parameter annotations.
    pub fn with_fn<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(OperationMode, &str, Option<Value>, Option<&Value>, Option<&Value>) -> Resolution
            + Send
            + Sync
            + 'static,
    {
        self.with(key, f)
    }

    pub fn insert_shared(&mut self, key: impl Into<String>, field: Arc<dyn FieldOverride>) {
        self.entries.insert(key.into(), field);
    }

    pub fn get(&self, key: &str) -> Option<&Arc<dyn FieldOverride>> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Adds every entry of `other`; entries of `other` win on conflict.
    pub fn merge(mut self, other: &OverrideRegistry) -> Self {
        for (key, field) in &other.entries {
            self.entries.insert(key.clone(), Arc::clone(field));
        }
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for OverrideRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
