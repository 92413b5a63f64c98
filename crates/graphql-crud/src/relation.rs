//! Pre-built overrides for one-to-one relations.
//!
//! A one-to-one relation is never created or updated inline. It is linked to
//! an existing entity by server id (or by local id for entities created
//! offline) and unlinked with a disconnect envelope.

use serde_json::Value;

use crate::mode::{envelope, OperationMode};
use crate::overrides::{FieldOverride, OverrideRegistry, Resolution};
use crate::value::is_truthy;

/// Override for a single one-to-one relation field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OneToOneRelation {
    /// Connect by `localId` instead of `id`.
    pub offline: bool,
}

impl OneToOneRelation {
    pub fn online() -> Self {
        OneToOneRelation { offline: false }
    }

    pub fn offline() -> Self {
        OneToOneRelation { offline: true }
    }

    fn connect_mode(&self) -> OperationMode {
        if self.offline {
            OperationMode::ConnectLocalId
        } else {
            OperationMode::Connect
        }
    }
}

impl FieldOverride for OneToOneRelation {
    fn resolve(
        &self,
        mode: OperationMode,
        key: &str,
        computed: Option<Value>,
        initial: Option<&Value>,
        current: Option<&Value>,
    ) -> Resolution {
        tracing::trace!(key, %mode, offline = self.offline, "resolving one-to-one relation");
        let present = is_truthy(computed.as_ref());
        match mode {
            OperationMode::Create if present => {
                Resolution::pass(envelope(self.connect_mode(), computed))
            }
            OperationMode::Create => Resolution::suppress(),
            OperationMode::Update if present => {
                Resolution::pass(envelope(self.connect_mode(), computed))
            }
            OperationMode::Update if is_truthy(initial) && !is_truthy(current) => {
                Resolution::pass(envelope(OperationMode::Disconnect, initial.cloned()))
            }
            OperationMode::Update => Resolution::suppress(),
            _ => Resolution::pass(computed),
        }
    }
}

/// Builds a registry connecting every key in `attribute_keys` as a one-to-one
/// relation. Keys also listed in `offline_attribute_keys` connect by `localId`.
pub fn build_one_to_one_relation_overrides<K, O>(
    attribute_keys: impl IntoIterator<Item = K>,
    offline_attribute_keys: impl IntoIterator<Item = O>,
) -> OverrideRegistry
where
    K: AsRef<str>,
    O: AsRef<str>,
{
    let offline: Vec<O> = offline_attribute_keys.into_iter().collect();
    let mut registry = OverrideRegistry::new();
    for key in attribute_keys {
        let key = key.as_ref();
        let relation = if offline.iter().any(|o| o.as_ref() == key) {
            OneToOneRelation::offline()
        } else {
            OneToOneRelation::online()
        };
        registry.insert(key, relation);
    }
    registry
}
