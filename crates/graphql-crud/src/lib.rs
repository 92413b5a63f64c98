//! graphql-crud — diff two snapshots of an entity into a nested mutation payload.
//!
//! Given an *initial* and a *current* snapshot, the engine emits only what
//! changed, wrapping nested relations in `create` / `update` / `connect` /
//! `disconnect` envelopes as expected by GraphQL write APIs with nested
//! mutations. Per-field overrides replace the default decision for a field;
//! [`build_one_to_one_relation_overrides`] covers the common one-to-one case.
//!
//! # Example
//!
//! ```
//! use graphql_crud::build_create_payload;
//! use serde_json::json;
//!
//! let payload = build_create_payload(
//!     None,
//!     &json!({"__typename": "User", "name": "A", "profile": {"bio": "x"}}),
//!     None,
//! )
//! .unwrap();
//! assert_eq!(
//!     payload.map(serde_json::Value::Object),
//!     Some(json!({"name": "A", "profile": {"create": {"bio": "x"}}}))
//! );
//! ```

pub mod cli;
pub mod diff;
pub mod entity;
pub mod error;
pub mod mode;
pub mod options;
pub mod overrides;
pub mod payload;
pub mod relation;
pub mod value;

pub use diff::diff;
pub use entity::{is_id_valid, NEW_ID};
pub use error::DiffError;
pub use mode::{envelope, OperationMode};
pub use options::{DiffOptions, IgnoredKeys, ID_KEY, LOCAL_ID_KEY, TYPENAME_KEY};
pub use overrides::{FieldOverride, KeyDirective, OverrideRegistry, Resolution};
pub use payload::{
    build_create_payload, build_create_payload_with_options, build_update_payload,
    build_update_payload_with_options, build_upsert_payload, build_upsert_payload_with_options,
    UpsertPayload, WhereUnique,
};
pub use relation::{build_one_to_one_relation_overrides, OneToOneRelation};
pub use value::{is_truthy, Field, Snapshot};
