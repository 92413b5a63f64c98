//! Entity identity helpers.

/// Placeholder id of an entity that does not exist server-side yet.
pub const NEW_ID: &str = "add";

/// Returns `true` for a real, server-issued id.
///
/// ```
/// use graphql_crud::{is_id_valid, NEW_ID};
///
/// assert!(is_id_valid(Some("42")));
/// assert!(!is_id_valid(Some(NEW_ID)));
/// assert!(!is_id_valid(Some("")));
/// assert!(!is_id_valid(None));
/// ```
pub fn is_id_valid(id: Option<&str>) -> bool {
    matches!(id, Some(id) if !id.is_empty() && id != NEW_ID)
}
