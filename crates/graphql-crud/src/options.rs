//! Engine configuration: which keys are skipped and how changes are detected.

use indexmap::IndexSet;

/// Type discriminator injected by GraphQL clients.
pub const TYPENAME_KEY: &str = "__typename";
/// Server-assigned identity.
pub const ID_KEY: &str = "id";
/// Client-generated identity of an entity not yet persisted.
pub const LOCAL_ID_KEY: &str = "localId";

const DEFAULT_MAX_DEPTH: usize = 64;

/// Field names excluded from default scalar diffing.
///
/// The set applies to ordinary nested records too, but not to a subtree
/// reached through an override.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IgnoredKeys {
    keys: IndexSet<String>,
}

impl IgnoredKeys {
    pub fn none() -> Self {
        Self::default()
    }

    /// `__typename` and `id`.
    pub fn create() -> Self {
        Self::none().with(TYPENAME_KEY).with(ID_KEY)
    }

    /// `__typename`, `id` and `localId`.
    pub fn update() -> Self {
        Self::create().with(LOCAL_ID_KEY)
    }

    pub fn with(mut self, key: impl Into<String>) -> Self {
        self.keys.insert(key.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoredKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        IgnoredKeys { keys: iter.into_iter().map(Into::into).collect() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Emit scalar fields even when they did not change.
    pub include_unchanged: bool,
    /// Emit a changed scalar even when it is falsy (`false`, `0`, `""`, `null`).
    ///
    /// Off by default: the default path only stores truthy values, so such a
    /// change is otherwise indistinguishable from no change.
    pub strict_changes: bool,
    /// Deepest nesting level the engine descends into.
    pub max_depth: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            include_unchanged: false,
            strict_changes: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_unchanged(mut self, include_unchanged: bool) -> Self {
        self.include_unchanged = include_unchanged;
        self
    }

    pub fn strict_changes(mut self, strict_changes: bool) -> Self {
        self.strict_changes = strict_changes;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
