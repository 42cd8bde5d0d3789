//! Key-to-string lookup boundary.
//!
//! Every label, name, and message the engine emits is resolved through a
//! lookup supplied by the embedding panel. The engine treats the lookup as
//! total: a missing key resolves to the key itself rather than failing.
//!
//! The lookup's output doubles as the match key when the verdict boundary
//! resolves a display name back to a registry criterion, so embedders must
//! keep the criterion-key → string mapping one-to-one within a category.

use std::collections::BTreeMap;

pub trait Localizer {
    fn resolve(&self, key: &str) -> String;
}

/// Fixed in-memory catalog. Unknown keys fall back to the key itself.
#[derive(Debug, Clone, Default)]
pub struct StaticLocalizer {
    entries: BTreeMap<String, String>,
}

impl StaticLocalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(key.into(), text.into());
        self
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Localizer for StaticLocalizer {
    fn resolve(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
