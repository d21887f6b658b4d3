//! Localized constellation names and label text preparation.

use rustc_hash::FxHashMap;

use astrolabe_render::split_lines;

use crate::japanese::to_japanese;

/// Maximum characters per label line.
pub const MAX_LABEL_LINE: usize = 15;

/// Localized names provided by the active sky culture.
pub trait CultureNames {
    /// Label for the object with catalog id `id`.
    fn label(&self, id: &str) -> Option<String>;
}

/// In-memory name table.
#[derive(Clone, Debug, Default)]
pub struct NameTable {
    names: FxHashMap<String, String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.names.insert(id.into(), label.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<FxHashMap<String, String>> for NameTable {
    fn from(names: FxHashMap<String, String>) -> Self {
        Self { names }
    }
}

impl CultureNames for NameTable {
    fn label(&self, id: &str) -> Option<String> {
        self.names.get(id).cloned()
    }
}

/// Text of a constellation label and the length, in characters, of its
/// longest line.
///
/// The localized name falls back to the id. Japanese interfaces get the
/// Japanese name when one is known; it is not wrapped, but the returned
/// length is still the one of the wrapped original name.
pub fn label_text(names: &dyn CultureNames, id: &str, lang: &str) -> (String, usize) {
    let label = names.label(id).unwrap_or_else(|| id.to_string());
    let (wrapped, longest) = split_lines(&label, MAX_LABEL_LINE);
    let translated = if lang.starts_with("ja") {
        to_japanese(&label)
    } else {
        None
    };
    match translated {
        Some(ja) => (ja.to_string(), longest),
        None => (wrapped, longest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> NameTable {
        let mut t = NameTable::new();
        t.insert("CON western Ori", "Orion");
        t.insert("CON western TrA", "Triangulum Australe");
        t
    }

    #[test]
    fn test_lookup_and_fallback() {
        let t = table();
        assert_eq!(label_text(&t, "CON western Ori", "en"), ("Orion".to_string(), 5));
        assert_eq!(
            label_text(&t, "CON western Xyz", "en"),
            ("CON western Xyz".to_string(), 15)
        );
    }

    #[test]
    fn test_long_name_wrapped() {
        let t = table();
        let (text, longest) = label_text(&t, "CON western TrA", "fr");
        assert_eq!(text, "Triangulum\nAustrale");
        assert_eq!(longest, 10);
    }

    #[test]
    fn test_japanese_substitution() {
        let t = table();
        assert_eq!(
            label_text(&t, "CON western TrA", "ja"),
            ("みなみのさんかく座".to_string(), 10)
        );
        // Unknown names keep the wrapped original.
        assert_eq!(
            label_text(&t, "CON western Xyz", "ja-JP"),
            ("CON western Xyz".to_string(), 15)
        );
    }
}
