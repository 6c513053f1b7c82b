//! Native key to Dear ImGui key table

use std::collections::HashMap;
use std::hash::Hash;

use dear_imgui_rs::Key;

/// Logical keys every host adapter is expected to map.
///
/// Navigation and editing keys plus the letters used by the
/// copy/paste/undo shortcuts.
pub const REQUIRED_KEYS: [Key; 21] = [
    Key::Tab,
    Key::LeftArrow,
    Key::RightArrow,
    Key::UpArrow,
    Key::DownArrow,
    Key::PageUp,
    Key::PageDown,
    Key::Home,
    Key::End,
    Key::Insert,
    Key::Delete,
    Key::Backspace,
    Key::Space,
    Key::Enter,
    Key::Escape,
    Key::A,
    Key::C,
    Key::V,
    Key::X,
    Key::Y,
    Key::Z,
];

/// Fixed mapping from a host's physical keys to Dear ImGui keys.
///
/// Built once by the host adapter and moved into the bridge at
/// construction, so it is in place before the first key event arrives.
#[derive(Clone, Debug)]
pub struct KeyTable<K> {
    entries: HashMap<K, Key>,
}

impl<K> Default for KeyTable<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> KeyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, native: K, key: Key) -> Self {
        self.insert(native, key);
        self
    }

    pub fn insert(&mut self, native: K, key: Key) -> Option<Key> {
        self.entries.insert(native, key)
    }

    pub fn get(&self, native: &K) -> Option<Key> {
        self.entries.get(native).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys from [`REQUIRED_KEYS`] that no native key maps to.
    pub fn missing_keys(&self) -> Vec<Key> {
        REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|required| !self.entries.values().any(|k| k == required))
            .collect()
    }
}

impl<K: Eq + Hash> FromIterator<(K, Key)> for KeyTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, Key)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_and_missing_keys() {
        let table = KeyTable::new().with(9u32, Key::Tab).with(27, Key::Escape);

        assert_eq!(table.get(&9), Some(Key::Tab));
        assert_eq!(table.get(&13), None);
        assert_eq!(table.len(), 2);

        let missing = table.missing_keys();
        assert_eq!(missing.len(), REQUIRED_KEYS.len() - 2);
        assert!(!missing.contains(&Key::Tab));
        assert!(missing.contains(&Key::Enter));
    }

    #[test]
    fn complete_table_reports_nothing_missing() {
        let table: KeyTable<usize> = REQUIRED_KEYS.iter().copied().enumerate().collect();
        assert!(table.missing_keys().is_empty());
    }
}
