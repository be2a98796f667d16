//! Personal vocabulary list persisted in the key-value store.
//!
//! Stored as a JSON array of `{en, ja, learned}` objects under the `wordbook`
//! key. Older saves held bare strings; those are upgraded when loaded.

use crate::error::{SyncError, SyncResult};
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;

pub const WORDBOOK_KEY: &str = "wordbook";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordbookEntry {
    #[serde(rename = "en")]
    pub source_text: String,
    #[serde(rename = "ja", default)]
    pub translated_text: String,
    #[serde(default)]
    pub learned: bool,
}

impl WordbookEntry {
    pub fn new(source_text: impl Into<String>, translated_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            translated_text: translated_text.into(),
            learned: false,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Legacy(String),
    Entry(WordbookEntry),
}

impl From<StoredEntry> for WordbookEntry {
    fn from(stored: StoredEntry) -> Self {
        match stored {
            StoredEntry::Legacy(text) => WordbookEntry::new(text, ""),
            StoredEntry::Entry(entry) => entry,
        }
    }
}

/// Comparison key for duplicate detection.
pub fn dedup_key(text: &str) -> String {
    text.nfkc().collect::<String>().trim().to_lowercase()
}

/// Outcome of an add request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Duplicate,
    Empty,
}

#[derive(Debug, Default)]
pub struct Wordbook {
    entries: Vec<WordbookEntry>,
}

impl Wordbook {
    /// Read the list from `store`. Unreadable data yields an empty list.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(WORDBOOK_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(err) => {
                warn!(error = %err, "Wordbook unavailable; starting empty");
                return Self::default();
            }
        };
        match serde_json::from_str::<Vec<StoredEntry>>(&raw) {
            Ok(stored) => {
                let entries: Vec<WordbookEntry> =
                    stored.into_iter().map(WordbookEntry::from).collect();
                info!(entries = entries.len(), "Loaded wordbook");
                Self { entries }
            }
            Err(err) => {
                warn!("Ignoring malformed wordbook data: {err}");
                Self::default()
            }
        }
    }

    pub fn entries(&self) -> &[WordbookEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, source_text: &str) -> bool {
        let key = dedup_key(source_text);
        self.entries
            .iter()
            .any(|entry| dedup_key(&entry.source_text) == key)
    }

    /// Add a line's text with an empty translation.
    pub fn add_word(&mut self, source_text: &str) -> AddOutcome {
        self.add_entry(source_text, "")
    }

    pub fn add_entry(&mut self, source_text: &str, translated_text: &str) -> AddOutcome {
        let source_text = source_text.trim();
        if source_text.is_empty() {
            return AddOutcome::Empty;
        }
        if self.contains(source_text) {
            debug!(word = source_text, "Word already in wordbook");
            return AddOutcome::Duplicate;
        }
        self.entries
            .push(WordbookEntry::new(source_text, translated_text.trim()));
        info!(word = source_text, total = self.entries.len(), "Added word");
        AddOutcome::Added
    }

    pub fn toggle_learned(&mut self, index: usize) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.learned = !entry.learned;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, index: usize) -> Option<WordbookEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Rewrite the full list into `store`.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> SyncResult<()> {
        let json = serde_json::to_string(&self.entries)
            .map_err(|err| SyncError::Storage(err.to_string()))?;
        store.set(WORDBOOK_KEY, &json)?;
        debug!(entries = self.entries.len(), "Saved wordbook");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn duplicates_are_case_insensitive() {
        let mut book = Wordbook::default();
        assert_eq!(book.add_word("Hello"), AddOutcome::Added);
        assert_eq!(book.add_word("hello"), AddOutcome::Duplicate);
        assert_eq!(book.add_word("  HELLO "), AddOutcome::Duplicate);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn duplicates_ignore_width_variants() {
        let mut book = Wordbook::default();
        assert_eq!(book.add_word("ＡＢＣ"), AddOutcome::Added);
        assert_eq!(book.add_word("abc"), AddOutcome::Duplicate);
    }

    #[test]
    fn blank_words_are_rejected() {
        let mut book = Wordbook::default();
        assert_eq!(book.add_word("   "), AddOutcome::Empty);
        assert!(book.is_empty());
    }

    #[test]
    fn legacy_strings_are_normalized_on_load() {
        let mut store = MemoryStore::default();
        store
            .set(
                WORDBOOK_KEY,
                r#"["plain", {"en":"Hello","ja":"こんにちは","learned":true}]"#,
            )
            .expect("seed");
        let book = Wordbook::load(&store);
        assert_eq!(
            book.entries(),
            &[
                WordbookEntry::new("plain", ""),
                WordbookEntry {
                    source_text: "Hello".into(),
                    translated_text: "こんにちは".into(),
                    learned: true,
                },
            ]
        );
    }

    #[test]
    fn save_writes_object_form() {
        let mut store = MemoryStore::default();
        let mut book = Wordbook::default();
        book.add_entry("cat", "猫");
        book.add_word("dog");
        book.toggle_learned(1);
        book.save(&mut store).expect("save");

        let raw = store.get(WORDBOOK_KEY).expect("get").expect("present");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(
            value,
            serde_json::json!([
                {"en": "cat", "ja": "猫", "learned": false},
                {"en": "dog", "ja": "", "learned": true},
            ])
        );
    }

    #[test]
    fn delete_and_toggle_check_bounds() {
        let mut book = Wordbook::default();
        book.add_word("one");
        assert!(!book.toggle_learned(3));
        assert!(book.delete(3).is_none());
        assert_eq!(book.delete(0).map(|e| e.source_text), Some("one".into()));
        assert!(book.is_empty());
    }

    #[test]
    fn malformed_store_value_starts_empty() {
        let mut store = MemoryStore::default();
        store.set(WORDBOOK_KEY, "{oops").expect("seed");
        assert!(Wordbook::load(&store).is_empty());
    }
}
