//! Pronunciation lookup: immutable base table plus a user overlay.
//!
//! The base table is parsed once from the JSON wire format (word →
//! list of phoneme-string arrays) into tagged tokens and never mutated.
//! User-added pronunciations live in a separate overlay consulted first;
//! persistence of the overlay is delegated to an injected [`OverlayPort`]
//! so the store owns no storage strategy.

use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::text::strip_punctuation;
use crate::types::{parse_sequence, PhonemeToken};

/// Parsed pronunciation table: normalized word → ordered pronunciation
/// variants. Insertion order is the preference order.
pub type PronunciationTable = HashMap<String, Vec<Vec<PhonemeToken>>>;

/// Raw overlay entries as they are persisted (word → phoneme strings).
pub type OverlayEntries = HashMap<String, Vec<String>>;

/// Persistence seam for user-added pronunciations.
///
/// The store calls `load` once at wiring time and `save` after every
/// overlay change. Implementations decide where the data lives.
pub trait OverlayPort {
    fn load(&self) -> Result<OverlayEntries>;
    fn save(&self, entries: &OverlayEntries) -> Result<()>;
}

/// Normalize a word for table lookup: lowercase, letters and apostrophe
/// only (curly apostrophes folded).
pub fn normalize_word(word: &str) -> String {
    strip_punctuation(word).to_ascii_lowercase()
}

/// Word → pronunciation resolution over a base table and a user overlay.
pub struct PronunciationStore {
    base: PronunciationTable,
    overlay: PronunciationTable,
    overlay_raw: OverlayEntries,
    port: Option<Box<dyn OverlayPort>>,
}

impl PronunciationStore {
    /// Build a store over an already-parsed table.
    pub fn new(base: PronunciationTable) -> Self {
        PronunciationStore {
            base,
            overlay: HashMap::new(),
            overlay_raw: HashMap::new(),
            port: None,
        }
    }

    /// Parse the JSON wire format: `{"word": [["HH","AH0","L","OW1"], ...]}`.
    ///
    /// Keys are normalized and entries with no variants are dropped.
    /// Stress digits are decided here, once; downstream code only sees
    /// tagged tokens.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<Vec<String>>> =
            serde_json::from_str(json).context("Failed to parse pronunciation table JSON")?;

        let mut base: PronunciationTable = HashMap::with_capacity(raw.len());
        for (word, variants) in raw {
            let parsed: Vec<Vec<PhonemeToken>> = variants
                .iter()
                .filter(|v| !v.is_empty())
                .map(|v| parse_sequence(v))
                .collect();
            if !parsed.is_empty() {
                base.insert(normalize_word(&word), parsed);
            }
        }
        log::info!("Loaded pronunciation table: {} words", base.len());
        Ok(PronunciationStore::new(base))
    }

    /// Attach an overlay persistence port, loading any saved entries.
    pub fn with_port(mut self, port: Box<dyn OverlayPort>) -> Result<Self> {
        let entries = port.load().context("Failed to load overlay entries")?;
        for (word, phonemes) in &entries {
            let key = normalize_word(word);
            self.overlay.insert(key, vec![parse_sequence(phonemes)]);
        }
        if !entries.is_empty() {
            log::info!("Loaded {} overlay pronunciations", entries.len());
        }
        self.overlay_raw = entries;
        self.port = Some(port);
        Ok(self)
    }

    /// Resolve a word to its preferred pronunciation (first listed
    /// variant), overlay before base.
    pub fn resolve(&self, word: &str) -> Option<&Vec<PhonemeToken>> {
        self.resolve_all(word).and_then(|variants| variants.first())
    }

    /// Resolve a word to every known pronunciation variant.
    pub fn resolve_all(&self, word: &str) -> Option<&[Vec<PhonemeToken>]> {
        let key = normalize_word(word);
        if let Some(v) = self.overlay.get(&key) {
            return Some(v.as_slice());
        }
        self.base.get(&key).map(|v| v.as_slice())
    }

    /// Add (or replace) a single-variant user pronunciation.
    ///
    /// Persists through the attached port, if any. Must not be called
    /// while an analysis borrows the store; `&mut self` enforces that.
    pub fn add_overlay(&mut self, word: &str, phonemes: &[String]) -> Result<()> {
        let key = normalize_word(word);
        self.overlay.insert(key.clone(), vec![parse_sequence(phonemes)]);
        self.overlay_raw.insert(key.clone(), phonemes.to_vec());
        if let Some(port) = &self.port {
            port.save(&self.overlay_raw)
                .with_context(|| format!("Failed to persist overlay entry for '{}'", key))?;
        }
        log::debug!("Overlay pronunciation added for '{}'", key);
        Ok(())
    }

    /// Number of words in the base table.
    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}
