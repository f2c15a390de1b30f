//! Pronunciation table loading, lookup, and raw-dictionary ingestion.

pub mod ingest;
pub mod store;

pub use store::{normalize_word, OverlayPort, PronunciationStore, PronunciationTable};
