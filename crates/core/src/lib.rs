//! versecheck-core: phonetic analysis engine for poetic-form checking.
//!
//! Turns raw poem text plus a pronunciation table into a structured
//! conformance report: per-line syllable/stress breakdowns, meter
//! matching against an expected pattern (with lenient off-by-one
//! fitting), and rhyme-scheme validation. Rendering and dictionary
//! transport live with callers; this crate is pure computation.

pub mod analyzer;
pub mod dict;
pub mod forms;
pub mod meter;
pub mod phonetic;
pub mod rhyme;
pub mod text;
pub mod types;

pub use analyzer::{AnalyzeOptions, SonnetAnalyzer};
pub use dict::{OverlayPort, PronunciationStore};
pub use meter::{MatchOutcome, Strictness};
pub use types::{SonnetAnalysis, SonnetForm};
