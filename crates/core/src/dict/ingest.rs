//! One-shot ingestion of raw CMU-format dictionary files.
//!
//! Parses line-oriented entries ("WORD  PH1 PH2 ...") into the sorted
//! JSON wire format consumed by [`super::store::PronunciationStore`].
//! Offline tooling, not part of the runtime analysis path.

use std::collections::BTreeMap;

/// Raw ingestion output, sorted by word.
pub type RawTable = BTreeMap<String, Vec<Vec<String>>>;

/// Parse a raw CMU-format dictionary into a sorted table.
///
/// - lines starting with ";;;" are comments;
/// - lines with fewer than two fields are skipped;
/// - trailing "(N)" variant markers are stripped from the word;
/// - words are lowercased; words starting with anything other than a
///   letter or apostrophe are discarded (e.g. "!EXCLAMATION-POINT");
/// - duplicate pronunciations for a word are merged, order-preserving.
pub fn parse_raw(content: &str) -> RawTable {
    let mut table: RawTable = BTreeMap::new();
    let mut skipped = 0usize;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(";;;") {
            continue;
        }

        let mut fields = line.split_whitespace();
        let word_raw = match fields.next() {
            Some(w) => w,
            None => continue,
        };
        let phonemes: Vec<String> = fields.map(|s| s.to_string()).collect();
        if phonemes.is_empty() {
            skipped += 1;
            continue;
        }

        // WORD(2) -> WORD
        let word = strip_variant_marker(word_raw).to_lowercase();

        let starts_ok = word
            .chars()
            .next()
            .map(|c| c.is_ascii_lowercase() || c == '\'')
            .unwrap_or(false);
        if !starts_ok {
            skipped += 1;
            continue;
        }

        let variants = table.entry(word).or_default();
        if !variants.contains(&phonemes) {
            variants.push(phonemes);
        }
    }

    log::info!(
        "Ingested raw dictionary: {} words ({} lines skipped)",
        table.len(),
        skipped
    );
    table
}

/// Strip a trailing "(N)" variant marker; any other parenthesis stays.
fn strip_variant_marker(word: &str) -> &str {
    if let Some(stem) = word.strip_suffix(')') {
        if let Some(open) = stem.rfind('(') {
            let digits = &stem[open + 1..];
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return &word[..open];
            }
        }
    }
    word
}

/// Serialize an ingested table in the wire format, one word per line.
pub fn to_json_string(table: &RawTable) -> String {
    let mut out = String::from("{\n");
    let last = table.len().saturating_sub(1);
    for (i, (word, variants)) in table.iter().enumerate() {
        let key = serde_json::to_string(word).unwrap_or_else(|_| format!("\"{}\"", word));
        let value = serde_json::to_string(variants).unwrap_or_else(|_| "[]".to_string());
        let comma = if i < last { "," } else { "" };
        out.push_str(&format!("  {}: {}{}\n", key, value, comma));
    }
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
;;; comment line
HELLO  HH AH0 L OW1
HELLO(2)  HH EH0 L OW1
HELLO(3)  HH AH0 L OW1
!EXCLAMATION-POINT  EH2 K S K L AH0
'TIS  T IH1 Z
BROKEN
DAY  D EY1
";

    #[test]
    fn test_parse_raw_basic() {
        let table = parse_raw(SAMPLE);
        assert!(table.contains_key("hello"));
        assert!(table.contains_key("day"));
        assert!(table.contains_key("'tis"));
    }

    #[test]
    fn test_parse_raw_merges_variants_dedup() {
        let table = parse_raw(SAMPLE);
        // HELLO(3) duplicates HELLO and is dropped; HELLO(2) survives
        let variants = &table["hello"];
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0][1], "AH0");
        assert_eq!(variants[1][1], "EH0");
    }

    #[test]
    fn test_parse_raw_skips_nonword_entries() {
        let table = parse_raw(SAMPLE);
        assert!(!table.keys().any(|k| k.starts_with('!')));
    }

    #[test]
    fn test_parse_raw_skips_short_lines() {
        let table = parse_raw(SAMPLE);
        assert!(!table.contains_key("broken"));
    }

    #[test]
    fn test_variant_marker_only_stripped_when_trailing() {
        let table = parse_raw("CLOSE(PAREN  K L OW1 Z\nBAZ(1)  B AE1 Z\n");
        // A mid-word parenthesis is not a variant marker
        assert!(table.contains_key("close(paren"));
        assert!(!table.contains_key("close"));
        assert!(table.contains_key("baz"));
        assert!(!table.keys().any(|k| k.contains("(1)")));
    }

    #[test]
    fn test_parse_raw_sorted_keys() {
        let table = parse_raw(SAMPLE);
        let keys: Vec<&String> = table.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_json_roundtrips_into_store() {
        let table = parse_raw(SAMPLE);
        let json = to_json_string(&table);
        let store = crate::dict::store::PronunciationStore::from_json_str(&json).unwrap();
        assert!(store.resolve("hello").is_some());
        assert!(store.resolve("'tis").is_some());
    }
}
