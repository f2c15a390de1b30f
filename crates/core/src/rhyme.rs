//! Rhyme-scheme validation: group lines by scheme label and check that
//! every line in a group resolved to the same rhyme key.

use std::collections::BTreeMap;

use crate::types::LineAnalysis;

/// Outcome of rhyme-scheme validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RhymeValidation {
    /// True when no issues were found
    pub valid: bool,
    pub issues: Vec<String>,
    /// Scheme label → indices of the lines carrying it
    pub groups: BTreeMap<char, Vec<usize>>,
}

/// Validate line rhyme keys against a rhyme scheme.
///
/// Lines beyond the scheme (or scheme labels beyond the lines) are
/// ignored. Groups with at most one member are never checked. A group
/// can report both an inconsistency issue and a not-resolvable issue.
pub fn validate_rhyme_scheme(lines: &[LineAnalysis], scheme: &[char]) -> RhymeValidation {
    let mut groups: BTreeMap<char, Vec<usize>> = BTreeMap::new();
    for i in 0..lines.len().min(scheme.len()) {
        groups.entry(scheme[i]).or_default().push(i);
    }

    let mut issues = Vec::new();
    for (label, indices) in &groups {
        if indices.len() <= 1 {
            continue;
        }

        let keys: Vec<&str> = indices.iter().map(|&i| lines[i].rhyme_key.as_str()).collect();

        // Distinct nonempty keys, in order of first appearance
        let mut distinct: Vec<&str> = Vec::new();
        for key in keys.iter().filter(|k| !k.is_empty()) {
            if !distinct.contains(key) {
                distinct.push(key);
            }
        }

        if distinct.len() > 1 {
            issues.push(format!(
                "Rhyme group {} has inconsistent rhymes: {}",
                label,
                distinct.join(", ")
            ));
        }

        if keys.iter().any(|k| k.is_empty()) {
            issues.push(format!(
                "Rhyme group {} contains words whose rhyme could not be resolved",
                label
            ));
        }
    }

    RhymeValidation {
        valid: issues.is_empty(),
        issues,
        groups,
    }
}
