//! Built-in poetic form registry.
//!
//! An unknown form identifier is a caller/configuration defect, so it
//! fails fast with a typed error instead of silently defaulting.

use thiserror::Error;

use crate::types::{MeterFamily, MeterPattern, SonnetForm, Stress, StressPattern};

#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown poetic form '{0}' (known forms: shakespearean, petrarchan, spenserian)")]
    Unknown(String),
}

/// Alternating unstressed/stressed pattern of `feet` iambs.
fn iambic_feet(feet: usize) -> StressPattern {
    let mut pattern = Vec::with_capacity(feet * 2);
    for _ in 0..feet {
        pattern.push(Stress::None);
        pattern.push(Stress::Primary);
    }
    pattern
}

/// Iambic pentameter: ten syllables, five da-DUM feet.
pub fn iambic_pentameter() -> MeterPattern {
    MeterPattern {
        name: "iambic pentameter".to_string(),
        description: "five iambic feet per line (da-DUM x5)".to_string(),
        stress_pattern: iambic_feet(5),
        syllable_count: 10,
        family: MeterFamily::Iambic,
    }
}

fn sonnet(name: &str, scheme: &str) -> SonnetForm {
    let rhyme_scheme: Vec<char> = scheme.chars().collect();
    let line_count = rhyme_scheme.len();
    SonnetForm {
        name: name.to_string(),
        rhyme_scheme,
        meter: iambic_pentameter(),
        line_count,
    }
}

/// All built-in forms, in registry order.
pub fn builtin_forms() -> Vec<SonnetForm> {
    vec![
        sonnet("shakespearean", "ABABCDCDEFEFGG"),
        sonnet("petrarchan", "ABBAABBACDECDE"),
        sonnet("spenserian", "ABABBCBCCDCDEE"),
    ]
}

/// Look up a built-in form by identifier (case-insensitive).
pub fn by_name(name: &str) -> Result<SonnetForm, FormError> {
    let key = name.to_ascii_lowercase();
    builtin_forms()
        .into_iter()
        .find(|f| f.name == key)
        .ok_or_else(|| FormError::Unknown(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_forms_are_sonnets() {
        for form in builtin_forms() {
            assert_eq!(form.line_count, 14, "{}", form.name);
            assert_eq!(form.rhyme_scheme.len(), form.line_count);
            assert_eq!(form.meter.syllable_count, 10);
            assert_eq!(form.meter.stress_pattern.len(), 10);
        }
    }

    #[test]
    fn test_pentameter_alternates() {
        let meter = iambic_pentameter();
        for (i, s) in meter.stress_pattern.iter().enumerate() {
            let expected = if i % 2 == 0 { Stress::None } else { Stress::Primary };
            assert_eq!(*s, expected);
        }
        assert_eq!(meter.family, MeterFamily::Iambic);
    }

    #[test]
    fn test_by_name_case_insensitive() {
        assert!(by_name("shakespearean").is_ok());
        assert!(by_name("Shakespearean").is_ok());
        assert!(by_name("PETRARCHAN").is_ok());
    }

    #[test]
    fn test_unknown_form_is_hard_error() {
        let err = by_name("limerick").unwrap_err();
        assert!(err.to_string().contains("limerick"));
    }

    #[test]
    fn test_shakespearean_scheme() {
        let form = by_name("shakespearean").unwrap();
        assert_eq!(
            form.rhyme_scheme.iter().collect::<String>(),
            "ABABCDCDEFEFGG"
        );
    }
}
