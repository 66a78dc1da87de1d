//! Label normalization for thesaurus lookups.

use unicode_normalization::UnicodeNormalization;

/// Normalize a label into its lookup key.
///
/// Case-folds, collapses every run of internal whitespace to a single space,
/// trims both ends and composes the result to NFC. Final sigma folds to
/// `σ` and `ß` to `ss`, so `ΣΊΣΥΦΟΣ` meets `Σίσυφος` and `STRASSE` meets
/// `Straße`. Applying it twice yields the same key.
///
/// ```
/// use skos_analysis::skos::label::normalize;
///
/// assert_eq!(normalize("  Military\t\nEQUIPMENT "), "military equipment");
/// assert_eq!(normalize("STRASSE"), normalize("Straße"));
/// assert_eq!(normalize(&normalize("Fox")), normalize("Fox"));
/// ```
pub fn normalize(label: &str) -> String {
    let mut folded = String::with_capacity(label.len());
    for word in label.split_whitespace() {
        if !folded.is_empty() {
            folded.push(' ');
        }
        for c in word.chars().flat_map(char::to_lowercase) {
            match c {
                'ς' => folded.push('σ'),
                'ß' => folded.push_str("ss"),
                c => folded.push(c),
            }
        }
    }
    folded.nfc().collect()
}

/// Whether two labels map to the same lookup key.
pub fn same_label(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_case_and_whitespace() {
        assert_eq!(normalize("Fox"), "fox");
        assert_eq!(normalize("United   Nations"), "united nations");
        assert_eq!(normalize("\tunited\u{00A0}nations \n"), "united nations");
        assert_eq!(normalize("ÉPÉE"), "épée");
    }

    #[test]
    fn test_normalize_greek_sigma() {
        assert_eq!(normalize("ΣΊΣΥΦΟΣ"), normalize("Σίσυφος"));
        assert_eq!(normalize("Σίσυφος"), "σίσυφοσ");
    }

    #[test]
    fn test_normalize_sharp_s() {
        assert_eq!(normalize("Straße"), "strasse");
        assert_eq!(normalize("STRASSE"), "strasse");
        assert_eq!(normalize("STRAẞE"), "strasse");
    }

    #[test]
    fn test_normalize_composes_decomposed_input() {
        let composed = "Am\u{00E9}lie";
        let decomposed = "Ame\u{0301}lie";
        assert_ne!(composed, decomposed);
        assert_eq!(normalize(composed), normalize(decomposed));
        assert_eq!(normalize(decomposed), "am\u{00E9}lie");
        assert_eq!(normalize("E\u{0301}PE\u{0301}E"), "épée");
    }

    #[test]
    fn test_normalize_idempotent() {
        for input in ["Fox", "  A  b  C ", "Straße", "ΣΊΣΥΦΟΣ", "Ame\u{0301}lie", "", "   "] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_normalize_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t "), "");
    }

    #[test]
    fn test_same_label() {
        assert!(same_label("Military Equipment", "military  equipment"));
        assert!(!same_label("arms", "weapons"));
    }
}
