//! Input and registry-value normalization.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Keep ASCII digits only (`"11.222.333/0001-81"` becomes `"11222333000181"`).
#[must_use]
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Canonical form of a registry status label: decomposed, accents
/// stripped, upper-cased and trimmed (`" Ativa "` and `"ATIV\u{c1}"` compare
/// as `"ATIVA"`).
#[must_use]
pub fn fold_status(status: &str) -> String {
    status
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
        .trim()
        .to_owned()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_digits() {
        assert_eq!(digits_only("11.222.333/0001-81"), "11222333000181");
        assert_eq!(digits_only("01310-100"), "01310100");
        assert_eq!(digits_only("abc"), "");
        assert_eq!(digits_only("\u{661}\u{662}3"), "3");
    }

    #[test]
    fn folds_accents_case_and_whitespace() {
        assert_eq!(fold_status(" ativa "), "ATIVA");
        assert_eq!(fold_status("Ativ\u{e1}"), "ATIVA");
        assert_eq!(fold_status("Inapta"), "INAPTA");
        assert_eq!(fold_status("BAIXADA"), "BAIXADA");
        assert_eq!(fold_status(""), "");
    }
}
