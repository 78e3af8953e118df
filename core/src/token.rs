//! Site-edit tokens.
//!
//! A token records the edit observed at a single barcode site. [`NONE`]
//! marks an unedited site. A token containing the mismatch marker `S`
//! encodes a substitution call, and a token containing the join marker `&`
//! is a multi-allelic composite of several co-occurring alleles.

/// The token marking an unedited site.
pub const NONE: &str = "NONE";

/// The marker identifying a substitution call within a token.
pub const MISMATCH_MARKER: char = 'S';

/// The marker joining the sub-alleles of a multi-allelic token.
pub const ALLELE_JOIN: char = '&';

/// The separator between the site tokens of a serialized barcode.
pub const SITE_SEPARATOR: char = '_';

/// Returns `true` if the token contains a substitution call.
pub fn has_mismatch(token: &str) -> bool {
    token.contains(MISMATCH_MARKER)
}

/// Returns `true` if the token is a multi-allelic composite.
pub fn is_multi_allelic(token: &str) -> bool {
    token.contains(ALLELE_JOIN)
}

/// Removes substitution calls from a single site token.
///
/// Tokens without a mismatch marker pass through unchanged. A plain
/// substitution call is discarded as sequencing noise and becomes [`NONE`].
/// In a multi-allelic token, only the sub-alleles carrying a mismatch are
/// dropped; the survivors are rejoined in their original order. A composite
/// whose every sub-allele is a substitution collapses to [`NONE`].
pub fn remove_substitutions(token: &str) -> String {
    if !has_mismatch(token) {
        return token.to_string();
    }

    if !is_multi_allelic(token) {
        return NONE.to_string();
    }

    let kept = token
        .split(ALLELE_JOIN)
        .filter(|allele| !has_mismatch(allele))
        .collect::<Vec<_>>();

    if kept.is_empty() {
        NONE.to_string()
    } else {
        kept.join(&ALLELE_JOIN.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_mismatch() {
        assert!(has_mismatch("5M2S"));
        assert!(has_mismatch("12D&3S"));
        assert!(!has_mismatch(NONE));
        assert!(!has_mismatch("21I"));
    }

    #[test]
    fn test_is_multi_allelic() {
        assert!(is_multi_allelic("12D&3I"));
        assert!(is_multi_allelic("A&5M2S"));
        assert!(!is_multi_allelic("12D"));
        assert!(!is_multi_allelic(NONE));
    }

    #[test]
    fn test_remove_substitutions_keeps_clean_token() {
        assert_eq!(remove_substitutions("21I"), "21I");
        assert_eq!(remove_substitutions(NONE), NONE);
    }

    #[test]
    fn test_remove_substitutions_discards_plain_mismatch() {
        assert_eq!(remove_substitutions("5M2S"), NONE);
    }

    #[test]
    fn test_remove_substitutions_filters_composite() {
        assert_eq!(remove_substitutions("A&5M2S"), "A");
        assert_eq!(remove_substitutions("5M2S&12D&3S"), "12D");
        assert_eq!(remove_substitutions("12D&3I"), "12D&3I");
    }

    #[test]
    fn test_remove_substitutions_preserves_order() {
        assert_eq!(remove_substitutions("9I&2S&4D"), "9I&4D");
    }

    #[test]
    fn test_remove_substitutions_collapses_empty_composite() {
        assert_eq!(remove_substitutions("2S&5M2S"), NONE);
    }
}
