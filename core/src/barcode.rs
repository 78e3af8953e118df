//! Barcodes and their normalization.

use std::fmt;

use crate::{
    assay::Assay,
    token::{self, SITE_SEPARATOR},
};

/// A lineage barcode: an ordered, fixed-length sequence of site tokens.
///
/// Barcodes are serialized with their tokens joined by `_`. Site order and
/// count are significant and preserved by every operation here.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Barcode {
    tokens: Vec<String>,
}

impl Barcode {
    /// Parses a barcode, checking it against the assay's site count.
    ///
    /// Fails if the serialized form does not split into exactly the
    /// configured number of sites, or if any site token is empty.
    pub fn parse(s: &str, assay: &Assay) -> Result<Self, ParseBarcodeError> {
        let tokens = s
            .split(SITE_SEPARATOR)
            .map(String::from)
            .collect::<Vec<_>>();

        if tokens.len() != assay.sites() {
            return Err(ParseBarcodeError::SiteCount {
                expected: assay.sites(),
                actual: tokens.len(),
            });
        }

        if let Some(site) = tokens.iter().position(String::is_empty) {
            return Err(ParseBarcodeError::EmptyToken { site });
        }

        Ok(Self::from_tokens(tokens))
    }

    pub(crate) fn from_tokens(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Returns the number of sites.
    pub fn sites(&self) -> usize {
        self.tokens.len()
    }

    /// Returns an iterator over the site tokens in order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Returns `true` if any site token contains a substitution call.
    pub fn has_mismatch(&self) -> bool {
        self.tokens().any(token::has_mismatch)
    }

    /// Returns `true` if every site is unedited.
    pub fn is_reference(&self) -> bool {
        self.tokens().all(|t| t == token::NONE)
    }

    /// Removes substitution calls from every site.
    ///
    /// The site count is unchanged, the operation is idempotent, and a
    /// barcode without mismatches is returned as-is. See
    /// [`token::remove_substitutions`] for the per-site rules.
    pub fn normalize(&self) -> Self {
        Self::from_tokens(
            self.tokens()
                .map(token::remove_substitutions)
                .collect::<Vec<_>>(),
        )
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens = self.tokens();

        if let Some(first) = tokens.next() {
            f.write_str(first)?;
        }

        for token in tokens {
            write!(f, "{SITE_SEPARATOR}{token}")?;
        }

        Ok(())
    }
}

/// An error associated with parsing a barcode.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseBarcodeError {
    /// The barcode did not split into the configured number of sites.
    SiteCount {
        /// The assay's site count.
        expected: usize,
        /// The number of sites found.
        actual: usize,
    },
    /// A site token was empty.
    EmptyToken {
        /// The zero-based index of the empty site.
        site: usize,
    },
}

impl fmt::Display for ParseBarcodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseBarcodeError::SiteCount { expected, actual } => write!(
                f,
                "expected barcode with {expected} sites, found {actual} sites"
            ),
            ParseBarcodeError::EmptyToken { site } => {
                write!(f, "empty token at barcode site {site}")
            }
        }
    }
}

impl std::error::Error for ParseBarcodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn barcode(s: &str) -> Barcode {
        let sites = s.split(SITE_SEPARATOR).count();
        Barcode::parse(s, &Assay::new(sites)).expect("failed to parse barcode")
    }

    #[test]
    fn test_parse_site_count_mismatch() {
        assert_eq!(
            Barcode::parse("NONE_12D_NONE", &Assay::new(4)),
            Err(ParseBarcodeError::SiteCount {
                expected: 4,
                actual: 3
            }),
        );
    }

    #[test]
    fn test_parse_empty_token() {
        assert_eq!(
            Barcode::parse("12D__NONE", &Assay::new(3)),
            Err(ParseBarcodeError::EmptyToken { site: 1 }),
        );
    }

    #[test]
    fn test_display_round_trip() {
        let s = "NONE_12D&3I_5M2S";
        assert_eq!(barcode(s).to_string(), s);
    }

    #[test]
    fn test_normalize_plain_mismatch() {
        assert_eq!(
            barcode("NONE_5M2S_NONE").normalize(),
            barcode("NONE_NONE_NONE")
        );
    }

    #[test]
    fn test_normalize_composite() {
        assert_eq!(barcode("A&5M2S_NONE").normalize(), barcode("A_NONE"));
    }

    #[test]
    fn test_normalize_no_op_without_mismatch() {
        let clean = barcode("12D_NONE_12D&3I");
        assert_eq!(clean.normalize(), clean);
    }

    #[test]
    fn test_normalize_idempotent() {
        let noisy = barcode("5M2S_A&2S&B_2S&3S");
        let normalized = noisy.normalize();

        assert_eq!(normalized.normalize(), normalized);
    }

    #[test]
    fn test_normalize_preserves_site_count() {
        let noisy = barcode("5M2S_2S&3S_12D");
        assert_eq!(noisy.normalize().sites(), noisy.sites());
    }

    #[test]
    fn test_normalize_all_mismatch_composite() {
        assert_eq!(barcode("2S&3S_12D").normalize(), barcode("NONE_12D"));
    }

    #[test]
    fn test_is_reference() {
        assert!(barcode("NONE_NONE").is_reference());
        assert!(!barcode("NONE_12D").is_reference());
    }
}
