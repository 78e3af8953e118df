//! Assay configuration.

use crate::{barcode::Barcode, token};

/// The parameters of a barcode assay.
///
/// The site count is fixed per assay and never changes under normalization.
/// It is supplied as configuration rather than hardcoded at call sites, so
/// that tables from different recorder designs can flow through the same
/// pipeline.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Assay {
    sites: usize,
}

impl Assay {
    /// The primary recorder design with fifteen target sites.
    pub const PRIMARY: Self = Self { sites: 15 };

    /// The legacy published recorder design with ten target sites.
    pub const LEGACY: Self = Self { sites: 10 };

    /// Creates an assay with a custom number of sites.
    pub fn new(sites: usize) -> Self {
        Self { sites }
    }

    /// Returns the number of sites in a barcode of this assay.
    pub fn sites(&self) -> usize {
        self.sites
    }

    /// Returns the unedited reference barcode for this assay.
    pub fn reference(&self) -> Barcode {
        Barcode::from_tokens(vec![token::NONE.to_string(); self.sites])
    }
}
