//! Classifying and counting barcode edits.
//!
//! Edits are classified structurally. A token occurring at exactly one site
//! of a barcode is an *indel*; a token recurring identically at several
//! sites is a *multi-site* edit, the signature of an excision spanning those
//! sites rather than of independent deletions.

use std::{
    collections::{HashMap, HashSet},
    fmt,
    str::FromStr,
};

use crate::{
    barcode::Barcode,
    table::CountTable,
    token::{self, ALLELE_JOIN},
};

/// A structural class of barcode edit.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EditKind {
    /// An edit token occurring at exactly one site.
    Indel,
    /// An edit token recurring at more than one site.
    Multisite,
}

impl EditKind {
    /// The recognized kind names.
    pub const VARIANTS: [Self; 2] = [Self::Indel, Self::Multisite];

    fn name(&self) -> &'static str {
        match self {
            EditKind::Indel => "indel",
            EditKind::Multisite => "multisite",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditKind {
    type Err = ParseEditKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::VARIANTS
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParseEditKindError(String::from(s)))
    }
}

/// An error associated with parsing an edit kind name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseEditKindError(String);

impl fmt::Display for ParseEditKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized edit kind '{}', expected 'indel' or 'multisite'",
            self.0
        )
    }
}

impl std::error::Error for ParseEditKindError {}

/// Returns the total number of distinct alleles introduced in a barcode.
///
/// A token repeated at several sites counts once as a distinct edit event,
/// but each sub-allele of a multi-allelic token counts fully, so the result
/// is the number of alleles introduced anywhere in the barcode rather than
/// the number of sites affected.
pub fn total_edits(barcode: &Barcode) -> usize {
    let distinct = barcode
        .tokens()
        .filter(|&t| t != token::NONE)
        .collect::<HashSet<_>>();

    distinct
        .into_iter()
        .map(|t| {
            if token::is_multi_allelic(t) {
                t.split(ALLELE_JOIN).count()
            } else {
                1
            }
        })
        .sum()
}

/// Returns the number of distinct edit tokens of the given kind in a
/// barcode.
///
/// Each distinct non-`NONE` token is classified by the number of sites it
/// occupies: one site makes it an indel, more than one a multi-site edit.
pub fn edits_by_type(barcode: &Barcode, kind: EditKind) -> usize {
    let mut sites_spanned: HashMap<&str, usize> = HashMap::new();

    for t in barcode.tokens().filter(|&t| t != token::NONE) {
        *sites_spanned.entry(t).or_insert(0) += 1;
    }

    sites_spanned
        .values()
        .filter(|&&sites| match kind {
            EditKind::Indel => sites == 1,
            EditKind::Multisite => sites > 1,
        })
        .count()
}

/// The per-row edit annotations.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EditSummary {
    /// Number of distinct single-site edit tokens.
    pub indels: usize,
    /// Number of distinct multi-site edit tokens.
    pub multisite: usize,
    /// Total number of distinct alleles introduced.
    pub total_edits: usize,
}

impl EditSummary {
    /// Summarizes the edits of a barcode.
    pub fn from_barcode(barcode: &Barcode) -> Self {
        Self {
            indels: edits_by_type(barcode, EditKind::Indel),
            multisite: edits_by_type(barcode, EditKind::Multisite),
            total_edits: total_edits(barcode),
        }
    }
}

/// Returns the abundance-weighted fraction of barcode edits that are
/// single-site edits.
///
/// The table is expected to be cleaned with the reference row removed; both
/// are re-applied here so the statistic is insensitive to upstream order.
/// Every remaining row then carries at least one edit, and the result is
/// Σ (indels / total edits) · proportion over rows. Fails if no reads
/// remain.
pub fn single_site_fraction(table: &CountTable) -> Result<f64, EmptySampleError> {
    let edited = table.clean().without_reference();
    let total_count = edited.total_count();

    if total_count == 0 {
        return Err(EmptySampleError);
    }

    Ok(edited
        .records()
        .iter()
        .map(|record| {
            let summary = EditSummary::from_barcode(&record.event);
            let proportion = record.count as f64 / total_count as f64;

            summary.indels as f64 / summary.total_edits as f64 * proportion
        })
        .sum())
}

/// An error associated with a sample containing no edited reads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EmptySampleError;

impl fmt::Display for EmptySampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sample has no reads left after removing the reference barcode")
    }
}

impl std::error::Error for EmptySampleError {}
