#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Tools for analysing CRISPR lineage-tracing barcodes.
//!
//! This serves as the core library implementation for the `lintrace` CLI,
//! but can also be used as a free-standing library for working with edited
//! barcode tables.
//!
//! # Overview
//!
//! A [`Barcode`] is an ordered, fixed-length sequence of per-site edit
//! tokens read from sequencing data; the site count is configured by an
//! [`Assay`]. A sample's barcode read counts form a [`CountTable`], which
//! [`CountTable::clean`] normalizes (removing substitution noise) and
//! collapses. Cleaned tables feed per-barcode edit counting ([`edits`]) and
//! pairwise cosine similarity between samples ([`similarity`]).
//!
//! # Example
//!
//! As a very brief introduction to the API, let's parse a noisy barcode and
//! clean it.
//!
//! ```
//! use lintrace_core::{Assay, Barcode};
//!
//! let assay = Assay::new(3);
//! let noisy = Barcode::parse("A&5M2S_NONE_9S", &assay)?;
//!
//! // The lone substitution is discarded, and the composite keeps only
//! // its valid sub-allele
//! assert_eq!(noisy.normalize().to_string(), "A_NONE_NONE");
//! # Ok::<(), lintrace_core::barcode::ParseBarcodeError>(())
//! ```

#[cfg(test)]
#[macro_use]
pub(crate) mod approx;

pub mod assay;
pub use assay::Assay;

pub mod barcode;
pub use barcode::Barcode;

pub mod cohort;
pub use cohort::SampleSheet;

pub mod edits;

pub mod input;
pub use input::Input;

pub mod similarity;
pub use similarity::SimilarityMatrix;

pub mod table;
pub use table::CountTable;

pub mod token;
