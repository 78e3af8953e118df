//! Cosine similarity between edited samples.
//!
//! Samples are compared by their cleaned barcode-frequency distributions.
//! The unedited reference barcode is removed before proportions are taken,
//! so similarity reflects the edited repertoire only.

use std::fmt;

use indexmap::{IndexMap, IndexSet};

use crate::{barcode::Barcode, table::CountTable};

pub mod io;

/// A sample's cleaned barcode-frequency distribution.
///
/// Built from a count table by re-cleaning it (idempotent), removing the
/// reference row, and normalizing counts to proportions of the remaining
/// total.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frequencies(IndexMap<Barcode, f64>);

impl Frequencies {
    /// Builds the frequency distribution of a table.
    pub fn from_table(table: &CountTable) -> Result<Self, SimilarityError> {
        let edited = table.clean().without_reference();
        let total = edited.total_count();

        if total == 0 {
            return Err(SimilarityError::EmptySample);
        }

        Ok(Self(
            edited
                .records()
                .iter()
                .map(|record| (record.event.clone(), record.count as f64 / total as f64))
                .collect(),
        ))
    }

    /// Returns the number of distinct events.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the distribution has no events.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the proportion of an event, or zero if absent.
    pub fn proportion_of(&self, event: &Barcode) -> f64 {
        self.0.get(event).copied().unwrap_or(0.0)
    }
}

/// Computes the cosine similarity between two samples.
///
/// Both tables are aggregated independently, stripped of the reference
/// barcode, and turned into proportion vectors over the union of their
/// distinct events; the result is the normalized dot product, in [0, 1].
pub fn pairwise(a: &CountTable, b: &CountTable) -> Result<f64, SimilarityError> {
    let a = Frequencies::from_table(a)?;
    let b = Frequencies::from_table(b)?;

    cosine(&a, &b)
}

fn cosine(a: &Frequencies, b: &Frequencies) -> Result<f64, SimilarityError> {
    // The union is an insertion-ordered set, so each event maps to one
    // coordinate shared by both vectors with O(1) lookup
    let union = a.0.keys().chain(b.0.keys()).collect::<IndexSet<_>>();

    let vector_of = |frequencies: &Frequencies| {
        union
            .iter()
            .map(|&event| frequencies.proportion_of(event))
            .collect::<Vec<_>>()
    };

    let va = vector_of(a);
    let vb = vector_of(b);

    let dot = va.iter().zip(&vb).map(|(x, y)| x * y).sum::<f64>();
    let magnitude = |v: &[f64]| v.iter().map(|x| x * x).sum::<f64>().sqrt();

    let (ma, mb) = (magnitude(&va), magnitude(&vb));

    if ma == 0.0 || mb == 0.0 {
        Err(SimilarityError::ZeroMagnitude)
    } else {
        Ok(dot / (ma * mb))
    }
}

/// A symmetric sample-by-sample cosine similarity matrix.
///
/// Self-similarity is pinned at exactly 1.0; only the strict upper triangle
/// is computed, then mirrored.
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityMatrix {
    samples: Vec<String>,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Computes the similarity matrix over named sample tables.
    ///
    /// Every sample's frequency distribution is computed once and reused
    /// across pairs. Fails with the offending sample's name if any sample is
    /// degenerate.
    pub fn from_tables(samples: &[(String, CountTable)]) -> Result<Self, MatrixError> {
        let mut names = Vec::with_capacity(samples.len());
        let mut frequencies = Vec::with_capacity(samples.len());

        for (name, table) in samples {
            let sample_frequencies =
                Frequencies::from_table(table).map_err(|source| MatrixError {
                    sample: name.clone(),
                    source,
                })?;

            names.push(name.clone());
            frequencies.push(sample_frequencies);
        }

        let n = names.len();
        let mut values = vec![0.0; n * n];

        for i in 0..n {
            values[i * n + i] = 1.0;

            for j in i + 1..n {
                let value =
                    cosine(&frequencies[i], &frequencies[j]).map_err(|source| MatrixError {
                        sample: names[j].clone(),
                        source,
                    })?;

                values[i * n + j] = value;
                values[j * n + i] = value;
            }
        }

        Ok(Self {
            samples: names,
            values,
        })
    }

    /// Returns the sample names in matrix order.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the matrix has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the similarity between samples `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.len() + j]
    }
}

/// An error associated with computing a pairwise similarity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SimilarityError {
    /// A sample had no reads left after removing the reference barcode.
    EmptySample,
    /// A frequency vector had zero magnitude.
    ZeroMagnitude,
}

impl fmt::Display for SimilarityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityError::EmptySample => {
                f.write_str("sample has no reads left after removing the reference barcode")
            }
            SimilarityError::ZeroMagnitude => {
                f.write_str("cannot compute cosine similarity for a zero-magnitude frequency vector")
            }
        }
    }
}

impl std::error::Error for SimilarityError {}

/// An error associated with computing a similarity matrix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatrixError {
    sample: String,
    source: SimilarityError,
}

impl MatrixError {
    /// Returns the name of the sample that failed.
    pub fn sample(&self) -> &str {
        &self.sample
    }
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let MatrixError { sample, source } = self;
        write!(f, "sample '{sample}': {source}")
    }
}

impl std::error::Error for MatrixError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
