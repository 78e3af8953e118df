//! Sample sheets mapping samples to experimental conditions.
//!
//! Cohort membership is supplied as explicit configuration rather than
//! derived from naming conventions. A sheet is a tab-separated file with one
//! sample name per line and an optional condition label in a second column.

use std::{fs::File, io, path::Path};

use indexmap::{IndexMap, IndexSet};

/// A mapping from sample names to optional condition labels.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SampleSheet(IndexMap<String, Option<String>>);

impl SampleSheet {
    /// Reads a sample sheet from a path.
    pub fn from_path<P>(path: P) -> io::Result<Self>
    where
        P: AsRef<Path>,
    {
        File::open(path).and_then(Self::from_reader)
    }

    /// Reads a sample sheet from a reader.
    pub fn from_reader<R>(mut reader: R) -> io::Result<Self>
    where
        R: io::Read,
    {
        let mut s = String::new();
        let _ = reader.read_to_string(&mut s)?;

        Ok(Self::from_str(&s))
    }

    fn from_str(s: &str) -> Self {
        s.lines()
            .filter(|line| !line.is_empty())
            .map(|line| match line.split_once('\t') {
                Some((sample, condition)) => (sample, Some(condition)),
                None => (line, None),
            })
            .collect()
    }

    /// Returns the condition label of a sample, if the sample is listed and
    /// labelled.
    pub fn condition_of(&self, sample: &str) -> Option<&str> {
        self.0.get(sample).and_then(Option::as_deref)
    }

    /// Returns `true` if the sample is listed in the sheet.
    pub fn contains(&self, sample: &str) -> bool {
        self.0.contains_key(sample)
    }

    /// Returns an iterator over the sample names in sheet order.
    pub fn samples(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the distinct condition labels in order of first appearance.
    pub fn conditions(&self) -> IndexSet<&str> {
        self.0.values().filter_map(Option::as_deref).collect()
    }

    /// Returns `true` if the sheet lists no samples.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S, C> FromIterator<(S, Option<C>)> for SampleSheet
where
    S: ToString,
    C: ToString,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<C>)>,
    {
        Self(IndexMap::from_iter(iter.into_iter().map(
            |(sample, condition)| {
                (
                    sample.to_string(),
                    condition.map(|condition| condition.to_string()),
                )
            },
        )))
    }
}
