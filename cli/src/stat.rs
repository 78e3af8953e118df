use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Error};

use clap::Parser;

use lintrace_core::{edits, table::io::read_table_from_path, Assay, SampleSheet};

use crate::{assay::AssayArgs, sample_name};

/// Summarize per-sample edit statistics.
///
/// For each input table, reports the number of distinct edited barcodes, the
/// reads supporting them, and the abundance-weighted fraction of edits that
/// are single-site edits. One row is written per sample.
#[derive(Debug, Parser)]
pub struct Stat {
    /// Input count tables, one per sample.
    ///
    /// Samples are named by file stem, so 'data/Lba1.allReadCounts' becomes
    /// sample 'Lba1'.
    #[arg(required = true, value_name = "FILE...")]
    pub inputs: Vec<PathBuf>,

    /// Samples file.
    ///
    /// Tab-separated file with one sample name per line and an optional
    /// condition label in a second column. When provided, a condition column
    /// is included in the output; samples without a label show '-'.
    #[arg(short = 'S', long, value_name = "FILE")]
    pub samples_file: Option<PathBuf>,

    /// Precision to use when printing the single-site fraction.
    #[arg(short = 'p', long, default_value_t = 6, value_name = "INT")]
    pub precision: usize,

    /// Promote per-sample failures to errors.
    ///
    /// By default, a sample that fails to load or summarize is skipped with
    /// an error-level log line and the remaining samples are still
    /// processed. Using this flag will abort on the first failure instead.
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub assay: AssayArgs,
}

struct Summary {
    barcodes: usize,
    reads: u64,
    single_site_fraction: f64,
}

fn summarize(path: &Path, assay: &Assay) -> Result<Summary, Error> {
    let table = read_table_from_path(path, assay)
        .with_context(|| format!("failed to read table from '{}'", path.display()))?;

    let edited = table.clean().without_reference();
    let single_site_fraction = edits::single_site_fraction(&edited)?;

    Ok(Summary {
        barcodes: edited.len(),
        reads: edited.total_count(),
        single_site_fraction,
    })
}

impl Stat {
    pub fn run(self) -> Result<(), Error> {
        let assay = self.assay.resolve();

        let sheet = match &self.samples_file {
            Some(path) => Some(SampleSheet::from_path(path).with_context(|| {
                format!("failed to read samples file '{}'", path.display())
            })?),
            None => None,
        };

        let mut stdout = io::stdout().lock();

        match &sheet {
            Some(_) => writeln!(
                stdout,
                "sample\tcondition\tbarcodes\treads\tsingleSiteFraction"
            )?,
            None => writeln!(stdout, "sample\tbarcodes\treads\tsingleSiteFraction")?,
        }

        for path in &self.inputs {
            let sample = sample_name(path);

            let summary = match summarize(path, &assay) {
                Ok(summary) => summary,
                Err(e) => {
                    if self.strict {
                        return Err(e.context(format!("sample '{sample}'")));
                    }

                    log::error!("skipping sample '{sample}': {e:#}");
                    continue;
                }
            };

            let Summary {
                barcodes,
                reads,
                single_site_fraction,
            } = summary;
            let precision = self.precision;

            match &sheet {
                Some(sheet) => {
                    let condition = sheet.condition_of(&sample).unwrap_or("-");

                    writeln!(
                        stdout,
                        "{sample}\t{condition}\t{barcodes}\t{reads}\t{single_site_fraction:.precision$}"
                    )?
                }
                None => writeln!(
                    stdout,
                    "{sample}\t{barcodes}\t{reads}\t{single_site_fraction:.precision$}"
                )?,
            }
        }

        Ok(())
    }
}
