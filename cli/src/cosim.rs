use std::{io, path::PathBuf};

use anyhow::{Context, Error};

use clap::Parser;

use lintrace_core::{
    similarity::{io::write_matrix, Frequencies},
    table::io::read_table_from_path,
    CountTable, SimilarityMatrix,
};

use crate::{assay::AssayArgs, sample_name};

/// Compute a cosine similarity matrix between samples.
///
/// Every table is cleaned, the unedited reference barcode is removed, and
/// samples are compared by the cosine similarity of their barcode-frequency
/// distributions over the union of their edited barcodes. The symmetric
/// matrix is written to stdout with samples named by file stem.
#[derive(Debug, Parser)]
pub struct Cosim {
    /// Input count tables, one per sample.
    #[arg(required = true, value_name = "FILE...")]
    pub inputs: Vec<PathBuf>,

    /// Precision to use when printing similarities.
    #[arg(short = 'p', long, default_value_t = 6, value_name = "INT")]
    pub precision: usize,

    /// Promote per-sample failures to errors.
    ///
    /// By default, a sample that fails to load or has no edited reads is
    /// dropped from the matrix with an error-level log line. Using this flag
    /// will abort on the first failure instead.
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub assay: AssayArgs,
}

impl Cosim {
    pub fn run(self) -> Result<(), Error> {
        let assay = self.assay.resolve();

        let mut samples: Vec<(String, CountTable)> = Vec::with_capacity(self.inputs.len());

        for path in &self.inputs {
            let sample = sample_name(path);

            let result = read_table_from_path(path, &assay)
                .with_context(|| format!("failed to read table from '{}'", path.display()))
                .and_then(|table| {
                    // Validate up front so a degenerate sample is reported
                    // here, with the remaining samples still comparable
                    Frequencies::from_table(&table)?;
                    Ok(table)
                });

            match result {
                Ok(table) => samples.push((sample, table)),
                Err(e) => {
                    if self.strict {
                        return Err(e.context(format!("sample '{sample}'")));
                    }

                    log::error!("dropping sample '{sample}': {e:#}");
                }
            }
        }

        let matrix = SimilarityMatrix::from_tables(&samples)?;

        write_matrix(&mut io::stdout().lock(), &matrix, self.precision)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::tests::parse_subcmd;

    #[test]
    fn test_parse_inputs() {
        let args = parse_subcmd::<Cosim>("lintrace cosim s0.tsv s1.tsv s2.tsv");

        assert_eq!(args.inputs.len(), 3);
        assert_eq!(args.precision, 6);
    }

    #[test]
    fn test_parse_precision() {
        let args = parse_subcmd::<Cosim>("lintrace cosim -p 2 s0.tsv");

        assert_eq!(args.precision, 2);
    }
}
