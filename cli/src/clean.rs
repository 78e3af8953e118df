use std::{io, path::PathBuf};

use anyhow::Error;

use clap::Parser;

use lintrace_core::{
    table::io::{read_table_from_input, write_annotated_table, write_table},
    Input,
};

use crate::assay::AssayArgs;

/// Clean a barcode count table.
///
/// Substitution-only site edits are removed as sequencing noise, barcodes
/// that become identical are collapsed by summing their read counts, and the
/// result is written to stdout sorted by count descending.
#[derive(Debug, Parser)]
pub struct Clean {
    /// Input count table.
    ///
    /// The table can be provided here or read from stdin. It must be
    /// tab-separated with 'event' and 'count' columns; gzip-compressed input
    /// is detected automatically.
    #[clap(value_parser, value_name = "PATH")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub assay: AssayArgs,

    /// Append per-row edit annotation columns.
    ///
    /// Adds numIndels, numMultisite, and numTotalEdits columns classifying
    /// each barcode's edits structurally.
    #[arg(long)]
    pub annotate: bool,

    /// Drop the unedited reference barcode row.
    #[arg(long)]
    pub drop_reference: bool,
}

impl Clean {
    pub fn run(self) -> Result<(), Error> {
        let assay = self.assay.resolve();
        let input = Input::new(self.input)?;

        let table = read_table_from_input(&input, &assay)?;

        let mut cleaned = table.clean();
        if self.drop_reference {
            cleaned = cleaned.without_reference();
        }

        let mut stdout = io::stdout().lock();
        if self.annotate {
            write_annotated_table(&mut stdout, &cleaned)?;
        } else {
            write_table(&mut stdout, &cleaned)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::error::ErrorKind as ClapErrorKind;

    use lintrace_core::Assay;

    use crate::tests::{parse_subcmd, try_parse_subcmd};

    #[test]
    fn test_assay_and_sites_conflict() {
        let result = try_parse_subcmd::<Clean>("lintrace clean -a legacy --sites 12 input.tsv");

        assert_eq!(result.unwrap_err().kind(), ClapErrorKind::ArgumentConflict)
    }

    #[test]
    fn test_default_assay() {
        let args = parse_subcmd::<Clean>("lintrace clean input.tsv");

        assert_eq!(args.assay.resolve(), Assay::PRIMARY);
        assert!(!args.annotate);
        assert!(!args.drop_reference);
    }

    #[test]
    fn test_sites_override() {
        let args = parse_subcmd::<Clean>("lintrace clean --sites 3 input.tsv");

        assert_eq!(args.assay.resolve(), Assay::new(3));
    }
}
