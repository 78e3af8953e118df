use std::num::NonZeroUsize;

use clap::{Args, ValueEnum};

use lintrace_core::Assay;

/// Assay selection flags shared by the subcommands.
#[derive(Args, Clone, Copy, Debug, Eq, PartialEq)]
pub struct AssayArgs {
    /// Barcode assay determining the number of sites.
    #[arg(
        short = 'a',
        long,
        value_enum,
        default_value_t = AssayName::Primary,
        value_name = "ASSAY",
        conflicts_with = "sites"
    )]
    pub assay: AssayName,

    /// Number of barcode sites, overriding the named assay.
    #[arg(long, value_name = "INT")]
    pub sites: Option<NonZeroUsize>,
}

impl AssayArgs {
    pub fn resolve(&self) -> Assay {
        match self.sites {
            Some(sites) => Assay::new(sites.get()),
            None => self.assay.into(),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum AssayName {
    /// The fifteen-site recorder.
    Primary,
    /// The ten-site recorder of the published legacy data.
    Legacy,
}

impl From<AssayName> for Assay {
    fn from(name: AssayName) -> Self {
        match name {
            AssayName::Primary => Assay::PRIMARY,
            AssayName::Legacy => Assay::LEGACY,
        }
    }
}
