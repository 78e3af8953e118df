//! Reading and writing count tables.
//!
//! Tables are tab-separated with a header line. The reader locates the
//! `event` and `count` columns by name, so additional columns are carried
//! by input files without affecting parsing. Gzip-compressed input is
//! detected from its magic bytes and decoded transparently.

use std::{
    fmt, fs,
    io::{self, BufRead, BufReader},
    path::Path,
};

use flate2::bufread::MultiGzDecoder;

use crate::{
    assay::Assay,
    barcode::{Barcode, ParseBarcodeError},
    edits::EditSummary,
    input::{self, Input},
    table::{CountTable, Record},
};

/// The name of the required event column.
pub const EVENT_COLUMN: &str = "event";

/// The name of the required count column.
pub const COUNT_COLUMN: &str = "count";

const GZIP_MAGIC_NUMBER: [u8; 2] = [0x1f, 0x8b];

fn is_gzip<R>(reader: &mut R) -> io::Result<bool>
where
    R: BufRead,
{
    let src = reader.fill_buf()?;

    Ok(src.get(..GZIP_MAGIC_NUMBER.len()) == Some(&GZIP_MAGIC_NUMBER))
}

fn invalid_data(e: ParseTableError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

/// Reads a count table from a reader, decoding gzip if detected.
pub fn read_table<R>(reader: &mut R, assay: &Assay) -> io::Result<CountTable>
where
    R: BufRead,
{
    if is_gzip(reader)? {
        read_plain(&mut BufReader::new(MultiGzDecoder::new(reader)), assay)
    } else {
        read_plain(reader, assay)
    }
}

/// Reads a count table from a path.
pub fn read_table_from_path<P>(path: P, assay: &Assay) -> io::Result<CountTable>
where
    P: AsRef<Path>,
{
    let mut reader = fs::File::open(path).map(BufReader::new)?;

    read_table(&mut reader, assay)
}

/// Reads a count table from a path or stdin.
pub fn read_table_from_input(input: &Input, assay: &Assay) -> io::Result<CountTable> {
    match input.open()? {
        input::Reader::File(mut reader) => read_table(&mut reader, assay),
        input::Reader::Stdin(mut reader) => read_table(&mut reader, assay),
    }
}

fn read_plain<R>(reader: &mut R, assay: &Assay) -> io::Result<CountTable>
where
    R: BufRead,
{
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(header) => header?,
        None => return Err(invalid_data(ParseTableError::Empty)),
    };

    let columns = Columns::from_header(&header).map_err(invalid_data)?;

    let mut records = Vec::new();

    for (index, line) in lines.enumerate() {
        let line = line?;

        if line.is_empty() {
            continue;
        }

        // Header is line 1, so data lines are offset by two
        let record = columns
            .parse_row(&line, index + 2, assay)
            .map_err(invalid_data)?;

        records.push(record);
    }

    Ok(CountTable::new(records))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Columns {
    event: usize,
    count: usize,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self, ParseTableError> {
        let position = |column: &'static str| {
            header
                .split('\t')
                .position(|name| name == column)
                .ok_or(ParseTableError::MissingColumn { column })
        };

        Ok(Self {
            event: position(EVENT_COLUMN)?,
            count: position(COUNT_COLUMN)?,
        })
    }

    fn parse_row(&self, line: &str, number: usize, assay: &Assay) -> Result<Record, ParseTableError> {
        let field = |position: usize, column: &'static str| {
            line.split('\t')
                .nth(position)
                .ok_or(ParseTableError::MissingField { line: number, column })
        };

        let event = Barcode::parse(field(self.event, EVENT_COLUMN)?, assay).map_err(|source| {
            ParseTableError::Barcode {
                line: number,
                source,
            }
        })?;

        let count_field = field(self.count, COUNT_COLUMN)?;
        let count = count_field
            .parse::<u64>()
            .map_err(|_| ParseTableError::Count {
                line: number,
                value: String::from(count_field),
            })?;

        Ok(Record::new(event, count))
    }
}

/// Writes a count table as tab-separated `event` and `count` columns.
pub fn write_table<W>(writer: &mut W, table: &CountTable) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(writer, "{EVENT_COLUMN}\t{COUNT_COLUMN}")?;

    for record in table.records() {
        writeln!(writer, "{}\t{}", record.event, record.count)?;
    }

    Ok(())
}

/// Writes a count table with per-row edit annotation columns appended.
pub fn write_annotated_table<W>(writer: &mut W, table: &CountTable) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        writer,
        "{EVENT_COLUMN}\t{COUNT_COLUMN}\tnumIndels\tnumMultisite\tnumTotalEdits"
    )?;

    for record in table.records() {
        let summary = EditSummary::from_barcode(&record.event);

        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}",
            record.event, record.count, summary.indels, summary.multisite, summary.total_edits
        )?;
    }

    Ok(())
}

/// An error associated with parsing a count table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseTableError {
    /// The input contained no header line.
    Empty,
    /// A required column was missing from the header.
    MissingColumn {
        /// The name of the missing column.
        column: &'static str,
    },
    /// A row had no field under a required column.
    MissingField {
        /// The one-based line number.
        line: usize,
        /// The name of the column.
        column: &'static str,
    },
    /// A count field was not a non-negative integer.
    Count {
        /// The one-based line number.
        line: usize,
        /// The offending field.
        value: String,
    },
    /// An event field was not a valid barcode.
    Barcode {
        /// The one-based line number.
        line: usize,
        /// The underlying barcode error.
        source: ParseBarcodeError,
    },
}

impl fmt::Display for ParseTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTableError::Empty => f.write_str("input table is empty"),
            ParseTableError::MissingColumn { column } => {
                write!(f, "missing required column '{column}' in table header")
            }
            ParseTableError::MissingField { line, column } => {
                write!(f, "missing field for column '{column}' on line {line}")
            }
            ParseTableError::Count { line, value } => {
                write!(f, "failed to parse count '{value}' on line {line}")
            }
            ParseTableError::Barcode { line, source } => {
                write!(f, "invalid barcode on line {line}: {source}")
            }
        }
    }
}

impl std::error::Error for ParseTableError {}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write as _;

    use flate2::{write::GzEncoder, Compression};

    const SRC: &str = "event\tarray\tcount\tproportion\n\
        12D_NONE\tbar\t3\t0.75\n\
        NONE_NONE\tbar\t1\t0.25\n";

    fn assay() -> Assay {
        Assay::new(2)
    }

    fn read_str(s: &str) -> io::Result<CountTable> {
        read_table(&mut s.as_bytes(), &assay())
    }

    #[test]
    fn test_read_locates_columns_by_name() -> io::Result<()> {
        let table = read_str(SRC)?;

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].event.to_string(), "12D_NONE");
        assert_eq!(table.records()[0].count, 3);
        assert_eq!(table.total_count(), 4);

        Ok(())
    }

    #[test]
    fn test_read_minimal_columns() -> io::Result<()> {
        let table = read_str("event\tcount\nNONE_12D\t7\n")?;

        assert_eq!(table.records()[0].count, 7);

        Ok(())
    }

    #[test]
    fn test_read_skips_blank_lines() -> io::Result<()> {
        let table = read_str("event\tcount\nNONE_12D\t7\n\n")?;

        assert_eq!(table.len(), 1);

        Ok(())
    }

    #[test]
    fn test_read_gzip() -> io::Result<()> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(SRC.as_bytes())?;
        let compressed = encoder.finish()?;

        let table = read_table(&mut &compressed[..], &assay())?;

        assert_eq!(table.total_count(), 4);

        Ok(())
    }

    #[test]
    fn test_read_missing_column() {
        let err = read_str("event\treads\nNONE_12D\t7\n").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("'count'"));
    }

    #[test]
    fn test_read_bad_count() {
        let err = read_str("event\tcount\nNONE_12D\tseven\n").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_read_bad_barcode() {
        let err = read_str("event\tcount\nNONE_12D_3I\t7\n").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("sites"));
    }

    #[test]
    fn test_write_round_trip() -> io::Result<()> {
        let table = read_str(SRC)?;

        let mut dest = Vec::new();
        write_table(&mut dest, &table)?;

        assert_eq!(dest, b"event\tcount\n12D_NONE\t3\nNONE_NONE\t1\n");

        Ok(())
    }

    #[test]
    fn test_write_annotated() -> io::Result<()> {
        let table = read_str("event\tcount\n5D_5D\t2\n")?;

        let mut dest = Vec::new();
        write_annotated_table(&mut dest, &table)?;

        assert_eq!(
            dest,
            b"event\tcount\tnumIndels\tnumMultisite\tnumTotalEdits\n5D_5D\t2\t0\t1\t1\n"
        );

        Ok(())
    }
}
