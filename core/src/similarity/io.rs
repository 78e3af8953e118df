//! Writing similarity matrices.
//!
//! A matrix is written as tab-separated text with a `sample` header column,
//! the sample names across the top, and one labelled row per sample.

use std::io;

use super::SimilarityMatrix;

/// Writes a similarity matrix in text format to a writer.
pub fn write_matrix<W>(
    writer: &mut W,
    matrix: &SimilarityMatrix,
    precision: usize,
) -> io::Result<()>
where
    W: io::Write,
{
    writer.write_all(b"sample")?;
    for sample in matrix.samples() {
        write!(writer, "\t{sample}")?;
    }
    writeln!(writer)?;

    for (i, sample) in matrix.samples().iter().enumerate() {
        write!(writer, "{sample}")?;

        for j in 0..matrix.len() {
            write!(writer, "\t{:.precision$}", matrix.get(i, j))?;
        }

        writeln!(writer)?;
    }

    Ok(())
}
