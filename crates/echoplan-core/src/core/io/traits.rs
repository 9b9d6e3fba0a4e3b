use super::error::TableError;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Defines the interface for reading and writing one kind of lab table.
///
/// Implementors handle the column layout of a specific sheet and convert
/// between CSV text and the typed value the planning engine works with.
pub trait TabularFile {
    /// The typed table this file format maps to.
    type Table;

    /// Reads a table from any reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV is malformed, a required column is missing,
    /// or a value cannot be interpreted.
    fn read_from(reader: impl Read) -> Result<Self::Table, TableError>;

    /// Writes a table, including its header row, to any writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    fn write_to(table: &Self::Table, writer: impl Write) -> Result<(), TableError>;

    /// Reads a table from a file path.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Table, TableError> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    /// Writes a table to a file path, replacing any existing file.
    fn write_to_path<P: AsRef<Path>>(table: &Self::Table, path: P) -> Result<(), TableError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(table, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
