use crate::core::models::assembly::AssemblyError;
use crate::core::models::library::LibraryError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Required column '{0}' is missing from the header")]
    MissingColumn(&'static str),
    #[error("Invalid value in row {row}, column '{column}': '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    #[error(transparent)]
    Library(#[from] LibraryError),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}
