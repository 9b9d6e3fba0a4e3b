use crate::error::{CliError, Result};
use echoplan::core::io::traits::TabularFile;
use std::path::Path;

pub mod plan;
pub mod spot;
pub mod update;

fn read_table<F: TabularFile>(path: &Path) -> Result<F::Table> {
    F::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn write_table<F: TabularFile>(table: &F::Table, path: &Path) -> Result<()> {
    F::write_to_path(table, path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}
