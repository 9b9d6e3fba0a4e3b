use super::error::TableError;
use super::is_blank;
use super::traits::TabularFile;
use crate::core::models::library::{LibraryEntry, PartLibrary};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Debug, Serialize, Deserialize)]
struct LibraryCsvRow {
    well: String,
    part: String,
    #[serde(rename = "conc (nM)")]
    concentration_nm: Option<f64>,
    #[serde(rename = "Vol (uL) in plate")]
    volume_ul: f64,
}

impl From<LibraryCsvRow> for LibraryEntry {
    fn from(row: LibraryCsvRow) -> Self {
        LibraryEntry::new(row.well, row.part, row.concentration_nm, row.volume_ul)
    }
}

impl From<&LibraryEntry> for LibraryCsvRow {
    fn from(entry: &LibraryEntry) -> Self {
        Self {
            well: entry.well.clone(),
            part: entry.part.clone(),
            concentration_nm: entry.concentration_nm,
            volume_ul: entry.volume_ul,
        }
    }
}

/// The part library sheet: `well`, `part`, `conc (nM)`, `Vol (uL) in plate`.
pub struct LibraryFile;

impl TabularFile for LibraryFile {
    type Table = PartLibrary;

    fn read_from(reader: impl Read) -> Result<PartLibrary, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        for required in ["well", "part", "conc (nM)", "Vol (uL) in plate"] {
            if !headers.iter().any(|h| h == required) {
                return Err(TableError::MissingColumn(required));
            }
        }

        let mut entries = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            if is_blank(&record) {
                continue;
            }
            let row: LibraryCsvRow = record.deserialize(Some(&headers))?;
            entries.push(row.into());
        }
        Ok(PartLibrary::new(entries)?)
    }

    fn write_to(table: &PartLibrary, writer: impl Write) -> Result<(), TableError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for entry in table.entries() {
            csv_writer.serialize(LibraryCsvRow::from(entry))?;
        }
        if table.is_empty() {
            csv_writer.write_record(["well", "part", "conc (nM)", "Vol (uL) in plate"])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::library::LibraryError;
    use tempfile::tempdir;

    const LIBRARY_CSV: &str = "\
well,part,conc (nM),Vol (uL) in plate,notes
A1,pJ23100,120,40,strong promoter
A2,B0034, 85.5 ,32,
,,,,
A10,WATER,,60,reservoir
";

    #[test]
    fn reads_library_and_treats_empty_concentration_as_absent() {
        let library = LibraryFile::read_from(LIBRARY_CSV.as_bytes()).unwrap();
        assert_eq!(library.len(), 3);

        let a2 = library.by_well("A2").unwrap();
        assert_eq!(a2.part, "B0034");
        assert_eq!(a2.concentration_nm, Some(85.5));

        let water = library.by_well("A10").unwrap();
        assert_eq!(water.concentration_nm, None);
        assert_eq!(water.volume_ul, 60.0);
    }

    #[test]
    fn missing_volume_column_is_reported() {
        let csv = "well,part,conc (nM)\nA1,p,10\n";
        let result = LibraryFile::read_from(csv.as_bytes());
        assert!(matches!(
            result,
            Err(TableError::MissingColumn("Vol (uL) in plate"))
        ));
    }

    #[test]
    fn non_numeric_volume_is_a_csv_error() {
        let csv = "well,part,conc (nM),Vol (uL) in plate\nA1,p,10,lots\n";
        let result = LibraryFile::read_from(csv.as_bytes());
        assert!(matches!(result, Err(TableError::Csv(_))));
    }

    #[test]
    fn duplicate_wells_are_rejected() {
        let csv = "well,part,conc (nM),Vol (uL) in plate\nA1,p,10,20\nA1,q,10,20\n";
        let result = LibraryFile::read_from(csv.as_bytes());
        assert!(matches!(
            result,
            Err(TableError::Library(LibraryError::DuplicateWell(_)))
        ));
    }

    #[test]
    fn written_library_can_be_read_back_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.csv");

        let library = LibraryFile::read_from(LIBRARY_CSV.as_bytes()).unwrap();
        LibraryFile::write_to_path(&library, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("well,part,conc (nM),Vol (uL) in plate"));
        assert!(content.contains("A10,WATER,,60.0"));

        let reread = LibraryFile::read_from_path(&path).unwrap();
        assert_eq!(reread, library);
    }
}
