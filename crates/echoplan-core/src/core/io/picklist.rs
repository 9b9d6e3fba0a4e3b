use super::error::TableError;
use super::is_blank;
use super::traits::TabularFile;
use crate::core::models::transfer::{PickList, PickListRow};
use std::io::{Read, Write};

pub const PICK_LIST_COLUMNS: [&str; 10] = [
    "Source Plate Name",
    "Source Plate Type",
    "Source Well",
    "Sample ID",
    "Sample Name",
    "Sample Group",
    "Sample Comment",
    "Destination Plate Name",
    "Destination Well",
    "Transfer Volume",
];

/// The plate-reformat pick list read by the dispenser software.
pub struct PickListFile;

impl TabularFile for PickListFile {
    type Table = PickList;

    fn read_from(reader: impl Read) -> Result<PickList, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        for required in ["Source Well", "Destination Well", "Transfer Volume"] {
            if !headers.iter().any(|h| h == required) {
                return Err(TableError::MissingColumn(required));
            }
        }

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            if is_blank(&record) {
                continue;
            }
            let row: PickListRow = record.deserialize(Some(&headers))?;
            rows.push(row);
        }
        Ok(PickList::new(rows))
    }

    fn write_to(table: &PickList, writer: impl Write) -> Result<(), TableError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(PICK_LIST_COLUMNS)?;
        for row in table.rows() {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(source: &str, destination: &str, volume: u32) -> PickListRow {
        PickListRow {
            source_plate_name: "Source[1]".to_string(),
            source_plate_type: "384PP_AQ_BP".to_string(),
            source_well: source.to_string(),
            destination_plate_name: "Destination[1]".to_string(),
            destination_well: destination.to_string(),
            transfer_volume_nl: volume,
            ..Default::default()
        }
    }

    #[test]
    fn writes_all_device_columns_in_order() {
        let list = PickList::new(vec![row("A1", "B2", 25), row("A10", "B2", 3975)]);
        let mut buffer = Vec::new();
        PickListFile::write_to(&list, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next().unwrap(), PICK_LIST_COLUMNS.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "Source[1],384PP_AQ_BP,A1,,,,,Destination[1],B2,25"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Source[1],384PP_AQ_BP,A10,,,,,Destination[1],B2,3975"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn empty_list_still_has_header() {
        let mut buffer = Vec::new();
        PickListFile::write_to(&PickList::default(), &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap().trim_end(),
            PICK_LIST_COLUMNS.join(",")
        );
    }

    #[test]
    fn reads_back_what_it_writes() {
        let list = PickList::new(vec![row("A1", "B2", 25), row("A10", "B2", 3975)]);
        let mut buffer = Vec::new();
        PickListFile::write_to(&list, &mut buffer).unwrap();

        let reread = PickListFile::read_from(buffer.as_slice()).unwrap();
        assert_eq!(reread, list);
    }

    #[test]
    fn reading_requires_transfer_volume_column() {
        let csv = "Source Well,Destination Well\nA1,B1\n";
        let result = PickListFile::read_from(csv.as_bytes());
        assert!(matches!(
            result,
            Err(TableError::MissingColumn("Transfer Volume"))
        ));
    }
}
