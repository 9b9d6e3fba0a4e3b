use super::error::TableError;
use super::is_blank;
use super::traits::TabularFile;
use crate::core::models::assembly::{AssemblyRequest, AssemblyRow};
use std::io::{Read, Write};

const TARGET_WELL_COLUMN: &str = "targwell";
const COMMENT_COLUMN: &str = "comment";

/// The assembly matrix: a `targwell` column plus one column per part role.
///
/// Any column other than `targwell` and `comment` is treated as a role, so
/// sheets with extra roles (e.g. overhang columns) need no code change.
pub struct AssemblyFile;

impl TabularFile for AssemblyFile {
    type Table = AssemblyRequest;

    fn read_from(reader: impl Read) -> Result<AssemblyRequest, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let target_idx = headers
            .iter()
            .position(|h| h == TARGET_WELL_COLUMN)
            .ok_or(TableError::MissingColumn(TARGET_WELL_COLUMN))?;
        let role_columns: Vec<(usize, &str)> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| *h != TARGET_WELL_COLUMN && *h != COMMENT_COLUMN)
            .collect();

        let mut rows = Vec::new();
        for (row_idx, record) in csv_reader.records().enumerate() {
            let record = record?;
            if is_blank(&record) {
                continue;
            }

            let destination = record.get(target_idx).unwrap_or("");
            if destination.is_empty() {
                return Err(TableError::InvalidValue {
                    row: row_idx + 1,
                    column: TARGET_WELL_COLUMN.to_string(),
                    value: String::new(),
                });
            }

            let mut row = AssemblyRow::new(destination);
            for &(col_idx, role) in &role_columns {
                match record.get(col_idx).filter(|v| !v.is_empty()) {
                    Some(part) => row = row.with_part(role, part),
                    None => row = row.with_empty_role(role),
                }
            }
            rows.push(row);
        }

        Ok(AssemblyRequest::new(rows)?)
    }

    fn write_to(table: &AssemblyRequest, writer: impl Write) -> Result<(), TableError> {
        let mut roles: Vec<&str> = Vec::new();
        for row in table.rows() {
            for (role, _) in &row.parts {
                if !roles.contains(&role.as_str()) {
                    roles.push(role.as_str());
                }
            }
        }

        let mut csv_writer = csv::Writer::from_writer(writer);
        let mut header = vec![TARGET_WELL_COLUMN];
        header.extend(roles.iter().copied());
        csv_writer.write_record(&header)?;

        for row in table.rows() {
            let mut record = vec![row.destination.as_str()];
            for role in &roles {
                let part = row
                    .parts
                    .iter()
                    .find(|(r, _)| r.as_str() == *role)
                    .and_then(|(_, p)| p.as_deref())
                    .unwrap_or("");
                record.push(part);
            }
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::assembly::AssemblyError;

    const ASSEMBLY_CSV: &str = "\
targwell,promoter,rbs,cds,terminator,comment
A1,B1,C1,D1,E1,first build
A2,B2,,D1,E1,
,,,,,
";

    #[test]
    fn reads_roles_in_column_order_and_ignores_comment() {
        let request = AssemblyFile::read_from(ASSEMBLY_CSV.as_bytes()).unwrap();
        assert_eq!(request.len(), 2);

        let first = &request.rows()[0];
        assert_eq!(first.destination, "A1");
        let roles: Vec<_> = first.parts.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(roles, ["promoter", "rbs", "cds", "terminator"]);

        let second = &request.rows()[1];
        assert_eq!(second.parts[1], ("rbs".to_string(), None));
        assert_eq!(second.parts[2], ("cds".to_string(), Some("D1".to_string())));
    }

    #[test]
    fn missing_target_well_column_is_reported() {
        let csv = "well,promoter\nA1,B1\n";
        let result = AssemblyFile::read_from(csv.as_bytes());
        assert!(matches!(result, Err(TableError::MissingColumn("targwell"))));
    }

    #[test]
    fn row_without_destination_is_rejected() {
        let csv = "targwell,promoter\nA1,B1\n,B2\n";
        let result = AssemblyFile::read_from(csv.as_bytes());
        assert!(matches!(
            result,
            Err(TableError::InvalidValue { row: 2, .. })
        ));
    }

    #[test]
    fn duplicate_destination_is_rejected() {
        let csv = "targwell,promoter\nA1,B1\nA1,B2\n";
        let result = AssemblyFile::read_from(csv.as_bytes());
        assert!(matches!(
            result,
            Err(TableError::Assembly(AssemblyError::DuplicateDestination(_)))
        ));
    }

    #[test]
    fn writes_matrix_with_union_of_roles() {
        let request = AssemblyRequest::new(vec![
            AssemblyRow::new("A1").with_part("promoter", "B1"),
            AssemblyRow::new("A2")
                .with_empty_role("promoter")
                .with_part("cds", "D1"),
        ])
        .unwrap();

        let mut buffer = Vec::new();
        AssemblyFile::write_to(&request, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "targwell,promoter,cds\nA1,B1,\nA2,,D1\n");
    }
}
