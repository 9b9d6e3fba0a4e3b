use std::collections::HashMap;
use thiserror::Error;

/// Part name reserved for the diluent reservoir unless configured otherwise.
pub const DEFAULT_DILUENT_NAME: &str = "WATER";

/// One source well of the part library plate.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryEntry {
    /// Source well identifier, unique within a library.
    pub well: String,
    /// Part name; the diluent reservoir carries the reserved diluent name.
    pub part: String,
    /// Stock concentration in nanomolar. `None` for the diluent reservoir.
    pub concentration_nm: Option<f64>,
    /// Volume left in the source well, in microliters.
    pub volume_ul: f64,
}

impl LibraryEntry {
    pub fn new(
        well: impl Into<String>,
        part: impl Into<String>,
        concentration_nm: Option<f64>,
        volume_ul: f64,
    ) -> Self {
        Self {
            well: well.into(),
            part: part.into(),
            concentration_nm,
            volume_ul,
        }
    }

    /// Concentration usable for dilution math, i.e. present, finite and positive.
    pub fn usable_concentration(&self) -> Option<f64> {
        self.concentration_nm
            .filter(|c| c.is_finite() && *c > 0.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LibraryError {
    #[error("Source well '{0}' appears more than once in the library")]
    DuplicateWell(String),
}

/// The designated diluent reservoir, resolved once per planning run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiluentWell {
    well: String,
}

impl DiluentWell {
    pub fn well(&self) -> &str {
        &self.well
    }
}

/// An ordered, well-indexed snapshot of the source plate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartLibrary {
    entries: Vec<LibraryEntry>,
    by_well: HashMap<String, usize>,
}

impl PartLibrary {
    pub fn new(entries: Vec<LibraryEntry>) -> Result<Self, LibraryError> {
        let mut by_well = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if by_well.insert(entry.well.clone(), idx).is_some() {
                return Err(LibraryError::DuplicateWell(entry.well.clone()));
            }
        }
        Ok(Self { entries, by_well })
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn by_well(&self, well: &str) -> Option<&LibraryEntry> {
        self.by_well.get(well).map(|&idx| &self.entries[idx])
    }

    /// Resolves an assembly part identifier: source well first, then part name.
    pub fn resolve(&self, identifier: &str) -> Option<&LibraryEntry> {
        self.by_well(identifier)
            .or_else(|| self.entries.iter().find(|e| e.part == identifier))
    }

    /// Looks up the diluent reservoir by its reserved part name.
    pub fn diluent(&self, diluent_name: &str) -> Option<DiluentWell> {
        self.entries
            .iter()
            .find(|e| e.part == diluent_name)
            .map(|e| DiluentWell {
                well: e.well.clone(),
            })
    }

    pub(crate) fn entry_mut(&mut self, well: &str) -> Option<&mut LibraryEntry> {
        let idx = *self.by_well.get(well)?;
        self.entries.get_mut(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_library() -> PartLibrary {
        PartLibrary::new(vec![
            LibraryEntry::new("A1", "pJ23100", Some(120.0), 40.0),
            LibraryEntry::new("A2", "B0034", Some(85.5), 32.0),
            LibraryEntry::new("A10", DEFAULT_DILUENT_NAME, None, 60.0),
        ])
        .unwrap()
    }

    #[test]
    fn new_rejects_duplicate_wells() {
        let result = PartLibrary::new(vec![
            LibraryEntry::new("A1", "x", Some(1.0), 20.0),
            LibraryEntry::new("A1", "y", Some(1.0), 20.0),
        ]);
        assert_eq!(result, Err(LibraryError::DuplicateWell("A1".to_string())));
    }

    #[test]
    fn resolve_prefers_well_then_part_name() {
        let library = sample_library();
        assert_eq!(library.resolve("A2").unwrap().part, "B0034");
        assert_eq!(library.resolve("pJ23100").unwrap().well, "A1");
        assert!(library.resolve("P9").is_none());
    }

    #[test]
    fn diluent_is_found_by_reserved_name() {
        let library = sample_library();
        assert_eq!(library.diluent(DEFAULT_DILUENT_NAME).unwrap().well(), "A10");
        assert!(library.diluent("BUFFER").is_none());
    }

    #[test]
    fn usable_concentration_filters_missing_and_non_positive_values() {
        assert_eq!(
            LibraryEntry::new("A1", "p", Some(50.0), 1.0).usable_concentration(),
            Some(50.0)
        );
        assert_eq!(
            LibraryEntry::new("A1", "p", Some(0.0), 1.0).usable_concentration(),
            None
        );
        assert_eq!(
            LibraryEntry::new("A1", "p", Some(f64::NAN), 1.0).usable_concentration(),
            None
        );
        assert_eq!(LibraryEntry::new("A1", "p", None, 1.0).usable_concentration(), None);
    }
}
