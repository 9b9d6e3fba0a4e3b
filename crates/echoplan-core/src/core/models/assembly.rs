use std::collections::HashSet;
use thiserror::Error;

/// A single assembly: one destination well and the part requested for each role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyRow {
    pub destination: String,
    /// Role name (e.g. `promoter`, `rbs`, `cds`) paired with the requested part
    /// identifier. `None` or a blank value means the role is unused for this well.
    pub parts: Vec<(String, Option<String>)>,
}

impl AssemblyRow {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            parts: Vec::new(),
        }
    }

    pub fn with_part(mut self, role: impl Into<String>, part: impl Into<String>) -> Self {
        self.parts.push((role.into(), Some(part.into())));
        self
    }

    pub fn with_empty_role(mut self, role: impl Into<String>) -> Self {
        self.parts.push((role.into(), None));
        self
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("Destination well '{0}' is listed more than once in the assembly")]
    DuplicateDestination(String),
}

/// The set of assemblies to build in one run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyRequest {
    rows: Vec<AssemblyRow>,
}

impl AssemblyRequest {
    pub fn new(rows: Vec<AssemblyRow>) -> Result<Self, AssemblyError> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            if !seen.insert(row.destination.as_str()) {
                return Err(AssemblyError::DuplicateDestination(
                    row.destination.clone(),
                ));
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[AssemblyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
