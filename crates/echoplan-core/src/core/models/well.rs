use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ALPHABET_LEN: u32 = 26;
const MAX_ROW_LETTERS: usize = 2;

/// Standard SBS microplate layouts supported by the dispenser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PlateFormat {
    #[serde(rename = "96")]
    Wells96,
    #[serde(rename = "384")]
    Wells384,
    #[default]
    #[serde(rename = "1536")]
    Wells1536,
}

impl PlateFormat {
    pub fn rows(&self) -> u32 {
        match self {
            PlateFormat::Wells96 => 8,
            PlateFormat::Wells384 => 16,
            PlateFormat::Wells1536 => 32,
        }
    }

    pub fn columns(&self) -> u32 {
        match self {
            PlateFormat::Wells96 => 12,
            PlateFormat::Wells384 => 24,
            PlateFormat::Wells1536 => 48,
        }
    }

    pub fn well_count(&self) -> u32 {
        self.rows() * self.columns()
    }

    pub fn contains(&self, well: &WellId) -> bool {
        well.row < self.rows() && well.column >= 1 && well.column <= self.columns()
    }
}

impl fmt::Display for PlateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-well", self.well_count())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WellParseError {
    #[error("Well name is empty")]
    Empty,
    #[error("Cannot find a column number in well '{0}'")]
    MissingColumn(String),
    #[error("Cannot find a row letter in well '{0}'")]
    MissingRow(String),
    #[error("Row part of well '{0}' contains a non-letter character")]
    InvalidRow(String),
    #[error("Column part of well '{0}' contains a non-digit character")]
    InvalidColumn(String),
    #[error("Row letters of well '{0}' are out of range (at most two letters)")]
    RowOutOfRange(String),
}

/// A well coordinate: zero-based row index (`A` = 0, `AA` = 26) and one-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WellId {
    row: u32,
    column: u32,
}

impl WellId {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn row_label(&self) -> String {
        row_label(self.row)
    }
}

/// Bijective base-26 label for a zero-based row index (`0` → `A`, `26` → `AA`).
pub fn row_label(mut index: u32) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % ALPHABET_LEN) as u8) as char);
        if index < ALPHABET_LEN {
            break;
        }
        index = index / ALPHABET_LEN - 1;
    }
    letters.iter().rev().collect()
}

fn row_index(letters: &str) -> u32 {
    letters
        .bytes()
        .fold(0, |acc, b| acc * ALPHABET_LEN + u32::from(b - b'A') + 1)
        - 1
}

impl FromStr for WellId {
    type Err = WellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(WellParseError::Empty);
        }

        let split = trimmed
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit())
            .map(|(i, _)| i)
            .ok_or_else(|| WellParseError::MissingColumn(trimmed.to_string()))?;
        let (letters, digits) = trimmed.split_at(split);

        if letters.is_empty() {
            return Err(WellParseError::MissingRow(trimmed.to_string()));
        }
        if !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(WellParseError::InvalidRow(trimmed.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(WellParseError::InvalidColumn(trimmed.to_string()));
        }
        if letters.len() > MAX_ROW_LETTERS {
            return Err(WellParseError::RowOutOfRange(trimmed.to_string()));
        }

        let column: u32 = digits
            .parse()
            .map_err(|_| WellParseError::InvalidColumn(trimmed.to_string()))?;
        if column == 0 {
            return Err(WellParseError::InvalidColumn(trimmed.to_string()));
        }

        Ok(Self {
            row: row_index(&letters.to_ascii_uppercase()),
            column,
        })
    }
}

impl fmt::Display for WellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_label(), self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_and_double_letter_rows() {
        let a1: WellId = "A1".parse().unwrap();
        assert_eq!((a1.row(), a1.column()), (0, 1));

        let p24: WellId = "P24".parse().unwrap();
        assert_eq!((p24.row(), p24.column()), (15, 24));

        let af48: WellId = "AF48".parse().unwrap();
        assert_eq!((af48.row(), af48.column()), (31, 48));
    }

    #[test]
    fn parsing_trims_whitespace_and_ignores_letter_case() {
        let well: WellId = " aa12 ".parse().unwrap();
        assert_eq!(well, WellId::new(26, 12));
        assert_eq!(well.to_string(), "AA12");
    }

    #[test]
    fn rejects_malformed_well_names() {
        assert_eq!("".parse::<WellId>(), Err(WellParseError::Empty));
        assert!(matches!(
            "A".parse::<WellId>(),
            Err(WellParseError::MissingColumn(_))
        ));
        assert!(matches!(
            "1A".parse::<WellId>(),
            Err(WellParseError::MissingRow(_))
        ));
        assert!(matches!(
            "A1B".parse::<WellId>(),
            Err(WellParseError::InvalidColumn(_))
        ));
        assert!(matches!(
            "A-1".parse::<WellId>(),
            Err(WellParseError::InvalidRow(_))
        ));
        assert!(matches!(
            "AAA1".parse::<WellId>(),
            Err(WellParseError::RowOutOfRange(_))
        ));
        assert!(matches!(
            "A0".parse::<WellId>(),
            Err(WellParseError::InvalidColumn(_))
        ));
    }

    #[test]
    fn row_label_round_trips_through_index() {
        for index in [0, 7, 25, 26, 31, 51, 52] {
            let label = row_label(index);
            assert_eq!(row_index(&label), index, "label {label}");
        }
        assert_eq!(row_label(25), "Z");
        assert_eq!(row_label(26), "AA");
        assert_eq!(row_label(31), "AF");
    }

    #[test]
    fn plate_format_bounds_wells() {
        let af48: WellId = "AF48".parse().unwrap();
        let p24: WellId = "P24".parse().unwrap();
        assert!(PlateFormat::Wells1536.contains(&af48));
        assert!(!PlateFormat::Wells384.contains(&af48));
        assert!(PlateFormat::Wells384.contains(&p24));
        assert!(!PlateFormat::Wells96.contains(&p24));
        assert_eq!(PlateFormat::Wells1536.well_count(), 1536);
        assert_eq!(PlateFormat::Wells384.to_string(), "384-well");
    }
}
