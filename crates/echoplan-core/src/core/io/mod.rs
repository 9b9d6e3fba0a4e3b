//! Reading and writing the CSV tables exchanged with the lab.
//!
//! The planning engine consumes typed values only; this module is the bridge
//! between those values and the sheets people edit by hand (part library,
//! assembly matrix) or feed to the dispenser software (pick list). All readers
//! and writers share the [`traits::TabularFile`] interface.

pub mod assembly;
pub mod error;
pub mod library;
pub mod picklist;
pub mod traits;

fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}
