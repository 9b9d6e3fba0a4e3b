use super::config::ConfigError;
use crate::core::models::well::WellParseError;
use itertools::Itertools;
use thiserror::Error;

fn list(items: &[String]) -> String {
    items.iter().map(|s| format!("'{}'", s)).join(", ")
}

fn inventory_message(parts: &[String], diluent: &Option<String>) -> String {
    match (parts.is_empty(), diluent) {
        (true, Some(well)) => format!("The diluent well '{}' does not have enough volume.", well),
        (false, Some(well)) => format!(
            "Part wells {} do not have enough volume. Additionally, diluent well '{}' does not have enough volume.",
            list(parts),
            well
        ),
        (_, None) => format!("Part wells {} do not have enough volume.", list(parts)),
    }
}

/// Failures that abort a planning run. Every variant carries all offenders found
/// by the check that raised it, never just the first.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Requested parts {} are not in the library", list(.parts))]
    MissingPart { parts: Vec<String> },

    #[error("Requested parts {} resolve to the diluent reservoir", list(.parts))]
    DiluentAsPart { parts: Vec<String> },

    #[error("Parts {} have no usable concentration in the library", list(.parts))]
    InvalidConcentration { parts: Vec<String> },

    #[error("No diluent well named '{name}' found in the library")]
    MissingDiluent { name: String },

    #[error(
        "Sum of part volumes into destination wells {} exceeds {limit_nl} nL",
        list(.wells)
    )]
    VolumeCeilingExceeded { wells: Vec<String>, limit_nl: u32 },

    #[error("{}", inventory_message(.parts, .diluent))]
    InsufficientInventory {
        parts: Vec<String>,
        diluent: Option<String>,
    },

    #[error(
        "Destination wells {} would not receive exactly {expected_nl} nL",
        list(.wells)
    )]
    PlanInconsistency { wells: Vec<String>, expected_nl: u32 },

    #[error("Pick list draws from source wells {} that are not in the library", list(.wells))]
    UnknownSourceWell { wells: Vec<String> },

    #[error("Invalid well '{well}': {source}")]
    InvalidWell {
        well: String,
        #[source]
        source: WellParseError,
    },

    #[error("Invalid spotting region {top_left}:{bottom_right}: {reason}")]
    InvalidRegion {
        top_left: String,
        bottom_right: String,
        reason: String,
    },

    #[error("Transfer volume {volume_nl} nL is not a positive multiple of {granularity_nl} nL")]
    InvalidVolume { volume_nl: u32, granularity_nl: u32 },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
