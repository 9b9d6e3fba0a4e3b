use crate::core::models::library::{DiluentWell, LibraryEntry, PartLibrary};
use crate::core::models::transfer::{PartTargetPair, PickListRow, TransferRecord};
use crate::engine::config::DeviceConfig;
use crate::engine::error::EngineError;
use crate::engine::utils::aggregate;
use itertools::Itertools;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A requested part matched to its library entry.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedPart<'a> {
    pub identifier: &'a str,
    pub entry: &'a LibraryEntry,
    pub concentration_nm: f64,
}

/// Resolves every distinct requested part against the library.
///
/// Parts are returned in order of first request. Unknown identifiers are
/// reported first, then identifiers that land on the `diluent_name` row, then
/// unusable concentrations. Each error lists all offenders.
pub fn resolve_parts<'a>(
    pairs: &'a [PartTargetPair],
    library: &'a PartLibrary,
    diluent_name: &str,
) -> Result<Vec<ResolvedPart<'a>>, EngineError> {
    let mut missing = Vec::new();
    let mut diluent = Vec::new();
    let mut unusable = Vec::new();
    let mut resolved = Vec::new();

    for identifier in pairs.iter().map(|p| p.part.as_str()).unique() {
        match library.resolve(identifier) {
            None => missing.push(identifier.to_string()),
            // The reservoir's concentration column is ignored, so it never acts as a part.
            Some(entry) if entry.part == diluent_name => diluent.push(identifier.to_string()),
            Some(entry) => match entry.usable_concentration() {
                Some(concentration_nm) => resolved.push(ResolvedPart {
                    identifier,
                    entry,
                    concentration_nm,
                }),
                None => unusable.push(identifier.to_string()),
            },
        }
    }

    if !missing.is_empty() {
        return Err(EngineError::MissingPart { parts: missing });
    }
    if !diluent.is_empty() {
        return Err(EngineError::DiluentAsPart { parts: diluent });
    }
    if !unusable.is_empty() {
        return Err(EngineError::InvalidConcentration { parts: unusable });
    }
    Ok(resolved)
}

#[instrument(skip_all, name = "existence_check")]
pub fn check_existence(
    pairs: &[PartTargetPair],
    library: &PartLibrary,
    diluent_name: &str,
) -> Result<(), EngineError> {
    let resolved = resolve_parts(pairs, library, diluent_name)?;
    debug!(parts = resolved.len(), "All requested parts are in the library.");
    Ok(())
}

/// Fails when any destination would receive more part volume than `limit_nl`.
#[instrument(skip_all, name = "volume_ceiling_check")]
pub fn check_ceiling(part_records: &[TransferRecord], limit_nl: u32) -> Result<(), EngineError> {
    let totals = aggregate::sum_by_destination(part_records);

    #[cfg(not(feature = "parallel"))]
    let iterator = totals.iter();

    #[cfg(feature = "parallel")]
    let iterator = totals.par_iter();

    let wells: Vec<String> = iterator
        .filter(|(_, total)| *total > u64::from(limit_nl))
        .map(|(well, _)| well.clone())
        .collect();

    if wells.is_empty() {
        Ok(())
    } else {
        Err(EngineError::VolumeCeilingExceeded { wells, limit_nl })
    }
}

/// Fails when any source well would drop below the device's required residual.
///
/// Volumes are compared in whole nanoliters so that decimal stock values land
/// exactly on the residual boundary. The diluent reservoir is reported
/// separately from part wells.
#[instrument(skip_all, name = "inventory_check")]
pub fn check_inventory(
    records: &[TransferRecord],
    library: &PartLibrary,
    diluent: &DiluentWell,
    device: &DeviceConfig,
) -> Result<(), EngineError> {
    let required_ul = device.required_residual_ul();
    let required_nl = ul_to_nl(required_ul);
    let mut parts = Vec::new();
    let mut diluent_short = None;

    for (well, total_nl) in aggregate::sum_by_source(records) {
        let drawn_nl = i64::try_from(total_nl).unwrap_or(i64::MAX);
        let sufficient = library.by_well(&well).is_some_and(|entry| {
            ul_to_nl(entry.volume_ul).saturating_sub(drawn_nl) >= required_nl
        });
        if sufficient {
            continue;
        }
        warn!(well = %well, drawn_nl, required_ul, "Source well is short on volume.");
        if well == diluent.well() {
            diluent_short = Some(well);
        } else {
            parts.push(well);
        }
    }

    if parts.is_empty() && diluent_short.is_none() {
        info!("Source inventory is sufficient.");
        Ok(())
    } else {
        Err(EngineError::InsufficientInventory {
            parts,
            diluent: diluent_short,
        })
    }
}

fn ul_to_nl(volume_ul: f64) -> i64 {
    (volume_ul * 1000.0).round() as i64
}

/// Fails unless every destination in the emitted rows sums to `expected_nl`.
#[instrument(skip_all, name = "consistency_check")]
pub fn check_consistency(rows: &[PickListRow], expected_nl: u32) -> Result<(), EngineError> {
    let wells: Vec<String> = aggregate::pick_list_sum_by_destination(rows)
        .into_iter()
        .filter(|(_, total)| *total != u64::from(expected_nl))
        .map(|(well, _)| well)
        .collect();

    if wells.is_empty() {
        Ok(())
    } else {
        Err(EngineError::PlanInconsistency { wells, expected_nl })
    }
}
