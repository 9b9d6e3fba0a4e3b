use super::validation;
use crate::core::models::library::PartLibrary;
use crate::core::models::transfer::{PartTargetPair, TransferRecord};
use crate::engine::config::PlanConfig;
use crate::engine::error::EngineError;
use crate::engine::utils::rounding::quantize;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Dispensed volume computed for one distinct part.
#[derive(Debug, Clone, PartialEq)]
pub struct PartVolume {
    pub part: String,
    pub source_well: String,
    pub concentration_nm: f64,
    /// Unrounded volume that would hit the target concentration exactly.
    pub raw_nl: f64,
    pub volume_nl: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolumeAssignment {
    /// One entry per distinct part, in order of first request.
    pub parts: Vec<PartVolume>,
    /// One part transfer per pair, in pair order.
    pub transfers: Vec<TransferRecord>,
}

/// Computes the per-part dispense volume and attaches it to every pair.
///
/// The raw volume `target / stock * total` is snapped to the device
/// granularity. A part that would round to nothing is still dispensed at one
/// granularity step.
#[instrument(skip_all, name = "volume_calculation_task")]
pub fn run(
    pairs: &[PartTargetPair],
    library: &PartLibrary,
    config: &PlanConfig,
) -> Result<VolumeAssignment, EngineError> {
    let granularity_nl = config.device.granularity_nl;
    let target = &config.target;

    let resolved = validation::resolve_parts(pairs, library, &config.diluent_name)?;
    let parts: Vec<PartVolume> = resolved
        .into_iter()
        .map(|part| {
            let raw_nl = target.concentration_nm / part.concentration_nm
                * f64::from(target.total_volume_nl);
            let mut volume_nl = quantize(raw_nl, granularity_nl, config.rounding);
            if volume_nl == 0 {
                warn!(
                    part = part.identifier,
                    raw_nl, "Volume rounds to zero; dispensing one granularity step instead."
                );
                volume_nl = granularity_nl;
            }
            debug!(
                part = part.identifier,
                well = %part.entry.well,
                concentration_nm = part.concentration_nm,
                raw_nl,
                volume_nl,
                "Computed part volume."
            );
            PartVolume {
                part: part.identifier.to_string(),
                source_well: part.entry.well.clone(),
                concentration_nm: part.concentration_nm,
                raw_nl,
                volume_nl,
            }
        })
        .collect();

    let by_part: HashMap<&str, &PartVolume> =
        parts.iter().map(|p| (p.part.as_str(), p)).collect();
    let transfers: Vec<TransferRecord> = pairs
        .iter()
        .filter_map(|pair| {
            by_part.get(pair.part.as_str()).map(|volume| {
                TransferRecord::part(
                    volume.source_well.clone(),
                    pair.destination.clone(),
                    volume.volume_nl,
                )
            })
        })
        .collect();

    info!(
        parts = parts.len(),
        transfers = transfers.len(),
        "Part volumes calculated."
    );
    Ok(VolumeAssignment { parts, transfers })
}
