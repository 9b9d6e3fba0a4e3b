use crate::core::models::transfer::{TransferKind, TransferPlan, TransferRecord};
use crate::core::models::well::{PlateFormat, WellId};
use crate::engine::config::{SpottingConfig, SpottingRegion};
use crate::engine::error::EngineError;
use itertools::Itertools;
use tracing::{debug, info, instrument};

/// Builds a region from textual corner wells.
pub fn parse_region(
    top_left: &str,
    bottom_right: &str,
    spacing: u32,
    source_well: impl Into<String>,
    volume_nl: u32,
) -> Result<SpottingRegion, EngineError> {
    let parse = |well: &str| {
        well.parse::<WellId>()
            .map_err(|source| EngineError::InvalidWell {
                well: well.to_string(),
                source,
            })
    };
    Ok(SpottingRegion {
        top_left: parse(top_left)?,
        bottom_right: parse(bottom_right)?,
        spacing,
        source_well: source_well.into(),
        volume_nl,
    })
}

fn invalid_region(region: &SpottingRegion, reason: impl Into<String>) -> EngineError {
    EngineError::InvalidRegion {
        top_left: region.top_left.to_string(),
        bottom_right: region.bottom_right.to_string(),
        reason: reason.into(),
    }
}

fn validate(
    region: &SpottingRegion,
    format: PlateFormat,
    granularity_nl: u32,
) -> Result<(), EngineError> {
    for corner in [region.top_left, region.bottom_right] {
        if !format.contains(&corner) {
            return Err(invalid_region(
                region,
                format!("well {} is outside the {} plate", corner, format),
            ));
        }
    }
    if region.bottom_right.row() < region.top_left.row() {
        return Err(invalid_region(
            region,
            "bottom-right well is above the top-left well",
        ));
    }
    if region.bottom_right.column() < region.top_left.column() {
        return Err(invalid_region(
            region,
            "bottom-right well is left of the top-left well",
        ));
    }
    if region.source_well.trim().is_empty() {
        return Err(invalid_region(region, "source well is empty"));
    }
    if region.volume_nl == 0 || region.volume_nl % granularity_nl != 0 {
        return Err(EngineError::InvalidVolume {
            volume_nl: region.volume_nl,
            granularity_nl,
        });
    }
    Ok(())
}

/// Destination wells of a region in row-major order, skipping `spacing` wells
/// between neighbours in both directions.
pub fn region_wells(region: &SpottingRegion) -> Vec<WellId> {
    let step = region.spacing as usize + 1;
    let rows = (region.top_left.row()..=region.bottom_right.row()).step_by(step);
    let columns: Vec<u32> = (region.top_left.column()..=region.bottom_right.column())
        .step_by(step)
        .collect();
    rows.cartesian_product(columns)
        .map(|(row, column)| WellId::new(row, column))
        .collect()
}

/// Plans one spot transfer per selected well of every region, regions in order.
#[instrument(skip_all, name = "spotting_task")]
pub fn run(config: &SpottingConfig) -> Result<TransferPlan, EngineError> {
    let mut plan = TransferPlan::default();
    for region in &config.regions {
        validate(region, config.plate_format, config.granularity_nl)?;
        let wells = region_wells(region);
        debug!(
            top_left = %region.top_left,
            bottom_right = %region.bottom_right,
            spots = wells.len(),
            "Expanded spotting region."
        );
        let source_well = region.source_well.trim();
        plan.extend(wells.into_iter().map(|well| TransferRecord {
            source_well: source_well.to_string(),
            destination: well.to_string(),
            volume_nl: region.volume_nl,
            kind: TransferKind::Spot,
        }));
    }
    info!(
        regions = config.regions.len(),
        spots = plan.len(),
        "Spotting plan built."
    );
    Ok(plan)
}
