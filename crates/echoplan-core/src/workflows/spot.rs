use crate::core::models::transfer::{PickList, TransferPlan};
use crate::engine::config::SpottingConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::tasks;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct SpotResult {
    pub plan: TransferPlan,
    pub pick_list: PickList,
}

/// Plans a spotting pick list that shoots a fixed volume from one source well
/// into a regular grid of destination wells for each region.
#[instrument(skip_all, name = "spot_workflow")]
pub fn run(config: &SpottingConfig, reporter: &ProgressReporter) -> Result<SpotResult, EngineError> {
    info!(
        regions = config.regions.len(),
        plate_format = %config.plate_format,
        "Starting spotting plan."
    );

    let plan = reporter.phase("Expanding Regions", || tasks::spotting::run(config))?;
    let pick_list = reporter.phase("Emitting Pick List", || {
        Ok::<_, EngineError>(tasks::emit::run(&plan, &config.plate))
    })?;

    info!(transfers = pick_list.len(), "Spotting plan complete.");
    Ok(SpotResult { plan, pick_list })
}
