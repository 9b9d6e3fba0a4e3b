use crate::core::models::assembly::AssemblyRequest;
use crate::core::models::library::PartLibrary;
use crate::core::models::transfer::{PickList, TransferPlan};
use crate::engine::config::PlanConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::{self, volumes::PartVolume};
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct PlanResult {
    /// Dispense volume chosen for each distinct part, in order of first request.
    pub part_volumes: Vec<PartVolume>,
    pub plan: TransferPlan,
    pub pick_list: PickList,
}

/// Plans the pick list that assembles every destination of `assembly` from
/// the parts in `library`.
///
/// Nothing is written anywhere; the caller decides what to persist. Each gate
/// aborts the run with every offender it found, and a plan that passes all of
/// them fills each destination to exactly the configured total volume.
#[instrument(skip_all, name = "plan_workflow")]
pub fn run(
    library: &PartLibrary,
    assembly: &AssemblyRequest,
    config: &PlanConfig,
    reporter: &ProgressReporter,
) -> Result<PlanResult, EngineError> {
    info!(
        library_wells = library.len(),
        destinations = assembly.len(),
        "Starting pick-list planning."
    );

    // === Phase 1: Expand the assembly matrix and check part availability ===
    let pairs = reporter.phase("Resolving Parts", || {
        let pairs = tasks::pairs::run(assembly);
        tasks::validation::check_existence(&pairs, library, &config.diluent_name)?;
        Ok::<_, EngineError>(pairs)
    })?;

    // === Phase 2: Part volumes and the per-destination ceiling ===
    let assignment = reporter.phase("Calculating Volumes", || {
        let assignment = tasks::volumes::run(&pairs, library, config)?;
        tasks::validation::check_ceiling(&assignment.transfers, config.target.total_volume_nl)?;
        Ok::<_, EngineError>(assignment)
    })?;
    let part_volumes = assignment.parts;

    // === Phase 3: Diluent fill-up and source inventory ===
    let plan = reporter.phase("Filling Diluent", || {
        let diluent = tasks::diluent::resolve(library, &config.diluent_name)?;
        let plan = tasks::diluent::run(assignment.transfers, &diluent, config)?;
        tasks::validation::check_inventory(plan.records(), library, &diluent, &config.device)?;
        Ok::<_, EngineError>(plan)
    })?;

    // === Phase 4: Emit and verify the pick list ===
    let pick_list = reporter.phase("Emitting Pick List", || {
        let pick_list = tasks::emit::run(&plan, &config.plate);
        tasks::validation::check_consistency(pick_list.rows(), config.target.total_volume_nl)?;
        Ok::<_, EngineError>(pick_list)
    })?;

    reporter.report(Progress::Message(format!(
        "Planned {} transfers for {} destination wells.",
        pick_list.len(),
        assembly.len()
    )));
    info!(
        parts = part_volumes.len(),
        transfers = pick_list.len(),
        "Pick-list planning complete."
    );
    Ok(PlanResult {
        part_volumes,
        plan,
        pick_list,
    })
}
