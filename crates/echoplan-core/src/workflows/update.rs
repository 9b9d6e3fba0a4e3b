use crate::core::models::library::PartLibrary;
use crate::core::models::transfer::PickList;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::tasks;
use tracing::{info, instrument};

/// Returns the library as it stands after `pick_list` has been executed.
#[instrument(skip_all, name = "library_update_workflow")]
pub fn run(
    pick_list: &PickList,
    library: &PartLibrary,
    reporter: &ProgressReporter,
) -> Result<PartLibrary, EngineError> {
    info!(
        transfers = pick_list.len(),
        library_wells = library.len(),
        "Applying executed pick list to library stock."
    );
    reporter.phase("Updating Library", || tasks::ledger::run(pick_list, library))
}
