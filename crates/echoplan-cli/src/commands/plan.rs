use super::{read_table, write_table};
use crate::cli::PlanArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use echoplan::{
    core::io::{assembly::AssemblyFile, library::LibraryFile, picklist::PickListFile},
    engine::progress::ProgressReporter,
    workflows,
};
use tracing::{debug, info};

pub fn run(args: PlanArgs) -> Result<()> {
    let partial_config = PartialConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_plan_args(&args)?;
    debug!(?config, "Final planning configuration.");

    info!("Loading part library from {:?}", &args.library);
    let library = read_table::<LibraryFile>(&args.library)?;
    info!("Loading assembly matrix from {:?}", &args.assembly);
    let assembly = read_table::<AssemblyFile>(&args.assembly)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Planning {} assemblies from {} library wells...",
        assembly.len(),
        library.len()
    );
    let result = workflows::plan::run(&library, &assembly, &config, &reporter)?;

    for part in &result.part_volumes {
        info!(
            part = %part.part,
            well = %part.source_well,
            concentration_nm = part.concentration_nm,
            volume_nl = part.volume_nl,
            "Part volume."
        );
    }

    write_table::<PickListFile>(&result.pick_list, &args.output)?;
    println!(
        "✓ Pick list with {} transfers written to: {}",
        result.pick_list.len(),
        args.output.display()
    );
    Ok(())
}
