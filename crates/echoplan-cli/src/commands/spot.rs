use super::write_table;
use crate::cli::SpotArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use echoplan::{
    core::io::picklist::PickListFile, engine::progress::ProgressReporter, workflows,
};
use tracing::info;

pub fn run(args: SpotArgs) -> Result<()> {
    let partial_config = PartialConfig::load(args.config.as_deref())?;
    let config = partial_config.merge_spot_args(&args)?;
    info!(
        regions = config.regions.len(),
        plate_format = %config.plate_format,
        "Spotting configuration resolved."
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let result = workflows::spot::run(&config, &reporter)?;
    write_table::<PickListFile>(&result.pick_list, &args.output)?;
    println!(
        "✓ Spotting pick list with {} transfers written to: {}",
        result.pick_list.len(),
        args.output.display()
    );
    Ok(())
}
