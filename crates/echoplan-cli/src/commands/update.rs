use super::{read_table, write_table};
use crate::cli::UpdateLibraryArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use echoplan::{
    core::io::{library::LibraryFile, picklist::PickListFile},
    engine::progress::ProgressReporter,
    workflows,
};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

pub fn run(args: UpdateLibraryArgs) -> Result<()> {
    info!("Loading part library from {:?}", &args.library);
    let library = read_table::<LibraryFile>(&args.library)?;
    info!("Loading executed pick list from {:?}", &args.pick_list);
    let pick_list = read_table::<PickListFile>(&args.pick_list)?;

    let output = args.output.as_ref().unwrap_or(&args.library);
    if !args.yes {
        let prompt = format!(
            "Subtract {} transfers in {} from the stock in {} and write {}?",
            pick_list.len(),
            args.pick_list.display(),
            args.library.display(),
            output.display()
        );
        if !confirm(&prompt, io::stdin().lock(), io::stdout())? {
            warn!("Library update declined at the prompt.");
            return Err(CliError::Aborted);
        }
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let updated = workflows::update::run(&pick_list, &library, &reporter)?;

    write_table::<LibraryFile>(&updated, output)?;
    println!("✓ Updated library written to: {}", output.display());
    Ok(())
}

/// Asks a yes/no question; anything but `y` or `yes` counts as no.
fn confirm(prompt: &str, mut input: impl BufRead, mut output: impl Write) -> Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
