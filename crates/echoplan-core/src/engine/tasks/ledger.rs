use crate::core::models::library::PartLibrary;
use crate::core::models::transfer::PickList;
use crate::engine::error::EngineError;
use crate::engine::utils::aggregate;
use tracing::{info, instrument, warn};

/// Subtracts an executed pick list from the library stock.
///
/// Returns an updated copy; the input library is left untouched. Every source
/// well in the pick list must exist in the library. Applying the same list
/// twice subtracts twice.
#[instrument(skip_all, name = "ledger_update_task")]
pub fn run(pick_list: &PickList, library: &PartLibrary) -> Result<PartLibrary, EngineError> {
    let drawn = aggregate::pick_list_sum_by_source(pick_list.rows());

    let unknown: Vec<String> = drawn
        .iter()
        .filter(|(well, _)| library.by_well(well).is_none())
        .map(|(well, _)| well.clone())
        .collect();
    if !unknown.is_empty() {
        return Err(EngineError::UnknownSourceWell { wells: unknown });
    }

    let mut updated = library.clone();
    for (well, total_nl) in &drawn {
        let Some(entry) = updated.entry_mut(well) else {
            continue;
        };
        entry.volume_ul -= *total_nl as f64 / 1000.0;
        if entry.volume_ul < 0.0 {
            warn!(
                well = %well,
                volume_ul = entry.volume_ul,
                "Source well stock went negative."
            );
        }
    }

    info!(wells = drawn.len(), "Library stock updated.");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::library::LibraryEntry;
    use crate::core::models::transfer::PickListRow;

    fn row(source: &str, destination: &str, volume_nl: u32) -> PickListRow {
        PickListRow {
            source_well: source.to_string(),
            destination_well: destination.to_string(),
            transfer_volume_nl: volume_nl,
            ..Default::default()
        }
    }

    fn library() -> PartLibrary {
        PartLibrary::new(vec![
            LibraryEntry::new("A1", "P1", Some(500.0), 100.0),
            LibraryEntry::new("A2", "P2", Some(250.0), 1.0),
            LibraryEntry::new("A10", "WATER", None, 100.0),
        ])
        .unwrap()
    }

    #[test]
    fn subtracts_drawn_volume_per_source_well() {
        let list = PickList::new(vec![
            row("A1", "B1", 25),
            row("A1", "B2", 25),
            row("A10", "B1", 3975),
        ]);
        let updated = run(&list, &library()).unwrap();

        assert!((updated.by_well("A1").unwrap().volume_ul - 99.95).abs() < 1e-9);
        assert!((updated.by_well("A10").unwrap().volume_ul - 96.025).abs() < 1e-9);
        assert_eq!(updated.by_well("A2").unwrap().volume_ul, 1.0);
    }

    #[test]
    fn input_library_is_not_modified() {
        let lib = library();
        let _ = run(&PickList::new(vec![row("A1", "B1", 1000)]), &lib).unwrap();
        assert_eq!(lib.by_well("A1").unwrap().volume_ul, 100.0);
    }

    #[test]
    fn stock_may_go_negative() {
        let updated = run(&PickList::new(vec![row("A2", "B1", 2000)]), &library()).unwrap();
        assert!((updated.by_well("A2").unwrap().volume_ul + 1.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_source_wells_are_all_reported() {
        let list = PickList::new(vec![
            row("Z1", "B1", 25),
            row("A1", "B1", 25),
            row("Z2", "B1", 25),
        ]);
        assert_eq!(
            run(&list, &library()),
            Err(EngineError::UnknownSourceWell {
                wells: vec!["Z1".to_string(), "Z2".to_string()]
            })
        );
    }
}
