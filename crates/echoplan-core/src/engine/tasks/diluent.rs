use crate::core::models::library::{DiluentWell, PartLibrary};
use crate::core::models::transfer::{TransferPlan, TransferRecord};
use crate::engine::config::PlanConfig;
use crate::engine::error::EngineError;
use crate::engine::utils::{aggregate, rounding::quantize};
use tracing::{info, instrument};

/// Finds the diluent reservoir, failing if the library has none.
pub fn resolve(library: &PartLibrary, diluent_name: &str) -> Result<DiluentWell, EngineError> {
    library
        .diluent(diluent_name)
        .ok_or_else(|| EngineError::MissingDiluent {
            name: diluent_name.to_string(),
        })
}

/// Appends one diluent top-up per under-filled destination.
///
/// Part records keep their order; diluent records follow in order of each
/// destination's first appearance. Destinations already at the target total
/// receive nothing.
#[instrument(skip_all, name = "diluent_fill_task")]
pub fn run(
    part_records: Vec<TransferRecord>,
    diluent: &DiluentWell,
    config: &PlanConfig,
) -> Result<TransferPlan, EngineError> {
    let total_nl = config.target.total_volume_nl;
    let totals = aggregate::sum_by_destination(&part_records);

    let overfilled: Vec<String> = totals
        .iter()
        .filter(|(_, sum)| *sum > u64::from(total_nl))
        .map(|(well, _)| well.clone())
        .collect();
    if !overfilled.is_empty() {
        return Err(EngineError::VolumeCeilingExceeded {
            wells: overfilled,
            limit_nl: total_nl,
        });
    }

    let fills: Vec<TransferRecord> = totals
        .into_iter()
        .filter_map(|(destination, sum)| {
            let missing_nl = (u64::from(total_nl) - sum) as f64;
            let volume_nl = quantize(missing_nl, config.device.granularity_nl, config.rounding);
            (volume_nl > 0).then(|| TransferRecord::diluent(diluent.well(), destination, volume_nl))
        })
        .collect();

    info!(
        diluent_well = diluent.well(),
        fills = fills.len(),
        "Diluent top-ups planned."
    );

    let mut plan = TransferPlan::new(part_records);
    plan.extend(fills);
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::library::LibraryEntry;
    use crate::core::models::transfer::TransferKind;

    fn diluent() -> DiluentWell {
        PartLibrary::new(vec![LibraryEntry::new("A10", "WATER", None, 100.0)])
            .unwrap()
            .diluent("WATER")
            .unwrap()
    }

    #[test]
    fn resolve_reports_missing_reservoir() {
        let lib = PartLibrary::new(vec![LibraryEntry::new("A1", "P1", Some(500.0), 100.0)]).unwrap();
        assert_eq!(
            resolve(&lib, "WATER"),
            Err(EngineError::MissingDiluent {
                name: "WATER".to_string()
            })
        );
    }

    #[test]
    fn tops_up_each_destination_once() {
        let parts = vec![
            TransferRecord::part("A1", "B2", 25),
            TransferRecord::part("A2", "B1", 100),
            TransferRecord::part("A3", "B2", 75),
        ];
        let plan = run(parts.clone(), &diluent(), &PlanConfig::default()).unwrap();

        assert_eq!(&plan.records()[..3], parts.as_slice());
        assert_eq!(
            &plan.records()[3..],
            &[
                TransferRecord::diluent("A10", "B2", 3900),
                TransferRecord::diluent("A10", "B1", 3900),
            ]
        );
    }

    #[test]
    fn full_destinations_receive_no_diluent() {
        let parts = vec![TransferRecord::part("A1", "B1", 4000)];
        let plan = run(parts, &diluent(), &PlanConfig::default()).unwrap();
        assert_eq!(plan.len(), 1);
        assert!(plan.records().iter().all(|r| r.kind == TransferKind::Part));
    }

    #[test]
    fn overfilled_destinations_are_rejected() {
        let parts = vec![TransferRecord::part("A1", "B1", 4100)];
        assert!(matches!(
            run(parts, &diluent(), &PlanConfig::default()),
            Err(EngineError::VolumeCeilingExceeded { .. })
        ));
    }
}
