use crate::core::models::transfer::{PickList, PickListRow, PlateMetadata, TransferPlan};
use tracing::{debug, instrument};

/// Renders transfers as dispenser rows, one per record, in plan order.
#[instrument(skip_all, name = "pick_list_emission_task")]
pub fn run(plan: &TransferPlan, plate: &PlateMetadata) -> PickList {
    let rows: Vec<PickListRow> = plan
        .records()
        .iter()
        .map(|record| PickListRow {
            source_plate_name: plate.source_plate_name.clone(),
            source_plate_type: plate.source_plate_type.clone(),
            source_well: record.source_well.clone(),
            destination_plate_name: plate.destination_plate_name.clone(),
            destination_well: record.destination.clone(),
            transfer_volume_nl: record.volume_nl,
            ..Default::default()
        })
        .collect();

    debug!(rows = rows.len(), "Pick list rows emitted.");
    PickList::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::transfer::TransferRecord;

    #[test]
    fn one_row_per_record_with_fixed_plate_names() {
        let plan = TransferPlan::new(vec![
            TransferRecord::part("A1", "B2", 25),
            TransferRecord::diluent("A10", "B2", 3975),
        ]);
        let list = run(&plan, &PlateMetadata::default());

        assert_eq!(list.len(), 2);
        let first = &list.rows()[0];
        assert_eq!(first.source_plate_name, "Source[1]");
        assert_eq!(first.source_plate_type, "384PP_AQ_BP");
        assert_eq!(first.destination_plate_name, "Destination[1]");
        assert_eq!(first.source_well, "A1");
        assert_eq!(first.destination_well, "B2");
        assert_eq!(first.transfer_volume_nl, 25);
        assert!(first.sample_id.is_empty() && first.sample_comment.is_empty());
        assert_eq!(list.rows()[1].transfer_volume_nl, 3975);
    }

    #[test]
    fn empty_plan_emits_empty_list() {
        assert!(run(&TransferPlan::default(), &PlateMetadata::default()).is_empty());
    }
}
