use crate::core::models::transfer::{PickListRow, TransferRecord};
use std::collections::HashMap;

/// Sums volumes per key, keeping keys in order of first appearance.
pub fn sum_by<'a>(items: impl IntoIterator<Item = (&'a str, u32)>) -> Vec<(String, u64)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut totals: Vec<(String, u64)> = Vec::new();
    for (key, volume) in items {
        match index.get(key) {
            Some(&idx) => totals[idx].1 += u64::from(volume),
            None => {
                index.insert(key, totals.len());
                totals.push((key.to_string(), u64::from(volume)));
            }
        }
    }
    totals
}

pub fn sum_by_destination(records: &[TransferRecord]) -> Vec<(String, u64)> {
    sum_by(
        records
            .iter()
            .map(|r| (r.destination.as_str(), r.volume_nl)),
    )
}

pub fn sum_by_source(records: &[TransferRecord]) -> Vec<(String, u64)> {
    sum_by(
        records
            .iter()
            .map(|r| (r.source_well.as_str(), r.volume_nl)),
    )
}

pub fn pick_list_sum_by_destination(rows: &[PickListRow]) -> Vec<(String, u64)> {
    sum_by(
        rows.iter()
            .map(|r| (r.destination_well.as_str(), r.transfer_volume_nl)),
    )
}

pub fn pick_list_sum_by_source(rows: &[PickListRow]) -> Vec<(String, u64)> {
    sum_by(
        rows.iter()
            .map(|r| (r.source_well.as_str(), r.transfer_volume_nl)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_are_grouped_in_first_appearance_order() {
        let records = vec![
            TransferRecord::part("A1", "B2", 25),
            TransferRecord::part("A2", "B1", 50),
            TransferRecord::part("A1", "B1", 75),
            TransferRecord::diluent("A10", "B2", 3975),
        ];

        assert_eq!(
            sum_by_destination(&records),
            vec![("B2".to_string(), 4000), ("B1".to_string(), 125)]
        );
        assert_eq!(
            sum_by_source(&records),
            vec![
                ("A1".to_string(), 100),
                ("A2".to_string(), 50),
                ("A10".to_string(), 3975)
            ]
        );
    }

    #[test]
    fn totals_do_not_overflow_u32() {
        let totals = sum_by([("A1", u32::MAX), ("A1", u32::MAX)]);
        assert_eq!(totals[0].1, 2 * u64::from(u32::MAX));
    }

    #[test]
    fn empty_input_yields_no_totals() {
        assert!(sum_by_destination(&[]).is_empty());
    }
}
