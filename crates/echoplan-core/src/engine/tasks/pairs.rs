use crate::core::models::assembly::AssemblyRequest;
use crate::core::models::transfer::PartTargetPair;
use tracing::{debug, instrument};

/// Flattens the assembly matrix into (part, destination) pairs.
///
/// Pairs follow row order, then role order within a row. Roles with no part,
/// or only whitespace, produce no pair. Identical pairs are kept.
#[instrument(skip_all, name = "pair_expansion_task")]
pub fn run(request: &AssemblyRequest) -> Vec<PartTargetPair> {
    let pairs: Vec<PartTargetPair> = request
        .rows()
        .iter()
        .flat_map(|row| {
            row.parts.iter().filter_map(move |(_, part)| {
                let part = part.as_deref()?.trim();
                (!part.is_empty()).then(|| PartTargetPair {
                    part: part.to_string(),
                    destination: row.destination.clone(),
                })
            })
        })
        .collect();

    debug!(
        destinations = request.len(),
        pairs = pairs.len(),
        "Expanded assembly matrix."
    );
    pairs
}
