use crate::engine::config::RoundingMode;

/// Snaps a non-negative raw volume to the nearest multiple of `granularity_nl`.
///
/// Returns 0 when the raw volume is closer to zero than to one step; callers
/// decide how to treat that.
pub fn quantize(raw_nl: f64, granularity_nl: u32, mode: RoundingMode) -> u32 {
    let steps = raw_nl / f64::from(granularity_nl);
    let rounded = match mode {
        RoundingMode::HalfUp => steps.round(),
        RoundingMode::HalfEven => steps.round_ties_even(),
    };
    (rounded.max(0.0) as u32).saturating_mul(granularity_nl)
}
