//! Gravity speed-up rule

/// Interval after a lock that cleared `lines` rows
///
/// Each cleared row shaves `step_ms` off the interval, floored at `min_ms`. A lock
/// that clears nothing leaves the interval alone, and the result never exceeds
/// `current_ms`.
pub fn next_interval_ms(current_ms: u32, lines: usize, step_ms: u32, min_ms: u32) -> u32 {
    if lines == 0 {
        return current_ms;
    }
    let lines = u32::try_from(lines).unwrap_or(u32::MAX);
    current_ms
        .saturating_sub(step_ms.saturating_mul(lines))
        .max(min_ms)
        .min(current_ms)
}
