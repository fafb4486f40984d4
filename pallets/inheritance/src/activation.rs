//! Inactivity predicate deciding whether a will may be activated.

/// `true` once `threshold` units have elapsed since the wallet's last activity.
///
/// Arithmetic saturates: an overflowing deadline is only reached at `u64::MAX`.
pub fn is_eligible(last_activity: u64, threshold: u64, unit: u64, now: u64) -> bool {
  let deadline = last_activity.saturating_add(threshold.saturating_mul(unit));
  now >= deadline
}
