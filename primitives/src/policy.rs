//! Policy Constants for the Inheritance Pallet
//!
//! Single source of truth for the distribution budget, share arithmetic and the
//! named units an inactivity threshold can be expressed in.

/// Balance type alias shared by adapters and mocks
pub type Balance = u128;

/// Percentage share held by one beneficiary (1..=100)
pub type SharePercent = u8;

/// Distribution parameters.
pub mod params {
  use super::SharePercent;

  /// Maximum number of elementary transfers a single activation may issue.
  ///
  /// Native and token legs draw from the same budget; candidate assets that do
  /// not fit are left untouched and reported as unprocessed.
  pub const MAX_TRANSFER: u32 = 100;

  /// Shares of a committed registry always sum to this value.
  pub const FULL_SHARE: SharePercent = 100;

  /// Policy type discriminant exposed in metadata.
  pub const POLICY_TYPE_INHERITANCE: u8 = 1;
}

/// Units an inactivity threshold can be counted in.
///
/// A runtime picks one as `ThresholdUnit`; the stored threshold is multiplied
/// by it before comparing against the oracle's last-activity timestamp.
pub mod threshold_units {
  /// Threshold is stored as raw seconds.
  pub const SECONDS: u64 = 1;

  pub const DAY: u64 = 86_400;

  /// Threshold is stored as a number of 30-day periods.
  pub const THIRTY_DAY_PERIOD: u64 = 30 * DAY;
}
