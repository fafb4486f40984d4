//! Apportionment Engine
//!
//! Turns a balance snapshot and a share table into transfer instructions,
//! bounded by a fixed per-activation transfer budget.
//!
//! Budget rules:
//! - the native leg costs one unit per beneficiary and is only taken when the
//!   whole leg fits;
//! - every candidate asset costs one unit per beneficiary, and only a prefix of
//!   the candidate list (in caller order) that fits completely is processed;
//! - amounts are `floor(balance * share / 100)`, the remainder stays in the
//!   wallet.

use crate::types::{TransferInstruction, ZeroAmountPolicy};
use alloc::vec::Vec;
use frame::deps::sp_runtime::Percent;
use primitives::{AssetKind, Balance, SharePercent};

/// Result of one apportionment pass.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Apportionment<AccountId> {
  pub native_distributed: bool,
  /// Candidate assets that were split, in caller order.
  pub processed_assets: Vec<AssetKind>,
  pub instructions: Vec<TransferInstruction<AccountId>>,
}

impl<AccountId> Apportionment<AccountId> {
  fn empty() -> Self {
    Self {
      native_distributed: false,
      processed_assets: Vec::new(),
      instructions: Vec::new(),
    }
  }
}

/// Number of candidate assets that fit into what is left of `budget`.
pub fn assets_within_budget(
  beneficiaries: u32,
  candidates: u32,
  native_leg: bool,
  budget: u32,
) -> u32 {
  if beneficiaries == 0 {
    return 0;
  }
  let consumed = if native_leg && beneficiaries <= budget {
    beneficiaries
  } else {
    0
  };
  candidates.min((budget - consumed) / beneficiaries)
}

/// `floor(balance * share / 100)`.
pub fn share_amount(balance: Balance, share: SharePercent) -> Balance {
  Percent::from_percent(share).mul_floor(balance)
}

/// Split the native balance and a prefix of `candidate_assets` across `snapshot`.
///
/// `asset_balance` is called exactly once for every processed asset and never
/// for the ones left out.
pub fn apportion<AccountId, F>(
  native_balance: Balance,
  candidate_assets: &[AssetKind],
  mut asset_balance: F,
  snapshot: &[(AccountId, SharePercent)],
  include_native: bool,
  zero_amounts: ZeroAmountPolicy,
  budget: u32,
) -> Apportionment<AccountId>
where
  AccountId: Clone,
  F: FnMut(AssetKind) -> Balance,
{
  let mut outcome = Apportionment::empty();
  let beneficiaries = snapshot.len() as u32;
  if beneficiaries == 0 {
    return outcome;
  }

  let native_leg = include_native && native_balance > 0 && beneficiaries <= budget;
  if native_leg {
    split(
      &mut outcome.instructions,
      AssetKind::Native,
      native_balance,
      snapshot,
      zero_amounts,
    );
    outcome.native_distributed = true;
  }

  let fits = assets_within_budget(
    beneficiaries,
    candidate_assets.len() as u32,
    native_leg,
    budget,
  );
  for asset in candidate_assets.iter().take(fits as usize) {
    let balance = asset_balance(*asset);
    split(
      &mut outcome.instructions,
      *asset,
      balance,
      snapshot,
      zero_amounts,
    );
    outcome.processed_assets.push(*asset);
  }
  outcome
}

fn split<AccountId: Clone>(
  instructions: &mut Vec<TransferInstruction<AccountId>>,
  asset: AssetKind,
  balance: Balance,
  snapshot: &[(AccountId, SharePercent)],
  zero_amounts: ZeroAmountPolicy,
) {
  for (who, share) in snapshot {
    let amount = share_amount(balance, *share);
    if amount == 0 && zero_amounts == ZeroAmountPolicy::Skip {
      continue;
    }
    instructions.push(TransferInstruction {
      asset,
      to: who.clone(),
      amount,
    });
  }
}
