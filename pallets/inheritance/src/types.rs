use frame::prelude::*;
use primitives::{AssetKind, Balance, SharePercent};

/// Identifier of one will (one registry, one monitored wallet).
pub type WillId = u64;

/// One beneficiary line as submitted by the owner.
#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct BeneficiaryEntry<AccountId> {
  pub who: AccountId,
  pub share: SharePercent,
}

impl<AccountId> BeneficiaryEntry<AccountId> {
  pub fn new(who: AccountId, share: SharePercent) -> Self {
    Self { who, share }
  }
}

/// Lifecycle of a will once it exists in storage.
///
/// `Settling` only lives for the duration of an `activate` call and guards
/// against re-entrant activation from inside a wallet call.
#[derive(
  Clone,
  Copy,
  Debug,
  Default,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub enum ActivationState {
  #[default]
  Active,
  Settling,
  Inactive,
}

#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub struct CreationContext<BlockNumber> {
  pub block: BlockNumber,
  /// Unix seconds at initialization
  pub timestamp: u64,
}

/// Stored configuration of one will.
#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct PolicyConfig<AccountId, BlockNumber> {
  /// Controlling wallet; funds are forwarded out of this account.
  pub owner: AccountId,
  /// Counted in `Config::ThresholdUnit`.
  pub inactivity_threshold: u64,
  pub state: ActivationState,
  pub created: CreationContext<BlockNumber>,
}

/// Outcome of a completed activation.
#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct SettlementRecord<AccountId, BlockNumber, Assets> {
  pub caller: AccountId,
  pub settled_at: BlockNumber,
  pub native_distributed: bool,
  /// Prefix of the candidate list that fit into the transfer budget.
  pub processed_assets: Assets,
  pub transfers_succeeded: u32,
  pub transfers_failed: u32,
}

/// Whether zero-amount transfer instructions are issued.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub enum ZeroAmountPolicy {
  /// Drop instructions whose floored amount is zero.
  Skip,
  /// Issue them anyway and let the wallet no-op.
  Emit,
}

/// Which privileged identities may never be registered as beneficiaries.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub enum InsiderExclusion {
  Disabled,
  ContractAccounts,
  CoSigners,
  All,
}

impl InsiderExclusion {
  pub fn excludes_contracts(self) -> bool {
    matches!(self, Self::ContractAccounts | Self::All)
  }

  pub fn excludes_co_signers(self) -> bool {
    matches!(self, Self::CoSigners | Self::All)
  }
}

/// What an activation does when a single transfer fails.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub enum FailurePolicy {
  /// Settle anyway, record the failed instruction and keep going.
  BestEffort,
  /// Fail the whole activation; every transfer and the state flip roll back.
  AbortAll,
}

/// One elementary value move computed by the apportionment engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferInstruction<AccountId> {
  pub asset: AssetKind,
  pub to: AccountId,
  pub amount: Balance,
}
