//! Adapter traits for the inheritance pallet
//!
//! Activity reports, balance reads and wallet execution all go through these
//! traits, so the pallet does not depend on a particular runtime.

use core::marker::PhantomData;
use frame::deps::frame_support::traits::{
  fungible::{Inspect as NativeInspect, Mutate as NativeMutate},
  fungibles::{Inspect as FungiblesInspect, Mutate as FungiblesMutate},
  tokens::Preservation,
};
use frame::prelude::*;
use primitives::Balance;

/// Reports when a wallet last initiated an outgoing transaction.
pub trait ActivityOracle<AccountId> {
  /// Unix seconds of the wallet's last outgoing activity.
  fn last_activity(wallet: &AccountId) -> u64;
}

/// Identities that must never receive a distribution.
pub trait InsiderRegistry<AccountId> {
  /// `who` is a contract account rather than a key-controlled account.
  fn is_contract(who: &AccountId) -> bool;

  /// `who` co-controls `wallet` and could front-run the distribution.
  fn is_co_signer(wallet: &AccountId, who: &AccountId) -> bool;
}

/// Balance reads on the monitored wallet.
pub trait WalletInspect<AccountId> {
  fn native_balance(who: &AccountId) -> Balance;

  fn asset_balance(asset_id: u32, who: &AccountId) -> Balance;
}

/// A single call the wallet executes on the pallet's behalf.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WalletCall<AccountId> {
  Native {
    to: AccountId,
    amount: Balance,
  },
  Asset {
    id: u32,
    to: AccountId,
    amount: Balance,
  },
}

/// Decoded return payload of an executed wallet call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CallReturn {
  /// Call returned nothing.
  Unit,
  /// Call returned a boolean; `false` means the token refused the transfer.
  Bool(bool),
  /// Call returned data that does not decode as expected.
  Malformed,
}

impl CallReturn {
  pub fn is_success(self) -> bool {
    matches!(self, CallReturn::Unit | CallReturn::Bool(true))
  }
}

/// Delegated execution on the monitored wallet.
pub trait WalletExecutor<AccountId> {
  fn execute(wallet: &AccountId, call: WalletCall<AccountId>) -> Result<CallReturn, DispatchError>;
}

/// Wallet adapter for runtimes where the monitored wallet is a plain account.
///
/// Native legs go through `Currency`, token legs through `Assets`. Transfers may
/// reap the wallet: a full distribution is expected to empty it. A zero amount
/// succeeds without touching either pallet.
pub struct FungibleWallet<Currency, Assets>(PhantomData<(Currency, Assets)>);

impl<AccountId, Currency, Assets> WalletExecutor<AccountId> for FungibleWallet<Currency, Assets>
where
  AccountId: Eq,
  Currency: NativeMutate<AccountId, Balance = Balance>,
  Assets: FungiblesMutate<AccountId, AssetId = u32, Balance = Balance>,
{
  fn execute(wallet: &AccountId, call: WalletCall<AccountId>) -> Result<CallReturn, DispatchError> {
    match call {
      WalletCall::Native { amount: 0, .. } | WalletCall::Asset { amount: 0, .. } => {}
      WalletCall::Native { to, amount } => {
        Currency::transfer(wallet, &to, amount, Preservation::Expendable)?;
      }
      WalletCall::Asset { id, to, amount } => {
        Assets::transfer(id, wallet, &to, amount, Preservation::Expendable)?;
      }
    }
    Ok(CallReturn::Unit)
  }
}

impl<AccountId, Currency, Assets> WalletInspect<AccountId> for FungibleWallet<Currency, Assets>
where
  Currency: NativeInspect<AccountId, Balance = Balance>,
  Assets: FungiblesInspect<AccountId, AssetId = u32, Balance = Balance>,
{
  fn native_balance(who: &AccountId) -> Balance {
    Currency::balance(who)
  }

  fn asset_balance(asset_id: u32, who: &AccountId) -> Balance {
    Assets::balance(asset_id, who)
  }
}

/// Oracle that reports activity at the end of time; no wallet configured with
/// it ever goes idle.
impl<AccountId> ActivityOracle<AccountId> for () {
  fn last_activity(_: &AccountId) -> u64 {
    u64::MAX
  }
}

/// No contracts, no co-signers.
impl<AccountId> InsiderRegistry<AccountId> for () {
  fn is_contract(_: &AccountId) -> bool {
    false
  }

  fn is_co_signer(_: &AccountId, _: &AccountId) -> bool {
    false
  }
}

impl<AccountId> WalletInspect<AccountId> for () {
  fn native_balance(_: &AccountId) -> Balance {
    0
  }

  fn asset_balance(_: u32, _: &AccountId) -> Balance {
    0
  }
}

/// No-op `WalletExecutor` for configurations without a wallet.
impl<AccountId> WalletExecutor<AccountId> for () {
  fn execute(_: &AccountId, _: WalletCall<AccountId>) -> Result<CallReturn, DispatchError> {
    Err(DispatchError::Other("WalletExecutor not configured"))
  }
}
