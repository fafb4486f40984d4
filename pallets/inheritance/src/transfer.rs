//! Transfer executor: one wallet call per instruction, each in its own
//! storage transaction.

use crate::{
  LOG_TARGET,
  adapters::{CallReturn, WalletCall, WalletExecutor},
  pallet::{Config, Pallet},
  types::TransferInstruction,
};
use frame::deps::{frame_support::storage::with_transaction, sp_runtime::TransactionOutcome};
use frame::prelude::*;
use primitives::{AssetKind, Balance};

impl<T: Config> Pallet<T> {
  /// Move `amount` of native currency out of `from`; the error is the wallet-side cause.
  pub fn transfer_native(from: &T::AccountId, to: &T::AccountId, amount: Balance) -> DispatchResult {
    Self::execute_call(
      from,
      WalletCall::Native {
        to: to.clone(),
        amount,
      },
    )
  }

  /// Move `amount` of token `asset_id` out of `from`; the error is the wallet-side cause.
  pub fn transfer_token(
    asset_id: u32,
    from: &T::AccountId,
    to: &T::AccountId,
    amount: Balance,
  ) -> DispatchResult {
    Self::execute_call(
      from,
      WalletCall::Asset {
        id: asset_id,
        to: to.clone(),
        amount,
      },
    )
  }

  /// Execute one instruction through the transfer helpers.
  pub(crate) fn execute_instruction(
    wallet: &T::AccountId,
    instruction: &TransferInstruction<T::AccountId>,
  ) -> DispatchResult {
    let result = match instruction.asset {
      AssetKind::Native => Self::transfer_native(wallet, &instruction.to, instruction.amount),
      AssetKind::Local(id) | AssetKind::Foreign(id) => {
        Self::transfer_token(id, wallet, &instruction.to, instruction.amount)
      }
    };
    if let Err(error) = result {
      log::warn!(
        target: LOG_TARGET,
        "transfer of {:?} {:?} to {:?} failed: {:?}",
        instruction.amount,
        instruction.asset,
        instruction.to,
        error,
      );
    }
    result
  }

  fn execute_call(wallet: &T::AccountId, call: WalletCall<T::AccountId>) -> DispatchResult {
    with_transaction(|| {
      let outcome = match T::Wallet::execute(wallet, call) {
        Ok(ret) if ret.is_success() => Ok(()),
        Ok(CallReturn::Malformed) => Err(DispatchError::Other("wallet call returned malformed data")),
        Ok(_) => Err(DispatchError::Other("wallet call returned false")),
        Err(error) => Err(error),
      };
      match outcome {
        Ok(()) => TransactionOutcome::Commit(Ok(())),
        Err(error) => TransactionOutcome::Rollback(Err(error)),
      }
    })
  }
}
