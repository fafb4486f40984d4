//! Beneficiary registry: one share table per will.
//!
//! A submitted table is validated completely in memory before storage is
//! touched; storage is then cleared and rebuilt as a whole.

use crate::{
  adapters::InsiderRegistry,
  pallet::{Beneficiaries, Config, Error, Pallet, Shares},
  types::{BeneficiaryEntry, InsiderExclusion, WillId},
};
use alloc::vec::Vec;
use frame::prelude::*;
use primitives::{SharePercent, params::FULL_SHARE};

/// Deduplicated `(beneficiary, share)` pairs in first-submission order.
pub type ShareTable<T> = BoundedVec<
  (<T as frame_system::Config>::AccountId, SharePercent),
  <T as Config>::MaxBeneficiaries,
>;

impl<T: Config> Pallet<T> {
  /// Account whose encoding is all zero bytes; never a valid owner or beneficiary.
  pub fn is_zero_account(who: &T::AccountId) -> bool {
    who.using_encoded(|bytes| bytes.iter().all(|b| *b == 0))
  }

  /// Validate `entries` for `owner` without touching storage.
  ///
  /// A repeated beneficiary keeps its first position and its last share, and the
  /// 100% check runs over the deduplicated table.
  pub fn build_share_table(
    owner: &T::AccountId,
    entries: &[BeneficiaryEntry<T::AccountId>],
  ) -> Result<ShareTable<T>, Error<T>> {
    let exclusion = T::Exclusion::get();
    let mut table = ShareTable::<T>::default();
    for entry in entries {
      ensure!(
        entry.share > 0 && entry.share <= FULL_SHARE,
        Error::<T>::InvalidShare
      );
      ensure!(
        Self::is_eligible_beneficiary(owner, &entry.who, exclusion),
        Error::<T>::InvalidBeneficiary
      );
      match table.iter_mut().find(|(who, _)| *who == entry.who) {
        Some(slot) => slot.1 = entry.share,
        None => table
          .try_push((entry.who.clone(), entry.share))
          .map_err(|_| Error::<T>::TooManyBeneficiaries)?,
      }
    }
    let total: u32 = table.iter().map(|(_, share)| u32::from(*share)).sum();
    ensure!(
      total == u32::from(FULL_SHARE),
      Error::<T>::SharesNotComplete
    );
    Ok(table)
  }

  fn is_eligible_beneficiary(
    owner: &T::AccountId,
    who: &T::AccountId,
    exclusion: InsiderExclusion,
  ) -> bool {
    if Self::is_zero_account(who) || who == owner {
      return false;
    }
    if exclusion.excludes_contracts() && T::Insiders::is_contract(who) {
      return false;
    }
    if exclusion.excludes_co_signers() && T::Insiders::is_co_signer(owner, who) {
      return false;
    }
    true
  }

  /// Replace the registry of `will_id`; returns the number of distinct beneficiaries.
  pub(crate) fn replace_registry(
    will_id: WillId,
    owner: &T::AccountId,
    entries: &[BeneficiaryEntry<T::AccountId>],
  ) -> Result<u32, Error<T>> {
    let table = Self::build_share_table(owner, entries)?;
    Self::clear_registry(will_id);
    for (who, share) in table.iter() {
      Shares::<T>::insert(will_id, who, share);
    }
    let list = table.iter().map(|(who, _)| who.clone()).collect::<Vec<_>>();
    Beneficiaries::<T>::insert(
      will_id,
      BoundedVec::<T::AccountId, T::MaxBeneficiaries>::truncate_from(list),
    );
    Ok(table.len() as u32)
  }

  /// Drop every beneficiary of `will_id` and reset their shares to zero.
  pub(crate) fn clear_registry(will_id: WillId) {
    for who in Beneficiaries::<T>::take(will_id) {
      Shares::<T>::remove(will_id, &who);
    }
  }

  /// Registered beneficiaries of `will_id`, in registration order.
  pub fn beneficiaries(will_id: WillId) -> Vec<T::AccountId> {
    Beneficiaries::<T>::get(will_id).into_inner()
  }

  pub fn share_of(will_id: WillId, who: &T::AccountId) -> SharePercent {
    Shares::<T>::get(will_id, who)
  }

  /// `(beneficiary, share)` snapshot in registration order.
  pub fn share_table(will_id: WillId) -> Vec<(T::AccountId, SharePercent)> {
    Beneficiaries::<T>::get(will_id)
      .into_iter()
      .map(|who| {
        let share = Shares::<T>::get(will_id, &who);
        (who, share)
      })
      .collect()
  }
}
