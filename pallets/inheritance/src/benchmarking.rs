use crate::*;
use alloc::vec::Vec;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_support::{BoundedVec, traits::Get};
use polkadot_sdk::frame_system::RawOrigin;
use primitives::{AssetKind, SharePercent, params::FULL_SHARE};

const SEED: u32 = 0;
const WILL: WillId = 1;
const THRESHOLD: u64 = 1;

/// `b` distinct beneficiaries whose shares add up to 100.
fn beneficiaries<T: Config>(b: u32) -> EntriesOf<T> {
  let base = FULL_SHARE / b as SharePercent;
  let extra = FULL_SHARE - base * b as SharePercent;
  let list = (0..b)
    .map(|i| {
      let share = if i == 0 { base + extra } else { base };
      BeneficiaryEntry::new(account("beneficiary", i, SEED), share)
    })
    .collect::<Vec<_>>();
  BoundedVec::truncate_from(list)
}

fn setup_will<T: Config>(owner: &T::AccountId, b: u32) {
  Pallet::<T>::do_initialize(WILL, owner.clone(), &beneficiaries::<T>(b), THRESHOLD)
    .expect("benchmark will must be valid");
}

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn initialize(b: Linear<1, { T::MaxBeneficiaries::get() }>) {
    let owner: T::AccountId = whitelisted_caller();
    let entries = beneficiaries::<T>(b);

    #[extrinsic_call]
    initialize(RawOrigin::Signed(owner.clone()), WILL, owner, entries, THRESHOLD);

    assert_eq!(Pallet::<T>::beneficiaries(WILL).len() as u32, b);
  }

  #[benchmark]
  fn set_distributions(b: Linear<1, { T::MaxBeneficiaries::get() }>) {
    let owner: T::AccountId = whitelisted_caller();
    setup_will::<T>(&owner, T::MaxBeneficiaries::get());
    let entries = beneficiaries::<T>(b);

    #[extrinsic_call]
    set_distributions(RawOrigin::Signed(owner), WILL, entries);

    assert_eq!(Pallet::<T>::beneficiaries(WILL).len() as u32, b);
  }

  #[benchmark]
  fn set_activation_trigger() {
    let owner: T::AccountId = whitelisted_caller();
    setup_will::<T>(&owner, 1);

    #[extrinsic_call]
    set_activation_trigger(RawOrigin::Signed(owner), WILL, THRESHOLD + 1);

    assert_eq!(
      Pallet::<T>::will(WILL).map(|w| w.inactivity_threshold),
      Some(THRESHOLD + 1)
    );
  }

  #[benchmark]
  fn activate(
    b: Linear<1, { T::MaxBeneficiaries::get() }>,
    a: Linear<0, { T::MaxCandidateAssets::get() }>,
  ) {
    let owner: T::AccountId = account("owner", 0, SEED);
    let caller: T::AccountId = whitelisted_caller();
    setup_will::<T>(&owner, b);
    let assets = (1..=a).map(AssetKind::Local).collect::<Vec<_>>();
    T::BenchmarkHelper::fund_wallet(&owner, &assets, 1_000_000_000)
      .expect("Failed to fund wallet");
    T::BenchmarkHelper::make_idle(&owner);
    let candidates = CandidateAssetsOf::<T>::truncate_from(assets);

    #[extrinsic_call]
    activate(RawOrigin::Signed(caller), WILL, candidates, true);

    assert_eq!(
      Pallet::<T>::will(WILL).map(|w| w.state),
      Some(ActivationState::Inactive)
    );
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
