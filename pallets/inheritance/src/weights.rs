#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use core::marker::PhantomData;
use polkadot_sdk::frame_support::{
  traits::Get,
  weights::{constants::RocksDbWeight, Weight},
};
use primitives::params::MAX_TRANSFER;

pub trait WeightInfo {
  fn initialize(b: u32) -> Weight;
  fn set_distributions(b: u32) -> Weight;
  fn set_activation_trigger() -> Weight;
  fn activate(b: u32, a: u32) -> Weight;
}

/// Elementary transfers an activation over `b` beneficiaries and `a` candidates may issue.
fn transfer_bound(b: u32, a: u32) -> u64 {
  u64::from(b)
    .saturating_mul(u64::from(a).saturating_add(1))
    .min(u64::from(MAX_TRANSFER))
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config + crate::Config> WeightInfo for SubstrateWeight<T> {
  fn initialize(b: u32) -> Weight {
    let b = u64::from(b);
    Weight::from_parts(
      20_000_000u64.saturating_add(b.saturating_mul(1_500_000)),
      1500u64.saturating_add(b.saturating_mul(64)),
    )
    .saturating_add(T::DbWeight::get().reads(2))
    .saturating_add(T::DbWeight::get().writes(b.saturating_add(2)))
  }

  fn set_distributions(b: u32) -> Weight {
    // old table is cleared before the new one is written
    let max = u64::from(T::MaxBeneficiaries::get());
    let b = u64::from(b);
    Weight::from_parts(
      20_000_000u64.saturating_add(b.saturating_add(max).saturating_mul(1_500_000)),
      1500u64.saturating_add(max.saturating_mul(64)),
    )
    .saturating_add(T::DbWeight::get().reads(2))
    .saturating_add(T::DbWeight::get().writes(max.saturating_add(b).saturating_add(1)))
  }

  fn set_activation_trigger() -> Weight {
    Weight::from_parts(12_000_000, 900)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn activate(b: u32, a: u32) -> Weight {
    let transfers = transfer_bound(b, a);
    let (b, a) = (u64::from(b), u64::from(a));
    Weight::from_parts(
      30_000_000u64.saturating_add(transfers.saturating_mul(25_000_000)),
      2500u64.saturating_add(transfers.saturating_mul(128)),
    )
    // will, registry, oracle and balance snapshot
    .saturating_add(T::DbWeight::get().reads(b.saturating_add(a).saturating_add(4)))
    // two state flips, settlement record, and both legs of every transfer
    .saturating_add(T::DbWeight::get().reads_writes(transfers.saturating_mul(2), transfers.saturating_mul(2).saturating_add(3)))
  }
}

impl WeightInfo for () {
  fn initialize(b: u32) -> Weight {
    Weight::from_parts(20_000_000u64.saturating_add(u64::from(b).saturating_mul(1_500_000)), 1500)
  }
  fn set_distributions(b: u32) -> Weight {
    Weight::from_parts(20_000_000u64.saturating_add(u64::from(b).saturating_mul(3_000_000)), 1500)
  }
  fn set_activation_trigger() -> Weight { Weight::from_parts(12_000_000, 900) }
  fn activate(b: u32, a: u32) -> Weight {
    let transfers = transfer_bound(b, a);
    Weight::from_parts(30_000_000u64.saturating_add(transfers.saturating_mul(25_000_000)), 2500)
      .saturating_add(RocksDbWeight::get().reads_writes(transfers.saturating_mul(2), transfers.saturating_mul(2)))
  }
}
