use crate as pallet_inheritance;
use crate::{
  ActivityOracle, CallReturn, FungibleWallet, InsiderRegistry, WalletCall, WalletExecutor,
  WalletInspect,
  types::{BeneficiaryEntry, FailurePolicy, InsiderExclusion, WillId, ZeroAmountPolicy},
};
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::time::Duration;
use frame::prelude::*;
use polkadot_sdk::{
  frame_support::{
    construct_runtime, derive_impl, parameter_types,
    traits::{ConstU32, ConstU128, UnixTime},
  },
  frame_system::{self, EnsureRoot},
  sp_runtime::{
    BuildStorage, TokenError,
    testing::H256,
    traits::{BlakeTwo256, IdentityLookup},
  },
};
use primitives::{AssetKind, Balance, threshold_units::SECONDS};

type Block = frame_system::mocking::MockBlock<Test>;
pub type AccountId = u64;

pub const OWNER: AccountId = 1;
pub const ALICE: AccountId = 2;
pub const BOB: AccountId = 3;
pub const CHARLIE: AccountId = 4;
pub const CALLER: AccountId = 9;
pub const CONTRACT: AccountId = 50;
pub const CO_SIGNER: AccountId = 51;
/// Recipient whose wallet call re-enters `do_activate`.
pub const REENTRANT: AccountId = 77;
pub const ZERO: AccountId = 0;

pub const WILL: WillId = 7;
pub const ASSET_A: u32 = 1;
pub const ASSET_B: u32 = 2;
pub const ASSET_C: u32 = 3;
pub const ASSET_ADMIN: AccountId = 100;

pub const OWNER_NATIVE: Balance = 1_000;
pub const OWNER_ASSET_A: Balance = 500;
pub const OWNER_ASSET_B: Balance = 90;
pub const GENESIS_NOW: u64 = 1_700_000_000;

/// How the mock wallet answers a call to a given recipient.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WalletBehavior {
  Revert,
  ReturnFalse,
  Malformed,
}

thread_local! {
    pub static NOW: RefCell<u64> = const { RefCell::new(GENESIS_NOW) };
    pub static LAST_ACTIVITY: RefCell<BTreeMap<AccountId, u64>> = const { RefCell::new(BTreeMap::new()) };
    pub static CONTRACTS: RefCell<BTreeSet<AccountId>> = const { RefCell::new(BTreeSet::new()) };
    pub static CO_SIGNERS: RefCell<BTreeSet<(AccountId, AccountId)>> = const { RefCell::new(BTreeSet::new()) };
    pub static WALLET_BEHAVIOR: RefCell<BTreeMap<AccountId, WalletBehavior>> = const { RefCell::new(BTreeMap::new()) };
    /// Every call that reached the wallet, in execution order.
    pub static EXECUTED: RefCell<Vec<WalletCall<AccountId>>> = const { RefCell::new(Vec::new()) };
    pub static REENTRY_RESULT: RefCell<Option<Result<(), DispatchError>>> = const { RefCell::new(None) };
}

pub fn set_now(now: u64) {
  NOW.with(|n| *n.borrow_mut() = now);
}

pub fn set_last_activity(wallet: AccountId, at: u64) {
  LAST_ACTIVITY.with(|a| a.borrow_mut().insert(wallet, at));
}

pub fn mark_contract(who: AccountId) {
  CONTRACTS.with(|c| c.borrow_mut().insert(who));
}

pub fn mark_co_signer(wallet: AccountId, who: AccountId) {
  CO_SIGNERS.with(|c| c.borrow_mut().insert((wallet, who)));
}

pub fn set_wallet_behavior(recipient: AccountId, behavior: WalletBehavior) {
  WALLET_BEHAVIOR.with(|b| b.borrow_mut().insert(recipient, behavior));
}

pub fn executed_calls() -> Vec<WalletCall<AccountId>> {
  EXECUTED.with(|e| e.borrow().clone())
}

pub fn reentry_result() -> Option<Result<(), DispatchError>> {
  REENTRY_RESULT.with(|r| *r.borrow())
}

fn reset_mock_adapters() {
  set_now(GENESIS_NOW);
  LAST_ACTIVITY.with(|a| a.borrow_mut().clear());
  CONTRACTS.with(|c| c.borrow_mut().clear());
  CO_SIGNERS.with(|c| c.borrow_mut().clear());
  WALLET_BEHAVIOR.with(|b| b.borrow_mut().clear());
  EXECUTED.with(|e| e.borrow_mut().clear());
  REENTRY_RESULT.with(|r| *r.borrow_mut() = None);
}

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    Inheritance: pallet_inheritance,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = AccountId;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<Balance>;
}

impl polkadot_sdk::pallet_balances::Config for Test {
  type MaxLocks = ();
  type MaxReserves = ();
  type ReserveIdentifier = [u8; 8];
  type Balance = Balance;
  type DustRemoval = ();
  type RuntimeEvent = RuntimeEvent;
  type ExistentialDeposit = ConstU128<1>;
  type AccountStore = System;
  type WeightInfo = ();
  type FreezeIdentifier = ();
  type MaxFreezes = ();
  type RuntimeHoldReason = ();
  type RuntimeFreezeReason = ();
  type DoneSlashHandler = ();
}

impl polkadot_sdk::pallet_assets::Config for Test {
  type RuntimeEvent = RuntimeEvent;
  type Balance = Balance;
  type AssetId = u32;
  type AssetIdParameter = u32;
  type Currency = Balances;
  type CreateOrigin = polkadot_sdk::frame_support::traits::AsEnsureOriginWithArg<
    frame_system::EnsureSigned<Self::AccountId>,
  >;
  type ForceOrigin = EnsureRoot<Self::AccountId>;
  type AssetDeposit = ConstU128<1>;
  type AssetAccountDeposit = ConstU128<1>;
  type MetadataDepositBase = ConstU128<1>;
  type MetadataDepositPerByte = ConstU128<1>;
  type ApprovalDeposit = ConstU128<1>;
  type StringLimit = ConstU32<50>;
  type Freezer = ();
  type Extra = ();
  type ReserveData = ();
  type CallbackHandle = ();
  type WeightInfo = ();
  type RemoveItemsLimit = ConstU32<5>;
  type Holder = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = AssetBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct AssetBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl polkadot_sdk::pallet_assets::BenchmarkHelper<u32, ()> for AssetBenchmarkHelper {
  fn create_asset_id_parameter(id: u32) -> u32 {
    id
  }
  fn create_reserve_id_parameter(_id: u32) -> () {
    ()
  }
}

pub struct MockTime;
impl UnixTime for MockTime {
  fn now() -> Duration {
    Duration::from_secs(NOW.with(|n| *n.borrow()))
  }
}

pub struct MockOracle;
impl ActivityOracle<AccountId> for MockOracle {
  fn last_activity(wallet: &AccountId) -> u64 {
    LAST_ACTIVITY.with(|a| a.borrow().get(wallet).copied().unwrap_or_default())
  }
}

pub struct MockInsiders;
impl InsiderRegistry<AccountId> for MockInsiders {
  fn is_contract(who: &AccountId) -> bool {
    CONTRACTS.with(|c| c.borrow().contains(who))
  }

  fn is_co_signer(wallet: &AccountId, who: &AccountId) -> bool {
    CO_SIGNERS.with(|c| c.borrow().contains(&(*wallet, *who)))
  }
}

type RealWallet = FungibleWallet<Balances, Assets>;

/// Plain-account wallet with scriptable per-recipient failures.
pub struct MockWallet;
impl WalletExecutor<AccountId> for MockWallet {
  fn execute(
    wallet: &AccountId,
    call: WalletCall<AccountId>,
  ) -> Result<CallReturn, DispatchError> {
    EXECUTED.with(|e| e.borrow_mut().push(call.clone()));
    let to = match &call {
      WalletCall::Native { to, .. } | WalletCall::Asset { to, .. } => *to,
    };
    if to == REENTRANT {
      let result = Inheritance::do_activate(&CALLER, WILL, Default::default(), false).map(|_| ());
      REENTRY_RESULT.with(|r| *r.borrow_mut() = Some(result));
    }
    match WALLET_BEHAVIOR.with(|b| b.borrow().get(&to).copied()) {
      Some(WalletBehavior::Revert) => return Err(TokenError::Blocked.into()),
      Some(WalletBehavior::ReturnFalse) => return Ok(CallReturn::Bool(false)),
      Some(WalletBehavior::Malformed) => return Ok(CallReturn::Malformed),
      None => {}
    }
    RealWallet::execute(wallet, call)
  }
}

impl WalletInspect<AccountId> for MockWallet {
  fn native_balance(who: &AccountId) -> Balance {
    RealWallet::native_balance(who)
  }

  fn asset_balance(asset_id: u32, who: &AccountId) -> Balance {
    RealWallet::asset_balance(asset_id, who)
  }
}

parameter_types! {
  pub static ThresholdUnit: u64 = SECONDS;
  pub static Exclusion: InsiderExclusion = InsiderExclusion::All;
  pub static ZeroAmounts: ZeroAmountPolicy = ZeroAmountPolicy::Skip;
  pub static FailureMode: FailurePolicy = FailurePolicy::BestEffort;
}

impl pallet_inheritance::Config for Test {
  type RouterOrigin = EnsureRoot<AccountId>;
  type ActivityOracle = MockOracle;
  type Wallet = MockWallet;
  type Insiders = MockInsiders;
  type TimeProvider = MockTime;
  type ThresholdUnit = ThresholdUnit;
  type Exclusion = Exclusion;
  type ZeroAmounts = ZeroAmounts;
  type FailureMode = FailureMode;
  type MaxBeneficiaries = ConstU32<100>;
  type MaxCandidateAssets = ConstU32<128>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = InheritanceBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct InheritanceBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<AccountId> for InheritanceBenchmarkHelper {
  fn fund_wallet(
    wallet: &AccountId,
    assets: &[AssetKind],
    amount: Balance,
  ) -> polkadot_sdk::sp_runtime::DispatchResult {
    use polkadot_sdk::frame_support::traits::{fungible, fungibles};
    <Balances as fungible::Mutate<AccountId>>::mint_into(wallet, amount)?;
    for asset in assets {
      if let AssetKind::Local(id) | AssetKind::Foreign(id) = asset {
        if !<Assets as fungibles::Inspect<AccountId>>::asset_exists(*id) {
          Assets::force_create(frame_system::RawOrigin::Root.into(), *id, ASSET_ADMIN, true, 1)?;
        }
        <Assets as fungibles::Mutate<AccountId>>::mint_into(*id, wallet, amount)?;
      }
    }
    Ok(())
  }

  fn make_idle(wallet: &AccountId) {
    set_last_activity(*wallet, 0);
    set_now(GENESIS_NOW);
  }
}

/// `(who, share)` pairs as submitted entries.
pub fn entries(shares: &[(AccountId, u8)]) -> crate::EntriesOf<Test> {
  let list = shares
    .iter()
    .map(|(who, share)| BeneficiaryEntry::new(*who, *share))
    .collect::<Vec<_>>();
  BoundedVec::truncate_from(list)
}

pub fn candidates(ids: &[u32]) -> crate::CandidateAssetsOf<Test> {
  BoundedVec::truncate_from(ids.iter().map(|id| AssetKind::Local(*id)).collect::<Vec<_>>())
}

pub fn native_of(who: AccountId) -> Balance {
  RealWallet::native_balance(&who)
}

pub fn asset_of(id: u32, who: AccountId) -> Balance {
  RealWallet::asset_balance(id, &who)
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  new_test_ext_with_wills(vec![])
}

pub fn new_test_ext_with_wills(
  wills: Vec<(WillId, AccountId, u64, Vec<(AccountId, u8)>)>,
) -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  polkadot_sdk::pallet_balances::GenesisConfig::<Test> {
    balances: vec![(OWNER, OWNER_NATIVE), (ASSET_ADMIN, 1_000)],
    dev_accounts: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  polkadot_sdk::pallet_assets::GenesisConfig::<Test> {
    assets: vec![
      (ASSET_A, ASSET_ADMIN, true, 1),
      (ASSET_B, ASSET_ADMIN, true, 1),
      (ASSET_C, ASSET_ADMIN, true, 1),
    ],
    metadata: vec![],
    accounts: vec![(ASSET_A, OWNER, OWNER_ASSET_A), (ASSET_B, OWNER, OWNER_ASSET_B)],
    reserves: vec![],
    next_asset_id: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  pallet_inheritance::GenesisConfig::<Test> { wills }
    .assimilate_storage(&mut t)
    .unwrap();

  let mut ext = polkadot_sdk::sp_io::TestExternalities::new(t);
  ext.execute_with(|| {
    reset_mock_adapters();
    System::set_block_number(1);
  });
  ext
}
