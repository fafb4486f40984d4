//! Inheritance Pallet
//!
//! Dead-man's-switch forwarding of a wallet's assets. An owner registers
//! beneficiaries with percentage shares; once the owner's wallet has been idle
//! for the configured inactivity window, anyone may activate the will, which
//! splits the wallet's native balance and a caller-supplied list of token assets
//! across the beneficiaries exactly once.
//!
//! Activation is two-phase: the will moves to `Settling`, every transfer
//! instruction is executed in its own storage transaction, and the will ends in
//! `Inactive`. `FailureMode` decides whether a failed transfer is recorded and
//! skipped or aborts (and rolls back) the whole activation.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod activation;
pub mod adapters;
pub mod apportion;
pub mod registry;
mod transfer;
pub mod types;

pub mod weights;
pub use weights::WeightInfo;

pub use adapters::{
  ActivityOracle, CallReturn, FungibleWallet, InsiderRegistry, WalletCall, WalletExecutor,
  WalletInspect,
};
pub use types::*;

#[cfg(test)]
mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub(crate) const LOG_TARGET: &str = "runtime::inheritance";

/// Helper for benchmarking
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  /// Credit `wallet` with `amount` of native currency and of every token in `assets`.
  fn fund_wallet(
    wallet: &AccountId,
    assets: &[primitives::AssetKind],
    amount: primitives::Balance,
  ) -> frame::deps::sp_runtime::DispatchResult;

  /// Make the activity oracle report `wallet` as idle long enough to activate.
  fn make_idle(wallet: &AccountId);
}

#[frame::pallet]
pub mod pallet {
  use super::{LOG_TARGET, WeightInfo};
  use crate::{
    activation,
    adapters::{ActivityOracle, InsiderRegistry, WalletExecutor, WalletInspect},
    apportion,
    types::*,
  };
  use alloc::vec::Vec;
  use frame::deps::frame_support::{storage::with_storage_layer, traits::UnixTime};
  use frame::prelude::*;
  use primitives::{
    AssetInspector, AssetKind, SharePercent,
    params::{MAX_TRANSFER, POLICY_TYPE_INHERITANCE},
  };

  pub type PolicyOf<T> =
    PolicyConfig<<T as frame_system::Config>::AccountId, BlockNumberFor<T>>;

  pub type EntriesOf<T> = BoundedVec<
    BeneficiaryEntry<<T as frame_system::Config>::AccountId>,
    <T as Config>::MaxBeneficiaries,
  >;

  pub type CandidateAssetsOf<T> = BoundedVec<AssetKind, <T as Config>::MaxCandidateAssets>;

  pub type SettlementOf<T> = SettlementRecord<
    <T as frame_system::Config>::AccountId,
    BlockNumberFor<T>,
    CandidateAssetsOf<T>,
  >;

  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Origin allowed to manage any will on its owner's behalf (e.g. a will router or Root)
    type RouterOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Source of the monitored wallet's last outgoing activity
    type ActivityOracle: ActivityOracle<Self::AccountId>;

    /// Balance reads and delegated execution on the monitored wallet
    type Wallet: WalletExecutor<Self::AccountId> + WalletInspect<Self::AccountId>;

    /// Contract and co-signer detection for beneficiary screening
    type Insiders: InsiderRegistry<Self::AccountId>;

    /// Wall-clock time in unix seconds
    type TimeProvider: UnixTime;

    /// Seconds per unit of a stored inactivity threshold
    #[pallet::constant]
    type ThresholdUnit: Get<u64>;

    /// Which insiders are refused as beneficiaries
    #[pallet::constant]
    type Exclusion: Get<InsiderExclusion>;

    /// Whether zero-amount transfers are issued
    #[pallet::constant]
    type ZeroAmounts: Get<ZeroAmountPolicy>;

    /// Behaviour of an activation when a single transfer fails
    #[pallet::constant]
    type FailureMode: Get<FailurePolicy>;

    /// Maximum number of distinct beneficiaries per will
    #[pallet::constant]
    type MaxBeneficiaries: Get<u32>;

    /// Maximum length of the candidate asset list of one activation
    #[pallet::constant]
    type MaxCandidateAssets: Get<u32>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId>;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(_);

  /// Will configuration and lifecycle state. Absent means uninitialized.
  #[pallet::storage]
  #[pallet::getter(fn will)]
  pub type Wills<T: Config> = StorageMap<_, Blake2_128Concat, WillId, PolicyOf<T>, OptionQuery>;

  /// Registered beneficiaries of a will in registration order.
  #[pallet::storage]
  pub type Beneficiaries<T: Config> = StorageMap<
    _,
    Blake2_128Concat,
    WillId,
    BoundedVec<T::AccountId, T::MaxBeneficiaries>,
    ValueQuery,
  >;

  /// Share of each registered beneficiary; zero for everyone else.
  #[pallet::storage]
  pub type Shares<T: Config> = StorageDoubleMap<
    _,
    Blake2_128Concat,
    WillId,
    Blake2_128Concat,
    T::AccountId,
    SharePercent,
    ValueQuery,
  >;

  /// Outcome of the activation of a settled will.
  #[pallet::storage]
  #[pallet::getter(fn settlement)]
  pub type Settlements<T: Config> =
    StorageMap<_, Blake2_128Concat, WillId, SettlementOf<T>, OptionQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// A will was created and is active.
    WillInitialized {
      will_id: WillId,
      owner: T::AccountId,
      beneficiaries: u32,
      inactivity_threshold: u64,
    },
    /// The beneficiary table of a will was replaced.
    DistributionsUpdated { will_id: WillId, beneficiaries: u32 },
    /// The inactivity threshold of a will changed.
    ActivationTriggerUpdated {
      will_id: WillId,
      old_threshold: u64,
      new_threshold: u64,
    },
    /// One transfer of an activation succeeded.
    DistributionTransferred {
      will_id: WillId,
      asset: AssetKind,
      to: T::AccountId,
      amount: u128,
    },
    /// One transfer of an activation failed and was skipped.
    DistributionTransferFailed {
      will_id: WillId,
      asset: AssetKind,
      to: T::AccountId,
      amount: u128,
      error: DispatchError,
    },
    /// A will was activated and is now settled.
    WillActivated {
      will_id: WillId,
      caller: T::AccountId,
      native_distributed: bool,
      processed_assets: Vec<AssetKind>,
      transfers_succeeded: u32,
      transfers_failed: u32,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Owner is the zero account.
    OwnerInvalid,
    /// A will with this id already exists.
    AlreadyInitialized,
    /// No will with this id.
    WillNotFound,
    /// Caller is neither the owner nor the router.
    NotOwner,
    /// Will is no longer active and cannot be reconfigured.
    PolicyNotActive,
    /// Share is zero or above 100.
    InvalidShare,
    /// Beneficiary is the zero account, the owner, or an excluded insider.
    InvalidBeneficiary,
    /// Shares of the deduplicated table do not sum to exactly 100.
    SharesNotComplete,
    /// More distinct beneficiaries than `MaxBeneficiaries`.
    TooManyBeneficiaries,
    /// Inactivity threshold must be non-zero.
    InvalidThreshold,
    /// The wallet has not been idle for the inactivity threshold yet.
    ActivationNotEligible,
    /// The will was already activated.
    AlreadySettled,
    /// The will is being activated right now.
    SettlementInProgress,
    /// Candidate assets must be token assets; the native leg has its own flag.
    InvalidCandidateAsset,
    /// Two candidates resolve to the same token id.
    DuplicateCandidateAsset,
    /// A wallet transfer failed and aborted the activation. `instruction` is the
    /// position of the failed transfer in execution order: native leg first,
    /// then each processed candidate, beneficiaries in registration order.
    TransferExecutionFailed { instruction: u8 },
  }

  #[pallet::hooks]
  impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
    fn integrity_test() {
      let max = T::MaxBeneficiaries::get();
      assert!(max > 0, "MaxBeneficiaries must allow at least one beneficiary");
      assert!(
        max <= MAX_TRANSFER,
        "MaxBeneficiaries must fit into one native leg of the transfer budget"
      );
      assert!(T::ThresholdUnit::get() > 0, "ThresholdUnit must be non-zero");
    }
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Create will `will_id` for `owner` with its beneficiary table and
    /// inactivity threshold (in `ThresholdUnit`s).
    ///
    /// - `origin`: `RouterOrigin`, or signed by `owner`.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::initialize(entries.len() as u32))]
    pub fn initialize(
      origin: OriginFor<T>,
      will_id: WillId,
      owner: T::AccountId,
      entries: EntriesOf<T>,
      inactivity_threshold: u64,
    ) -> DispatchResult {
      Self::ensure_owner_or_router(origin, &owner)?;
      Self::do_initialize(will_id, owner, &entries, inactivity_threshold)?;
      Ok(())
    }

    /// Replace the beneficiary table of an active will.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::set_distributions(entries.len() as u32))]
    pub fn set_distributions(
      origin: OriginFor<T>,
      will_id: WillId,
      entries: EntriesOf<T>,
    ) -> DispatchResult {
      let policy = Wills::<T>::get(will_id).ok_or(Error::<T>::WillNotFound)?;
      Self::ensure_owner_or_router(origin, &policy.owner)?;
      ensure!(
        policy.state == ActivationState::Active,
        Error::<T>::PolicyNotActive
      );
      let beneficiaries = Self::replace_registry(will_id, &policy.owner, &entries)?;
      Self::deposit_event(Event::DistributionsUpdated {
        will_id,
        beneficiaries,
      });
      Ok(())
    }

    /// Change the inactivity threshold of an active will.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::set_activation_trigger())]
    pub fn set_activation_trigger(
      origin: OriginFor<T>,
      will_id: WillId,
      inactivity_threshold: u64,
    ) -> DispatchResult {
      let mut policy = Wills::<T>::get(will_id).ok_or(Error::<T>::WillNotFound)?;
      Self::ensure_owner_or_router(origin, &policy.owner)?;
      ensure!(
        policy.state == ActivationState::Active,
        Error::<T>::PolicyNotActive
      );
      ensure!(inactivity_threshold > 0, Error::<T>::InvalidThreshold);
      let old_threshold = policy.inactivity_threshold;
      policy.inactivity_threshold = inactivity_threshold;
      Wills::<T>::insert(will_id, policy);
      Self::deposit_event(Event::ActivationTriggerUpdated {
        will_id,
        old_threshold,
        new_threshold: inactivity_threshold,
      });
      Ok(())
    }

    /// Distribute the owner's wallet to the beneficiaries. Open to any signed
    /// caller once the wallet has been idle long enough; succeeds at most once.
    ///
    /// Only the prefix of `candidate_assets` that fits into the transfer budget
    /// is processed; see `WillActivated::processed_assets`.
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::activate(
      T::MaxBeneficiaries::get(),
      candidate_assets.len() as u32,
    ))]
    pub fn activate(
      origin: OriginFor<T>,
      will_id: WillId,
      candidate_assets: CandidateAssetsOf<T>,
      include_native: bool,
    ) -> DispatchResult {
      let caller = ensure_signed(origin)?;
      Self::do_activate(&caller, will_id, candidate_assets, include_native)?;
      Ok(())
    }
  }

  #[pallet::extra_constants]
  impl<T: Config> Pallet<T> {
    /// Upper bound on elementary transfers in one activation.
    #[pallet::constant_name(MaxTransfers)]
    pub fn max_transfers() -> u32 {
      MAX_TRANSFER
    }

    #[pallet::constant_name(PolicyType)]
    pub fn policy_type() -> u8 {
      POLICY_TYPE_INHERITANCE
    }
  }

  impl<T: Config> Pallet<T> {
    fn now() -> u64 {
      T::TimeProvider::now().as_secs()
    }

    fn ensure_owner_or_router(origin: OriginFor<T>, owner: &T::AccountId) -> DispatchResult {
      match T::RouterOrigin::try_origin(origin) {
        Ok(_) => Ok(()),
        Err(origin) => {
          let who = ensure_signed(origin)?;
          ensure!(&who == owner, Error::<T>::NotOwner);
          Ok(())
        }
      }
    }

    /// Whether `activate` would pass the inactivity check right now.
    ///
    /// Unknown and already settled wills are never eligible.
    pub fn check_activation_eligible(will_id: WillId) -> bool {
      Wills::<T>::get(will_id)
        .filter(|policy| policy.state == ActivationState::Active)
        .is_some_and(|policy| Self::is_idle(&policy))
    }

    fn is_idle(policy: &PolicyOf<T>) -> bool {
      activation::is_eligible(
        T::ActivityOracle::last_activity(&policy.owner),
        policy.inactivity_threshold,
        T::ThresholdUnit::get(),
        Self::now(),
      )
    }

    /// Create a will without origin checks; returns the beneficiary count.
    pub fn do_initialize(
      will_id: WillId,
      owner: T::AccountId,
      entries: &[BeneficiaryEntry<T::AccountId>],
      inactivity_threshold: u64,
    ) -> Result<u32, DispatchError> {
      ensure!(!Self::is_zero_account(&owner), Error::<T>::OwnerInvalid);
      ensure!(
        !Wills::<T>::contains_key(will_id),
        Error::<T>::AlreadyInitialized
      );
      ensure!(inactivity_threshold > 0, Error::<T>::InvalidThreshold);
      let beneficiaries = Self::replace_registry(will_id, &owner, entries)?;
      Wills::<T>::insert(
        will_id,
        PolicyConfig {
          owner: owner.clone(),
          inactivity_threshold,
          state: ActivationState::Active,
          created: CreationContext {
            block: frame_system::Pallet::<T>::block_number(),
            timestamp: Self::now(),
          },
        },
      );
      log::debug!(
        target: LOG_TARGET,
        "will {} initialized with {} beneficiaries",
        will_id,
        beneficiaries,
      );
      Self::deposit_event(Event::WillInitialized {
        will_id,
        owner,
        beneficiaries,
        inactivity_threshold,
      });
      Ok(beneficiaries)
    }

    /// Activate will `will_id` on behalf of `caller`; returns the processed
    /// candidate assets.
    ///
    /// Runs in its own storage layer, so an aborted activation leaves no trace
    /// even when called from outside a dispatchable.
    pub fn do_activate(
      caller: &T::AccountId,
      will_id: WillId,
      candidate_assets: CandidateAssetsOf<T>,
      include_native: bool,
    ) -> Result<Vec<AssetKind>, DispatchError> {
      with_storage_layer(|| Self::settle(caller, will_id, &candidate_assets, include_native))
    }

    fn settle(
      caller: &T::AccountId,
      will_id: WillId,
      candidate_assets: &CandidateAssetsOf<T>,
      include_native: bool,
    ) -> Result<Vec<AssetKind>, DispatchError> {
      let mut policy = Wills::<T>::get(will_id).ok_or(Error::<T>::WillNotFound)?;
      match policy.state {
        ActivationState::Active => {}
        ActivationState::Settling => return Err(Error::<T>::SettlementInProgress.into()),
        ActivationState::Inactive => return Err(Error::<T>::AlreadySettled.into()),
      }
      ensure!(Self::is_idle(&policy), Error::<T>::ActivationNotEligible);
      Self::ensure_valid_candidates(candidate_assets)?;

      // Phase 1: lock the will against re-entrant activation and reconfiguration.
      policy.state = ActivationState::Settling;
      Wills::<T>::insert(will_id, &policy);

      let wallet = policy.owner.clone();
      let snapshot = Self::share_table(will_id);
      let plan = apportion::apportion(
        T::Wallet::native_balance(&wallet),
        candidate_assets,
        |asset| {
          asset
            .token_id()
            .map(|id| T::Wallet::asset_balance(id, &wallet))
            .unwrap_or_default()
        },
        &snapshot,
        include_native,
        T::ZeroAmounts::get(),
        MAX_TRANSFER,
      );

      let abort_on_failure = T::FailureMode::get() == FailurePolicy::AbortAll;
      let mut transfers_succeeded = 0u32;
      let mut transfers_failed = 0u32;
      for (index, instruction) in plan.instructions.iter().enumerate() {
        match Self::execute_instruction(&wallet, instruction) {
          Ok(()) => {
            transfers_succeeded += 1;
            Self::deposit_event(Event::DistributionTransferred {
              will_id,
              asset: instruction.asset,
              to: instruction.to.clone(),
              amount: instruction.amount,
            });
          }
          Err(_) if abort_on_failure => {
            log::warn!(
              target: LOG_TARGET,
              "will {} activation aborted at instruction {}",
              will_id,
              index,
            );
            // budget keeps the index below MAX_TRANSFER
            let instruction = u8::try_from(index).unwrap_or(u8::MAX);
            return Err(Error::<T>::TransferExecutionFailed { instruction }.into());
          }
          Err(error) => {
            transfers_failed += 1;
            Self::deposit_event(Event::DistributionTransferFailed {
              will_id,
              asset: instruction.asset,
              to: instruction.to.clone(),
              amount: instruction.amount,
              error,
            });
          }
        }
      }

      // Phase 2: terminal state, with every instruction accounted for.
      policy.state = ActivationState::Inactive;
      Wills::<T>::insert(will_id, &policy);
      Settlements::<T>::insert(
        will_id,
        SettlementRecord {
          caller: caller.clone(),
          settled_at: frame_system::Pallet::<T>::block_number(),
          native_distributed: plan.native_distributed,
          processed_assets: CandidateAssetsOf::<T>::truncate_from(plan.processed_assets.clone()),
          transfers_succeeded,
          transfers_failed,
        },
      );
      log::debug!(
        target: LOG_TARGET,
        "will {} settled: {} transfers ok, {} failed, {} of {} assets processed",
        will_id,
        transfers_succeeded,
        transfers_failed,
        plan.processed_assets.len(),
        candidate_assets.len(),
      );
      Self::deposit_event(Event::WillActivated {
        will_id,
        caller: caller.clone(),
        native_distributed: plan.native_distributed,
        processed_assets: plan.processed_assets.clone(),
        transfers_succeeded,
        transfers_failed,
      });
      Ok(plan.processed_assets)
    }

    fn ensure_valid_candidates(candidate_assets: &[AssetKind]) -> DispatchResult {
      // Local(n) and Foreign(n) move the same pallet-assets balance
      for (index, asset) in candidate_assets.iter().enumerate() {
        let id = asset.token_id().ok_or(Error::<T>::InvalidCandidateAsset)?;
        ensure!(
          !candidate_assets[..index]
            .iter()
            .any(|seen| seen.token_id() == Some(id)),
          Error::<T>::DuplicateCandidateAsset
        );
      }
      Ok(())
    }
  }

  /// Wills registered at genesis: `(will_id, owner, inactivity_threshold, shares)`.
  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    pub wills: Vec<(WillId, T::AccountId, u64, Vec<(T::AccountId, SharePercent)>)>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      for (will_id, owner, inactivity_threshold, shares) in &self.wills {
        let entries = shares
          .iter()
          .map(|(who, share)| BeneficiaryEntry::new(who.clone(), *share))
          .collect::<Vec<_>>();
        Pallet::<T>::do_initialize(*will_id, owner.clone(), &entries, *inactivity_threshold)
          .expect("genesis will must be valid");
      }
    }
  }
}
