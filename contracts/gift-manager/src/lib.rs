#![no_std]
//! Gift orchestrator.
//!
//! The public state machine of the gifting protocol: records gift
//! metadata keyed by a recipient commitment, computes fees, and drives
//! the custody vault and transfer router through the deposit / claim /
//! reclaim lifecycle. A gift moves `{nonexistent} --deposit-->
//! {pending} --claim|reclaim--> {deleted}`; no transition returns to
//! pending, and a deleted gift is indistinguishable from one that never
//! existed.

mod events;
mod invariants;
mod monitoring;
#[cfg(test)]
mod test_batch;
#[cfg(test)]
mod test_reentrancy;

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Bytes, BytesN,
    Env, String, Vec,
};
use tokentide_core::interfaces::{ClassifierClient, RouterClient, VaultClient};
use tokentide_core::kind::{is_contract_address, TokenKind};
use tokentide_core::{access, fee_math, reentrancy, reveal};

use events::{
    emit_batch_deposited, emit_fees_updated, emit_gift_claimed, emit_gift_deposited,
    emit_gift_reclaimed, emit_pause_changed, BatchDeposited, FeesUpdated, GiftClaimed,
    GiftDeposited, GiftReclaimed, PauseChanged, EVENT_VERSION,
};
use monitoring::HealthStatus;

const MAX_BATCH_SIZE: u32 = 20;

const DAY_IN_LEDGERS: u32 = 17280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;
const GIFT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const GIFT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    Paused = 4,
    ReentrancyDetected = 5,
    GiftAlreadyExists = 6,
    GiftNotFound = 7,
    GiftAlreadyClaimed = 8,
    GiftNotExpiredYet = 9,
    NotSender = 10,
    InvalidRecipientHash = 11,
    InvalidToken = 12,
    InvalidAmount = 13,
    InvalidExpiry = 14,
    InvalidFeePercentage = 15,
    InvalidBatchSize = 16,
    BatchSizeMismatch = 17,
    DuplicateRecipientHash = 18,
    InvalidSender = 19,
    WiringIncomplete = 20,
}

/// A pending gift, keyed by its recipient commitment.
///
/// `amount_or_id` is a quantity for fungible tokens and an item
/// identifier for unique kinds. The record is deleted on claim and on
/// reclaim; `claimed` flips exactly once, inside the same operation
/// that deletes it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Gift {
    pub token: Address,
    pub amount_or_id: i128,
    pub sender: Address,
    pub kind: TokenKind,
    pub fee: i128,
    pub claimed: bool,
    pub expiry: u64,
}

/// Two-parameter fee schedule read at deposit time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeSchedule {
    /// Whole-percent fee on fungible amounts.
    pub percentage_fee: u32,
    /// Flat fee, in the vault's fee token, per unique-item gift.
    pub flat_fee: i128,
}

#[contracttype]
pub enum DataKey {
    Router,
    Vault,
    FeeSchedule,
    FeeManager,
    Paused,
    Gift(BytesN<32>),
}

#[contract]
pub struct GiftManager;

#[contractimpl]
impl GiftManager {
    pub fn init(
        env: Env,
        admin: Address,
        router: Address,
        vault: Address,
        percentage_fee: u32,
        flat_fee: i128,
    ) -> Result<(), Error> {
        if access::has_admin(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if percentage_fee > fee_math::MAX_PERCENTAGE_FEE {
            return Err(Error::InvalidFeePercentage);
        }
        if flat_fee < 0 {
            return Err(Error::InvalidAmount);
        }
        access::set_admin(&env, &admin);
        env.storage().instance().set(&DataKey::Router, &router);
        env.storage().instance().set(&DataKey::Vault, &vault);
        env.storage().instance().set(
            &DataKey::FeeSchedule,
            &FeeSchedule {
                percentage_fee,
                flat_fee,
            },
        );
        Ok(())
    }

    /// Grant an integrator the direct-transfer capability (admin only).
    pub fn authorize(env: Env, principal: Address) -> Result<(), Error> {
        Self::require_admin(&env)?;
        access::grant(&env, &principal);
        Ok(())
    }

    pub fn revoke(env: Env, principal: Address) -> Result<(), Error> {
        Self::require_admin(&env)?;
        access::revoke(&env, &principal);
        Ok(())
    }

    pub fn is_authorized(env: Env, principal: Address) -> bool {
        access::is_authorized(&env, &principal)
    }

    /// Assign the fee-management role (admin only).
    pub fn set_fee_manager(env: Env, principal: Address) -> Result<(), Error> {
        Self::require_admin(&env)?;
        env.storage().instance().set(&DataKey::FeeManager, &principal);
        Ok(())
    }

    /// Update the fee schedule. Restricted to the fee manager (or the
    /// admin when no fee manager has been assigned).
    pub fn update_fees(
        env: Env,
        caller: Address,
        percentage_fee: u32,
        flat_fee: i128,
    ) -> Result<(), Error> {
        caller.require_auth();
        let admin = access::admin(&env).ok_or(Error::NotInitialized)?;
        let fee_manager: Option<Address> = env.storage().instance().get(&DataKey::FeeManager);
        if caller != admin && fee_manager != Some(caller.clone()) {
            return Err(Error::Unauthorized);
        }
        if percentage_fee > fee_math::MAX_PERCENTAGE_FEE {
            return Err(Error::InvalidFeePercentage);
        }
        if flat_fee < 0 {
            return Err(Error::InvalidAmount);
        }
        env.storage().instance().set(
            &DataKey::FeeSchedule,
            &FeeSchedule {
                percentage_fee,
                flat_fee,
            },
        );
        emit_fees_updated(
            &env,
            FeesUpdated {
                version: EVENT_VERSION,
                percentage_fee,
                flat_fee,
                updated_by: caller,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    /// Circuit breaker: while paused, every mutating verb rejects
    /// uniformly regardless of its other preconditions.
    pub fn set_paused(env: Env, paused: bool, reason: Option<String>) -> Result<(), Error> {
        let admin = Self::require_admin(&env)?;
        env.storage().instance().set(&DataKey::Paused, &paused);
        emit_pause_changed(
            &env,
            PauseChanged {
                paused,
                reason,
                admin,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    /// Deposit a gift for the recipient committed to by
    /// `recipient_hash`, escrowing `amount_or_id` of `token` until it
    /// is claimed or reclaimed.
    pub fn deposit(
        env: Env,
        sender: Address,
        token: Address,
        recipient_hash: BytesN<32>,
        amount_or_id: i128,
        expiry_seconds: u64,
    ) -> Result<(), Error> {
        let res = Self::deposit_guarded(
            &env,
            &sender,
            &token,
            &recipient_hash,
            amount_or_id,
            expiry_seconds,
        );
        monitoring::track_operation(&env, symbol_short!("deposit"), &sender, res.is_ok());
        res
    }

    fn deposit_guarded(
        env: &Env,
        sender: &Address,
        token: &Address,
        recipient_hash: &BytesN<32>,
        amount_or_id: i128,
        expiry_seconds: u64,
    ) -> Result<(), Error> {
        if !reentrancy::try_acquire(env) {
            return Err(Error::ReentrancyDetected);
        }
        Self::require_live(env)?;
        sender.require_auth();
        Self::deposit_one(env, sender, token, recipient_hash, amount_or_id, expiry_seconds)?;
        reentrancy::release(env);
        Ok(())
    }

    /// Deposit several gifts of one token with one expiry in a single
    /// atomic operation. Any item failure aborts the whole batch; no
    /// partial commit is observable.
    pub fn batch_deposit(
        env: Env,
        sender: Address,
        token: Address,
        recipient_hashes: Vec<BytesN<32>>,
        amounts: Vec<i128>,
        expiry_seconds: u64,
    ) -> Result<u32, Error> {
        if !reentrancy::try_acquire(&env) {
            return Err(Error::ReentrancyDetected);
        }
        Self::require_live(&env)?;
        sender.require_auth();

        if recipient_hashes.len() != amounts.len() {
            return Err(Error::BatchSizeMismatch);
        }
        let count = recipient_hashes.len();
        if count == 0 || count > MAX_BATCH_SIZE {
            return Err(Error::InvalidBatchSize);
        }

        // Validate the whole batch before any side effect (all-or-nothing):
        // intra-batch duplicates and collisions with existing gifts both
        // reject the batch up front.
        for (i, hash) in recipient_hashes.iter().enumerate() {
            if env.storage().persistent().has(&DataKey::Gift(hash.clone())) {
                return Err(Error::GiftAlreadyExists);
            }
            for other in recipient_hashes.iter().skip(i + 1) {
                if other == hash {
                    return Err(Error::DuplicateRecipientHash);
                }
            }
        }

        let mut total_amount: i128 = 0;
        for (hash, amount) in recipient_hashes.iter().zip(amounts.iter()) {
            Self::deposit_one(&env, &sender, &token, &hash, amount, expiry_seconds)?;
            total_amount = total_amount.saturating_add(amount);
        }

        emit_batch_deposited(
            &env,
            BatchDeposited {
                version: EVENT_VERSION,
                token,
                count,
                total_amount,
                timestamp: env.ledger().timestamp(),
            },
        );

        reentrancy::release(&env);
        Ok(count)
    }

    /// Claim a gift by revealing the preimage of its recipient
    /// commitment. The asset is released to `claimer`; for unique-item
    /// gifts the flat fee is pulled from `claimer` in the vault's fee
    /// token.
    pub fn claim_gift(
        env: Env,
        claimer: Address,
        identifier: Bytes,
        salt: Bytes,
    ) -> Result<(), Error> {
        let res = Self::claim_guarded(&env, &claimer, &identifier, &salt);
        monitoring::track_operation(&env, symbol_short!("claim"), &claimer, res.is_ok());
        res
    }

    fn claim_guarded(
        env: &Env,
        claimer: &Address,
        identifier: &Bytes,
        salt: &Bytes,
    ) -> Result<(), Error> {
        if !reentrancy::try_acquire(env) {
            return Err(Error::ReentrancyDetected);
        }
        Self::require_live(env)?;
        claimer.require_auth();

        let recipient_hash = reveal::recipient_hash(env, identifier, salt);
        let key = DataKey::Gift(recipient_hash.clone());
        let mut gift: Gift = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(Error::GiftNotFound)?;
        if gift.claimed {
            return Err(Error::GiftAlreadyClaimed);
        }

        // EFFECTS: the one-time flip and the delete land before the
        // outbound release can reach external code.
        gift.claimed = true;
        env.storage().persistent().remove(&key);

        // INTERACTION: release custody last.
        let vault = Self::vault_client(env)?;
        vault.release(
            &env.current_contract_address(),
            &gift.token,
            claimer,
            &gift.amount_or_id,
            &gift.kind,
            &gift.fee,
        );

        emit_gift_claimed(
            env,
            GiftClaimed {
                version: EVENT_VERSION,
                recipient_hash,
                token: gift.token,
                recipient: claimer.clone(),
                amount_or_id: gift.amount_or_id,
                fee: gift.fee,
                timestamp: env.ledger().timestamp(),
            },
        );

        reentrancy::release(env);
        Ok(())
    }

    /// Recover an unclaimed gift after its expiry. Only the original
    /// sender may reclaim, and no fee is deducted: expiry is a
    /// failure-recovery path, not a withdrawal channel to be taxed.
    pub fn reclaim_gift(
        env: Env,
        sender: Address,
        recipient_hash: BytesN<32>,
    ) -> Result<(), Error> {
        let res = Self::reclaim_guarded(&env, &sender, &recipient_hash);
        monitoring::track_operation(&env, symbol_short!("reclaim"), &sender, res.is_ok());
        res
    }

    fn reclaim_guarded(
        env: &Env,
        sender: &Address,
        recipient_hash: &BytesN<32>,
    ) -> Result<(), Error> {
        if !reentrancy::try_acquire(env) {
            return Err(Error::ReentrancyDetected);
        }
        Self::require_live(env)?;
        sender.require_auth();

        let key = DataKey::Gift(recipient_hash.clone());
        let mut gift: Gift = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(Error::GiftNotFound)?;
        if gift.sender != *sender {
            return Err(Error::NotSender);
        }
        if gift.claimed {
            return Err(Error::GiftAlreadyClaimed);
        }
        if env.ledger().timestamp() < gift.expiry {
            return Err(Error::GiftNotExpiredYet);
        }

        gift.claimed = true;
        env.storage().persistent().remove(&key);

        let vault = Self::vault_client(env)?;
        vault.release(
            &env.current_contract_address(),
            &gift.token,
            sender,
            &gift.amount_or_id,
            &gift.kind,
            &0_i128,
        );

        emit_gift_reclaimed(
            env,
            GiftReclaimed {
                version: EVENT_VERSION,
                recipient_hash: recipient_hash.clone(),
                token: gift.token,
                sender: sender.clone(),
                amount_or_id: gift.amount_or_id,
                timestamp: env.ledger().timestamp(),
            },
        );

        reentrancy::release(env);
        Ok(())
    }

    /// Ad-hoc transfer for authorized integrators, bypassing escrow
    /// entirely. The caller is the source; the router still enforces
    /// every per-kind precondition.
    pub fn direct_token_transfer(
        env: Env,
        caller: Address,
        token: Address,
        recipient: Address,
        amount_or_id: i128,
    ) -> Result<(), Error> {
        if !reentrancy::try_acquire(&env) {
            return Err(Error::ReentrancyDetected);
        }
        Self::require_live(&env)?;
        caller.require_auth();
        if !access::is_authorized(&env, &caller) {
            return Err(Error::Unauthorized);
        }

        let router = Self::router_client(&env)?;
        router.transfer(
            &env.current_contract_address(),
            &caller,
            &token,
            &caller,
            &recipient,
            &amount_or_id,
        );

        reentrancy::release(&env);
        Ok(())
    }

    pub fn get_gift(env: Env, recipient_hash: BytesN<32>) -> Option<Gift> {
        env.storage().persistent().get(&DataKey::Gift(recipient_hash))
    }

    pub fn has_gift(env: Env, recipient_hash: BytesN<32>) -> bool {
        env.storage().persistent().has(&DataKey::Gift(recipient_hash))
    }

    pub fn fee_schedule(env: Env) -> FeeSchedule {
        Self::schedule(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        env.storage().instance().get(&DataKey::Paused).unwrap_or(false)
    }

    pub fn health_check(env: Env) -> HealthStatus {
        monitoring::health_check(&env)
    }

    /// Validate the post-deployment authorization chain, failing fast
    /// on the first missing link instead of leaving it to surface as
    /// per-call authorization errors.
    pub fn assert_wired(env: Env) -> Result<(), Error> {
        let router_addr: Address = env
            .storage()
            .instance()
            .get(&DataKey::Router)
            .ok_or(Error::NotInitialized)?;
        let vault_addr: Address = env
            .storage()
            .instance()
            .get(&DataKey::Vault)
            .ok_or(Error::NotInitialized)?;
        let me = env.current_contract_address();

        let router = RouterClient::new(&env, &router_addr);
        let vault = VaultClient::new(&env, &vault_addr);

        if vault.router() != router_addr {
            return Err(Error::WiringIncomplete);
        }
        let classifier = ClassifierClient::new(&env, &router.classifier());
        if !classifier.is_authorized(&router_addr) {
            return Err(Error::WiringIncomplete);
        }
        if !router.is_authorized(&vault_addr) {
            return Err(Error::WiringIncomplete);
        }
        if !router.is_authorized(&me) {
            return Err(Error::WiringIncomplete);
        }
        if !vault.is_authorized(&me) {
            return Err(Error::WiringIncomplete);
        }
        Ok(())
    }

    /// Shared deposit path for the single and batch verbs. Pause,
    /// guard, and sender auth are the caller's responsibility.
    fn deposit_one(
        env: &Env,
        sender: &Address,
        token: &Address,
        recipient_hash: &BytesN<32>,
        amount_or_id: i128,
        expiry_seconds: u64,
    ) -> Result<(), Error> {
        if reveal::is_zero_hash(env, recipient_hash) {
            return Err(Error::InvalidRecipientHash);
        }
        if !is_contract_address(token) {
            return Err(Error::InvalidToken);
        }
        if *sender == env.current_contract_address() {
            return Err(Error::InvalidSender);
        }
        if amount_or_id <= 0 {
            return Err(Error::InvalidAmount);
        }
        if expiry_seconds == 0 {
            return Err(Error::InvalidExpiry);
        }
        let expiry = env
            .ledger()
            .timestamp()
            .checked_add(expiry_seconds)
            .ok_or(Error::InvalidExpiry)?;
        let key = DataKey::Gift(recipient_hash.clone());
        if env.storage().persistent().has(&key) {
            return Err(Error::GiftAlreadyExists);
        }

        // Kind resolution probes the token contract; the reentrancy
        // guard keeps a hostile probe from re-entering this state
        // machine before the record below is written.
        let router = Self::router_client(env)?;
        let kind = router.resolve_kind(&env.current_contract_address(), token);

        let schedule = Self::schedule(env);
        let fee = match kind {
            TokenKind::Fungible => fee_math::percentage_fee(amount_or_id, schedule.percentage_fee),
            _ => schedule.flat_fee,
        };

        // EFFECTS: persist the record before custody moves.
        let gift = Gift {
            token: token.clone(),
            amount_or_id,
            sender: sender.clone(),
            kind,
            fee,
            claimed: false,
            expiry,
        };
        invariants::assert_gift(&gift);
        env.storage().persistent().set(&key, &gift);
        env.storage()
            .persistent()
            .extend_ttl(&key, GIFT_LIFETIME_THRESHOLD, GIFT_BUMP_AMOUNT);

        // INTERACTION: pull the asset into custody.
        let vault = Self::vault_client(env)?;
        vault.receive(
            &env.current_contract_address(),
            token,
            sender,
            recipient_hash,
            &amount_or_id,
            &kind,
            &fee,
        );

        emit_gift_deposited(
            env,
            GiftDeposited {
                version: EVENT_VERSION,
                recipient_hash: recipient_hash.clone(),
                token: token.clone(),
                kind,
                amount_or_id,
                sender: sender.clone(),
                fee,
                expiry,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    fn schedule(env: &Env) -> FeeSchedule {
        env.storage()
            .instance()
            .get(&DataKey::FeeSchedule)
            .unwrap_or(FeeSchedule {
                percentage_fee: 0,
                flat_fee: 0,
            })
    }

    fn router_client(env: &Env) -> Result<RouterClient<'_>, Error> {
        let router: Address = env
            .storage()
            .instance()
            .get(&DataKey::Router)
            .ok_or(Error::NotInitialized)?;
        Ok(RouterClient::new(env, &router))
    }

    fn vault_client(env: &Env) -> Result<VaultClient<'_>, Error> {
        let vault: Address = env
            .storage()
            .instance()
            .get(&DataKey::Vault)
            .ok_or(Error::NotInitialized)?;
        Ok(VaultClient::new(env, &vault))
    }

    fn require_live(env: &Env) -> Result<(), Error> {
        if !access::has_admin(env) {
            return Err(Error::NotInitialized);
        }
        if env.storage().instance().get(&DataKey::Paused).unwrap_or(false) {
            return Err(Error::Paused);
        }
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        Ok(())
    }

    fn require_admin(env: &Env) -> Result<Address, Error> {
        let admin = access::admin(env).ok_or(Error::NotInitialized)?;
        admin.require_auth();
        Ok(admin)
    }
}
