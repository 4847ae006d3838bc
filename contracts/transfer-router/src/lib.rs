#![no_std]
//! Type-polymorphic transfer executor.
//!
//! Resolves a token's kind through the classifier (cache first, then a
//! fresh classification) and performs the transfer call sequence that
//! kind requires. Every entry point is capability-gated, pausable, and
//! reentrancy-guarded; per-kind precondition failures surface as
//! distinct named errors.

mod events;
mod strategy;

use soroban_sdk::{contract, contracterror, contractimpl, contracttype, Address, Env};
use tokentide_core::access;
use tokentide_core::interfaces::ClassifierClient;
use tokentide_core::kind::{is_contract_address, TokenKind};
use tokentide_core::reentrancy;

use events::{
    emit_pause_changed, emit_transfer_executed, PauseChanged, TransferExecuted, EVENT_VERSION,
};

const DAY_IN_LEDGERS: u32 = 17280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 200,
    NotInitialized = 201,
    Unauthorized = 202,
    Paused = 203,
    ReentrancyDetected = 204,
    InvalidToken = 205,
    InvalidRecipient = 206,
    UnsupportedTokenType = 207,
    InvalidAmount = 208,
    InsufficientBalance = 209,
    InsufficientAllowance = 210,
    ItemNotApproved = 211,
    OperatorNotApproved = 212,
    TransferFailed = 213,
}

#[contracttype]
pub enum DataKey {
    Classifier,
    Paused,
}

#[contract]
pub struct TransferRouter;

#[contractimpl]
impl TransferRouter {
    pub fn init(env: Env, admin: Address, classifier: Address) -> Result<(), Error> {
        if access::has_admin(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if !is_contract_address(&classifier) {
            return Err(Error::InvalidToken);
        }
        access::set_admin(&env, &admin);
        env.storage().instance().set(&DataKey::Classifier, &classifier);
        Ok(())
    }

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

    /// Circuit breaker: while paused, `transfer` rejects uniformly.
    pub fn set_paused(env: Env, paused: bool) -> Result<(), Error> {
        let admin = Self::require_admin(&env)?;
        env.storage().instance().set(&DataKey::Paused, &paused);
        emit_pause_changed(
            &env,
            PauseChanged {
                paused,
                admin,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    pub fn classifier(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::Classifier)
            .unwrap_or_else(|| panic!("not initialized"))
    }

    /// Cached-then-classify kind resolution for authorized callers.
    pub fn resolve_kind(env: Env, caller: Address, token: Address) -> Result<TokenKind, Error> {
        caller.require_auth();
        if !access::has_admin(&env) {
            return Err(Error::NotInitialized);
        }
        if !access::is_authorized(&env, &caller) {
            return Err(Error::Unauthorized);
        }
        Self::resolve(&env, &token)
    }

    /// Move `amount_or_id` of `token` from `from` to `to`.
    ///
    /// Kind-specific preconditions are checked before any movement; see
    /// [`strategy`]. `origin` is carried into the transfer record for
    /// multi-hop delegation auditing and plays no part in authorization.
    pub fn transfer(
        env: Env,
        caller: Address,
        origin: Address,
        token: Address,
        from: Address,
        to: Address,
        amount_or_id: i128,
    ) -> Result<TokenKind, Error> {
        if !reentrancy::try_acquire(&env) {
            return Err(Error::ReentrancyDetected);
        }
        caller.require_auth();
        if !access::has_admin(&env) {
            return Err(Error::NotInitialized);
        }
        if Self::is_paused(&env) {
            return Err(Error::Paused);
        }
        if !access::is_authorized(&env, &caller) {
            return Err(Error::Unauthorized);
        }
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if !is_contract_address(&token) {
            return Err(Error::InvalidToken);
        }
        if to == from || to == env.current_contract_address() {
            return Err(Error::InvalidRecipient);
        }

        let kind = Self::resolve(&env, &token)?;
        strategy::execute(&env, kind, &token, &from, &to, amount_or_id)?;

        emit_transfer_executed(
            &env,
            TransferExecuted {
                version: EVENT_VERSION,
                token,
                kind,
                from,
                to,
                amount_or_id,
                caller,
                origin,
                timestamp: env.ledger().timestamp(),
            },
        );

        reentrancy::release(&env);
        Ok(kind)
    }

    fn resolve(env: &Env, token: &Address) -> Result<TokenKind, Error> {
        let classifier: Address = env
            .storage()
            .instance()
            .get(&DataKey::Classifier)
            .ok_or(Error::NotInitialized)?;
        let client = ClassifierClient::new(env, &classifier);

        let cached = client.cached_kind(token);
        let kind = if cached == TokenKind::Unknown {
            client.classify(&env.current_contract_address(), token)
        } else {
            cached
        };
        if kind == TokenKind::Unknown {
            return Err(Error::UnsupportedTokenType);
        }
        Ok(kind)
    }

    fn is_paused(env: &Env) -> bool {
        env.storage().instance().get(&DataKey::Paused).unwrap_or(false)
    }

    fn require_admin(env: &Env) -> Result<Address, Error> {
        let admin = access::admin(env).ok_or(Error::NotInitialized)?;
        admin.require_auth();
        Ok(admin)
    }
}
