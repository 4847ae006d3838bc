#![no_std]
//! Token-type classifier.
//!
//! Given an arbitrary address, determines whether it behaves as a
//! fungible token, a unique-item token with single-owner semantics, or
//! a unique-item token with per-holder balances, and memoizes the
//! result per address. Probes run against untrusted contracts: every
//! probe is `try_`-invoked so a reverting or malformed token degrades
//! to a miss record instead of a fault.

mod events;

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};
use tokentide_core::access;
use tokentide_core::interfaces::{
    IntrospectionClient, MULTI_TOKEN_INTERFACE, NON_FUNGIBLE_INTERFACE,
};
use tokentide_core::kind::{is_contract_address, TokenKind};

use events::{emit_probe_miss, emit_token_classified, ProbeMiss, TokenClassified, EVENT_VERSION};

const DAY_IN_LEDGERS: u32 = 17280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;
const CACHE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const CACHE_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 100,
    NotInitialized = 101,
    Unauthorized = 102,
}

#[contracttype]
pub enum DataKey {
    /// Memoized classification per token contract. Never written for
    /// `Unknown`, never mutated once set.
    Kind(Address),
}

#[contract]
pub struct TokenClassifier;

#[contractimpl]
impl TokenClassifier {
    pub fn init(env: Env, admin: Address) -> Result<(), Error> {
        if access::has_admin(&env) {
            return Err(Error::AlreadyInitialized);
        }
        access::set_admin(&env, &admin);
        Ok(())
    }

    /// Grant `principal` permission to run classifications (admin only).
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

    /// Read-only cache lookup; `Unknown` when the address has never
    /// been classified. Side-effect-free.
    pub fn cached_kind(env: Env, token: Address) -> TokenKind {
        Self::cached(&env, &token)
    }

    /// Determine which token standard `token` behaves as.
    ///
    /// Probes run in strict order, short-circuiting on the first match:
    /// contract-address check, cache, single-owner introspection,
    /// multi-balance introspection, fungible behavioral probe. Every
    /// non-matching probe emits a [`ProbeMiss`] audit record; no probe
    /// failure ever aborts the classification.
    ///
    /// `Unknown` results are never cached, so an address that later
    /// gains code (or a token that starts answering its probes) is
    /// re-examined on the next call.
    pub fn classify(env: Env, caller: Address, token: Address) -> Result<TokenKind, Error> {
        caller.require_auth();
        if !access::has_admin(&env) {
            return Err(Error::NotInitialized);
        }
        if !access::is_authorized(&env, &caller) {
            return Err(Error::Unauthorized);
        }
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if !is_contract_address(&token) {
            emit_probe_miss(
                &env,
                ProbeMiss {
                    version: EVENT_VERSION,
                    token,
                    probe: symbol_short!("code"),
                    reason: symbol_short!("no_code"),
                    caller,
                    timestamp: env.ledger().timestamp(),
                },
            );
            return Ok(TokenKind::Unknown);
        }

        let cached = Self::cached(&env, &token);
        if cached != TokenKind::Unknown {
            return Ok(cached);
        }

        let kind = Self::probe(&env, &caller, &token);
        if kind != TokenKind::Unknown {
            let key = DataKey::Kind(token.clone());
            env.storage().persistent().set(&key, &kind);
            env.storage()
                .persistent()
                .extend_ttl(&key, CACHE_LIFETIME_THRESHOLD, CACHE_BUMP_AMOUNT);
            emit_token_classified(
                &env,
                TokenClassified {
                    version: EVENT_VERSION,
                    token,
                    kind,
                    caller,
                    timestamp: env.ledger().timestamp(),
                },
            );
        }
        Ok(kind)
    }

    fn cached(env: &Env, token: &Address) -> TokenKind {
        env.storage()
            .persistent()
            .get(&DataKey::Kind(token.clone()))
            .unwrap_or(TokenKind::Unknown)
    }

    fn probe(env: &Env, caller: &Address, token: &Address) -> TokenKind {
        let introspection = IntrospectionClient::new(env, token);

        match introspection.try_supports(&NON_FUNGIBLE_INTERFACE) {
            Ok(Ok(true)) => return TokenKind::UniqueSingleOwner,
            Ok(_) => Self::miss(env, caller, token, symbol_short!("nft"), symbol_short!("declined")),
            Err(_) => Self::miss(env, caller, token, symbol_short!("nft"), symbol_short!("reverted")),
        }

        match introspection.try_supports(&MULTI_TOKEN_INTERFACE) {
            Ok(Ok(true)) => return TokenKind::UniqueMultiBalance,
            Ok(_) => Self::miss(
                env,
                caller,
                token,
                symbol_short!("multitok"),
                symbol_short!("declined"),
            ),
            Err(_) => Self::miss(
                env,
                caller,
                token,
                symbol_short!("multitok"),
                symbol_short!("reverted"),
            ),
        }

        // Both reads must succeed jointly before concluding Fungible: a
        // contract answering only one of the two is not treated as a
        // well-behaved fungible token.
        let fungible = token::TokenClient::new(env, token);
        let decimals_ok = matches!(fungible.try_decimals(), Ok(Ok(_)));
        let balance_ok = matches!(
            fungible.try_balance(&env.current_contract_address()),
            Ok(Ok(_))
        );
        if decimals_ok && balance_ok {
            return TokenKind::Fungible;
        }
        Self::miss(
            env,
            caller,
            token,
            symbol_short!("fungible"),
            symbol_short!("reverted"),
        );

        TokenKind::Unknown
    }

    fn miss(env: &Env, caller: &Address, token: &Address, probe: Symbol, reason: Symbol) {
        emit_probe_miss(
            env,
            ProbeMiss {
                version: EVENT_VERSION,
                token: token.clone(),
                probe,
                reason,
                caller: caller.clone(),
                timestamp: env.ledger().timestamp(),
            },
        );
    }

    fn require_admin(env: &Env) -> Result<(), Error> {
        let admin = access::admin(env).ok_or(Error::NotInitialized)?;
        admin.require_auth();
        Ok(())
    }
}
