//! Cross-contract call surfaces.
//!
//! Client types for every boundary in the protocol call chain
//! (manager → vault → router → classifier), plus the token-standard
//! interfaces the classifier probes and the router drives. Fungible
//! tokens use the standard `soroban_sdk::token` client and are not
//! redeclared here.

use soroban_sdk::{contractclient, symbol_short, Address, BytesN, Env, Symbol};

use crate::kind::TokenKind;

/// Interface tag probed for unique-single-owner tokens.
pub const NON_FUNGIBLE_INTERFACE: Symbol = symbol_short!("nft");

/// Interface tag probed for unique-multi-balance tokens.
pub const MULTI_TOKEN_INTERFACE: Symbol = symbol_short!("multitok");

/// Acknowledgment returned by custody receiver hooks.
pub const RECEIVE_ACK: Symbol = symbol_short!("recvd");

/// Self-reported interface introspection.
///
/// Probed, never trusted on its own: a contract claiming an interface
/// still has to satisfy that interface's calls when the router drives
/// it, and any misbehavior there surfaces as a named transfer error.
#[contractclient(name = "IntrospectionClient")]
pub trait Introspection {
    fn supports(env: Env, interface: Symbol) -> bool;
}

/// Unique-item token with single-owner semantics.
#[contractclient(name = "NonFungibleClient")]
pub trait NonFungible {
    fn owner_of(env: Env, token_id: u64) -> Address;
    fn get_approved(env: Env, token_id: u64) -> Option<Address>;
    fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool;
    fn approve(
        env: Env,
        approver: Address,
        approved: Address,
        token_id: u64,
        live_until_ledger: u32,
    );
    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, token_id: u64);
}

/// Unique-item token with per-holder balances.
///
/// No per-item approval exists for this kind; spend rights are granted
/// operator-wide.
#[contractclient(name = "MultiTokenClient")]
pub trait MultiToken {
    fn balance_of(env: Env, owner: Address, id: u64) -> i128;
    fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool;
    fn set_approval_for_all(env: Env, owner: Address, operator: Address, approved: bool);
    fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        id: u64,
        amount: i128,
    );
}

/// Classifier surface consumed by the router (and wiring validation).
#[contractclient(name = "ClassifierClient")]
pub trait Classifier {
    fn classify(env: Env, caller: Address, token: Address) -> TokenKind;
    fn cached_kind(env: Env, token: Address) -> TokenKind;
    fn is_authorized(env: Env, principal: Address) -> bool;
}

/// Router surface consumed by the vault and the manager.
#[contractclient(name = "RouterClient")]
pub trait Router {
    fn resolve_kind(env: Env, caller: Address, token: Address) -> TokenKind;
    fn transfer(
        env: Env,
        caller: Address,
        origin: Address,
        token: Address,
        from: Address,
        to: Address,
        amount_or_id: i128,
    ) -> TokenKind;
    fn classifier(env: Env) -> Address;
    fn is_authorized(env: Env, principal: Address) -> bool;
}

/// Vault surface consumed by the manager (and wiring validation).
#[contractclient(name = "VaultClient")]
pub trait Vault {
    fn receive(
        env: Env,
        caller: Address,
        token: Address,
        sender: Address,
        recipient_hash: BytesN<32>,
        amount_or_id: i128,
        kind: TokenKind,
        fee: i128,
    );
    fn release(
        env: Env,
        caller: Address,
        token: Address,
        recipient: Address,
        amount_or_id: i128,
        kind: TokenKind,
        fee: i128,
    );
    fn router(env: Env) -> Address;
    fn is_authorized(env: Env, principal: Address) -> bool;
}
