//! Admin and per-contract caller capability sets.
//!
//! Every protocol contract keeps its own independent authorization set:
//! a principal must be granted capability in *each* component it calls
//! into, and a grant in one component never implies a grant in another.
//! An ungranted link in the deployment wiring fails closed with that
//! component's own `Unauthorized` code.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone)]
enum AccessKey {
    Admin,
    Grant(Address),
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&AccessKey::Admin, admin);
}

pub fn admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&AccessKey::Admin)
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&AccessKey::Admin)
}

/// Grants `principal` the caller capability on this contract and emits
/// an audit record.
///
/// Admin authorization must already be established by the caller.
pub fn grant(env: &Env, principal: &Address) {
    env.storage()
        .instance()
        .set(&AccessKey::Grant(principal.clone()), &true);
    env.events().publish(
        (symbol_short!("acl"), symbol_short!("grant")),
        (principal.clone(), env.ledger().timestamp()),
    );
}

/// Revokes a previously granted capability and emits an audit record.
pub fn revoke(env: &Env, principal: &Address) {
    env.storage()
        .instance()
        .remove(&AccessKey::Grant(principal.clone()));
    env.events().publish(
        (symbol_short!("acl"), symbol_short!("revoke")),
        (principal.clone(), env.ledger().timestamp()),
    );
}

pub fn is_authorized(env: &Env, principal: &Address) -> bool {
    env.storage()
        .instance()
        .has(&AccessKey::Grant(principal.clone()))
}
