//! Cross-function reentrancy guard shared by the protocol contracts.
//!
//! Reentrancy occurs when an external call (a token transfer, or a
//! receiver hook on the destination) calls back into a protected
//! function before the first invocation completes. Each contract holds
//! a boolean flag in its own instance storage for the full duration of
//! any state-mutating entry point; a nested entry attempt observes the
//! flag and surfaces the contract's reentrancy error instead.
//!
//! The error return makes the nested frame fail in isolation: the host
//! rolls back the failed sub-invocation (including this flag) while the
//! outer call proceeds to completion. Early error returns after a
//! successful acquire are safe for the same reason — the failed frame's
//! writes never commit, so the guard cannot get stuck.

use soroban_sdk::{contracttype, Env};

#[contracttype]
#[derive(Clone)]
enum GuardKey {
    Entered,
}

/// Attempts to acquire the guard.
///
/// Returns `false` when a call chain already holds it; the caller must
/// surface its own reentrancy error without touching any state.
pub fn try_acquire(env: &Env) -> bool {
    if env.storage().instance().has(&GuardKey::Entered) {
        return false;
    }
    env.storage().instance().set(&GuardKey::Entered, &true);
    true
}

/// Releases the guard on the success path.
pub fn release(env: &Env) {
    env.storage().instance().remove(&GuardKey::Entered);
}

/// Whether the guard is currently held (useful in tests).
pub fn is_entered(env: &Env) -> bool {
    env.storage().instance().has(&GuardKey::Entered)
}
