use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};
use tokentide_core::kind::TokenKind;

pub const EVENT_VERSION: u32 = 1;

/// A probe that did not match, kept as an audit record for indexers.
/// Never control flow: a miss only means "not this kind".
#[contracttype]
#[derive(Clone, Debug)]
pub struct ProbeMiss {
    pub version: u32,
    pub token: Address,
    pub probe: Symbol,
    pub reason: Symbol,
    pub caller: Address,
    pub timestamp: u64,
}

pub fn emit_probe_miss(env: &Env, event: ProbeMiss) {
    let topics = (symbol_short!("probemiss"), event.token.clone());
    env.events().publish(topics, event);
}

/// Cache population record, emitted once per address when a
/// classification first lands.
#[contracttype]
#[derive(Clone, Debug)]
pub struct TokenClassified {
    pub version: u32,
    pub token: Address,
    pub kind: TokenKind,
    pub caller: Address,
    pub timestamp: u64,
}

pub fn emit_token_classified(env: &Env, event: TokenClassified) {
    let topics = (symbol_short!("kind"), event.token.clone());
    env.events().publish(topics, event);
}
