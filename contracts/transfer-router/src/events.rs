use soroban_sdk::{contracttype, symbol_short, Address, Env};
use tokentide_core::kind::TokenKind;

pub const EVENT_VERSION: u32 = 1;

/// Completed transfer record. `origin` is the ultimate originating
/// caller behind a multi-hop delegation, as distinct from the
/// immediate `caller`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct TransferExecuted {
    pub version: u32,
    pub token: Address,
    pub kind: TokenKind,
    pub from: Address,
    pub to: Address,
    pub amount_or_id: i128,
    pub caller: Address,
    pub origin: Address,
    pub timestamp: u64,
}

pub fn emit_transfer_executed(env: &Env, event: TransferExecuted) {
    let topics = (symbol_short!("transfer"), event.token.clone());
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PauseChanged {
    pub paused: bool,
    pub admin: Address,
    pub timestamp: u64,
}

pub fn emit_pause_changed(env: &Env, event: PauseChanged) {
    let topics = (symbol_short!("pause"),);
    env.events().publish(topics, event);
}
