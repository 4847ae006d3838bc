use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};
use tokentide_core::kind::TokenKind;

pub const EVENT_VERSION: u32 = 1;

#[contracttype]
#[derive(Clone, Debug)]
pub struct VaultReceived {
    pub version: u32,
    pub token: Address,
    pub sender: Address,
    pub recipient_hash: BytesN<32>,
    pub amount_or_id: i128,
    pub kind: TokenKind,
    pub fee: i128,
    pub timestamp: u64,
}

pub fn emit_vault_received(env: &Env, event: VaultReceived) {
    let topics = (symbol_short!("received"), event.recipient_hash.clone());
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct VaultReleased {
    pub version: u32,
    pub token: Address,
    pub recipient: Address,
    pub amount_or_id: i128,
    pub kind: TokenKind,
    pub fee: i128,
    pub timestamp: u64,
}

pub fn emit_vault_released(env: &Env, event: VaultReleased) {
    let topics = (symbol_short!("released"), event.recipient.clone());
    env.events().publish(topics, event);
}

/// A unique item pushed into custody by an external transfer, observed
/// through the receiver hook.
#[contracttype]
#[derive(Clone, Debug)]
pub struct TokenPushed {
    pub operator: Address,
    pub from: Address,
    pub token_id: u64,
    pub timestamp: u64,
}

pub fn emit_token_pushed(env: &Env, event: TokenPushed) {
    let topics = (symbol_short!("pushed"),);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct AdminRotated {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

pub fn emit_admin_rotated(env: &Env, event: AdminRotated) {
    let topics = (symbol_short!("admin"),);
    env.events().publish(topics, event);
}
