use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String};
use tokentide_core::kind::TokenKind;

pub const EVENT_VERSION: u32 = 1;

#[contracttype]
#[derive(Clone, Debug)]
pub struct GiftDeposited {
    pub version: u32,
    pub recipient_hash: BytesN<32>,
    pub token: Address,
    pub kind: TokenKind,
    pub amount_or_id: i128,
    pub sender: Address,
    pub fee: i128,
    pub expiry: u64,
    pub timestamp: u64,
}

pub fn emit_gift_deposited(env: &Env, event: GiftDeposited) {
    let topics = (symbol_short!("deposited"), event.recipient_hash.clone());
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct GiftClaimed {
    pub version: u32,
    pub recipient_hash: BytesN<32>,
    pub token: Address,
    pub recipient: Address,
    pub amount_or_id: i128,
    pub fee: i128,
    pub timestamp: u64,
}

pub fn emit_gift_claimed(env: &Env, event: GiftClaimed) {
    let topics = (symbol_short!("claimed"), event.recipient_hash.clone());
    env.events().publish(topics, event);
}

/// Sender-initiated recovery of an expired gift. Distinct from
/// [`GiftClaimed`] so indexers can separate the two terminal paths.
#[contracttype]
#[derive(Clone, Debug)]
pub struct GiftReclaimed {
    pub version: u32,
    pub recipient_hash: BytesN<32>,
    pub token: Address,
    pub sender: Address,
    pub amount_or_id: i128,
    pub timestamp: u64,
}

pub fn emit_gift_reclaimed(env: &Env, event: GiftReclaimed) {
    let topics = (symbol_short!("reclaimed"), event.recipient_hash.clone());
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct BatchDeposited {
    pub version: u32,
    pub token: Address,
    pub count: u32,
    pub total_amount: i128,
    pub timestamp: u64,
}

pub fn emit_batch_deposited(env: &Env, event: BatchDeposited) {
    let topics = (symbol_short!("b_dep"),);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct FeesUpdated {
    pub version: u32,
    pub percentage_fee: u32,
    pub flat_fee: i128,
    pub updated_by: Address,
    pub timestamp: u64,
}

pub fn emit_fees_updated(env: &Env, event: FeesUpdated) {
    let topics = (symbol_short!("fees"),);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PauseChanged {
    pub paused: bool,
    pub reason: Option<String>,
    pub admin: Address,
    pub timestamp: u64,
}

pub fn emit_pause_changed(env: &Env, event: PauseChanged) {
    let topics = (symbol_short!("pause"),);
    env.events().publish(topics, event);
}
