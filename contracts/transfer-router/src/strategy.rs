//! Per-kind transfer strategies.
//!
//! Each strategy implements the same contract: check every precondition
//! for its token standard, each violation surfacing as a distinct named
//! error, then perform the movement through a failure-tolerant
//! `try_`-invoke so a misbehaving token yields `TransferFailed` rather
//! than a raw trap.

use soroban_sdk::{token, Address, Env};
use tokentide_core::interfaces::{MultiTokenClient, NonFungibleClient};
use tokentide_core::kind::{token_id, TokenKind};

use crate::Error;

pub fn execute(
    env: &Env,
    kind: TokenKind,
    token: &Address,
    from: &Address,
    to: &Address,
    amount_or_id: i128,
) -> Result<(), Error> {
    match kind {
        TokenKind::Fungible => fungible(env, token, from, to, amount_or_id),
        TokenKind::UniqueSingleOwner => unique_single_owner(env, token, from, to, amount_or_id),
        TokenKind::UniqueMultiBalance => unique_multi_balance(env, token, from, to, amount_or_id),
        TokenKind::Unknown => Err(Error::UnsupportedTokenType),
    }
}

/// Fungible moves ride the allowance rails: the source must have
/// granted this contract spend rights beforehand.
fn fungible(
    env: &Env,
    token_addr: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), Error> {
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    let spender = env.current_contract_address();
    let client = token::TokenClient::new(env, token_addr);
    if client.balance(from) < amount {
        return Err(Error::InsufficientBalance);
    }
    if client.allowance(from, &spender) < amount {
        return Err(Error::InsufficientAllowance);
    }
    match client.try_transfer_from(&spender, from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}

/// Single-owner items move on a per-item approval or an operator-wide
/// one; either suffices.
fn unique_single_owner(
    env: &Env,
    token_addr: &Address,
    from: &Address,
    to: &Address,
    amount_or_id: i128,
) -> Result<(), Error> {
    let id = token_id(amount_or_id).ok_or(Error::InvalidAmount)?;
    let operator = env.current_contract_address();
    let client = NonFungibleClient::new(env, token_addr);

    let item_approved = matches!(
        client.try_get_approved(&id),
        Ok(Ok(Some(approved))) if approved == operator
    );
    let operator_approved = matches!(
        client.try_is_approved_for_all(from, &operator),
        Ok(Ok(true))
    );
    if !item_approved && !operator_approved {
        return Err(Error::ItemNotApproved);
    }
    match client.try_transfer_from(&operator, from, to, &id) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}

/// Multi-balance items have no per-item approval; the operator-wide
/// grant is mandatory. Quantity is fixed at one unit per operation.
fn unique_multi_balance(
    env: &Env,
    token_addr: &Address,
    from: &Address,
    to: &Address,
    amount_or_id: i128,
) -> Result<(), Error> {
    let id = token_id(amount_or_id).ok_or(Error::InvalidAmount)?;
    let operator = env.current_contract_address();
    let client = MultiTokenClient::new(env, token_addr);

    if !matches!(
        client.try_is_approved_for_all(from, &operator),
        Ok(Ok(true))
    ) {
        return Err(Error::OperatorNotApproved);
    }
    match client.try_transfer_from(&operator, from, to, &id, &1_i128) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}
