#![no_std]
//! Custodial escrow holder.
//!
//! Receives tokens on behalf of pending gifts and releases them on
//! claim or reclaim. A pure custody/movement primitive: gift metadata
//! lives in the orchestrator, and every asset move goes through the
//! transfer router. Both custody entry points are restricted to
//! authorized orchestrator callers and reentrancy-guarded.

mod events;
#[cfg(test)]
mod test;

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, token, Address, BytesN, Env, Symbol,
};
use tokentide_core::access;
use tokentide_core::interfaces::{
    MultiTokenClient, NonFungibleClient, RouterClient, RECEIVE_ACK,
};
use tokentide_core::kind::{token_id, TokenKind};
use tokentide_core::reentrancy;

use events::{
    emit_admin_rotated, emit_token_pushed, emit_vault_received, emit_vault_released, AdminRotated,
    TokenPushed, VaultReceived, VaultReleased, EVENT_VERSION,
};

const DAY_IN_LEDGERS: u32 = 17280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Spend rights staged for the router are scoped to roughly one day.
const APPROVE_LIVE_LEDGERS: u32 = DAY_IN_LEDGERS;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 300,
    NotInitialized = 301,
    Unauthorized = 302,
    ReentrancyDetected = 303,
    InvalidItemId = 304,
    InvalidFee = 305,
    FeePaymentFailed = 306,
    UnsupportedKind = 307,
    InvalidFeeToken = 308,
}

#[contracttype]
pub enum DataKey {
    Router,
    FeeToken,
    FeeWallet,
}

#[contract]
pub struct GiftVault;

#[contractimpl]
impl GiftVault {
    pub fn init(
        env: Env,
        admin: Address,
        router: Address,
        fee_token: Address,
        fee_wallet: Address,
    ) -> Result<(), Error> {
        if access::has_admin(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if !tokentide_core::kind::is_contract_address(&fee_token) {
            return Err(Error::InvalidFeeToken);
        }
        access::set_admin(&env, &admin);
        env.storage().instance().set(&DataKey::Router, &router);
        env.storage().instance().set(&DataKey::FeeToken, &fee_token);
        env.storage().instance().set(&DataKey::FeeWallet, &fee_wallet);
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

    /// Rotate the top-level administrative capability.
    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), Error> {
        let old_admin = Self::require_admin(&env)?;
        access::set_admin(&env, &new_admin);
        emit_admin_rotated(
            &env,
            AdminRotated {
                old_admin,
                new_admin,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    pub fn set_fee_wallet(env: Env, new_wallet: Address) -> Result<(), Error> {
        Self::require_admin(&env)?;
        env.storage().instance().set(&DataKey::FeeWallet, &new_wallet);
        Ok(())
    }

    pub fn admin(env: Env) -> Option<Address> {
        access::admin(&env)
    }

    pub fn router(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::Router)
            .unwrap_or_else(|| panic!("not initialized"))
    }

    /// `(fee_token, fee_wallet)` currently configured.
    pub fn fee_config(env: Env) -> (Address, Address) {
        let fee_token = env.storage().instance().get(&DataKey::FeeToken);
        let fee_wallet = env.storage().instance().get(&DataKey::FeeWallet);
        match (fee_token, fee_wallet) {
            (Some(t), Some(w)) => (t, w),
            _ => panic!("not initialized"),
        }
    }

    /// Pull the asset backing a pending gift from `sender` into custody.
    ///
    /// The router enforces the per-kind approval preconditions; this
    /// contract stores no gift metadata.
    pub fn receive(
        env: Env,
        caller: Address,
        token: Address,
        sender: Address,
        recipient_hash: BytesN<32>,
        amount_or_id: i128,
        kind: TokenKind,
        fee: i128,
    ) -> Result<(), Error> {
        if !reentrancy::try_acquire(&env) {
            return Err(Error::ReentrancyDetected);
        }
        let router_addr = Self::require_orchestrator(&env, &caller)?;
        if fee < 0 {
            return Err(Error::InvalidFee);
        }

        let custody = env.current_contract_address();
        RouterClient::new(&env, &router_addr).transfer(
            &custody,
            &sender,
            &token,
            &sender,
            &custody,
            &amount_or_id,
        );

        emit_vault_received(
            &env,
            VaultReceived {
                version: EVENT_VERSION,
                token,
                sender,
                recipient_hash,
                amount_or_id,
                kind,
                fee,
                timestamp: env.ledger().timestamp(),
            },
        );

        reentrancy::release(&env);
        Ok(())
    }

    /// Push a held asset out of custody to `recipient`, settling `fee`.
    ///
    /// Fungible kinds split the held amount: `amount - fee` goes to the
    /// recipient and `fee` to the fee wallet. Unique kinds move the item
    /// and charge the flat fee in the configured fee token, funded by
    /// the recipient. Fee payment is not best-effort: a failed fee leg
    /// voids the whole release, rolling back the asset movement with it.
    pub fn release(
        env: Env,
        caller: Address,
        token: Address,
        recipient: Address,
        amount_or_id: i128,
        kind: TokenKind,
        fee: i128,
    ) -> Result<(), Error> {
        if !reentrancy::try_acquire(&env) {
            return Err(Error::ReentrancyDetected);
        }
        let router_addr = Self::require_orchestrator(&env, &caller)?;
        if fee < 0 {
            return Err(Error::InvalidFee);
        }

        let custody = env.current_contract_address();
        let router = RouterClient::new(&env, &router_addr);
        let live_until = env.ledger().sequence() + APPROVE_LIVE_LEDGERS;

        match kind {
            TokenKind::Fungible => {
                if fee > amount_or_id {
                    return Err(Error::InvalidFee);
                }
                // One allowance covers both outbound legs.
                token::TokenClient::new(&env, &token).approve(
                    &custody,
                    &router_addr,
                    &amount_or_id,
                    &live_until,
                );
                let net = amount_or_id - fee;
                if net > 0 {
                    router.transfer(&custody, &recipient, &token, &custody, &recipient, &net);
                }
                if fee > 0 {
                    let (_, fee_wallet) = Self::fee_config(env.clone());
                    match router.try_transfer(
                        &custody,
                        &recipient,
                        &token,
                        &custody,
                        &fee_wallet,
                        &fee,
                    ) {
                        Ok(Ok(_)) => {}
                        _ => return Err(Error::FeePaymentFailed),
                    }
                }
            }
            TokenKind::UniqueSingleOwner => {
                let id = token_id(amount_or_id).ok_or(Error::InvalidItemId)?;
                NonFungibleClient::new(&env, &token).approve(
                    &custody,
                    &router_addr,
                    &id,
                    &live_until,
                );
                router.transfer(
                    &custody,
                    &recipient,
                    &token,
                    &custody,
                    &recipient,
                    &amount_or_id,
                );
                Self::charge_flat_fee(&env, &router, &recipient, fee)?;
            }
            TokenKind::UniqueMultiBalance => {
                token_id(amount_or_id).ok_or(Error::InvalidItemId)?;
                MultiTokenClient::new(&env, &token).set_approval_for_all(
                    &custody,
                    &router_addr,
                    &true,
                );
                router.transfer(
                    &custody,
                    &recipient,
                    &token,
                    &custody,
                    &recipient,
                    &amount_or_id,
                );
                Self::charge_flat_fee(&env, &router, &recipient, fee)?;
            }
            TokenKind::Unknown => return Err(Error::UnsupportedKind),
        }

        emit_vault_released(
            &env,
            VaultReleased {
                version: EVENT_VERSION,
                token,
                recipient,
                amount_or_id,
                kind,
                fee,
                timestamp: env.ledger().timestamp(),
            },
        );

        reentrancy::release(&env);
        Ok(())
    }

    /// Receiver-hook acknowledgment for unique-item standards that
    /// notify the destination contract on push transfers. Returning
    /// anything but the ack symbol makes such transfers revert.
    pub fn on_token_received(env: Env, operator: Address, from: Address, token_id: u64) -> Symbol {
        emit_token_pushed(
            &env,
            TokenPushed {
                operator,
                from,
                token_id,
                timestamp: env.ledger().timestamp(),
            },
        );
        RECEIVE_ACK
    }

    /// The flat fee on unique-item releases is funded by the recipient
    /// (the claim transaction's value, in fee-token form).
    fn charge_flat_fee(
        env: &Env,
        router: &RouterClient<'_>,
        payer: &Address,
        fee: i128,
    ) -> Result<(), Error> {
        if fee == 0 {
            return Ok(());
        }
        let (fee_token, fee_wallet) = Self::fee_config(env.clone());
        match router.try_transfer(
            &env.current_contract_address(),
            payer,
            &fee_token,
            payer,
            &fee_wallet,
            &fee,
        ) {
            Ok(Ok(_)) => Ok(()),
            _ => Err(Error::FeePaymentFailed),
        }
    }

    fn require_admin(env: &Env) -> Result<Address, Error> {
        let admin = access::admin(env).ok_or(Error::NotInitialized)?;
        admin.require_auth();
        Ok(admin)
    }

    fn require_orchestrator(env: &Env, caller: &Address) -> Result<Address, Error> {
        caller.require_auth();
        if !access::has_admin(env) {
            return Err(Error::NotInitialized);
        }
        if !access::is_authorized(env, caller) {
            return Err(Error::Unauthorized);
        }
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        env.storage()
            .instance()
            .get(&DataKey::Router)
            .ok_or(Error::NotInitialized)
    }
}
