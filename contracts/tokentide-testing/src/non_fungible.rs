use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};
use tokentide_core::interfaces::NON_FUNGIBLE_INTERFACE;

#[contracttype]
enum DataKey {
    Owner(u64),
    Approved(u64),
    Operator(Address, Address),
}

/// Minimal unique-single-owner token: one exclusive owner per id,
/// per-item and operator-wide approvals.
#[contract]
pub struct MockNonFungible;

#[contractimpl]
impl MockNonFungible {
    pub fn mint(env: Env, to: Address, token_id: u64) {
        if env.storage().persistent().has(&DataKey::Owner(token_id)) {
            panic!("already minted");
        }
        env.storage().persistent().set(&DataKey::Owner(token_id), &to);
    }

    pub fn supports(env: Env, interface: Symbol) -> bool {
        let _ = env;
        interface == NON_FUNGIBLE_INTERFACE
    }

    pub fn owner_of(env: Env, token_id: u64) -> Address {
        env.storage()
            .persistent()
            .get(&DataKey::Owner(token_id))
            .unwrap_or_else(|| panic!("no such token"))
    }

    pub fn get_approved(env: Env, token_id: u64) -> Option<Address> {
        env.storage().persistent().get(&DataKey::Approved(token_id))
    }

    pub fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Operator(owner, operator))
    }

    pub fn approve(
        env: Env,
        approver: Address,
        approved: Address,
        token_id: u64,
        live_until_ledger: u32,
    ) {
        let _ = live_until_ledger;
        approver.require_auth();
        let owner = Self::owner_of(env.clone(), token_id);
        if approver != owner {
            panic!("not the owner");
        }
        env.storage()
            .persistent()
            .set(&DataKey::Approved(token_id), &approved);
    }

    pub fn set_approval_for_all(env: Env, owner: Address, operator: Address, approved: bool) {
        owner.require_auth();
        if approved {
            env.storage()
                .persistent()
                .set(&DataKey::Operator(owner, operator), &true);
        } else {
            env.storage()
                .persistent()
                .remove(&DataKey::Operator(owner, operator));
        }
    }

    pub fn transfer_from(env: Env, spender: Address, from: Address, to: Address, token_id: u64) {
        spender.require_auth();
        let owner = Self::owner_of(env.clone(), token_id);
        if owner != from {
            panic!("not the owner");
        }
        let item_approved =
            Self::get_approved(env.clone(), token_id).is_some_and(|a| a == spender);
        let operator_approved =
            Self::is_approved_for_all(env.clone(), from.clone(), spender.clone());
        if spender != owner && !item_approved && !operator_approved {
            panic!("not approved");
        }
        env.storage().persistent().remove(&DataKey::Approved(token_id));
        env.storage().persistent().set(&DataKey::Owner(token_id), &to);
    }
}
