use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};
use tokentide_core::interfaces::MULTI_TOKEN_INTERFACE;

#[contracttype]
enum DataKey {
    Balance(Address, u64),
    Operator(Address, Address),
}

/// Minimal unique-multi-balance token: per-holder quantities per id,
/// operator-wide approval only.
#[contract]
pub struct MockMultiToken;

#[contractimpl]
impl MockMultiToken {
    pub fn mint(env: Env, to: Address, id: u64, amount: i128) {
        let balance: i128 = env
            .storage()
            .persistent()
            .get(&DataKey::Balance(to.clone(), id))
            .unwrap_or(0);
        env.storage()
            .persistent()
            .set(&DataKey::Balance(to, id), &(balance + amount));
    }

    pub fn supports(env: Env, interface: Symbol) -> bool {
        let _ = env;
        interface == MULTI_TOKEN_INTERFACE
    }

    pub fn balance_of(env: Env, owner: Address, id: u64) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(owner, id))
            .unwrap_or(0)
    }

    pub fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Operator(owner, operator))
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

    pub fn transfer_from(env: Env, spender: Address, from: Address, to: Address, id: u64, amount: i128) {
        spender.require_auth();
        if spender != from && !Self::is_approved_for_all(env.clone(), from.clone(), spender.clone())
        {
            panic!("not approved");
        }
        let from_balance = Self::balance_of(env.clone(), from.clone(), id);
        if from_balance < amount {
            panic!("insufficient balance");
        }
        let to_balance = Self::balance_of(env.clone(), to.clone(), id);
        env.storage()
            .persistent()
            .set(&DataKey::Balance(from, id), &(from_balance - amount));
        env.storage()
            .persistent()
            .set(&DataKey::Balance(to, id), &(to_balance + amount));
    }
}
