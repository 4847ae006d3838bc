use soroban_sdk::{
    contract, contractimpl, contracttype, vec, Address, Bytes, Env, IntoVal, Symbol, Val,
};

/// What the token should attempt from inside its next `transfer_from`.
#[contracttype]
#[derive(Clone)]
pub struct AttackPlan {
    pub manager: Address,
    pub claimer: Address,
    pub identifier: Bytes,
    pub salt: Bytes,
}

#[contracttype]
enum DataKey {
    Balance(Address),
    Allowance(Address, Address),
    Plan,
    Attempted,
    Blocked,
}

/// A fungible-shaped token whose `transfer_from` calls back into the
/// gift manager's claim entry point mid-transfer. The nested call is
/// made through `try_invoke_contract`, so the attacker observes (and
/// swallows) the rejection while the outer transfer continues.
#[contract]
pub struct MockReentrantToken;

#[contractimpl]
impl MockReentrantToken {
    pub fn mint(env: Env, to: Address, amount: i128) {
        let balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&DataKey::Balance(to), &(balance + amount));
    }

    pub fn set_attack(env: Env, plan: AttackPlan) {
        env.storage().instance().set(&DataKey::Plan, &plan);
    }

    pub fn attack_attempted(env: Env) -> bool {
        env.storage().instance().get(&DataKey::Attempted).unwrap_or(false)
    }

    /// Whether the nested claim was rejected by the manager.
    pub fn attack_blocked(env: Env) -> bool {
        env.storage().instance().get(&DataKey::Blocked).unwrap_or(false)
    }

    pub fn decimals(env: Env) -> u32 {
        let _ = env;
        7
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Allowance(from, spender))
            .unwrap_or(0)
    }

    pub fn approve(env: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        let _ = expiration_ledger;
        from.require_auth();
        env.storage()
            .persistent()
            .set(&DataKey::Allowance(from, spender), &amount);
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        Self::move_balance(&env, &from, &to, amount);
    }

    pub fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        let allowance = Self::allowance(env.clone(), from.clone(), spender.clone());
        if allowance < amount {
            panic!("insufficient allowance");
        }
        env.storage()
            .persistent()
            .set(&DataKey::Allowance(from.clone(), spender), &(allowance - amount));
        Self::move_balance(&env, &from, &to, amount);
        Self::fire_attack(&env);
    }

    fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) {
        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            panic!("insufficient balance");
        }
        let to_balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&DataKey::Balance(from.clone()), &(from_balance - amount));
        env.storage()
            .persistent()
            .set(&DataKey::Balance(to.clone()), &(to_balance + amount));
    }

    fn fire_attack(env: &Env) {
        let plan: Option<AttackPlan> = env.storage().instance().get(&DataKey::Plan);
        let Some(plan) = plan else {
            return;
        };
        if Self::attack_attempted(env.clone()) {
            return;
        }
        env.storage().instance().set(&DataKey::Attempted, &true);

        let result = env.try_invoke_contract::<Val, soroban_sdk::Error>(
            &plan.manager,
            &Symbol::new(env, "claim_gift"),
            vec![
                env,
                plan.claimer.into_val(env),
                plan.identifier.into_val(env),
                plan.salt.into_val(env),
            ],
        );
        env.storage()
            .instance()
            .set(&DataKey::Blocked, &result.is_err());
    }
}
