use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

#[contracttype]
enum DataKey {
    Balance(Address),
    ProbeCount,
}

/// Fungible-shaped token that counts how often its read surface is
/// probed. Lets tests assert that a cached classification performs no
/// further external calls.
#[contract]
pub struct MockCountingFungible;

#[contractimpl]
impl MockCountingFungible {
    pub fn mint(env: Env, to: Address, amount: i128) {
        let balance: i128 = env
            .storage()
            .persistent()
            .get(&DataKey::Balance(to.clone()))
            .unwrap_or(0);
        env.storage()
            .persistent()
            .set(&DataKey::Balance(to), &(balance + amount));
    }

    pub fn decimals(env: Env) -> u32 {
        Self::bump_probe_count(&env);
        7
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        Self::bump_probe_count(&env);
        env.storage()
            .persistent()
            .get(&DataKey::Balance(id))
            .unwrap_or(0)
    }

    /// Number of `decimals` + `balance` calls observed so far.
    pub fn probe_count(env: Env) -> u32 {
        env.storage().instance().get(&DataKey::ProbeCount).unwrap_or(0)
    }

    fn bump_probe_count(env: &Env) {
        let count: u32 = env.storage().instance().get(&DataKey::ProbeCount).unwrap_or(0);
        env.storage().instance().set(&DataKey::ProbeCount, &(count + 1));
    }
}
