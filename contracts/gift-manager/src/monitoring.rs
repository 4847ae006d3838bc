//! Operation counters and a health view for off-chain monitors.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

use crate::events::EVENT_VERSION;

const OPERATION_COUNT: &str = "op_count";
const ERROR_COUNT: &str = "err_count";

#[contracttype]
#[derive(Clone, Debug)]
pub struct OperationMetric {
    pub version: u32,
    pub operation: Symbol,
    pub caller: Address,
    pub timestamp: u64,
    pub success: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub is_healthy: bool,
    pub last_operation: u64,
    pub total_operations: u64,
    pub contract_version: String,
}

pub fn track_operation(env: &Env, operation: Symbol, caller: &Address, success: bool) {
    let key = Symbol::new(env, OPERATION_COUNT);
    let count: u64 = env.storage().persistent().get(&key).unwrap_or(0);
    env.storage().persistent().set(&key, &count.saturating_add(1));

    if !success {
        let err_key = Symbol::new(env, ERROR_COUNT);
        let err_count: u64 = env.storage().persistent().get(&err_key).unwrap_or(0);
        env.storage()
            .persistent()
            .set(&err_key, &err_count.saturating_add(1));
    }

    env.events().publish(
        (symbol_short!("metric"), symbol_short!("op")),
        OperationMetric {
            version: EVENT_VERSION,
            operation,
            caller: caller.clone(),
            timestamp: env.ledger().timestamp(),
            success,
        },
    );
}

pub fn health_check(env: &Env) -> HealthStatus {
    let key = Symbol::new(env, OPERATION_COUNT);
    let ops: u64 = env.storage().persistent().get(&key).unwrap_or(0);

    HealthStatus {
        is_healthy: true,
        last_operation: env.ledger().timestamp(),
        total_operations: ops,
        contract_version: String::from_str(env, "1.0.0"),
    }
}
