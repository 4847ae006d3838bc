#![cfg(test)]
//! A token whose `transfer_from` re-enters `claim_gift` mid-release.
//! The nested call must be rejected while the outer claim completes
//! exactly once.

use super::*;
use crate::test::{deploy_protocol, live_until};
use soroban_sdk::{testutils::Address as _, Address, Bytes, Env};
use tokentide_core::reveal;
use tokentide_testing::{AttackPlan, MockReentrantToken, MockReentrantTokenClient};

#[test]
fn reentrant_claim_is_rejected_and_outer_claim_completes() {
    let env = Env::default();
    env.mock_all_auths();
    let p = deploy_protocol(&env);

    let token_id = env.register_contract(None, MockReentrantToken);
    let token = MockReentrantTokenClient::new(&env, &token_id);

    let sender = Address::generate(&env);
    token.mint(&sender, &1_000);
    token.approve(&sender, &p.router.address, &1_000, &live_until(&env));

    let identifier = Bytes::from_slice(&env, b"friend@example.com");
    let salt = Bytes::from_slice(&env, b"salt-1");
    let hash = reveal::recipient_hash(&env, &identifier, &salt);

    p.manager.deposit(&sender, &token_id, &hash, &100, &3_600);
    assert_eq!(token.balance(&p.vault.address), 100);

    // Arm the attack: the next transfer_from fires a nested claim for
    // the same hash from inside the token.
    let claimer = Address::generate(&env);
    token.set_attack(&AttackPlan {
        manager: p.manager.address.clone(),
        claimer: claimer.clone(),
        identifier: identifier.clone(),
        salt: salt.clone(),
    });

    p.manager.claim_gift(&claimer, &identifier, &salt);

    // The hostile nested call was attempted and rejected; the outer
    // claim still paid out exactly once.
    assert!(token.attack_attempted());
    assert!(token.attack_blocked());
    assert_eq!(token.balance(&claimer), 97);
    assert_eq!(token.balance(&p.fee_wallet), 3);
    assert_eq!(token.balance(&p.vault.address), 0);
    assert!(!p.manager.has_gift(&hash));
}

#[test]
fn reentrant_deposit_is_rejected_during_custody_pull() {
    let env = Env::default();
    env.mock_all_auths();
    let p = deploy_protocol(&env);

    let token_id = env.register_contract(None, MockReentrantToken);
    let token = MockReentrantTokenClient::new(&env, &token_id);

    let sender = Address::generate(&env);
    token.mint(&sender, &1_000);
    token.approve(&sender, &p.router.address, &1_000, &live_until(&env));

    let identifier = Bytes::from_slice(&env, b"friend@example.com");
    let salt = Bytes::from_slice(&env, b"salt-1");
    let hash = reveal::recipient_hash(&env, &identifier, &salt);

    // Attack armed before the deposit: the custody pull's transfer_from
    // tries to claim the gift being created.
    let claimer = Address::generate(&env);
    token.set_attack(&AttackPlan {
        manager: p.manager.address.clone(),
        claimer: claimer.clone(),
        identifier: identifier.clone(),
        salt: salt.clone(),
    });

    p.manager.deposit(&sender, &token_id, &hash, &100, &3_600);

    assert!(token.attack_attempted());
    assert!(token.attack_blocked());
    // The deposit committed normally; nothing was claimed.
    assert!(p.manager.has_gift(&hash));
    assert_eq!(token.balance(&p.vault.address), 100);
    assert_eq!(token.balance(&claimer), 0);
}
