#![cfg(test)]
//! Batch deposit behavior: size validation up front, and all-or-nothing
//! commit — a single bad item leaves state identical to pre-call.

use super::*;
use crate::test::{deploy_protocol, live_until};
use soroban_sdk::{testutils::Address as _, token as sdk_token, vec, Address, Bytes, BytesN, Env};
use tokentide_core::reveal;

fn hashes_for(e: &Env, labels: &[&str]) -> Vec<BytesN<32>> {
    let mut out = Vec::new(e);
    for label in labels {
        let identifier = Bytes::from_slice(e, label.as_bytes());
        let salt = Bytes::from_slice(e, b"batch-salt");
        out.push_back(reveal::recipient_hash(e, &identifier, &salt));
    }
    out
}

#[test]
fn batch_deposit_creates_every_gift() {
    let env = Env::default();
    env.mock_all_auths();
    let p = deploy_protocol(&env);

    let token_id = env
        .register_stellar_asset_contract_v2(p.admin.clone())
        .address();
    let token = sdk_token::Client::new(&env, &token_id);
    let token_admin = sdk_token::StellarAssetClient::new(&env, &token_id);

    let sender = Address::generate(&env);
    token_admin.mint(&sender, &1_000);
    token.approve(&sender, &p.router.address, &1_000, &live_until(&env));

    let hashes = hashes_for(&env, &["a@x.com", "b@x.com", "c@x.com"]);
    let amounts = vec![&env, 100_i128, 200_i128, 300_i128];

    let count = p
        .manager
        .batch_deposit(&sender, &token_id, &hashes, &amounts, &3_600);

    assert_eq!(count, 3);
    assert_eq!(token.balance(&p.vault.address), 600);
    assert_eq!(token.balance(&sender), 400);
    for hash in hashes.iter() {
        assert!(p.manager.has_gift(&hash));
    }
    // Per-item fees follow the same schedule as single deposits.
    assert_eq!(p.manager.get_gift(&hashes.get(1).unwrap()).unwrap().fee, 6);
}

#[test]
fn batch_rejects_length_mismatch_before_any_effect() {
    let env = Env::default();
    env.mock_all_auths();
    let p = deploy_protocol(&env);

    let token_id = env
        .register_stellar_asset_contract_v2(p.admin.clone())
        .address();
    let token = sdk_token::Client::new(&env, &token_id);
    let token_admin = sdk_token::StellarAssetClient::new(&env, &token_id);

    let sender = Address::generate(&env);
    token_admin.mint(&sender, &1_000);
    token.approve(&sender, &p.router.address, &1_000, &live_until(&env));

    let hashes = hashes_for(&env, &["a@x.com", "b@x.com"]);
    let amounts = vec![&env, 100_i128];

    let result = p
        .manager
        .try_batch_deposit(&sender, &token_id, &hashes, &amounts, &3_600);
    assert_eq!(result, Err(Ok(Error::BatchSizeMismatch)));
    assert_eq!(token.balance(&sender), 1_000);
}

#[test]
fn batch_rejects_empty_and_oversized_batches() {
    let env = Env::default();
    env.mock_all_auths();
    let p = deploy_protocol(&env);

    let token_id = env
        .register_stellar_asset_contract_v2(p.admin.clone())
        .address();
    let sender = Address::generate(&env);

    let empty_hashes: Vec<BytesN<32>> = Vec::new(&env);
    let empty_amounts: Vec<i128> = Vec::new(&env);
    assert_eq!(
        p.manager
            .try_batch_deposit(&sender, &token_id, &empty_hashes, &empty_amounts, &3_600),
        Err(Ok(Error::InvalidBatchSize))
    );

    let mut many_hashes = Vec::new(&env);
    let mut many_amounts = Vec::new(&env);
    for i in 0..21u8 {
        many_hashes.push_back(BytesN::from_array(&env, &[i + 1; 32]));
        many_amounts.push_back(10_i128);
    }
    assert_eq!(
        p.manager
            .try_batch_deposit(&sender, &token_id, &many_hashes, &many_amounts, &3_600),
        Err(Ok(Error::InvalidBatchSize))
    );
}

#[test]
fn batch_rejects_intra_batch_duplicates() {
    let env = Env::default();
    env.mock_all_auths();
    let p = deploy_protocol(&env);

    let token_id = env
        .register_stellar_asset_contract_v2(p.admin.clone())
        .address();
    let sender = Address::generate(&env);

    let hashes = hashes_for(&env, &["a@x.com", "b@x.com", "a@x.com"]);
    let amounts = vec![&env, 100_i128, 100_i128, 100_i128];

    let result = p
        .manager
        .try_batch_deposit(&sender, &token_id, &hashes, &amounts, &3_600);
    assert_eq!(result, Err(Ok(Error::DuplicateRecipientHash)));
}

#[test]
fn batch_with_existing_collision_commits_nothing() {
    let env = Env::default();
    env.mock_all_auths();
    let p = deploy_protocol(&env);

    let token_id = env
        .register_stellar_asset_contract_v2(p.admin.clone())
        .address();
    let token = sdk_token::Client::new(&env, &token_id);
    let token_admin = sdk_token::StellarAssetClient::new(&env, &token_id);

    let sender = Address::generate(&env);
    token_admin.mint(&sender, &1_000);
    token.approve(&sender, &p.router.address, &1_000, &live_until(&env));

    let hashes = hashes_for(&env, &["a@x.com", "b@x.com", "c@x.com", "d@x.com", "e@x.com"]);

    // The third entry collides with a pre-existing gift.
    p.manager
        .deposit(&sender, &token_id, &hashes.get(2).unwrap(), &10, &3_600);
    let vault_before = token.balance(&p.vault.address);
    let sender_before = token.balance(&sender);

    let amounts = vec![&env, 100_i128, 100_i128, 100_i128, 100_i128, 100_i128];
    let result = p
        .manager
        .try_batch_deposit(&sender, &token_id, &hashes, &amounts, &3_600);
    assert_eq!(result, Err(Ok(Error::GiftAlreadyExists)));

    // State identical to pre-call: no gift from the batch exists and no
    // value moved.
    assert_eq!(token.balance(&p.vault.address), vault_before);
    assert_eq!(token.balance(&sender), sender_before);
    for (i, hash) in hashes.iter().enumerate() {
        assert_eq!(p.manager.has_gift(&hash), i == 2);
    }
}
