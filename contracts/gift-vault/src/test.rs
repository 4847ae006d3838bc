#![cfg(test)]

use super::*;
use soroban_sdk::{testutils::Address as _, token as sdk_token, Address, BytesN, Env};
use token_classifier::{TokenClassifier, TokenClassifierClient};
use tokentide_testing::{MockNonFungible, MockNonFungibleClient};
use transfer_router::{TransferRouter, TransferRouterClient};

struct Setup<'a> {
    env: Env,
    admin: Address,
    orchestrator: Address,
    router: TransferRouterClient<'a>,
    vault: GiftVaultClient<'a>,
    fee_token: sdk_token::Client<'a>,
    fee_token_admin: sdk_token::StellarAssetClient<'a>,
    fee_wallet: Address,
}

fn setup<'a>() -> Setup<'a> {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let fee_wallet = Address::generate(&env);

    let classifier_id = env.register_contract(None, TokenClassifier);
    let classifier = TokenClassifierClient::new(&env, &classifier_id);
    classifier.init(&admin);

    let router_id = env.register_contract(None, TransferRouter);
    let router = TransferRouterClient::new(&env, &router_id);
    router.init(&admin, &classifier_id);
    classifier.authorize(&router_id);

    let fee_token_id = env
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    let fee_token = sdk_token::Client::new(&env, &fee_token_id);
    let fee_token_admin = sdk_token::StellarAssetClient::new(&env, &fee_token_id);

    let vault_id = env.register_contract(None, GiftVault);
    let vault = GiftVaultClient::new(&env, &vault_id);
    vault.init(&admin, &router_id, &fee_token_id, &fee_wallet);
    router.authorize(&vault_id);

    let orchestrator = Address::generate(&env);
    vault.authorize(&orchestrator);

    Setup {
        env,
        admin,
        orchestrator,
        router,
        vault,
        fee_token,
        fee_token_admin,
        fee_wallet,
    }
}

fn gift_token<'a>(
    s: &Setup<'_>,
) -> (sdk_token::Client<'a>, sdk_token::StellarAssetClient<'a>) {
    let id = s
        .env
        .register_stellar_asset_contract_v2(s.admin.clone())
        .address();
    (
        sdk_token::Client::new(&s.env, &id),
        sdk_token::StellarAssetClient::new(&s.env, &id),
    )
}

fn some_hash(e: &Env) -> BytesN<32> {
    BytesN::from_array(e, &[7u8; 32])
}

fn live_until(e: &Env) -> u32 {
    e.ledger().sequence() + 17280
}

#[test]
fn receive_pulls_asset_into_custody() {
    let s = setup();
    let (token, token_admin) = gift_token(&s);

    let sender = Address::generate(&s.env);
    token_admin.mint(&sender, &1_000);
    token.approve(&sender, &s.router.address, &1_000, &live_until(&s.env));

    s.vault.receive(
        &s.orchestrator,
        &token.address,
        &sender,
        &some_hash(&s.env),
        &500,
        &TokenKind::Fungible,
        &15,
    );

    assert_eq!(token.balance(&s.vault.address), 500);
    assert_eq!(token.balance(&sender), 500);
}

#[test]
#[should_panic(expected = "Error(Contract, #302)")]
fn receive_rejects_unauthorized_caller() {
    let s = setup();
    let (token, _) = gift_token(&s);

    let stranger = Address::generate(&s.env);
    let sender = Address::generate(&s.env);
    s.vault.receive(
        &stranger,
        &token.address,
        &sender,
        &some_hash(&s.env),
        &500,
        &TokenKind::Fungible,
        &0,
    );
}

#[test]
fn release_splits_fee_from_custody() {
    let s = setup();
    let (token, token_admin) = gift_token(&s);

    let sender = Address::generate(&s.env);
    let recipient = Address::generate(&s.env);
    token_admin.mint(&sender, &500);
    token.approve(&sender, &s.router.address, &500, &live_until(&s.env));
    s.vault.receive(
        &s.orchestrator,
        &token.address,
        &sender,
        &some_hash(&s.env),
        &500,
        &TokenKind::Fungible,
        &15,
    );

    s.vault.release(
        &s.orchestrator,
        &token.address,
        &recipient,
        &500,
        &TokenKind::Fungible,
        &15,
    );

    assert_eq!(token.balance(&recipient), 485);
    assert_eq!(token.balance(&s.fee_wallet), 15);
    assert_eq!(token.balance(&s.vault.address), 0);
}

#[test]
fn release_with_zero_fee_pays_full_amount() {
    let s = setup();
    let (token, token_admin) = gift_token(&s);

    let sender = Address::generate(&s.env);
    let recipient = Address::generate(&s.env);
    token_admin.mint(&sender, &500);
    token.approve(&sender, &s.router.address, &500, &live_until(&s.env));
    s.vault.receive(
        &s.orchestrator,
        &token.address,
        &sender,
        &some_hash(&s.env),
        &500,
        &TokenKind::Fungible,
        &15,
    );

    s.vault.release(
        &s.orchestrator,
        &token.address,
        &recipient,
        &500,
        &TokenKind::Fungible,
        &0,
    );

    assert_eq!(token.balance(&recipient), 500);
    assert_eq!(token.balance(&s.fee_wallet), 0);
}

#[test]
#[should_panic(expected = "Error(Contract, #305)")]
fn release_rejects_fee_above_amount() {
    let s = setup();
    let (token, _) = gift_token(&s);

    let recipient = Address::generate(&s.env);
    s.vault.release(
        &s.orchestrator,
        &token.address,
        &recipient,
        &100,
        &TokenKind::Fungible,
        &101,
    );
}

#[test]
fn release_unique_item_charges_flat_fee_from_recipient() {
    let s = setup();
    let nft_id = s.env.register_contract(None, MockNonFungible);
    let nft = MockNonFungibleClient::new(&s.env, &nft_id);

    let sender = Address::generate(&s.env);
    let recipient = Address::generate(&s.env);
    nft.mint(&sender, &7);
    nft.approve(&sender, &s.router.address, &7, &live_until(&s.env));
    s.vault.receive(
        &s.orchestrator,
        &nft_id,
        &sender,
        &some_hash(&s.env),
        &7,
        &TokenKind::UniqueSingleOwner,
        &25,
    );
    assert_eq!(nft.owner_of(&7), s.vault.address);

    // Recipient funds the flat fee in the configured fee token.
    s.fee_token_admin.mint(&recipient, &100);
    s.fee_token
        .approve(&recipient, &s.router.address, &100, &live_until(&s.env));

    s.vault.release(
        &s.orchestrator,
        &nft_id,
        &recipient,
        &7,
        &TokenKind::UniqueSingleOwner,
        &25,
    );

    assert_eq!(nft.owner_of(&7), recipient);
    assert_eq!(s.fee_token.balance(&s.fee_wallet), 25);
    assert_eq!(s.fee_token.balance(&recipient), 75);
}

#[test]
fn failed_fee_payment_voids_the_whole_release() {
    let s = setup();
    let nft_id = s.env.register_contract(None, MockNonFungible);
    let nft = MockNonFungibleClient::new(&s.env, &nft_id);

    let sender = Address::generate(&s.env);
    let recipient = Address::generate(&s.env);
    nft.mint(&sender, &7);
    nft.approve(&sender, &s.router.address, &7, &live_until(&s.env));
    s.vault.receive(
        &s.orchestrator,
        &nft_id,
        &sender,
        &some_hash(&s.env),
        &7,
        &TokenKind::UniqueSingleOwner,
        &25,
    );

    // Recipient never granted the router fee-token spend rights.
    let result = s.vault.try_release(
        &s.orchestrator,
        &nft_id,
        &recipient,
        &7,
        &TokenKind::UniqueSingleOwner,
        &25,
    );

    assert_eq!(result, Err(Ok(Error::FeePaymentFailed)));
    // The item movement rolled back with the failed fee leg.
    assert_eq!(nft.owner_of(&7), s.vault.address);
}

#[test]
fn admin_rotation() {
    let s = setup();
    let new_admin = Address::generate(&s.env);

    s.vault.set_admin(&new_admin);
    assert_eq!(s.vault.admin(), Some(new_admin));
}

#[test]
fn receiver_hook_acknowledges_pushes() {
    let s = setup();
    let operator = Address::generate(&s.env);
    let from = Address::generate(&s.env);

    let ack = s.vault.on_token_received(&operator, &from, &42);
    assert_eq!(ack, RECEIVE_ACK);
}

#[test]
fn init_rejects_reinitialization() {
    let s = setup();
    let result = s.vault.try_init(
        &s.admin,
        &s.router.address,
        &s.fee_token.address,
        &s.fee_wallet,
    );
    assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
}
