#![cfg(test)]

use super::*;
use soroban_sdk::{testutils::Address as _, Address, Env, Symbol};

fn setup(env: &Env) -> (ClaimRightsClient<'_>, Address) {
    let issuer = Address::generate(env);
    let contract_id = env.register(ClaimRights, ());
    let client = ClaimRightsClient::new(env, &contract_id);
    client.initialize(&issuer, &Symbol::new(env, "lender"));
    (client, issuer)
}

#[test]
fn test_mint_and_owner_of() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, issuer) = setup(&env);

    let holder = Address::generate(&env);
    client.mint(&holder, &1u64);

    assert_eq!(client.owner_of(&1u64), holder);
    assert_eq!(client.get_issuer(), issuer);
    assert_eq!(client.get_name(), Symbol::new(&env, "lender"));
}

#[test]
fn test_mint_same_id_twice_rejected() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _) = setup(&env);

    let holder = Address::generate(&env);
    client.mint(&holder, &7u64);
    assert_eq!(
        client.try_mint(&holder, &7u64),
        Err(Ok(Error::AlreadyMinted))
    );
}

#[test]
fn test_owner_of_unminted() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _) = setup(&env);

    assert_eq!(client.try_owner_of(&42u64), Err(Ok(Error::NotMinted)));
}

#[test]
fn test_transfer_moves_holder() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _) = setup(&env);

    let first = Address::generate(&env);
    let second = Address::generate(&env);
    client.mint(&first, &1u64);
    client.transfer(&first, &second, &1u64);

    assert_eq!(client.owner_of(&1u64), second);
}

#[test]
fn test_transfer_by_non_holder_rejected() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _) = setup(&env);

    let holder = Address::generate(&env);
    let stranger = Address::generate(&env);
    client.mint(&holder, &1u64);

    assert_eq!(
        client.try_transfer(&stranger, &holder, &1u64),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(client.owner_of(&1u64), holder);
}

#[test]
fn test_burn_revokes() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _) = setup(&env);

    let holder = Address::generate(&env);
    client.mint(&holder, &1u64);
    client.burn(&1u64);

    assert_eq!(client.try_owner_of(&1u64), Err(Ok(Error::NotMinted)));
    assert_eq!(client.try_burn(&1u64), Err(Ok(Error::NotMinted)));
}

#[test]
#[should_panic(expected = "already initialized")]
fn test_double_initialize_panics() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, issuer) = setup(&env);
    client.initialize(&issuer, &Symbol::new(&env, "borrower"));
}
