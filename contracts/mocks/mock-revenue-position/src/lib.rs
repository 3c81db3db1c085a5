//! Test double for a yield-bearing position registry: custody transfer plus
//! a claimable revenue balance per position, funded by `deposit_revenue`.

#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env};

#[contracttype]
enum DataKey {
    Token,          // Address of the fungible token revenue is paid in
    Owner(u64),     // Address holding the position
    Claimable(u64), // u128 accrued, unclaimed revenue
}

#[contract]
pub struct MockRevenuePosition;

#[contractimpl]
impl MockRevenuePosition {
    pub fn initialize(env: Env, token: Address) {
        if env
            .storage()
            .persistent()
            .get::<_, Address>(&DataKey::Token)
            .is_some()
        {
            panic!("already initialized");
        }
        env.storage().persistent().set(&DataKey::Token, &token);
    }

    pub fn mint_position(env: Env, to: Address, position_id: u64) {
        let key = DataKey::Owner(position_id);
        if env.storage().persistent().has(&key) {
            panic!("position exists");
        }
        env.storage().persistent().set(&key, &to);
        env.storage()
            .persistent()
            .set(&DataKey::Claimable(position_id), &0u128);
    }

    pub fn owner_of(env: Env, position_id: u64) -> Address {
        env.storage()
            .persistent()
            .get(&DataKey::Owner(position_id))
            .expect("position not minted")
    }

    pub fn transfer(env: Env, from: Address, to: Address, position_id: u64) {
        from.require_auth();
        let holder = Self::owner_of(env.clone(), position_id);
        if holder != from {
            panic!("not position holder");
        }
        env.storage()
            .persistent()
            .set(&DataKey::Owner(position_id), &to);
    }

    /// Fund the position's revenue stream (the fee-distribution analog).
    pub fn deposit_revenue(env: Env, from: Address, position_id: u64, amount: u128) {
        from.require_auth();
        Self::owner_of(env.clone(), position_id);
        let token = token_address(&env);
        token::Client::new(&env, &token).transfer(
            &from,
            &env.current_contract_address(),
            &(amount as i128),
        );
        let key = DataKey::Claimable(position_id);
        let balance: u128 = env.storage().persistent().get(&key).unwrap_or(0u128);
        env.storage().persistent().set(&key, &(balance + amount));
    }

    pub fn claimable(env: Env, position_id: u64) -> u128 {
        env.storage()
            .persistent()
            .get(&DataKey::Claimable(position_id))
            .unwrap_or(0u128)
    }

    /// Holder-gated; clamps to the claimable balance and returns the amount
    /// actually moved.
    pub fn claim(env: Env, position_id: u64, to: Address, amount: u128) -> u128 {
        let holder = Self::owner_of(env.clone(), position_id);
        holder.require_auth();
        let key = DataKey::Claimable(position_id);
        let balance: u128 = env.storage().persistent().get(&key).unwrap_or(0u128);
        let claimed = amount.min(balance);
        if claimed > 0 {
            env.storage().persistent().set(&key, &(balance - claimed));
            let token = token_address(&env);
            token::Client::new(&env, &token).transfer(
                &env.current_contract_address(),
                &to,
                &(claimed as i128),
            );
        }
        claimed
    }
}

fn token_address(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&DataKey::Token)
        .expect("not initialized")
}
