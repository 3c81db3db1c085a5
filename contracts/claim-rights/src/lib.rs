//! Bearer-right registry: one transferable right per loan id, minted and
//! revoked by a single issuer contract. A deployment serves one side of the
//! loan (lender or borrower); the core contract is wired with two instances.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractevent, contractimpl, contracttype, Address, Env, Symbol,
};

#[contracttype]
pub enum DataKey {
    Issuer,     // Address, the only identity allowed to mint and burn
    Name,       // Symbol, which side of the loan this registry serves
    Owner(u64), // Address, current holder of the right for a loan id
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    NotMinted = 1,
    AlreadyMinted = 2,
    Unauthorized = 3,
}

const TTL_THRESHOLD: u32 = 100_000;
const TTL_EXTEND_TO: u32 = 200_000;

#[contract]
pub struct ClaimRights;

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RightMinted {
    #[topic]
    pub id: u64,
    #[topic]
    pub to: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RightTransferred {
    #[topic]
    pub id: u64,
    #[topic]
    pub from: Address,
    pub to: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RightBurned {
    #[topic]
    pub id: u64,
}

#[contractimpl]
impl ClaimRights {
    pub fn initialize(env: Env, issuer: Address, name: Symbol) {
        if env
            .storage()
            .persistent()
            .get::<_, Address>(&DataKey::Issuer)
            .is_some()
        {
            panic!("already initialized");
        }
        env.storage().persistent().set(&DataKey::Issuer, &issuer);
        env.storage().persistent().set(&DataKey::Name, &name);
        bump_core_ttl(&env);
    }

    /// Issuer-gated. One right per id, ever; ids are never reissued.
    pub fn mint(env: Env, to: Address, id: u64) -> Result<(), Error> {
        issuer(&env).require_auth();
        let key = DataKey::Owner(id);
        if env.storage().persistent().has(&key) {
            return Err(Error::AlreadyMinted);
        }
        env.storage().persistent().set(&key, &to);
        bump_owner_ttl(&env, id);
        RightMinted { id, to }.publish(&env);
        Ok(())
    }

    /// Holder-gated. Rights are bearer instruments; whoever holds one holds
    /// the authorization it carries.
    pub fn transfer(env: Env, from: Address, to: Address, id: u64) -> Result<(), Error> {
        from.require_auth();
        let key = DataKey::Owner(id);
        let holder: Address = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(Error::NotMinted)?;
        if holder != from {
            return Err(Error::Unauthorized);
        }
        env.storage().persistent().set(&key, &to);
        bump_owner_ttl(&env, id);
        RightTransferred { id, from, to }.publish(&env);
        Ok(())
    }

    /// Issuer-gated revocation.
    pub fn burn(env: Env, id: u64) -> Result<(), Error> {
        issuer(&env).require_auth();
        let key = DataKey::Owner(id);
        if !env.storage().persistent().has(&key) {
            return Err(Error::NotMinted);
        }
        env.storage().persistent().remove(&key);
        RightBurned { id }.publish(&env);
        Ok(())
    }

    pub fn owner_of(env: Env, id: u64) -> Result<Address, Error> {
        bump_owner_ttl(&env, id);
        env.storage()
            .persistent()
            .get(&DataKey::Owner(id))
            .ok_or(Error::NotMinted)
    }

    pub fn get_issuer(env: Env) -> Address {
        issuer(&env)
    }

    pub fn get_name(env: Env) -> Symbol {
        env.storage()
            .persistent()
            .get(&DataKey::Name)
            .expect("not initialized")
    }
}

fn issuer(env: &Env) -> Address {
    bump_core_ttl(env);
    env.storage()
        .persistent()
        .get(&DataKey::Issuer)
        .expect("not initialized")
}

fn bump_core_ttl(env: &Env) {
    let persistent = env.storage().persistent();
    if persistent.has(&DataKey::Issuer) {
        persistent.extend_ttl(&DataKey::Issuer, TTL_THRESHOLD, TTL_EXTEND_TO);
        persistent.extend_ttl(&DataKey::Name, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

fn bump_owner_ttl(env: &Env, id: u64) {
    let persistent = env.storage().persistent();
    let key = DataKey::Owner(id);
    if persistent.has(&key) {
        persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

mod test;
