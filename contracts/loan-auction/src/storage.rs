use soroban_sdk::{contracttype, Address, Env};

use crate::errors::Error;

// Storage key types for the contract
#[contracttype]
pub enum DataKey {
    Initialized,         // bool, instance storage
    PrincipalToken,      // Address of the fungible value token
    RevenuePosition,     // Address of the yield-position custody contract
    LenderRights,        // Address of the lender claim-rights registry
    BorrowerRights,      // Address of the borrower claim-rights registry
    NextId,              // u64, shared auction/loan index allocator
    Auctions(u64),       // Auction
    Loans(u64),          // Loan
    Refunds(Address),    // u128, pull-payment balances
}

/// One auction. The record survives finalization with `settled = true`; the
/// loan spawned by a winning auction reuses the auction's id.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Auction {
    pub creator: Address,
    pub position_id: u64,
    pub principal: u128,
    pub max_rate: u32,
    /// 10-bps units. `max_rate + 1` until the first bid lands.
    pub best_rate: u32,
    pub best_bidder: Option<Address>,
    /// Only ever extended, never shortened.
    pub end_time: u64,
    pub settled: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Loan {
    pub position_id: u64,
    /// Winning bid rate, fixed for the life of the loan (10-bps units).
    pub rate: u32,
    pub debt: u128,
    pub payable: u128,
    pub last_accrual: u64,
    pub closed: bool,
}

const TTL_THRESHOLD: u32 = 100_000;
const TTL_EXTEND_TO: u32 = 200_000;

pub fn ensure_initialized(env: &Env) -> Result<(), Error> {
    if !env
        .storage()
        .instance()
        .get::<_, bool>(&DataKey::Initialized)
        .unwrap_or(false)
    {
        return Err(Error::NotInitialized);
    }
    bump_core_ttl(env);
    Ok(())
}

pub fn principal_token(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&DataKey::PrincipalToken)
        .expect("principal token not set")
}

pub fn revenue_position(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&DataKey::RevenuePosition)
        .expect("revenue position not set")
}

pub fn lender_rights(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&DataKey::LenderRights)
        .expect("lender rights not set")
}

pub fn borrower_rights(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&DataKey::BorrowerRights)
        .expect("borrower rights not set")
}

/// Hand out the next id of the shared auction/loan arena. The loan at index
/// `i` may legitimately not exist if the auction at `i` found no winner.
pub fn allocate_id(env: &Env) -> u64 {
    let id: u64 = env
        .storage()
        .persistent()
        .get(&DataKey::NextId)
        .expect("id allocator not set");
    env.storage().persistent().set(&DataKey::NextId, &(id + 1));
    id
}

pub fn read_auction(env: &Env, id: u64) -> Option<Auction> {
    bump_auction_ttl(env, id);
    env.storage().persistent().get(&DataKey::Auctions(id))
}

pub fn write_auction(env: &Env, id: u64, auction: &Auction) {
    env.storage().persistent().set(&DataKey::Auctions(id), auction);
    bump_auction_ttl(env, id);
}

pub fn read_loan(env: &Env, id: u64) -> Option<Loan> {
    bump_loan_ttl(env, id);
    env.storage().persistent().get(&DataKey::Loans(id))
}

pub fn write_loan(env: &Env, id: u64, loan: &Loan) {
    env.storage().persistent().set(&DataKey::Loans(id), loan);
    bump_loan_ttl(env, id);
}

pub fn refund_balance(env: &Env, who: &Address) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::Refunds(who.clone()))
        .unwrap_or(0u128)
}

/// Additive across displaced bids and creator settlements.
pub fn credit_refund(env: &Env, who: &Address, amount: u128) {
    let key = DataKey::Refunds(who.clone());
    let owed: u128 = env.storage().persistent().get(&key).unwrap_or(0u128);
    env.storage()
        .persistent()
        .set(&key, &owed.checked_add(amount).expect("refund overflow"));
    bump_refund_ttl(env, who);
}

/// Zero the entry before any outward transfer happens.
pub fn take_refund(env: &Env, who: &Address) -> u128 {
    let key = DataKey::Refunds(who.clone());
    let owed: u128 = env.storage().persistent().get(&key).unwrap_or(0u128);
    env.storage().persistent().remove(&key);
    owed
}

pub fn bump_core_ttl(env: &Env) {
    let persistent = env.storage().persistent();
    for key in [
        DataKey::PrincipalToken,
        DataKey::RevenuePosition,
        DataKey::LenderRights,
        DataKey::BorrowerRights,
        DataKey::NextId,
    ] {
        if persistent.has(&key) {
            persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        }
    }
}

pub fn bump_auction_ttl(env: &Env, id: u64) {
    let persistent = env.storage().persistent();
    let key = DataKey::Auctions(id);
    if persistent.has(&key) {
        persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

pub fn bump_loan_ttl(env: &Env, id: u64) {
    let persistent = env.storage().persistent();
    let key = DataKey::Loans(id);
    if persistent.has(&key) {
        persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

pub fn bump_refund_ttl(env: &Env, who: &Address) {
    let persistent = env.storage().persistent();
    let key = DataKey::Refunds(who.clone());
    if persistent.has(&key) {
        persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

pub fn to_i128(amount: u128) -> i128 {
    if amount > i128::MAX as u128 {
        panic!("amount exceeds i128");
    }
    amount as i128
}
