#![no_std]

use soroban_sdk::{Address, Env};

/// Custody plus revenue interface of the yield-bearing position the loan is
/// collateralized with. `claim` clamps to the claimable balance and returns
/// the amount actually moved.
#[soroban_sdk::contractclient(name = "RevenuePositionClient")]
pub trait RevenuePositionContract {
    fn transfer(env: Env, from: Address, to: Address, position_id: u64);
    fn claimable(env: Env, position_id: u64) -> u128;
    fn claim(env: Env, position_id: u64, to: Address, amount: u128) -> u128;
}

/// Transferable bearer rights keyed by loan id; authorization resolves the
/// current holder, never the original party.
#[soroban_sdk::contractclient(name = "RightsClient")]
pub trait RightsContract {
    fn mint(env: Env, to: Address, id: u64);
    fn burn(env: Env, id: u64);
    fn owner_of(env: Env, id: u64) -> Address;
}

mod accrual;
mod constants;
mod contract;
mod errors;
mod events;
mod storage;


pub use contract::{LoanAuction, LoanAuctionClient};
pub use errors::Error;
pub use events::RepaySource;
pub use storage::{Auction, Loan};
