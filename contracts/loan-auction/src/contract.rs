use soroban_sdk::{contract, contractimpl, token, Address, Env};

use crate::accrual;
use crate::constants::*;
use crate::errors::Error;
use crate::events::*;
use crate::storage::{self, Auction, DataKey, Loan};
use crate::{RevenuePositionClient, RightsClient};

#[contract]
pub struct LoanAuction;

#[contractimpl]
impl LoanAuction {
    /// Wire the collaborators: the fungible token used for principal and
    /// repayments, the yield-position custody contract, and the two
    /// claim-rights registries (their issuer must be this contract).
    pub fn initialize(
        env: Env,
        principal_token: Address,
        revenue_position: Address,
        lender_rights: Address,
        borrower_rights: Address,
    ) -> Result<(), Error> {
        if env
            .storage()
            .instance()
            .get::<_, bool>(&DataKey::Initialized)
            .unwrap_or(false)
        {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Initialized, &true);
        let persistent = env.storage().persistent();
        persistent.set(&DataKey::PrincipalToken, &principal_token);
        persistent.set(&DataKey::RevenuePosition, &revenue_position);
        persistent.set(&DataKey::LenderRights, &lender_rights);
        persistent.set(&DataKey::BorrowerRights, &borrower_rights);
        persistent.set(&DataKey::NextId, &1u64);
        storage::bump_core_ttl(&env);
        Ok(())
    }

    /// Start a descending-rate auction for the right to lend `principal`
    /// against the creator's yield position. The position moves into
    /// custody until the auction resolves.
    pub fn create_auction(
        env: Env,
        creator: Address,
        position_id: u64,
        principal: u128,
        max_rate: u32,
    ) -> Result<u64, Error> {
        storage::ensure_initialized(&env)?;
        creator.require_auth();
        if max_rate > MAX_RATE_10BPS {
            return Err(Error::RateCeilingExceeded);
        }

        let id = storage::allocate_id(&env);
        let auction = Auction {
            creator: creator.clone(),
            position_id,
            principal,
            max_rate,
            best_rate: max_rate + 1,
            best_bidder: None,
            end_time: env.ledger().timestamp() + AUCTION_DURATION,
            settled: false,
        };
        storage::write_auction(&env, id, &auction);

        // Pull the collateral position into custody after the record is
        // committed; a failed transfer rolls the whole call back.
        RevenuePositionClient::new(&env, &storage::revenue_position(&env)).transfer(
            &creator,
            &env.current_contract_address(),
            &position_id,
        );

        AuctionCreated {
            id,
            creator,
            position_id,
            principal,
            max_rate,
        }
        .publish(&env);
        Ok(id)
    }

    /// Bid to lend at `bid_rate`. The full principal is escrowed with the
    /// bid; a displaced bidder is credited a pull-payment refund, never
    /// paid out synchronously, so a hostile bidder cannot block the
    /// auction by refusing payment.
    pub fn bid(
        env: Env,
        auction_id: u64,
        bidder: Address,
        bid_rate: u32,
        amount: u128,
    ) -> Result<(), Error> {
        storage::ensure_initialized(&env)?;
        bidder.require_auth();
        let mut auction =
            storage::read_auction(&env, auction_id).ok_or(Error::AuctionNotFound)?;

        let now = env.ledger().timestamp();
        if now >= auction.end_time {
            return Err(Error::AuctionExpired);
        }
        if bid_rate > auction.max_rate {
            return Err(Error::BidExceedsMaxRate);
        }
        if auction.best_bidder.is_some() && bid_rate >= auction.best_rate {
            return Err(Error::BidNotImproved);
        }
        if amount != auction.principal {
            return Err(Error::PrincipalMismatch);
        }

        // All checks passed; commit the displacement before touching tokens.
        if let Some(displaced) = auction.best_bidder.take() {
            storage::credit_refund(&env, &displaced, auction.principal);
        }
        auction.best_rate = bid_rate;
        auction.best_bidder = Some(bidder.clone());

        // Anti-sniping: a bid inside the trailing window pushes the
        // deadline out to a full window from now.
        let extended = auction.end_time - now <= EXTENSION_WINDOW;
        if extended {
            auction.end_time = now + EXTENSION_WINDOW;
        }
        storage::write_auction(&env, auction_id, &auction);

        let token_client = token::Client::new(&env, &storage::principal_token(&env));
        token_client.transfer(
            &bidder,
            &env.current_contract_address(),
            &storage::to_i128(auction.principal),
        );

        BidAccepted {
            id: auction_id,
            bidder,
            rate: bid_rate,
            extended,
        }
        .publish(&env);
        Ok(())
    }

    /// Resolve an ended auction. Callable by anyone: this is a pure state
    /// transition, not an authorization-gated action. Without a bid the
    /// position goes back to the creator; with a winner the creator is
    /// credited the escrowed principal and the loan record plus both claim
    /// rights come into existence under the auction's id.
    pub fn finalize_auction(env: Env, auction_id: u64) -> Result<(), Error> {
        storage::ensure_initialized(&env)?;
        let mut auction =
            storage::read_auction(&env, auction_id).ok_or(Error::AuctionNotFound)?;

        let now = env.ledger().timestamp();
        if now < auction.end_time {
            return Err(Error::AuctionNotOverYet);
        }
        if auction.settled {
            return Err(Error::AlreadySettled);
        }
        // Settle before any outward effect; a second call can only see the
        // settled flag.
        auction.settled = true;
        storage::write_auction(&env, auction_id, &auction);

        let winner = auction.best_bidder.clone();
        match &winner {
            None => {
                RevenuePositionClient::new(&env, &storage::revenue_position(&env)).transfer(
                    &env.current_contract_address(),
                    &auction.creator,
                    &auction.position_id,
                );
            }
            Some(lender) => {
                storage::credit_refund(&env, &auction.creator, auction.principal);
                Self::spawn_loan(&env, auction_id, &auction, lender, now);
            }
        }

        AuctionFinalized {
            id: auction_id,
            rate: winner.as_ref().map(|_| auction.best_rate),
            winner,
        }
        .publish(&env);
        Ok(())
    }

    /// Orchestration glue: turn a won auction into a loan record and issue
    /// the two transferable claim rights.
    fn spawn_loan(env: &Env, id: u64, auction: &Auction, lender: &Address, now: u64) {
        let loan = Loan {
            position_id: auction.position_id,
            rate: auction.best_rate,
            debt: auction.principal,
            payable: 0,
            last_accrual: now,
            closed: false,
        };
        storage::write_loan(env, id, &loan);
        RightsClient::new(env, &storage::lender_rights(env)).mint(lender, &id);
        RightsClient::new(env, &storage::borrower_rights(env)).mint(&auction.creator, &id);
    }

    /// Pull-payment withdrawal for displaced bidders and settled creators.
    /// A zero balance is a successful no-op. Returns the amount paid out.
    pub fn withdraw_refund(env: Env, beneficiary: Address) -> Result<u128, Error> {
        storage::ensure_initialized(&env)?;
        beneficiary.require_auth();
        // Zeroed before the push so a re-entrant call sees nothing owed.
        let owed = storage::take_refund(&env, &beneficiary);
        if owed > 0 {
            let token_client = token::Client::new(&env, &storage::principal_token(&env));
            token_client.transfer(
                &env.current_contract_address(),
                &beneficiary,
                &storage::to_i128(owed),
            );
            RefundWithdrawn {
                beneficiary,
                amount: owed,
            }
            .publish(&env);
        }
        Ok(owed)
    }

    /// Repay from the position's own revenue stream. Callable by anyone
    /// since it only ever helps the loan. Returns the amount applied.
    pub fn repay_with_claimable(env: Env, loan_id: u64) -> Result<u128, Error> {
        storage::ensure_initialized(&env)?;
        let mut loan = storage::read_loan(&env, loan_id).ok_or(Error::LoanNotFound)?;
        if loan.closed {
            return Err(Error::LoanClosed);
        }

        let now = env.ledger().timestamp();
        let position = RevenuePositionClient::new(&env, &storage::revenue_position(&env));
        let available = position.claimable(&loan.position_id);

        let debt = Self::accrue_loan(&env, &mut loan, now)?;
        let amount = available.min(debt);
        loan.debt = debt - amount;
        loan.payable += amount;
        storage::write_loan(&env, loan_id, &loan);

        if amount > 0 {
            // Pull exactly the applied amount; the rest of the revenue
            // stays with the position.
            position.claim(&loan.position_id, &env.current_contract_address(), &amount);
        }

        DebtReduced {
            loan_id,
            amount,
            source: RepaySource::Claimable,
            new_debt: loan.debt,
            new_payable: loan.payable,
        }
        .publish(&env);
        Ok(amount)
    }

    /// Repay with the payer's own tokens. Only `min(offered, debt)` is
    /// pulled, so an overpayment never leaves the payer. Returns the
    /// amount applied.
    pub fn repay_with_external(
        env: Env,
        loan_id: u64,
        payer: Address,
        offered: u128,
    ) -> Result<u128, Error> {
        storage::ensure_initialized(&env)?;
        payer.require_auth();
        let mut loan = storage::read_loan(&env, loan_id).ok_or(Error::LoanNotFound)?;
        if loan.closed {
            return Err(Error::LoanClosed);
        }

        let now = env.ledger().timestamp();
        let debt = Self::accrue_loan(&env, &mut loan, now)?;
        let amount = offered.min(debt);
        loan.debt = debt - amount;
        loan.payable += amount;
        storage::write_loan(&env, loan_id, &loan);

        if amount > 0 {
            let token_client = token::Client::new(&env, &storage::principal_token(&env));
            token_client.transfer(
                &payer,
                &env.current_contract_address(),
                &storage::to_i128(amount),
            );
        }

        DebtReduced {
            loan_id,
            amount,
            source: RepaySource::External,
            new_debt: loan.debt,
            new_payable: loan.payable,
        }
        .publish(&env);
        Ok(amount)
    }

    /// Withdraw repaid value. Gated on the current holder of the lender
    /// right, not the original bidder. `requested == 0` withdraws the
    /// whole balance; a partial request above the balance is an explicit
    /// reject rather than a silent clamp.
    pub fn withdraw_payable(
        env: Env,
        loan_id: u64,
        caller: Address,
        requested: u128,
    ) -> Result<u128, Error> {
        storage::ensure_initialized(&env)?;
        caller.require_auth();
        let mut loan = storage::read_loan(&env, loan_id).ok_or(Error::LoanNotFound)?;

        let holder = RightsClient::new(&env, &storage::lender_rights(&env)).owner_of(&loan_id);
        if holder != caller {
            return Err(Error::Unauthorized);
        }

        let amount = if requested == 0 {
            loan.payable
        } else {
            if requested > loan.payable {
                return Err(Error::InsufficientPayable);
            }
            requested
        };

        // Decrement first and transfer the resolved amount, never the
        // stale pre-decrement balance.
        loan.payable -= amount;
        storage::write_loan(&env, loan_id, &loan);

        if amount > 0 {
            let token_client = token::Client::new(&env, &storage::principal_token(&env));
            token_client.transfer(
                &env.current_contract_address(),
                &caller,
                &storage::to_i128(amount),
            );
        }

        PayableWithdrawn {
            loan_id,
            amount,
            new_payable: loan.payable,
        }
        .publish(&env);
        Ok(amount)
    }

    /// Return the collateral position to the current holder of the
    /// borrower right once the debt is fully repaid. Terminal: the loan
    /// closes and the borrower right is revoked. The lender right stays
    /// alive so a residual payable balance can still be withdrawn.
    pub fn withdraw_collateral(env: Env, loan_id: u64, caller: Address) -> Result<(), Error> {
        storage::ensure_initialized(&env)?;
        caller.require_auth();
        let mut loan = storage::read_loan(&env, loan_id).ok_or(Error::LoanNotFound)?;
        if loan.closed {
            return Err(Error::LoanClosed);
        }

        let rights = RightsClient::new(&env, &storage::borrower_rights(&env));
        if rights.owner_of(&loan_id) != caller {
            return Err(Error::Unauthorized);
        }
        // Zero debt stays zero under accrual, nonzero debt only grows, so
        // the stored value decides.
        if loan.debt != 0 {
            return Err(Error::DebtOutstanding);
        }

        loan.closed = true;
        storage::write_loan(&env, loan_id, &loan);

        rights.burn(&loan_id);
        RevenuePositionClient::new(&env, &storage::revenue_position(&env)).transfer(
            &env.current_contract_address(),
            &caller,
            &loan.position_id,
        );

        CollateralWithdrawn { loan_id }.publish(&env);
        Ok(())
    }

    /// Accrue `loan` up to `now` and return the grown debt. Elapsed time is
    /// clamped to >= 0; time never runs backwards through the ledger.
    fn accrue_loan(env: &Env, loan: &mut Loan, now: u64) -> Result<u128, Error> {
        let elapsed = now.saturating_sub(loan.last_accrual);
        let debt = accrual::accrue(env, loan.debt, loan.rate, elapsed)?;
        loan.last_accrual = now;
        Ok(debt)
    }

    // Views

    pub fn get_auction(env: Env, id: u64) -> Option<Auction> {
        storage::read_auction(&env, id)
    }

    /// `None` is the legitimate state for an id whose auction found no
    /// winner; callers must treat absence as checkable, not as an error.
    pub fn get_loan(env: Env, id: u64) -> Option<Loan> {
        storage::read_loan(&env, id)
    }

    pub fn get_refund(env: Env, beneficiary: Address) -> u128 {
        storage::refund_balance(&env, &beneficiary)
    }

    /// Read-only accrual preview: the debt as of the current timestamp,
    /// without touching the ledger entry.
    pub fn current_debt(env: Env, loan_id: u64) -> Result<u128, Error> {
        let loan = storage::read_loan(&env, loan_id).ok_or(Error::LoanNotFound)?;
        let elapsed = env.ledger().timestamp().saturating_sub(loan.last_accrual);
        accrual::accrue(&env, loan.debt, loan.rate, elapsed)
    }

    pub fn get_principal_token(env: Env) -> Address {
        storage::principal_token(&env)
    }

    pub fn get_revenue_position(env: Env) -> Address {
        storage::revenue_position(&env)
    }

    pub fn get_lender_rights(env: Env) -> Address {
        storage::lender_rights(&env)
    }

    pub fn get_borrower_rights(env: Env) -> Address {
        storage::borrower_rights(&env)
    }
}
