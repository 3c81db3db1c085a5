use soroban_sdk::{contractevent, contracttype, Address};

/// Which repayment channel reduced the debt.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RepaySource {
    Claimable = 0,
    External = 1,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionCreated {
    #[topic]
    pub id: u64,
    #[topic]
    pub creator: Address,
    pub position_id: u64,
    pub principal: u128,
    pub max_rate: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidAccepted {
    #[topic]
    pub id: u64,
    #[topic]
    pub bidder: Address,
    pub rate: u32,
    /// True when the bid landed inside the anti-sniping window and pushed
    /// the deadline out.
    pub extended: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionFinalized {
    #[topic]
    pub id: u64,
    pub winner: Option<Address>,
    pub rate: Option<u32>,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DebtReduced {
    #[topic]
    pub loan_id: u64,
    pub amount: u128,
    pub source: RepaySource,
    pub new_debt: u128,
    pub new_payable: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayableWithdrawn {
    #[topic]
    pub loan_id: u64,
    pub amount: u128,
    pub new_payable: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralWithdrawn {
    #[topic]
    pub loan_id: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundWithdrawn {
    #[topic]
    pub beneficiary: Address,
    pub amount: u128,
}
