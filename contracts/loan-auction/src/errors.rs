use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    RateCeilingExceeded = 3,
    AuctionNotFound = 4,
    AuctionExpired = 5,
    BidExceedsMaxRate = 6,
    BidNotImproved = 7,
    PrincipalMismatch = 8,
    AuctionNotOverYet = 9,
    AlreadySettled = 10,
    LoanNotFound = 11,
    Unauthorized = 12,
    InsufficientPayable = 13,
    DebtOutstanding = 14,
    LoanClosed = 15,
    Overflow = 16,
}
