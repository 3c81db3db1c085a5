pub const WAD: u128 = 1_000_000_000_000_000_000u128; // 1e18
pub const E_WAD: u128 = 2_718_281_828_459_045_235u128; // e scaled 1e18
/// 365.25 days, so leap years do not drift the annual rate.
pub const SECONDS_PER_YEAR: u64 = 31_557_600;
/// Rates are stored in tenth-of-a-percent steps: 85 = 8.5%, 1000 = 100%.
pub const RATE_DENOM: u128 = 1_000;
pub const MAX_RATE_10BPS: u32 = 10_000; // 1000% cap to catch unit confusion
pub const AUCTION_DURATION: u64 = 24 * 60 * 60;
pub const EXTENSION_WINDOW: u64 = 15 * 60;
pub const TAYLOR_MAX_TERMS: u128 = 40;
