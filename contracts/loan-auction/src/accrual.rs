//! Continuous-compound debt growth: `new_debt = debt * e^(r * dt)` in wad
//! (1e18) fixed point. The rate-to-exponent conversion rounds up so a
//! truncated exponent can never shave interest off the lender's side; the
//! series itself uses floor division because a ceil'd Taylor term never
//! decays to zero.

use soroban_sdk::{Env, U256};

use crate::constants::{E_WAD, RATE_DENOM, SECONDS_PER_YEAR, TAYLOR_MAX_TERMS, WAD};
use crate::errors::Error;

/// Grow `debt` over `elapsed` seconds at `rate_10bps` (tenth-of-a-percent
/// units, e.g. 100 = 10% yearly). `elapsed == 0` is a no-op fast path.
pub fn accrue(env: &Env, debt: u128, rate_10bps: u32, elapsed: u64) -> Result<u128, Error> {
    if debt == 0 || rate_10bps == 0 || elapsed == 0 {
        return Ok(debt);
    }
    let factor = exp_wad(env, growth_exponent(rate_10bps, elapsed)?)?;
    mul_div(env, debt, factor, WAD)
}

/// `x = r * dt` in wad: `rate * elapsed * WAD / (1000 * seconds_per_year)`,
/// rounded up.
fn growth_exponent(rate_10bps: u32, elapsed: u64) -> Result<u128, Error> {
    let numerator = (rate_10bps as u128)
        .checked_mul(elapsed as u128)
        .and_then(|v| v.checked_mul(WAD))
        .ok_or(Error::Overflow)?;
    Ok(numerator.div_ceil(RATE_DENOM * SECONDS_PER_YEAR as u128))
}

/// `e^x` for a wad-scaled `x`, split into `e^whole * e^frac` with the
/// fractional part evaluated as a Taylor series. Fails with `Overflow` only
/// when the true result exceeds u128.
fn exp_wad(env: &Env, x: u128) -> Result<u128, Error> {
    let whole = x / WAD;
    let frac = x % WAD;

    // Taylor series for e^frac, frac in [0, 1): terms are bounded by 1 wad
    // and shrink by at least frac/i each step.
    let mut sum = WAD;
    let mut term = WAD;
    let mut i: u128 = 1;
    while term > 0 && i < TAYLOR_MAX_TERMS {
        term = mul_div(env, term, frac, WAD * i)?;
        sum += term;
        i += 1;
    }

    let mut factor = sum;
    for _ in 0..whole {
        factor = mul_div(env, factor, E_WAD, WAD)?;
    }
    Ok(factor)
}

/// `a * b / denom` with the product widened through U256, so only a true
/// u128 overflow of the quotient is reported.
fn mul_div(env: &Env, a: u128, b: u128, denom: u128) -> Result<u128, Error> {
    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    product
        .div(&U256::from_u128(env, denom))
        .to_u128()
        .ok_or(Error::Overflow)
}
