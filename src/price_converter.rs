multiversx_sc::imports!();

/// Native precision of EGLD.
pub const EGLD_DECIMALS: u32 = 18;

/// Precision of every USD value handled by the contract.
pub const USD_DECIMALS: u32 = 18;

/// `10^exp` as a managed big integer.
pub fn pow10<M: ManagedTypeApi>(exp: u32) -> BigUint<M> {
    let mut result = BigUint::from(1u64);
    for _ in 0..exp {
        result *= 10u64;
    }
    result
}

/// Whole USD amount expressed with `USD_DECIMALS`.
pub fn usd<M: ManagedTypeApi>(whole_units: u64) -> BigUint<M> {
    BigUint::from(whole_units) * pow10::<M>(USD_DECIMALS)
}

/// Converts an EGLD amount into USD (`USD_DECIMALS` precision).
///
/// `rate` is the price of one EGLD in USD, carrying `rate_decimals`
/// decimals as reported by the feed. Integer arithmetic only: the
/// product is computed first and scaled once, so truncation happens
/// a single time at the end.
pub fn egld_to_usd<M: ManagedTypeApi>(
    egld_amount: &BigUint<M>,
    rate: &BigUint<M>,
    rate_decimals: u32,
) -> BigUint<M> {
    let raw = egld_amount * rate;
    let scale = EGLD_DECIMALS + rate_decimals;
    if scale >= USD_DECIMALS {
        raw / pow10::<M>(scale - USD_DECIMALS)
    } else {
        raw * pow10::<M>(USD_DECIMALS - scale)
    }
}
