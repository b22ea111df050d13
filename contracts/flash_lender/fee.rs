//! Fee policies for flash loans.

/// Denominator of [`FeePolicy::BasisPoints`]: `1` basis point is 0.01%.
pub const BASIS_POINTS: u128 = 10_000;

/// Computes the fee owed on top of a loan's principal.
///
/// Implementations must be pure: the same `amount` always yields the same fee.
pub trait LoanFeePolicy {
    /// Returns the fee for lending `amount`, or `None` if it does not fit in a `u128`.
    fn fee(&self, amount: u128) -> Option<u128>;
}

/// Fee policy configured on a lender at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[ink::scale_derive(Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(ink::storage::traits::StorageLayout))]
pub enum FeePolicy {
    /// A share of the principal, `1 == 0.01%`, rounded down.
    BasisPoints(u32),
    /// The same fee for every loan regardless of its size.
    Flat(u128),
}

impl LoanFeePolicy for FeePolicy {
    fn fee(&self, amount: u128) -> Option<u128> {
        match *self {
            FeePolicy::BasisPoints(bps) => amount
                .checked_mul(u128::from(bps))
                .map(|scaled| scaled / BASIS_POINTS),
            FeePolicy::Flat(fee) => Some(fee),
        }
    }
}
