//! Action selector carried in the leading word of a flash loan payload.
//!
//! The payload starts with a 32 byte big-endian unsigned selector, the same
//! layout as `abi.encodePacked(uint256)`. Anything after the selector is
//! action data and is currently ignored.

use ink::prelude::vec::Vec;

/// Length of the selector word at the start of a payload.
pub const SELECTOR_LEN: usize = 32;

/// Action executed by the borrower while it holds the loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[ink::scale_derive(Encode, Decode, TypeInfo)]
pub enum Action {
    /// Selector `1`.
    One,
    /// Any other selector, including `0`, unknown values and malformed payloads.
    Other,
}

impl Action {
    /// Decodes the action from the leading selector of `data`.
    ///
    /// Never fails: payloads that are too short or carry an unknown selector
    /// map to [`Action::Other`].
    pub fn decode(data: &[u8]) -> Self {
        match selector(data) {
            Some(1) => Action::One,
            _ => Action::Other,
        }
    }

    /// Builds a payload whose selector word is `selector`.
    pub fn payload(selector: u128) -> Vec<u8> {
        let mut data = Vec::with_capacity(SELECTOR_LEN);
        data.extend_from_slice(&[0u8; SELECTOR_LEN - 16]);
        data.extend_from_slice(&selector.to_be_bytes());
        data
    }
}

/// Reads the selector word, `None` if it is missing or does not fit a `u128`.
fn selector(data: &[u8]) -> Option<u128> {
    let word = data.get(..SELECTOR_LEN)?;
    let (high, low) = word.split_at(SELECTOR_LEN - 16);
    if high.iter().any(|byte| *byte != 0) {
        return None;
    }
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(low);
    Some(u128::from_be_bytes(bytes))
}
