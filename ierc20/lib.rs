#![cfg_attr(not(feature = "std"), no_std, no_main)]

use ink::primitives::AccountId;

/// The IERC20 result type.
pub type Result<T> = core::result::Result<T, Error>;

/// Emitted when `value` tokens are moved from one account (`from`) to another (`to`).
///
/// Minted tokens have no `from` account.
///
/// Note: `value` may be zero.
#[ink::event]
pub struct Transfer {
    #[ink(topic)]
    pub from: Option<AccountId>,
    #[ink(topic)]
    pub to: Option<AccountId>,
    pub value: u128,
}

/// Emitted when the allowance of a `spender` for an `owner` is set by a call to `approve`.
/// `value` is the new allowance.
#[ink::event]
pub struct Approval {
    #[ink(topic)]
    pub owner: AccountId,
    #[ink(topic)]
    pub spender: AccountId,
    pub value: u128,
}

/// A trait definition for an ERC-20 compatible token, following the IERC20 standard.
///
/// This is the only surface through which the flash loan contracts move the
/// reserve.
#[ink::trait_definition]
pub trait IERC20 {
    /// Returns the total token supply.
    #[ink(message)]
    fn total_supply(&self) -> u128;

    /// Returns the balance of the given `account`.
    #[ink(message)]
    fn balance_of(&self, account: AccountId) -> u128;

    /// Transfers `value` tokens from the caller's account to `to`.
    ///
    /// Emits a `Transfer` event.
    #[ink(message)]
    fn transfer(&mut self, to: AccountId, value: u128) -> Result<()>;

    /// Returns the remaining number of tokens that `spender` can spend
    /// on behalf of `owner` through `transfer_from`.
    #[ink(message)]
    fn allowance(&self, owner: AccountId, spender: AccountId) -> u128;

    /// Sets `value` as the allowance of `spender` over the caller’s tokens.
    ///
    /// Emits an `Approval` event.
    #[ink(message)]
    fn approve(&mut self, spender: AccountId, value: u128) -> Result<()>;

    /// Transfers `value` tokens from `from` to `to` using the allowance mechanism.
    /// `value` is then deducted from the caller’s allowance.
    ///
    /// Emits a `Transfer` event.
    #[ink(message)]
    fn transfer_from(&mut self, from: AccountId, to: AccountId, value: u128) -> Result<()>;
}

#[derive(Debug, PartialEq, Eq)]
#[ink::scale_derive(Encode, Decode, TypeInfo)]
pub enum Error {
    /// Indicates an error related to the current balance of a sender.
    /// Used in transfers.
    InsufficientBalance {
        sender: AccountId,
        balance: u128,
        needed: u128,
    },

    /// Indicates a failure with the spender’s allowance. Used in transfers.
    InsufficientAllowance {
        spender: AccountId,
        allowance: u128,
        needed: u128,
    },

    /// A privileged message was called by someone other than the token owner.
    NotOwner,

    /// Minting would push a balance or the total supply past `u128::MAX`.
    Overflow,
}
