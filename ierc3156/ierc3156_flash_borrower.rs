//! Trait definition for a Flash Borrower contract compatible with `IERC3156FlashBorrower`.

use ink::prelude::vec::Vec;
use ink::primitives::AccountId;

/// The Flash borrower result type.
pub type Result<T> = core::result::Result<T, Error>;

/// A trait for flash borrowing of ERC20 tokens, following the IERC3156 standard.
#[ink::trait_definition]
pub trait IERC3156FlashBorrower {
    /// ERC-3156 Flash loan callback.
    ///
    /// This function is called by the lender after the tokens have been
    /// transferred. It verifies the caller and initiator, decodes the action,
    /// executes it and authorizes the lender to collect `amount + fee`.
    ///
    /// ## Parameters:
    /// - `initiator`: The account that initiated the loan. Must be `self`.
    /// - `token`: The address of the token that was lent.
    /// - `amount`: The amount of tokens borrowed.
    /// - `fee`: The fee charged by the lender.
    /// - `data`: Encoded action selector, see [`crate::Action`].
    ///
    /// ## Returns:
    /// - [`crate::callback_success`] signaling successful execution of the callback.
    #[ink(message)]
    fn on_flash_loan(
        &mut self,
        initiator: AccountId,
        token: AccountId,
        amount: u128,
        fee: u128,
        data: Vec<u8>,
    ) -> Result<[u8; 32]>;
}

/// The Flash Borrower callback error types.
#[derive(Debug, PartialEq, Eq)]
#[ink::scale_derive(Encode, Decode, TypeInfo)]
pub enum Error {
    /// Returned if the loan was initiated by someone other than the borrower itself.
    WrongInitiator,
    /// Returned if the caller is not the lender the borrower is waiting on.
    WrongLender,
    /// Returned if the lent token or amount differ from what was requested.
    LoanMismatch,
    /// Returned if the borrower cannot cover or approve `amount + fee`.
    TransferAuthorizationFailed,
}
