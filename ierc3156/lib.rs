//! ERC-3156 flash loan interfaces shared by the lender and borrower contracts.
#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod action;
pub mod ierc3156_flash_borrower;
pub mod ierc3156_flash_lender;

pub use action::Action;

use ink::env::hash::Keccak256;

/// The value a borrower returns from `on_flash_loan` to signal that the loan
/// was handled: `keccak256("ERC3156FlashBorrower.onFlashLoan")`.
pub fn callback_success() -> [u8; 32] {
    let mut output = [0u8; 32];
    ink::env::hash_bytes::<Keccak256>(b"ERC3156FlashBorrower.onFlashLoan", &mut output);
    output
}
