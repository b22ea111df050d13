#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub use self::stub_borrower::{StubBorrower, StubBorrowerRef};

/// Borrower that answers every callback with a fixed value and never
/// approves repayment. Used to drive a lender into its settlement failures.
#[ink::contract]
mod stub_borrower {
    use ierc3156::ierc3156_flash_borrower::{IERC3156FlashBorrower, Result};
    use ink::prelude::vec::Vec;

    #[ink(storage)]
    pub struct StubBorrower {
        /// Returned from every `on_flash_loan` call.
        reply: [u8; 32],
    }

    impl IERC3156FlashBorrower for StubBorrower {
        #[ink(message)]
        fn on_flash_loan(
            &mut self,
            _initiator: AccountId,
            _token: AccountId,
            _amount: Balance,
            _fee: Balance,
            _data: Vec<u8>,
        ) -> Result<[u8; 32]> {
            Ok(self.reply)
        }
    }

    impl StubBorrower {
        #[ink(constructor)]
        pub fn new(reply: [u8; 32]) -> Self {
            Self { reply }
        }

        /// Replies with the ERC-3156 success value.
        #[ink(constructor)]
        pub fn compliant() -> Self {
            Self::new(ierc3156::callback_success())
        }

        #[ink(message)]
        pub fn reply(&self) -> [u8; 32] {
            self.reply
        }
    }

}
