#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod loan;

pub use self::flash_borrower::{
    Action1, BorrowError, DefaultAction, FlashBorrower, FlashBorrowerRef,
};

#[ink::contract]
mod flash_borrower {
    use crate::loan::{LoanState, PendingLoan};
    use ierc20::Error as ERC20Error;
    use ierc3156::ierc3156_flash_borrower::{Error, IERC3156FlashBorrower, Result};
    use ierc3156::ierc3156_flash_lender::Error as LenderError;
    use ierc3156::Action;
    use ink::{
        env::{
            call::{build_call, ExecutionInput, Selector},
            CallFlags, DefaultEnvironment,
        },
        prelude::vec::Vec,
        storage::Lazy,
    };

    /// Emitted when the loan payload selected action one.
    #[ink(event)]
    pub struct Action1 {
        #[ink(topic)]
        pub token: AccountId,
        pub amount: Balance,
        pub fee: Balance,
    }

    /// Emitted when the loan payload selected anything but action one.
    #[ink(event)]
    pub struct DefaultAction {
        #[ink(topic)]
        pub token: AccountId,
        pub amount: Balance,
        pub fee: Balance,
    }

    /// Errors of [`FlashBorrower::flash_borrow`].
    #[derive(Debug, PartialEq, Eq)]
    #[ink::scale_derive(Encode, Decode, TypeInfo)]
    pub enum BorrowError {
        /// Returned if the caller is not the owner.
        NotOwner,
        /// Returned if a flash loan of this borrower is already in flight.
        LoanInProgress,
        /// Returned if the lender reported success without calling back.
        LoanNotSettled,
        /// Returned if the lender could not be called or trapped.
        LenderUnreachable,
        /// Error returned by the lender, including rejected callbacks.
        Lender(LenderError),
    }

    pub type BorrowResult<T> = core::result::Result<T, BorrowError>;

    #[ink(storage)]
    pub struct FlashBorrower {
        /// Only account allowed to start flash loans.
        owner: AccountId,
        /// Written straight to storage, so the re-entered callback sees it.
        loan: Lazy<LoanState>,
    }

    impl IERC3156FlashBorrower for FlashBorrower {
        /// ERC-3156 Flash loan callback.
        ///
        /// Accepted exactly once per loan, and only from the lender that
        /// [`FlashBorrower::flash_borrow`] is currently waiting on. After the
        /// action runs, the lender is approved to collect `amount + fee`.
        #[ink(message)]
        fn on_flash_loan(
            &mut self,
            initiator: AccountId,
            token: AccountId,
            amount: Balance,
            fee: Balance,
            data: Vec<u8>,
        ) -> Result<[u8; 32]> {
            if initiator != self.env().account_id() {
                return Err(Error::WrongInitiator);
            }
            let lender = self.env().caller();
            let settling = self
                .loan
                .get()
                .unwrap_or_default()
                .accept_callback(lender, token, amount)?;
            self.loan.set(&settling);

            self.execute(Action::decode(&data), token, amount, fee);
            self.authorize_repayment(lender, token, amount, fee)?;
            Ok(ierc3156::callback_success())
        }
    }

    impl FlashBorrower {
        /// Creates a new [`FlashBorrower`] owned by the caller.
        #[ink(constructor)]
        pub fn new() -> Self {
            let mut loan = Lazy::new();
            loan.set(&LoanState::Idle);
            Self {
                owner: Self::env().caller(),
                loan,
            }
        }

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner
        }

        /// Returns `true` unless a flash loan is in flight.
        #[ink(message)]
        pub fn is_idle(&self) -> bool {
            self.loan.get().unwrap_or_default() == LoanState::Idle
        }

        /// Borrows `amount` of `token` from `lender` and runs the action
        /// selected by `data` while the funds are held.
        ///
        /// Only callable by the owner. The borrower must already hold enough
        /// `token` to pay the lender's fee.
        ///
        /// ## Parameters:
        /// - `lender`: `IERC3156FlashLender` to borrow from.
        /// - `token`: The address of the token to borrow.
        /// - `amount`: The amount of tokens to borrow.
        /// - `data`: Payload forwarded to the callback, see [`Action`].
        #[ink(message)]
        pub fn flash_borrow(
            &mut self,
            lender: AccountId,
            token: AccountId,
            amount: Balance,
            data: Vec<u8>,
        ) -> BorrowResult<()> {
            if self.env().caller() != self.owner {
                return Err(BorrowError::NotOwner);
            }
            if !self.is_idle() {
                return Err(BorrowError::LoanInProgress);
            }
            self.loan.set(&LoanState::AwaitingCallback(PendingLoan {
                lender,
                token,
                amount,
            }));

            let outcome = self._call_ierc3156_flash_lender(lender, token, amount, data);
            let settled = matches!(self.loan.get(), Some(LoanState::Settling(_)));
            self.loan.set(&LoanState::Idle);

            outcome?;
            if !settled {
                return Err(BorrowError::LoanNotSettled);
            }
            Ok(())
        }

        /// Runs the business logic of `action` while the loan is held.
        fn execute(&self, action: Action, token: AccountId, amount: Balance, fee: Balance) {
            match action {
                Action::One => self.env().emit_event(Action1 { token, amount, fee }),
                Action::Other => self.env().emit_event(DefaultAction { token, amount, fee }),
            }
        }

        /// Lets `lender` pull `amount + fee` of `token` back from the borrower.
        fn authorize_repayment(
            &self,
            lender: AccountId,
            token: AccountId,
            amount: Balance,
            fee: Balance,
        ) -> Result<()> {
            let repayment = amount
                .checked_add(fee)
                .ok_or(Error::TransferAuthorizationFailed)?;
            let balance = self
                ._call_erc20_balance_of(token, self.env().account_id())
                .ok_or(Error::TransferAuthorizationFailed)?;
            if balance < repayment {
                return Err(Error::TransferAuthorizationFailed);
            }
            if !self._call_erc20_approve(token, lender, repayment) {
                return Err(Error::TransferAuthorizationFailed);
            }
            Ok(())
        }

        /// Calls `flash_loan` on an `IERC3156FlashLender` contract with the
        /// borrower as receiver.
        ///
        /// The lender is allowed to re-enter the borrower, which is how the
        /// callback reaches [`IERC3156FlashBorrower::on_flash_loan`].
        fn _call_ierc3156_flash_lender(
            &self,
            lender: AccountId,
            token: AccountId,
            amount: Balance,
            data: Vec<u8>,
        ) -> BorrowResult<()> {
            let result = build_call::<DefaultEnvironment>()
                .call(lender)
                .call_v1()
                .gas_limit(0)
                .call_flags(CallFlags::ALLOW_REENTRY)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!(
                        "IERC3156FlashLender::flash_loan"
                    )))
                    .push_arg(self.env().account_id())
                    .push_arg(token)
                    .push_arg(amount)
                    .push_arg(data),
                )
                .returns::<core::result::Result<bool, LenderError>>()
                .try_invoke();
            match result {
                Ok(Ok(Ok(true))) => Ok(()),
                Ok(Ok(Ok(false))) => Err(BorrowError::LoanNotSettled),
                Ok(Ok(Err(error))) => Err(BorrowError::Lender(error)),
                _ => Err(BorrowError::LenderUnreachable),
            }
        }

        /// Calls the ERC20 `balance_of` function on `token`, `None` if it fails.
        fn _call_erc20_balance_of(&self, token: AccountId, account: AccountId) -> Option<Balance> {
            build_call::<DefaultEnvironment>()
                .call(token)
                .call_v1()
                .gas_limit(0)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!(
                        "IERC20::balance_of"
                    )))
                    .push_arg(account),
                )
                .returns::<Balance>()
                .try_invoke()
                .ok()
                .and_then(|result| result.ok())
        }

        /// Calls the ERC20 `approve` function on `token`.
        ///
        /// ## Returns:
        /// - A boolean indicating whether the approval succeeded.
        fn _call_erc20_approve(
            &self,
            token: AccountId,
            spender: AccountId,
            value: Balance,
        ) -> bool {
            let result = build_call::<DefaultEnvironment>()
                .call(token)
                .call_v1()
                .gas_limit(0)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!("IERC20::approve")))
                        .push_arg(spender)
                        .push_arg(value),
                )
                .returns::<core::result::Result<(), ERC20Error>>()
                .try_invoke();
            matches!(result, Ok(Ok(Ok(()))))
        }
    }


}
