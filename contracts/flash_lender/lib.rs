#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod fee;

pub use self::flash_lender::{FlashLender, FlashLenderRef, FlashLoan, Withdrawal};

#[ink::contract]
mod flash_lender {
    use crate::fee::{FeePolicy, LoanFeePolicy};
    use ierc20::Error as ERC20Error;
    use ierc3156::ierc3156_flash_borrower::Error as BorrowerError;
    use ierc3156::ierc3156_flash_lender::{Error, IERC3156FlashLender, Result};
    use ink::{
        env::{
            call::{build_call, ExecutionInput, Selector},
            DefaultEnvironment,
        },
        prelude::vec::Vec,
    };

    /// Emitted once a loan has been repaid in full.
    #[ink(event)]
    pub struct FlashLoan {
        #[ink(topic)]
        pub receiver: AccountId,
        #[ink(topic)]
        pub token: AccountId,
        pub amount: Balance,
        pub fee: Balance,
    }

    /// Emitted when the owner moves part of the reserve out of the lender.
    #[ink(event)]
    pub struct Withdrawal {
        #[ink(topic)]
        pub to: AccountId,
        pub amount: Balance,
    }

    #[ink(storage)]
    pub struct FlashLender {
        /// Deployer of the lender, allowed to withdraw from the reserve.
        owner: AccountId,
        /// The only token this lender custodies and lends.
        token: AccountId,
        fee_policy: FeePolicy,
    }

    impl IERC3156FlashLender for FlashLender {
        /// Loan `amount` tokens to `receiver`, and take them back plus a `flashFee` after the callback.
        ///
        /// The steps run strictly in order: reserve check, transfer out,
        /// borrower callback, pull of `amount + fee`. Any failure returns an
        /// error, which reverts every effect of the call including the
        /// transfer to `receiver`.
        ///
        /// ## Params:
        /// - `receiver`: The contract receiving the tokens.
        /// - `token`: The loan currency.
        /// - `amount`: The amount of tokens lent.
        /// - `data`: Passed through untouched to the `receiver`.
        ///
        /// ## Returns:
        /// - `bool`: True if the flash loan succeeds.
        #[ink(message)]
        fn flash_loan(
            &mut self,
            receiver: AccountId,
            token: AccountId,
            amount: Balance,
            data: Vec<u8>,
        ) -> Result<bool> {
            self.ensure_supported(token)?;
            if self._call_erc20_balance_of(self.env().account_id())? < amount {
                return Err(Error::InsufficientLiquidity);
            }
            let fee = self._flash_fee(amount)?;
            let repayment = amount.checked_add(fee).ok_or(Error::FeeOverflow)?;

            if !self._call_erc20_transfer(receiver, amount) {
                return Err(Error::TransferFailed);
            }
            let returned = self._call_ierc3156_flash_borrower_callback(
                self.env().caller(),
                receiver,
                amount,
                fee,
                data,
            )?;
            if returned != ierc3156::callback_success() {
                return Err(Error::InvalidCallbackReturn);
            }
            if !self._call_erc20_transfer_from(receiver, repayment) {
                return Err(Error::RepaymentFailed);
            }

            self.env().emit_event(FlashLoan {
                receiver,
                token,
                amount,
                fee,
            });
            Ok(true)
        }

        /// The fee to be charged for a given loan.
        ///
        /// ## Params:
        /// - `token`: The loan currency.
        /// - `amount`: The amount of tokens lent.
        ///
        /// ## Returns:
        /// - `u128`: The fee to be charged on top of the returned principal.
        #[ink(message)]
        fn flash_fee(&self, token: AccountId, amount: Balance) -> Result<Balance> {
            self.ensure_supported(token)?;
            self._flash_fee(amount)
        }

        /// The amount of currency available to be lent.
        ///
        /// ## Params:
        /// - `token`: The loan currency.
        ///
        /// ## Returns:
        /// - `u128`: The reserve balance of `token`, `0` if it is not supported
        ///   or its ledger cannot be queried.
        #[ink(message)]
        fn max_flash_loan(&self, token: AccountId) -> Balance {
            if token != self.token {
                return 0;
            }
            self._call_erc20_balance_of(self.env().account_id()).unwrap_or_default()
        }
    }

    impl FlashLender {
        /// Creates a new [`FlashLender`] owned by the caller.
        ///
        /// ## Params:
        /// - `token`: Token contract supported for flash lending.
        /// - `fee_policy`: How the fee owed on top of `amount` is computed.
        #[ink(constructor)]
        pub fn new(token: AccountId, fee_policy: FeePolicy) -> Self {
            Self {
                owner: Self::env().caller(),
                token,
                fee_policy,
            }
        }

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner
        }

        #[ink(message)]
        pub fn token(&self) -> AccountId {
            self.token
        }

        #[ink(message)]
        pub fn fee_policy(&self) -> FeePolicy {
            self.fee_policy
        }

        /// Moves `amount` of the reserve to `to`. Only callable by the owner.
        #[ink(message)]
        pub fn withdraw(&mut self, to: AccountId, amount: Balance) -> Result<()> {
            if self.env().caller() != self.owner {
                return Err(Error::NotOwner);
            }
            if !self._call_erc20_transfer(to, amount) {
                return Err(Error::TransferFailed);
            }
            self.env().emit_event(Withdrawal { to, amount });
            Ok(())
        }

        fn ensure_supported(&self, token: AccountId) -> Result<()> {
            if token != self.token {
                return Err(Error::UnsupportedToken);
            }
            Ok(())
        }

        /// Internal function returning the fee to be charged for a given loan.
        /// No token checks are performed.
        fn _flash_fee(&self, amount: Balance) -> Result<Balance> {
            self.fee_policy.fee(amount).ok_or(Error::FeeOverflow)
        }

        /// Calls the ERC20 `balance_of` function on the lent token.
        ///
        /// ## Returns:
        /// - The balance of `account`, or [`Error::TransferFailed`] if the
        ///   token could not be queried.
        fn _call_erc20_balance_of(&self, account: AccountId) -> Result<Balance> {
            build_call::<DefaultEnvironment>()
                .call(self.token)
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
                .ok_or(Error::TransferFailed)
        }

        /// Calls the ERC20 `transfer` function on the lent token.
        ///
        /// ## Returns:
        /// - A boolean indicating whether the transfer succeeded.
        fn _call_erc20_transfer(&self, to: AccountId, amount: Balance) -> bool {
            let result = build_call::<DefaultEnvironment>()
                .call(self.token)
                .call_v1()
                .gas_limit(0)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!("IERC20::transfer")))
                        .push_arg(to)
                        .push_arg(amount),
                )
                .returns::<core::result::Result<(), ERC20Error>>()
                .try_invoke();
            matches!(result, Ok(Ok(Ok(()))))
        }

        /// Calls the ERC20 `transfer_from` function on the lent token, pulling
        /// `repayment` from `receiver` back into the lender.
        ///
        /// ## Returns:
        /// - A boolean indicating whether the transfer succeeded.
        fn _call_erc20_transfer_from(&self, receiver: AccountId, repayment: Balance) -> bool {
            let result = build_call::<DefaultEnvironment>()
                .call(self.token)
                .call_v1()
                .gas_limit(0)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!(
                        "IERC20::transfer_from"
                    )))
                    .push_arg(receiver)
                    .push_arg(self.env().account_id())
                    .push_arg(repayment),
                )
                .returns::<core::result::Result<(), ERC20Error>>()
                .try_invoke();
            matches!(result, Ok(Ok(Ok(()))))
        }

        /// Calls the `on_flash_loan` callback on an `IERC3156FlashBorrower` contract.
        ///
        /// ## Params:
        /// - `initiator`: who asked for the loan.
        /// - `receiver`: AccountId of the flash borrower contract.
        /// - `amount`: Principal amount borrowed.
        /// - `fee`: Additional fee required for repayment.
        /// - `data`: Arbitrary bytes data passed through to the borrower.
        ///
        /// ## Returns:
        /// - The value returned by the borrower, or the borrower's error
        ///   wrapped in [`Error::CallbackFailed`].
        fn _call_ierc3156_flash_borrower_callback(
            &self,
            initiator: AccountId,
            receiver: AccountId,
            amount: Balance,
            fee: Balance,
            data: Vec<u8>,
        ) -> Result<[u8; 32]> {
            let result = build_call::<DefaultEnvironment>()
                .call(receiver)
                .call_v1()
                .gas_limit(0)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!(
                        "IERC3156FlashBorrower::on_flash_loan"
                    )))
                    .push_arg(initiator)
                    .push_arg(self.token)
                    .push_arg(amount)
                    .push_arg(fee)
                    .push_arg(data),
                )
                .returns::<core::result::Result<[u8; 32], BorrowerError>>()
                .try_invoke();
            match result {
                Ok(Ok(Ok(returned))) => Ok(returned),
                Ok(Ok(Err(error))) => Err(Error::CallbackFailed(error)),
                _ => Err(Error::InvalidCallbackReturn),
            }
        }
    }

}
