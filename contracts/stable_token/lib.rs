#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub use self::stable_token::{StableToken, StableTokenRef};

/// Owner-mintable ERC-20 token used as the flash loan reserve currency.
#[ink::contract]
mod stable_token {
    use ierc20::{Approval, Error, Result, Transfer, IERC20};
    use ink::storage::Mapping;

    #[ink(storage)]
    pub struct StableToken {
        /// Account allowed to mint new tokens.
        owner: AccountId,
        total_supply: Balance,
        balances: Mapping<AccountId, Balance>,
        /// Allowances keyed by `(owner, spender)`.
        allowances: Mapping<(AccountId, AccountId), Balance>,
    }

    impl IERC20 for StableToken {
        #[ink(message)]
        fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        fn balance_of(&self, account: AccountId) -> Balance {
            self.balances.get(account).unwrap_or_default()
        }

        #[ink(message)]
        fn transfer(&mut self, to: AccountId, value: Balance) -> Result<()> {
            let from = self.env().caller();
            self._transfer(from, to, value)
        }

        #[ink(message)]
        fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance {
            self.allowances.get((owner, spender)).unwrap_or_default()
        }

        #[ink(message)]
        fn approve(&mut self, spender: AccountId, value: Balance) -> Result<()> {
            let owner = self.env().caller();
            self.allowances.insert((owner, spender), &value);
            self.env().emit_event(Approval {
                owner,
                spender,
                value,
            });
            Ok(())
        }

        #[ink(message)]
        fn transfer_from(&mut self, from: AccountId, to: AccountId, value: Balance) -> Result<()> {
            let spender = self.env().caller();
            let allowance = self.allowance(from, spender);
            if allowance < value {
                return Err(Error::InsufficientAllowance {
                    spender,
                    allowance,
                    needed: value,
                });
            }
            self._transfer(from, to, value)?;
            self.allowances.insert((from, spender), &(allowance - value));
            Ok(())
        }
    }

    impl StableToken {
        /// Creates a new [`StableToken`] with no supply, owned by the caller.
        #[ink(constructor)]
        pub fn new() -> Self {
            Self {
                owner: Self::env().caller(),
                total_supply: 0,
                balances: Mapping::default(),
                allowances: Mapping::default(),
            }
        }

        /// Returns the account allowed to mint.
        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner
        }

        /// Creates `value` tokens and assigns them to `to`.
        ///
        /// Only callable by the owner. Emits a `Transfer` event with no `from`.
        #[ink(message)]
        pub fn mint(&mut self, to: AccountId, value: Balance) -> Result<()> {
            if self.env().caller() != self.owner {
                return Err(Error::NotOwner);
            }
            let total_supply = self
                .total_supply
                .checked_add(value)
                .ok_or(Error::Overflow)?;
            // Bounded by the total supply check above.
            let balance = self.balance_of(to) + value;
            self.total_supply = total_supply;
            self.balances.insert(to, &balance);
            self.env().emit_event(Transfer {
                from: None,
                to: Some(to),
                value,
            });
            Ok(())
        }

        /// Moves `value` tokens from `from` to `to`, no allowance checks.
        fn _transfer(&mut self, from: AccountId, to: AccountId, value: Balance) -> Result<()> {
            let from_balance = self.balance_of(from);
            if from_balance < value {
                return Err(Error::InsufficientBalance {
                    sender: from,
                    balance: from_balance,
                    needed: value,
                });
            }
            self.balances.insert(from, &(from_balance - value));
            // The sum of balances never exceeds the total supply.
            let to_balance = self.balance_of(to);
            self.balances.insert(to, &(to_balance + value));
            self.env().emit_event(Transfer {
                from: Some(from),
                to: Some(to),
                value,
            });
            Ok(())
        }
    }

}
