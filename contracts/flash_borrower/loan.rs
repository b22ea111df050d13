//! Pending-callback bookkeeping of the borrower.

use ierc3156::ierc3156_flash_borrower::Error;
use ink::primitives::AccountId;

/// What the borrower asked for when it called a lender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[ink::scale_derive(Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(ink::storage::traits::StorageLayout))]
pub struct PendingLoan {
    pub lender: AccountId,
    pub token: AccountId,
    pub amount: u128,
}

/// Where the borrower is within a flash loan.
///
/// `Idle -> AwaitingCallback -> Settling -> Idle`. A failed loan reverts the
/// whole call chain, so the only committed state is ever `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[ink::scale_derive(Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(ink::storage::traits::StorageLayout))]
pub enum LoanState {
    #[default]
    Idle,
    /// A lender has been called and its callback has not arrived yet.
    AwaitingCallback(PendingLoan),
    /// The callback arrived and consumed the pending loan.
    Settling(PendingLoan),
}

impl LoanState {
    /// Validates a callback from `caller` lending `amount` of `token` and
    /// returns the state to move to.
    ///
    /// Only the first callback of the lender the borrower is waiting on is
    /// accepted; anything else is [`Error::WrongLender`].
    pub fn accept_callback(
        self,
        caller: AccountId,
        token: AccountId,
        amount: u128,
    ) -> Result<LoanState, Error> {
        match self {
            LoanState::AwaitingCallback(pending) if pending.lender == caller => {
                if pending.token != token || pending.amount != amount {
                    return Err(Error::LoanMismatch);
                }
                Ok(LoanState::Settling(pending))
            }
            _ => Err(Error::WrongLender),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LENDER: [u8; 32] = [0x01; 32];
    const TOKEN: [u8; 32] = [0x02; 32];
    const STRANGER: [u8; 32] = [0x03; 32];

    fn account(id: [u8; 32]) -> AccountId {
        AccountId::from(id)
    }

    fn awaiting() -> LoanState {
        LoanState::AwaitingCallback(PendingLoan {
            lender: account(LENDER),
            token: account(TOKEN),
            amount: 100,
        })
    }

    #[test]
    fn callback_from_expected_lender_settles() {
        assert_eq!(
            awaiting().accept_callback(account(LENDER), account(TOKEN), 100),
            Ok(LoanState::Settling(PendingLoan {
                lender: account(LENDER),
                token: account(TOKEN),
                amount: 100,
            }))
        );
    }

    #[test]
    fn callback_without_pending_loan_is_wrong_lender() {
        assert_eq!(
            LoanState::Idle.accept_callback(account(LENDER), account(TOKEN), 100),
            Err(Error::WrongLender)
        );
    }

    #[test]
    fn callback_from_other_account_is_wrong_lender() {
        assert_eq!(
            awaiting().accept_callback(account(STRANGER), account(TOKEN), 100),
            Err(Error::WrongLender)
        );
    }

    #[test]
    fn second_callback_is_wrong_lender() {
        let settling = awaiting()
            .accept_callback(account(LENDER), account(TOKEN), 100)
            .expect("first callback accepted");
        assert_eq!(
            settling.accept_callback(account(LENDER), account(TOKEN), 100),
            Err(Error::WrongLender)
        );
    }

    #[test]
    fn callback_for_other_loan_is_a_mismatch() {
        assert_eq!(
            awaiting().accept_callback(account(LENDER), account(TOKEN), 99),
            Err(Error::LoanMismatch)
        );
        assert_eq!(
            awaiting().accept_callback(account(LENDER), account(STRANGER), 100),
            Err(Error::LoanMismatch)
        );
    }
}
