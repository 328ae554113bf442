use crate::account::Account;
use crate::account::AccountError;
use crate::account::AccountId;
use crate::amount::PositiveAmount;
use crate::bank::Bank;
use crate::bank::BankId;

#[cfg(test)]
#[path = "tests/transfer_tests.rs"]
mod transfer_tests;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum InvalidTransaction {
    #[error("cannot transfer to the same account id={account_id}")]
    SelfTransfer { account_id: AccountId },
    #[error("account id={account_id} does not belong to any bank")]
    Unaffiliated { account_id: AccountId },
    #[error(
        "cannot transfer between accounts of different banks source_bank={source_bank} target_bank={target_bank}"
    )]
    DifferentBanks { source_bank: BankId, target_bank: BankId },
    #[error("accounts belong to bank id={accounts_bank}, not to bank id={bank_id}")]
    BankMismatch { bank_id: BankId, accounts_bank: BankId },
}

#[derive(thiserror::Error, Debug)]
pub enum TransferError {
    #[error("invalid transaction, {0}")]
    InvalidTransaction(#[from] InvalidTransaction),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("transfer counter overflow for bank id={bank_id}")]
    TransferCounterOverflow { bank_id: BankId },
}

/// Checks that `source` and `target` are two distinct accounts of the same bank and returns
/// that bank's id.
///
/// # Errors
///
/// Returns an error, checked in this order, if:
/// - Both ids are equal ([`InvalidTransaction::SelfTransfer`]).
/// - Either account has no bank ([`InvalidTransaction::Unaffiliated`]).
/// - The accounts belong to different banks ([`InvalidTransaction::DifferentBanks`]).
pub fn validate_transfer(source: &Account, target: &Account) -> Result<BankId, InvalidTransaction> {
    ensure_distinct(source.id(), target.id())?;
    let source_bank = affiliation(source)?;
    let target_bank = affiliation(target)?;
    if source_bank != target_bank {
        return Err(InvalidTransaction::DifferentBanks {
            source_bank,
            target_bank,
        });
    }
    Ok(source_bank)
}

/// Moves `amount` from `source` to `target` and counts the transfer on `bank`.
///
/// Bank membership is validated before funds, so a cross-bank transfer is reported as such
/// even when `source` could not cover it either.
///
/// # Errors
///
/// Returns an error if:
/// - [`validate_transfer`] fails ([`TransferError::InvalidTransaction`]).
/// - `bank` is not the accounts' bank ([`InvalidTransaction::BankMismatch`]).
/// - `source` cannot cover `amount` ([`AccountError::InsufficientFunds`]).
/// - The bank counter or a balance overflows, checked after funds.
pub fn transfer(
    bank: &mut Bank,
    source: &mut Account,
    target: &mut Account,
    amount: PositiveAmount,
) -> Result<(), TransferError> {
    let accounts_bank = validate_transfer(source, target)?;
    if accounts_bank != bank.id {
        return Err(InvalidTransaction::BankMismatch {
            bank_id: bank.id,
            accounts_bank,
        }
        .into());
    }

    crate::account::ops::ensure_covers(source, amount)?;
    let new_total_transfers = bank
        .total_transfers
        .checked_add(1)
        .ok_or(TransferError::TransferCounterOverflow { bank_id: bank.id })?;

    crate::account::move_funds(source, target, amount)?;
    bank.total_transfers = new_total_transfers;

    Ok(())
}

/// Self-transfers are rejected on ids alone, before any account is looked up.
pub(crate) fn ensure_distinct(source: AccountId, target: AccountId) -> Result<(), InvalidTransaction> {
    if source == target {
        return Err(InvalidTransaction::SelfTransfer { account_id: source });
    }
    Ok(())
}

fn affiliation(account: &Account) -> Result<BankId, InvalidTransaction> {
    account.bank_id().ok_or(InvalidTransaction::Unaffiliated {
        account_id: account.id(),
    })
}
