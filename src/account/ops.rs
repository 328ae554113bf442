//! Free functions that mutate a supplied [`Account`] balance.
//!
//! Every function computes the new balances first and assigns them only once all checks passed,
//! so a returned error always means the supplied accounts were left untouched.

use rust_decimal::Decimal;

use crate::account::Account;
use crate::account::AccountId;
use crate::amount::PositiveAmount;
use crate::name::Holder;

#[derive(thiserror::Error, Debug)]
pub enum AccountError {
    #[error("insufficient funds in account of holder {holder} id={account_id}, balance={balance} requested={amount}")]
    InsufficientFunds {
        account_id: AccountId,
        holder: Holder,
        balance: Decimal,
        amount: PositiveAmount,
    },
    #[error("overflow while applying {amount} to account id={account_id}")]
    OperationOverflow {
        account_id: AccountId,
        amount: PositiveAmount,
    },
}

/// Subtracts `amount` from the account balance.
///
/// # Errors
///
/// Returns an error if:
/// - The balance is less than `amount` ([`AccountError::InsufficientFunds`]).
/// - Subtracting `amount` overflows ([`AccountError::OperationOverflow`]).
pub fn debit(account: &mut Account, amount: PositiveAmount) -> Result<(), AccountError> {
    account.balance = checked_debit(account, amount)?;
    Ok(())
}

/// Adds `amount` to the account balance.
///
/// # Errors
///
/// Returns an error if:
/// - Adding `amount` overflows ([`AccountError::OperationOverflow`]).
pub fn credit(account: &mut Account, amount: PositiveAmount) -> Result<(), AccountError> {
    account.balance = checked_credit(account, amount)?;
    Ok(())
}

/// Debits `source` and credits `target` by the same `amount`, or neither.
///
/// # Errors
///
/// Same as [`debit`] on `source` and [`credit`] on `target`.
pub fn move_funds(source: &mut Account, target: &mut Account, amount: PositiveAmount) -> Result<(), AccountError> {
    let new_source_balance = checked_debit(source, amount)?;
    let new_target_balance = checked_credit(target, amount)?;
    source.balance = new_source_balance;
    target.balance = new_target_balance;
    Ok(())
}

/// Fails like [`debit`] would, without touching `account`.
pub(crate) fn ensure_covers(account: &Account, amount: PositiveAmount) -> Result<(), AccountError> {
    checked_debit(account, amount).map(|_| ())
}

fn checked_debit(account: &Account, amount: PositiveAmount) -> Result<Decimal, AccountError> {
    if amount.as_inner() > account.balance {
        return Err(AccountError::InsufficientFunds {
            account_id: account.id,
            holder: account.holder.clone(),
            balance: account.balance,
            amount,
        });
    }
    account
        .balance
        .checked_sub(amount.as_inner())
        .ok_or_else(|| overflow_error(account, amount))
}

fn checked_credit(account: &Account, amount: PositiveAmount) -> Result<Decimal, AccountError> {
    account
        .balance
        .checked_add(amount.as_inner())
        .ok_or_else(|| overflow_error(account, amount))
}

const fn overflow_error(account: &Account, amount: PositiveAmount) -> AccountError {
    AccountError::OperationOverflow {
        account_id: account.id,
        amount,
    }
}
