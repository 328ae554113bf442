//! In-memory store of [`Bank`]s and [`Account`]s.
//!
//! [`Ledger`] is the calling layer around [`crate::engine`]: it resolves ids to stored entities,
//! reports missing ones as [`EntityNotFound`], hands out sequential ids and logs every
//! state change.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::account::Account;
use crate::account::AccountError;
use crate::account::AccountId;
use crate::amount::OpeningBalance;
use crate::amount::PositiveAmount;
use crate::bank::Bank;
use crate::bank::BankError;
use crate::bank::BankId;
use crate::engine::TransferError;
use crate::name::BankName;
use crate::name::Holder;

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod ledger_tests;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum EntityNotFound {
    #[error("account not found id={0}")]
    Account(AccountId),
    #[error("account not found holder={0}")]
    Holder(String),
    #[error("bank not found id={0}")]
    Bank(BankId),
    #[error("bank not found name={0}")]
    BankName(String),
}

#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    NotFound(#[from] EntityNotFound),
    #[error("bank name already in use name={name}")]
    DuplicateBankName { name: BankName },
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

/// Request to move `amount` from `source` to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, parse_display::Display)]
#[display("transfer=(source={source} target={target} amount={amount})")]
pub struct TransferRequest {
    pub source: AccountId,
    pub target: AccountId,
    pub amount: PositiveAmount,
}

#[derive(Debug, Default)]
pub struct Ledger {
    banks: HashMap<BankId, Bank>,
    accounts: HashMap<AccountId, Account>,
    last_bank_id: u64,
    last_account_id: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new bank with no accounts and no transfers.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Another bank already uses `name` ([`LedgerError::DuplicateBankName`]).
    pub fn open_bank(&mut self, name: BankName) -> Result<BankId, LedgerError> {
        if self.banks.values().any(|bank| bank.name() == &name) {
            tracing::warn!(%name, "bank name already in use");
            return Err(LedgerError::DuplicateBankName { name });
        }

        self.last_bank_id += 1;
        let id = BankId(self.last_bank_id);
        let bank = Bank::new(id, name);
        tracing::info!(%bank, "bank opened");
        self.banks.insert(id, bank);

        Ok(id)
    }

    /// Opens an account in `bank_id` with the supplied initial balance.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No bank has id `bank_id` ([`EntityNotFound::Bank`]).
    pub fn open_account(
        &mut self,
        bank_id: BankId,
        holder: Holder,
        balance: OpeningBalance,
    ) -> Result<AccountId, LedgerError> {
        let bank = self.banks.get_mut(&bank_id).ok_or(EntityNotFound::Bank(bank_id))?;

        let id = AccountId(self.last_account_id + 1);
        let mut account = Account::open(id, holder, balance);
        bank.add_account(&mut account)?;
        self.last_account_id = id.0;

        tracing::info!(%account, bank = %bank.name(), "account opened");
        self.accounts.insert(id, account);

        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`EntityNotFound::Account`] if no account has id `id`.
    pub fn account(&self, id: AccountId) -> Result<&Account, LedgerError> {
        Ok(self.accounts.get(&id).ok_or(EntityNotFound::Account(id))?)
    }

    /// Returns the lowest-id account held by `holder`.
    ///
    /// # Errors
    ///
    /// Returns [`EntityNotFound::Holder`] if no account is held by `holder`.
    pub fn account_by_holder(&self, holder: &str) -> Result<&Account, LedgerError> {
        Ok(self
            .accounts
            .values()
            .filter(|account| account.holder().as_str() == holder)
            .min_by_key(|account| account.id())
            .ok_or_else(|| EntityNotFound::Holder(holder.to_owned()))?)
    }

    /// # Errors
    ///
    /// Returns [`EntityNotFound::Account`] if no account has id `id`.
    pub fn balance(&self, id: AccountId) -> Result<Decimal, LedgerError> {
        self.account(id).map(Account::balance)
    }

    /// # Errors
    ///
    /// Returns [`EntityNotFound::Bank`] if no bank has id `id`.
    pub fn bank(&self, id: BankId) -> Result<&Bank, LedgerError> {
        Ok(self.banks.get(&id).ok_or(EntityNotFound::Bank(id))?)
    }

    /// # Errors
    ///
    /// Returns [`EntityNotFound::BankName`] if no bank is named `name`.
    pub fn bank_by_name(&self, name: &str) -> Result<&Bank, LedgerError> {
        Ok(self
            .banks
            .values()
            .find(|bank| bank.name().as_str() == name)
            .ok_or_else(|| EntityNotFound::BankName(name.to_owned()))?)
    }

    /// # Errors
    ///
    /// Returns [`EntityNotFound::Bank`] if no bank has id `bank_id`.
    pub fn total_transfers(&self, bank_id: BankId) -> Result<u32, LedgerError> {
        self.bank(bank_id).map(Bank::total_transfers)
    }

    /// Replaces the holder of account `id`.
    ///
    /// # Errors
    ///
    /// Returns [`EntityNotFound::Account`] if no account has id `id`.
    pub fn rename_account(&mut self, id: AccountId, holder: Holder) -> Result<&Account, LedgerError> {
        let account = self.account_mut(id)?;
        let previous = account.holder().clone();
        account.rename(holder);
        tracing::info!(account_id = %id, %previous, holder = %account.holder(), "account renamed");
        Ok(account)
    }

    /// Removes account `id` from its bank and from the ledger, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`EntityNotFound::Account`] if no account has id `id`.
    pub fn close_account(&mut self, id: AccountId) -> Result<Account, LedgerError> {
        let mut account = self.accounts.remove(&id).ok_or(EntityNotFound::Account(id))?;
        if let Some(bank) = account.bank_id().and_then(|bank_id| self.banks.get_mut(&bank_id)) {
            bank.remove_account(&mut account);
        }
        tracing::info!(%account, "account closed");
        Ok(account)
    }

    /// Credits `amount` to account `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No account has id `id` ([`EntityNotFound::Account`]).
    /// - The credit overflows ([`AccountError::OperationOverflow`]).
    pub fn deposit(&mut self, id: AccountId, amount: PositiveAmount) -> Result<&Account, LedgerError> {
        let account = self.account_mut(id)?;
        if let Err(error) = crate::engine::credit(account, amount) {
            tracing::warn!(%error, "deposit rejected");
            return Err(error.into());
        }
        tracing::info!(account_id = %id, %amount, balance = %account.balance(), "deposit applied");
        Ok(account)
    }

    /// Debits `amount` from account `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No account has id `id` ([`EntityNotFound::Account`]).
    /// - The account cannot cover `amount` ([`AccountError::InsufficientFunds`]).
    pub fn withdraw(&mut self, id: AccountId, amount: PositiveAmount) -> Result<&Account, LedgerError> {
        let account = self.account_mut(id)?;
        if let Err(error) = crate::engine::debit(account, amount) {
            tracing::warn!(%error, "withdrawal rejected");
            return Err(error.into());
        }
        tracing::info!(account_id = %id, %amount, balance = %account.balance(), "withdrawal applied");
        Ok(account)
    }

    /// Transfers between two accounts of the same bank.
    ///
    /// A self-transfer is rejected before either account is looked up. The engine then runs on
    /// copies of both accounts, which replace the stored ones only on success.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `source` and `target` are the same id ([`crate::engine::InvalidTransaction::SelfTransfer`]).
    /// - Either account does not exist ([`EntityNotFound::Account`]).
    /// - [`crate::engine::transfer`] fails.
    pub fn transfer(&mut self, request: TransferRequest) -> Result<(), LedgerError> {
        if let Err(error) = crate::engine::transfer::ensure_distinct(request.source, request.target) {
            tracing::warn!(%request, %error, "transfer rejected");
            return Err(TransferError::from(error).into());
        }

        let mut source = self.account(request.source)?.clone();
        let mut target = self.account(request.target)?.clone();

        let bank_id = match crate::engine::validate_transfer(&source, &target) {
            Ok(bank_id) => bank_id,
            Err(error) => {
                tracing::warn!(%request, %error, "transfer rejected");
                return Err(TransferError::from(error).into());
            }
        };
        let bank = self.banks.get_mut(&bank_id).ok_or(EntityNotFound::Bank(bank_id))?;

        if let Err(error) = crate::engine::transfer(bank, &mut source, &mut target, request.amount) {
            tracing::warn!(%request, %error, "transfer rejected");
            return Err(error.into());
        }

        tracing::info!(
            %request,
            source_holder = %source.holder(),
            target_holder = %target.holder(),
            bank = %bank.name(),
            total_transfers = bank.total_transfers(),
            "transfer applied"
        );
        self.accounts.insert(source.id(), source);
        self.accounts.insert(target.id(), target);

        Ok(())
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn banks(&self) -> impl Iterator<Item = &Bank> {
        self.banks.values()
    }

    fn account_mut(&mut self, id: AccountId) -> Result<&mut Account, LedgerError> {
        Ok(self.accounts.get_mut(&id).ok_or(EntityNotFound::Account(id))?)
    }
}
