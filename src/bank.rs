use serde::Deserialize;
use serde::Serialize;

use crate::account::Account;
use crate::account::AccountId;
use crate::name::BankName;

#[derive(Debug, Serialize, Deserialize, Copy, Clone, Hash, PartialEq, Eq, Ord, PartialOrd, parse_display::Display)]
pub struct BankId(pub u64);

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum BankError {
    #[error("account id={account_id} already belongs to bank id={owner}, cannot add it to bank id={bank_id}")]
    AccountAlreadyAttached {
        account_id: AccountId,
        owner: BankId,
        bank_id: BankId,
    },
}

/// A bank and the identifiers of the accounts it owns.
///
/// Membership and the [`Account::bank_id`] back-reference only change together, through
/// [`Bank::add_account`] and [`Bank::remove_account`].
#[derive(Debug, Clone, parse_display::Display)]
#[display("bank=(id={id} name={name} total_transfers={total_transfers})")]
pub struct Bank {
    pub(crate) id: BankId,
    pub(crate) name: BankName,
    pub(crate) total_transfers: u32,
    pub(crate) accounts: Vec<AccountId>,
}

impl Bank {
    pub const fn new(id: BankId, name: BankName) -> Self {
        Self {
            id,
            name,
            total_transfers: 0,
            accounts: Vec::new(),
        }
    }

    pub const fn id(&self) -> BankId {
        self.id
    }

    pub const fn name(&self) -> &BankName {
        &self.name
    }

    pub const fn total_transfers(&self) -> u32 {
        self.total_transfers
    }

    pub fn accounts(&self) -> &[AccountId] {
        &self.accounts
    }

    pub fn contains(&self, account_id: AccountId) -> bool {
        self.accounts.contains(&account_id)
    }

    /// Makes `account` a member of this bank and points its back-reference here.
    /// Adding an account that is already a member is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `account` already belongs to another bank ([`BankError::AccountAlreadyAttached`]).
    pub fn add_account(&mut self, account: &mut Account) -> Result<(), BankError> {
        match account.bank_id() {
            Some(owner) if owner != self.id => Err(BankError::AccountAlreadyAttached {
                account_id: account.id(),
                owner,
                bank_id: self.id,
            }),
            Some(_) if self.contains(account.id()) => Ok(()),
            _ => {
                self.accounts.push(account.id());
                account.set_bank_id(Some(self.id));
                Ok(())
            }
        }
    }

    /// Drops `account` from this bank and clears its back-reference.
    /// Returns `false`, leaving `account` untouched, if it is not a member.
    pub fn remove_account(&mut self, account: &mut Account) -> bool {
        let Some(position) = self.accounts.iter().position(|id| *id == account.id()) else {
            return false;
        };
        self.accounts.remove(position);
        if account.bank_id() == Some(self.id) {
            account.set_bank_id(None);
        }
        true
    }
}
