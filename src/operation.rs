//! CSV model of the operations a [`Ledger`] can replay.
//!
//! Rows share the header `type,bank,holder,account,target,amount`; each operation type reads only
//! the columns it needs. Names and amounts are validated while deserializing, so an invalid row
//! never reaches the ledger.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Deserializer;

use crate::account::AccountId;
use crate::amount::AmountError;
use crate::amount::OpeningBalance;
use crate::amount::PositiveAmount;
use crate::ledger::Ledger;
use crate::ledger::LedgerError;
use crate::ledger::TransferRequest;
use crate::name::BankName;
use crate::name::Holder;

#[derive(Debug, Clone, PartialEq, Eq, parse_display::Display)]
pub enum Operation {
    #[display("op=(open_bank name={0})")]
    OpenBank(BankName),
    #[display("{0}")]
    OpenAccount(OpenAccount),
    #[display("op=(deposit account={0} amount={1})")]
    Deposit(AccountId, PositiveAmount),
    #[display("op=(withdraw account={0} amount={1})")]
    Withdraw(AccountId, PositiveAmount),
    #[display("op=({0})")]
    Transfer(TransferRequest),
    #[display("op=(rename account={0} holder={1})")]
    Rename(AccountId, Holder),
    #[display("op=(close account={0})")]
    Close(AccountId),
}

#[derive(Debug, Clone, PartialEq, Eq, parse_display::Display)]
#[display("op=(open_account bank={bank} holder={holder} balance={balance})")]
pub struct OpenAccount {
    pub bank: BankName,
    pub holder: Holder,
    pub balance: OpeningBalance,
}

impl Operation {
    /// Applies the operation to `ledger`.
    ///
    /// # Errors
    ///
    /// Returns whatever the matching [`Ledger`] method returns; `open_account` additionally
    /// fails with [`crate::ledger::EntityNotFound::BankName`] for an unknown bank.
    pub fn apply(self, ledger: &mut Ledger) -> Result<(), LedgerError> {
        match self {
            Self::OpenBank(name) => {
                ledger.open_bank(name)?;
            }
            Self::OpenAccount(OpenAccount { bank, holder, balance }) => {
                let bank_id = ledger.bank_by_name(bank.as_str())?.id();
                ledger.open_account(bank_id, holder, balance)?;
            }
            Self::Deposit(id, amount) => {
                ledger.deposit(id, amount)?;
            }
            Self::Withdraw(id, amount) => {
                ledger.withdraw(id, amount)?;
            }
            Self::Transfer(request) => ledger.transfer(request)?,
            Self::Rename(id, holder) => {
                ledger.rename_account(id, holder)?;
            }
            Self::Close(id) => {
                ledger.close_account(id)?;
            }
        }
        Ok(())
    }
}

const OPERATION_TYPES: &[&str] = &["open_bank", "open_account", "deposit", "withdraw", "transfer", "rename", "close"];

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum OperationError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("unknown variant `{0}`, expected one of {types}", types = expected_types())]
    UnknownType(String),
    #[error(transparent)]
    Amount(#[from] AmountError),
}

#[derive(Deserialize)]
struct CsvRow {
    r#type: String,
    bank: Option<BankName>,
    holder: Option<Holder>,
    account: Option<AccountId>,
    target: Option<AccountId>,
    amount: Option<Decimal>,
}

impl Operation {
    fn from_row(row: CsvRow) -> Result<Self, OperationError> {
        let op = match row.r#type.as_str() {
            "open_bank" => Self::OpenBank(required(row.bank, "bank")?),
            "open_account" => Self::OpenAccount(OpenAccount {
                bank: required(row.bank, "bank")?,
                holder: required(row.holder, "holder")?,
                balance: OpeningBalance::try_from(required(row.amount, "amount")?)?,
            }),
            "deposit" => Self::Deposit(required(row.account, "account")?, positive(row.amount)?),
            "withdraw" => Self::Withdraw(required(row.account, "account")?, positive(row.amount)?),
            "transfer" => Self::Transfer(TransferRequest {
                source: required(row.account, "account")?,
                target: required(row.target, "target")?,
                amount: positive(row.amount)?,
            }),
            "rename" => Self::Rename(required(row.account, "account")?, required(row.holder, "holder")?),
            "close" => Self::Close(required(row.account, "account")?),
            other => return Err(OperationError::UnknownType(other.to_owned())),
        };
        Ok(op)
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let row = CsvRow::deserialize(deserializer)?;
        Self::from_row(row).map_err(serde::de::Error::custom)
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, OperationError> {
    value.ok_or(OperationError::MissingField(field))
}

fn positive(amount: Option<Decimal>) -> Result<PositiveAmount, OperationError> {
    Ok(PositiveAmount::try_from(required(amount, "amount")?)?)
}

fn expected_types() -> String {
    OPERATION_TYPES
        .iter()
        .map(|t| format!("`{t}`"))
        .collect::<Vec<_>>()
        .join(", ")
}
