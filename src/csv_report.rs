use std::io::Write as _;

use csv::Writer;
use minibank::account::Account;
use minibank::account::AccountId;
use minibank::bank::Bank;
use minibank::bank::BankId;
use minibank::ledger::Ledger;
use minibank::name::BankName;
use minibank::name::Holder;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvReportError {
    #[error("bank of account not found in ledger account_id={account_id}")]
    MissingBank { account_id: AccountId },
    #[error("csv serialization error for {entity}, source_error={source:?}")]
    Csv {
        entity: String,
        #[source]
        source: csv::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Writes the [`Ledger`] accounts and banks to stdout as two CSV tables, each in ascending id
/// order and separated by an empty line.
/// Returns a [`Vec`] of [`CsvReportError`] representing all the errors encountered during
/// reporting; a failing row does not stop the following ones.
pub fn write_to_stdout(ledger: &Ledger) -> Vec<CsvReportError> {
    let mut errors: Vec<CsvReportError> = Vec::new();
    let mut stdout = std::io::stdout().lock();

    let mut accounts: Vec<&Account> = ledger.accounts().collect();
    accounts.sort_unstable_by_key(|account| account.id());

    let mut writer = Writer::from_writer(&mut stdout);
    for account in accounts {
        match AccountReport::try_from((account, ledger)) {
            Ok(report) => {
                if let Err(source) = writer.serialize(report) {
                    errors.push(CsvReportError::Csv {
                        entity: account.to_string(),
                        source,
                    });
                }
            }
            Err(error) => errors.push(error),
        }
    }
    if let Err(io_err) = writer.flush() {
        errors.push(CsvReportError::Io(io_err));
    }
    drop(writer);

    if let Err(io_err) = writeln!(stdout) {
        errors.push(CsvReportError::Io(io_err));
    }

    let mut banks: Vec<&Bank> = ledger.banks().collect();
    banks.sort_unstable_by_key(|bank| bank.id());

    let mut writer = Writer::from_writer(&mut stdout);
    for bank in banks {
        if let Err(source) = writer.serialize(BankReport::from(bank)) {
            errors.push(CsvReportError::Csv {
                entity: bank.to_string(),
                source,
            });
        }
    }
    if let Err(io_err) = writer.flush() {
        errors.push(CsvReportError::Io(io_err));
    }

    errors
}

#[derive(Serialize)]
struct AccountReport<'a> {
    account: AccountId,
    bank: &'a BankName,
    holder: &'a Holder,
    balance: Decimal,
}

impl<'a> TryFrom<(&'a Account, &'a Ledger)> for AccountReport<'a> {
    type Error = CsvReportError;

    fn try_from((account, ledger): (&'a Account, &'a Ledger)) -> Result<Self, Self::Error> {
        let missing_bank = || CsvReportError::MissingBank {
            account_id: account.id(),
        };
        let bank_id = account.bank_id().ok_or_else(missing_bank)?;
        let bank = ledger.bank(bank_id).map_err(|_| missing_bank())?;
        Ok(Self {
            account: account.id(),
            bank: bank.name(),
            holder: account.holder(),
            balance: account.balance(),
        })
    }
}

#[derive(Serialize)]
struct BankReport<'a> {
    bank: BankId,
    name: &'a BankName,
    total_transfers: u32,
}

impl<'a> From<&'a Bank> for BankReport<'a> {
    fn from(bank: &'a Bank) -> Self {
        Self {
            bank: bank.id(),
            name: bank.name(),
            total_transfers: bank.total_transfers(),
        }
    }
}
