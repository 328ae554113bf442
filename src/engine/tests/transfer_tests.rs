use std::str::FromStr;

use assert2::let_assert;
use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal::Decimal;

use crate::account::Account;
use crate::account::AccountError;
use crate::account::AccountId;
use crate::amount::OpeningBalance;
use crate::amount::PositiveAmount;
use crate::bank::Bank;
use crate::bank::BankId;
use crate::engine::InvalidTransaction;
use crate::engine::TransferError;
use crate::engine::transfer;
use crate::engine::validate_transfer;
use crate::name::BankName;
use crate::name::Holder;

#[test]
fn transfer_moves_funds_and_counts_the_transfer() {
    let (mut bank, mut source, mut target) = setup_bank_with_two_accounts("2000.50", "1500.50");

    let_assert!(Ok(()) = transfer(&mut bank, &mut source, &mut target, positive("500.50")));

    assert_eq!(source.balance().to_string(), "1500.00");
    assert_eq!(target.balance().to_string(), "2001.00");
    assert_eq!(bank.total_transfers(), 1);
}

#[test]
fn transfer_counter_increases_once_per_successful_transfer() {
    let (mut bank, mut source, mut target) = setup_bank_with_two_accounts("100", "0");

    for _ in 0..3 {
        transfer(&mut bank, &mut source, &mut target, positive("10")).unwrap();
    }
    let_assert!(Err(_) = transfer(&mut bank, &mut source, &mut target, positive("1000")));

    assert_eq!(bank.total_transfers(), 3);
    assert_eq!(source.balance(), dec("70"));
    assert_eq!(target.balance(), dec("30"));
}

#[test]
fn transfer_with_insufficient_funds_changes_nothing() {
    let (mut bank, mut source, mut target) = setup_bank_with_two_accounts("2000", "1500.50");

    let res = transfer(&mut bank, &mut source, &mut target, positive("2000.01"));

    let_assert!(Err(TransferError::Account(AccountError::InsufficientFunds { account_id, .. })) = res);
    assert_eq!(account_id, AccountId(1));
    assert_eq!(source.balance(), dec("2000"));
    assert_eq!(target.balance(), dec("1500.50"));
    assert_eq!(bank.total_transfers(), 0);
}

#[rstest]
#[case("0.01")]
#[case("100")]
#[case("99999")]
fn transfer_to_self_is_rejected_regardless_of_amount(#[case] amount: &str) {
    let (mut bank, mut source, _) = setup_bank_with_two_accounts("100", "0");
    let mut same = source.clone();

    let res = transfer(&mut bank, &mut source, &mut same, positive(amount));

    let_assert!(Err(TransferError::InvalidTransaction(InvalidTransaction::SelfTransfer { account_id })) = res);
    assert_eq!(account_id, AccountId(1));
    assert_eq!(source.balance(), dec("100"));
    assert_eq!(bank.total_transfers(), 0);
}

#[test]
fn transfer_between_banks_is_rejected_and_mutates_nothing() {
    let (mut bbva, mut source, _) = setup_bank_with_two_accounts("2000", "0");
    let mut interbank = Bank::new(BankId(2), BankName::try_from("Interbank").unwrap());
    let mut target = account(3, "Alex", "1500.50");
    interbank.add_account(&mut target).unwrap();

    let res = transfer(&mut bbva, &mut source, &mut target, positive("10"));

    let_assert!(Err(TransferError::InvalidTransaction(error)) = res);
    assert_eq!(
        error,
        InvalidTransaction::DifferentBanks {
            source_bank: BankId(1),
            target_bank: BankId(2),
        }
    );
    assert_eq!(source.balance(), dec("2000"));
    assert_eq!(target.balance(), dec("1500.50"));
    assert_eq!(bbva.total_transfers(), 0);
    assert_eq!(interbank.total_transfers(), 0);
}

#[test]
fn transfer_between_banks_is_reported_before_insufficient_funds() {
    let (mut bbva, mut source, _) = setup_bank_with_two_accounts("1", "0");
    let mut interbank = Bank::new(BankId(2), BankName::try_from("Interbank").unwrap());
    let mut target = account(3, "Alex", "0");
    interbank.add_account(&mut target).unwrap();

    let res = transfer(&mut bbva, &mut source, &mut target, positive("5000"));

    let_assert!(Err(TransferError::InvalidTransaction(InvalidTransaction::DifferentBanks { .. })) = res);
}

#[test]
fn transfer_counted_on_a_bank_other_than_the_accounts_one_is_rejected() {
    let (_, mut source, mut target) = setup_bank_with_two_accounts("100", "0");
    let mut other = Bank::new(BankId(9), BankName::try_from("Scotiabank").unwrap());

    let res = transfer(&mut other, &mut source, &mut target, positive("10"));

    let_assert!(Err(TransferError::InvalidTransaction(error)) = res);
    assert_eq!(
        error,
        InvalidTransaction::BankMismatch {
            bank_id: BankId(9),
            accounts_bank: BankId(1),
        }
    );
    assert_eq!(source.balance(), dec("100"));
    assert_eq!(other.total_transfers(), 0);
}

#[test]
fn transfer_from_an_account_without_bank_is_rejected() {
    let (mut bank, _, mut target) = setup_bank_with_two_accounts("0", "0");
    let mut loose = account(5, "Liz Gonzales", "100");

    let res = transfer(&mut bank, &mut loose, &mut target, positive("10"));

    let_assert!(Err(TransferError::InvalidTransaction(InvalidTransaction::Unaffiliated { account_id })) = res);
    assert_eq!(account_id, AccountId(5));
    assert_eq!(loose.balance(), dec("100"));
}

#[test]
fn transfer_with_saturated_counter_errors_before_moving_funds() {
    let (mut bank, mut source, mut target) = setup_bank_with_two_accounts("100", "0");
    bank.total_transfers = u32::MAX;

    let res = transfer(&mut bank, &mut source, &mut target, positive("10"));

    let_assert!(Err(TransferError::TransferCounterOverflow { bank_id }) = res);
    assert_eq!(bank_id, BankId(1));
    assert_eq!(source.balance(), dec("100"));
    assert_eq!(target.balance(), dec("0"));
}

#[test]
fn transfer_with_saturated_counter_and_insufficient_funds_reports_insufficient_funds() {
    let (mut bank, mut source, mut target) = setup_bank_with_two_accounts("5", "0");
    bank.total_transfers = u32::MAX;

    let res = transfer(&mut bank, &mut source, &mut target, positive("10"));

    let_assert!(Err(TransferError::Account(AccountError::InsufficientFunds { account_id, .. })) = res);
    assert_eq!(account_id, AccountId(1));
    assert_eq!(source.balance(), dec("5"));
    assert_eq!(target.balance(), dec("0"));
    assert_eq!(bank.total_transfers(), u32::MAX);
}

#[test]
fn validate_transfer_returns_the_shared_bank() {
    let (_, source, target) = setup_bank_with_two_accounts("0", "0");
    let_assert!(Ok(bank_id) = validate_transfer(&source, &target));
    assert_eq!(bank_id, BankId(1));
}

#[test]
fn invalid_transaction_message_names_the_rule() {
    let (mut bank, mut source, _) = setup_bank_with_two_accounts("100", "0");
    let mut same = source.clone();

    let_assert!(Err(error) = transfer(&mut bank, &mut source, &mut same, positive("1")));
    assert_eq!(
        error.to_string(),
        "invalid transaction, cannot transfer to the same account id=1"
    );
}

fn setup_bank_with_two_accounts(source_balance: &str, target_balance: &str) -> (Bank, Account, Account) {
    let mut bank = Bank::new(BankId(1), BankName::try_from("Banco BBVA").unwrap());
    let mut source = account(1, "Martín", source_balance);
    let mut target = account(2, "Alicia", target_balance);
    bank.add_account(&mut source).unwrap();
    bank.add_account(&mut target).unwrap();
    (bank, source, target)
}

fn account(id: u64, holder: &str, balance: &str) -> Account {
    Account::open(
        AccountId(id),
        Holder::try_from(holder).unwrap(),
        OpeningBalance::try_from(dec(balance)).unwrap(),
    )
}

fn positive(s: &str) -> PositiveAmount {
    PositiveAmount::try_from(dec(s)).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}
