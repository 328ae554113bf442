pub mod account;
pub mod amount;
pub mod bank;
pub mod engine;
pub mod ledger;
pub mod name;
pub mod operation;
