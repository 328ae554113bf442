//! Ledger operation engine.
//!
//! Pure, synchronous state transitions over caller-supplied [`crate::account::Account`]s and
//! [`crate::bank::Bank`]s: [`debit`], [`credit`] and [`transfer`]. Each call either commits all of
//! its mutations or returns an error having mutated nothing.

pub mod transfer;

pub use crate::account::credit;
pub use crate::account::debit;
pub use transfer::InvalidTransaction;
pub use transfer::TransferError;
pub use transfer::transfer;
pub use transfer::validate_transfer;
