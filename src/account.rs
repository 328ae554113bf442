pub mod model;
pub mod ops;

pub use model::Account;
pub use model::AccountId;
pub use ops::AccountError;
pub use ops::credit;
pub use ops::debit;
pub use ops::move_funds;
