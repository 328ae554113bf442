use std::hash::Hash;
use std::hash::Hasher;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use crate::amount::OpeningBalance;
use crate::bank::BankId;
use crate::name::Holder;

#[derive(Debug, Serialize, Deserialize, Copy, Clone, Hash, PartialEq, Eq, Ord, PartialOrd, parse_display::Display)]
pub struct AccountId(pub u64);

/// A persisted account.
///
/// Equality is structural over holder and balance only, whatever the ids or banks. Balances must
/// match in value and scale, so `2500.00` and `2500` differ.
#[derive(Debug, Clone, parse_display::Display)]
#[display("account=(id={id} holder={holder} balance={balance})")]
pub struct Account {
    pub(in crate::account) id: AccountId,
    pub(in crate::account) holder: Holder,
    pub(in crate::account) balance: Decimal,
    pub(in crate::account) bank_id: Option<BankId>,
}

impl Account {
    pub const fn open(id: AccountId, holder: Holder, balance: OpeningBalance) -> Self {
        Self {
            id,
            holder,
            balance: balance.as_inner(),
            bank_id: None,
        }
    }

    pub const fn id(&self) -> AccountId {
        self.id
    }

    pub const fn holder(&self) -> &Holder {
        &self.holder
    }

    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    pub const fn bank_id(&self) -> Option<BankId> {
        self.bank_id
    }

    pub fn rename(&mut self, holder: Holder) {
        self.holder = holder;
    }

    /// Only [`crate::bank::Bank`] membership changes go through here.
    pub(crate) const fn set_bank_id(&mut self, bank_id: Option<BankId>) {
        self.bank_id = bank_id;
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.holder == other.holder
            && self.balance == other.balance
            && self.balance.scale() == other.balance.scale()
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.holder.hash(state);
        self.balance.hash(state);
        self.balance.scale().hash(state);
    }
}
