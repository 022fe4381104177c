#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Balance, Bill, BillError, BillTotals, Contributor, ContributorId, ContributorIndex, Item,
    ItemId, Money, PaymentMap, SettlementInstruction, SettlementPlan, UnaccountedBalance,
};
pub use services::{BalanceAggregator, ProportionalAllocator, SettlementResolver};
