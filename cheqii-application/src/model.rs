use cheqii_domain::{Balance, BillTotals, ContributorIndex, Money, SettlementPlan};
use cheqii_locale::{CurrencyDescriptor, Locale};

/// Per-contributor row of a [`BillSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorSummary {
    pub index: ContributorIndex,
    pub name: String,
    pub paid: Money,
    pub owing: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillSummary {
    pub totals: BillTotals,
    pub balances: Vec<Balance>,
    pub settlement: SettlementPlan,
    pub contributors: Vec<ContributorSummary>,
}

/// How user-typed amounts that fail to parse are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputPolicy {
    /// Unparseable text counts as zero.
    #[default]
    TreatInvalidAsZero,
    /// Unparseable text rejects the edit.
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditContext {
    pub locale: Locale,
    pub currency: CurrencyDescriptor,
    pub policy: InputPolicy,
}

/// A user edit. Costs and weights carry the raw text the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillEdit {
    RenameBill {
        name: String,
    },
    AddContributor {
        name: String,
        default_weight: u64,
    },
    RemoveContributor {
        contributor: ContributorIndex,
    },
    RenameContributor {
        contributor: ContributorIndex,
        name: String,
    },
    AddItem {
        name: String,
        cost: String,
        buyer: ContributorIndex,
    },
    RemoveItem {
        position: usize,
    },
    RenameItem {
        position: usize,
        name: String,
    },
    SetItemCost {
        position: usize,
        cost: String,
    },
    SetItemBuyer {
        position: usize,
        buyer: ContributorIndex,
    },
    SetSplitWeight {
        position: usize,
        contributor: ContributorIndex,
        weight: String,
    },
}
