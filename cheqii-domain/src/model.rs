use fxhash::FxHashSet;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};
use thiserror::Error;
use uuid::Uuid;

/// Amount of money as a signed count of minor currency units (e.g. cents).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn amount(self) -> i64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn signum(self) -> i64 {
        self.0.signum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Position of a contributor in a bill's contributor list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContributorIndex(pub usize);

impl fmt::Display for ContributorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContributorId(String);

impl ContributorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContributorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contributor {
    pub id: ContributorId,
    pub name: String,
}

impl Contributor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ContributorId::generate(),
            name: name.into(),
        }
    }
}

/// A line on the bill. `split` is index-aligned with the bill's contributors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub cost: Money,
    pub buyer: ContributorIndex,
    pub split: Vec<u64>,
}

impl Item {
    /// An item nobody shares in is void and stays out of every total.
    pub fn is_void(&self) -> bool {
        self.split.iter().all(|weight| *weight == 0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BillError {
    #[error("item {item} has {found} split weights but the bill has {expected} contributors")]
    SplitLengthMismatch {
        item: usize,
        expected: usize,
        found: usize,
    },
    #[error("item {item} is bought by {buyer} but the bill has {contributor_count} contributors")]
    BuyerOutOfRange {
        item: usize,
        buyer: ContributorIndex,
        contributor_count: usize,
    },
    #[error("contributor {index} does not exist (bill has {contributor_count})")]
    ContributorOutOfRange {
        index: ContributorIndex,
        contributor_count: usize,
    },
    #[error("item {position} does not exist (bill has {item_count})")]
    ItemOutOfRange { position: usize, item_count: usize },
    #[error("contributor id '{0}' is used more than once")]
    DuplicateContributorId(ContributorId),
    #[error("item id '{0}' is used more than once")]
    DuplicateItemId(ItemId),
    #[error("cannot remove the last contributor while the bill still has items")]
    LastContributor,
    #[error("item {item} pushes the bill's combined item costs past the supported maximum")]
    CostOverflow { item: usize },
}

/// Contributors and items of one bill, kept index-aligned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bill {
    name: String,
    contributors: Vec<Contributor>,
    items: Vec<Item>,
}

impl Bill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contributors: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn try_new(
        name: impl Into<String>,
        contributors: Vec<Contributor>,
        items: Vec<Item>,
    ) -> Result<Self, BillError> {
        let mut contributor_ids = FxHashSet::default();
        for contributor in &contributors {
            if !contributor_ids.insert(contributor.id.as_str()) {
                return Err(BillError::DuplicateContributorId(contributor.id.clone()));
            }
        }

        let mut item_ids = FxHashSet::default();
        for (position, item) in items.iter().enumerate() {
            if !item_ids.insert(item.id.as_str()) {
                return Err(BillError::DuplicateItemId(item.id.clone()));
            }
            if item.split.len() != contributors.len() {
                return Err(BillError::SplitLengthMismatch {
                    item: position,
                    expected: contributors.len(),
                    found: item.split.len(),
                });
            }
            if item.buyer.0 >= contributors.len() {
                return Err(BillError::BuyerOutOfRange {
                    item: position,
                    buyer: item.buyer,
                    contributor_count: contributors.len(),
                });
            }
        }

        let mut magnitude = 0_i64;
        for (position, item) in items.iter().enumerate() {
            magnitude = add_cost_magnitude(magnitude, item.cost)
                .ok_or(BillError::CostOverflow { item: position })?;
        }

        Ok(Self {
            name: name.into(),
            contributors,
            items,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contributors(&self) -> &[Contributor] {
        &self.contributors
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn contributor(&self, index: ContributorIndex) -> Option<&Contributor> {
        self.contributors.get(index.0)
    }

    pub fn contributor_indices(&self) -> impl Iterator<Item = ContributorIndex> + '_ {
        (0..self.contributors.len()).map(ContributorIndex)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Appends a contributor with a fresh id, giving it `default_weight` on every item.
    pub fn add_contributor(
        &mut self,
        name: impl Into<String>,
        default_weight: u64,
    ) -> ContributorIndex {
        self.push_contributor(Contributor::new(name), default_weight)
    }

    /// Appends an existing contributor, e.g. one linked to an authenticated user id.
    pub fn insert_contributor(
        &mut self,
        contributor: Contributor,
        default_weight: u64,
    ) -> Result<ContributorIndex, BillError> {
        if self.contributors.iter().any(|c| c.id == contributor.id) {
            return Err(BillError::DuplicateContributorId(contributor.id));
        }
        Ok(self.push_contributor(contributor, default_weight))
    }

    fn push_contributor(
        &mut self,
        contributor: Contributor,
        default_weight: u64,
    ) -> ContributorIndex {
        self.contributors.push(contributor);
        for item in &mut self.items {
            item.split.push(default_weight);
        }
        ContributorIndex(self.contributors.len() - 1)
    }

    /// Removes a contributor and its split column.
    ///
    /// Items bought by the removed contributor fall back to contributor 0 and
    /// later buyer indices shift down by one.
    pub fn remove_contributor(
        &mut self,
        index: ContributorIndex,
    ) -> Result<Contributor, BillError> {
        self.check_contributor(index)?;
        if self.contributors.len() == 1 && !self.items.is_empty() {
            return Err(BillError::LastContributor);
        }

        let removed = self.contributors.remove(index.0);
        for item in &mut self.items {
            item.split.remove(index.0);
            if item.buyer == index {
                item.buyer = ContributorIndex(0);
            } else if item.buyer > index {
                item.buyer = ContributorIndex(item.buyer.0 - 1);
            }
        }
        Ok(removed)
    }

    pub fn rename_contributor(
        &mut self,
        index: ContributorIndex,
        name: impl Into<String>,
    ) -> Result<(), BillError> {
        self.check_contributor(index)?;
        self.contributors[index.0].name = name.into();
        Ok(())
    }

    /// Appends an item split evenly between every contributor. Returns its position.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        cost: Money,
        buyer: ContributorIndex,
    ) -> Result<usize, BillError> {
        if buyer.0 >= self.contributors.len() {
            return Err(BillError::BuyerOutOfRange {
                item: self.items.len(),
                buyer,
                contributor_count: self.contributors.len(),
            });
        }
        self.check_cost_fits(self.items.len(), cost)?;
        self.items.push(Item {
            id: ItemId::generate(),
            name: name.into(),
            cost,
            buyer,
            split: vec![1; self.contributors.len()],
        });
        Ok(self.items.len() - 1)
    }

    pub fn remove_item(&mut self, position: usize) -> Result<Item, BillError> {
        self.item_mut(position)?;
        Ok(self.items.remove(position))
    }

    pub fn rename_item(
        &mut self,
        position: usize,
        name: impl Into<String>,
    ) -> Result<(), BillError> {
        self.item_mut(position)?.name = name.into();
        Ok(())
    }

    pub fn set_item_cost(&mut self, position: usize, cost: Money) -> Result<(), BillError> {
        self.item_mut(position)?;
        self.check_cost_fits(position, cost)?;
        self.items[position].cost = cost;
        Ok(())
    }

    pub fn set_item_buyer(
        &mut self,
        position: usize,
        buyer: ContributorIndex,
    ) -> Result<(), BillError> {
        self.check_contributor(buyer)?;
        self.item_mut(position)?.buyer = buyer;
        Ok(())
    }

    pub fn set_split_weight(
        &mut self,
        position: usize,
        contributor: ContributorIndex,
        weight: u64,
    ) -> Result<(), BillError> {
        self.check_contributor(contributor)?;
        self.item_mut(position)?.split[contributor.0] = weight;
        Ok(())
    }

    fn check_contributor(&self, index: ContributorIndex) -> Result<(), BillError> {
        if index.0 < self.contributors.len() {
            Ok(())
        } else {
            Err(BillError::ContributorOutOfRange {
                index,
                contributor_count: self.contributors.len(),
            })
        }
    }

    // Paid, owed and balance figures never exceed the sum of |cost|, which must fit an i64.
    fn check_cost_fits(&self, position: usize, cost: Money) -> Result<(), BillError> {
        self.items
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != position)
            .map(|(_, item)| item.cost)
            .chain(std::iter::once(cost))
            .try_fold(0_i64, add_cost_magnitude)
            .map(|_| ())
            .ok_or(BillError::CostOverflow { item: position })
    }

    fn item_mut(&mut self, position: usize) -> Result<&mut Item, BillError> {
        let item_count = self.items.len();
        self.items
            .get_mut(position)
            .ok_or(BillError::ItemOutOfRange {
                position,
                item_count,
            })
    }
}

fn add_cost_magnitude(magnitude: i64, cost: Money) -> Option<i64> {
    magnitude.checked_add(cost.amount().checked_abs()?)
}

/// Accumulated money per contributor. Holds an entry for every contributor.
pub type PaymentMap = BTreeMap<ContributorIndex, Money>;

pub fn empty_payment_map(contributor_count: usize) -> PaymentMap {
    (0..contributor_count)
        .map(|idx| (ContributorIndex(idx), Money::ZERO))
        .collect()
}

/// Net position of a contributor: positive means they are owed money back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Balance {
    pub contributor: ContributorIndex,
    pub amount: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BillTotals {
    pub total_paid: PaymentMap,
    pub total_owing: PaymentMap,
    pub total_cost: Money,
    /// Positions of items left out of the totals because nobody shares them.
    pub voided_items: Vec<usize>,
}

impl BillTotals {
    pub fn balances(&self) -> Vec<Balance> {
        self.total_paid
            .keys()
            .chain(self.total_owing.keys())
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|contributor| {
                let paid = self
                    .total_paid
                    .get(&contributor)
                    .copied()
                    .unwrap_or_default();
                let owing = self
                    .total_owing
                    .get(&contributor)
                    .copied()
                    .unwrap_or_default();
                Balance {
                    contributor,
                    amount: paid - owing,
                }
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementInstruction {
    pub payer: ContributorIndex,
    pub receiver: ContributorIndex,
    pub amount: Money,
}

/// A balance the resolver could not pair off. Only produced when the input
/// balances do not sum to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnaccountedBalance {
    pub contributor: ContributorIndex,
    pub amount: Money,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettlementPlan {
    pub instructions: Vec<SettlementInstruction>,
    pub unaccounted: Vec<UnaccountedBalance>,
}

impl SettlementPlan {
    pub fn is_balanced(&self) -> bool {
        self.unaccounted.is_empty()
    }

    /// Balances after every instruction has been paid.
    pub fn apply_to(&self, balances: &[Balance]) -> Vec<Balance> {
        let mut remaining: PaymentMap = balances
            .iter()
            .map(|balance| (balance.contributor, balance.amount))
            .collect();
        for instruction in &self.instructions {
            if let Some(balance) = remaining.get_mut(&instruction.payer) {
                *balance += instruction.amount;
            }
            if let Some(balance) = remaining.get_mut(&instruction.receiver) {
                *balance -= instruction.amount;
            }
        }
        remaining
            .into_iter()
            .map(|(contributor, amount)| Balance {
                contributor,
                amount,
            })
            .collect()
    }
}
