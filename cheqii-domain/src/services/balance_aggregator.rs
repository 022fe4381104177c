use crate::{
    model::{Bill, BillTotals, Money, empty_payment_map},
    services::ProportionalAllocator,
};

/// Folds every item of a bill into per-contributor paid and owed totals.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// Computes the totals of `bill` from scratch.
    ///
    /// Void items (no positive split weight) are skipped and reported in
    /// `voided_items`. Odd item positions are allocated back to front so
    /// rounding leftovers alternate between the ends of the contributor list.
    pub fn aggregate(bill: &Bill) -> BillTotals {
        let contributor_count = bill.contributors().len();
        let mut total_paid = empty_payment_map(contributor_count);
        let mut total_owing = empty_payment_map(contributor_count);
        let mut total_cost = Money::ZERO;
        let mut voided_items = Vec::new();

        for (position, item) in bill.items().iter().enumerate() {
            if item.is_void() {
                voided_items.push(position);
                continue;
            }

            *total_paid.entry(item.buyer).or_insert(Money::ZERO) += item.cost;
            total_cost += item.cost;

            let reverse = position % 2 == 1;
            let parts = ProportionalAllocator::allocate_alternating(item.cost, &item.split, reverse);
            for (owing, part) in total_owing.values_mut().zip(parts) {
                *owing += part;
            }
        }

        if !voided_items.is_empty() {
            tracing::debug!(
                voided_count = voided_items.len(),
                voided_items = ?voided_items,
                "Void items excluded from bill totals"
            );
        }

        debug_assert_eq!(total_owing.values().sum::<Money>(), total_cost);
        debug_assert_eq!(total_paid.values().sum::<Money>(), total_cost);

        BillTotals {
            total_paid,
            total_owing,
            total_cost,
            voided_items,
        }
    }
}
