use crate::{
    error::BillProcessingError,
    model::{BillEdit, BillSummary, ContributorSummary, EditContext, InputPolicy},
    ports::BillSource,
};
use cheqii_domain::{BalanceAggregator, Bill, Money, SettlementResolver};
use cheqii_locale::{
    parse_currency_amount, parse_ratio_amount, try_parse_currency_amount, try_parse_ratio_amount,
};

#[derive(Clone, Copy)]
pub struct BillProcessor<'a> {
    source: &'a dyn BillSource,
}

impl<'a> BillProcessor<'a> {
    pub fn new(source: &'a dyn BillSource) -> Self {
        Self { source }
    }

    /// Recomputes totals, balances and the settlement plan of `bill`.
    pub fn summarize(&self, bill: &Bill) -> BillSummary {
        let totals = BalanceAggregator::aggregate(bill);
        let balances = totals.balances();
        let settlement = SettlementResolver::resolve(&balances);

        let contributors = bill
            .contributor_indices()
            .zip(bill.contributors())
            .map(|(index, contributor)| {
                let paid = totals.total_paid.get(&index).copied().unwrap_or_default();
                let owing = totals.total_owing.get(&index).copied().unwrap_or_default();
                ContributorSummary {
                    index,
                    name: contributor.name.clone(),
                    paid,
                    owing,
                    balance: paid - owing,
                }
            })
            .collect();

        BillSummary {
            totals,
            balances,
            settlement,
            contributors,
        }
    }

    pub fn load_summary(&self, bill_id: &str) -> Result<(Bill, BillSummary), BillProcessingError> {
        let bill = self.source.load(bill_id)?;
        tracing::debug!(
            bill_id,
            contributor_count = bill.contributors().len(),
            item_count = bill.items().len(),
            "Bill loaded"
        );
        let summary = self.summarize(&bill);
        Ok((bill, summary))
    }

    /// Applies `edit` to a copy of `bill` and returns the new state.
    ///
    /// `bill` itself is never modified, even when the edit fails.
    pub fn apply_edit(
        &self,
        bill: &Bill,
        edit: BillEdit,
        context: &EditContext,
    ) -> Result<Bill, BillProcessingError> {
        let mut next = bill.clone();
        tracing::debug!(?edit, "Applying bill edit");

        match edit {
            BillEdit::RenameBill { name } => next.set_name(name),
            BillEdit::AddContributor {
                name,
                default_weight,
            } => {
                next.add_contributor(name, default_weight);
            }
            BillEdit::RemoveContributor { contributor } => {
                next.remove_contributor(contributor)?;
            }
            BillEdit::RenameContributor { contributor, name } => {
                next.rename_contributor(contributor, name)?;
            }
            BillEdit::AddItem { name, cost, buyer } => {
                let cost = Self::parse_cost(context, &cost)?;
                next.add_item(name, cost, buyer)?;
            }
            BillEdit::RemoveItem { position } => {
                next.remove_item(position)?;
            }
            BillEdit::RenameItem { position, name } => next.rename_item(position, name)?,
            BillEdit::SetItemCost { position, cost } => {
                let cost = Self::parse_cost(context, &cost)?;
                next.set_item_cost(position, cost)?;
            }
            BillEdit::SetItemBuyer { position, buyer } => next.set_item_buyer(position, buyer)?,
            BillEdit::SetSplitWeight {
                position,
                contributor,
                weight,
            } => {
                let weight = Self::parse_weight(context, &weight)?;
                next.set_split_weight(position, contributor, weight)?;
            }
        }

        Ok(next)
    }

    fn parse_cost(context: &EditContext, text: &str) -> Result<Money, BillProcessingError> {
        let minor_units = match context.policy {
            InputPolicy::TreatInvalidAsZero => {
                parse_currency_amount(&context.locale, &context.currency, text)
            }
            InputPolicy::Reject => {
                try_parse_currency_amount(&context.locale, &context.currency, text)
                    .map_err(BillProcessingError::InvalidAmount)?
            }
        };
        Ok(Money::from_i64(minor_units))
    }

    fn parse_weight(context: &EditContext, text: &str) -> Result<u64, BillProcessingError> {
        match context.policy {
            InputPolicy::TreatInvalidAsZero => Ok(parse_ratio_amount(&context.locale, text)),
            InputPolicy::Reject => try_parse_ratio_amount(&context.locale, text)
                .map_err(BillProcessingError::InvalidAmount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BillSourceError;
    use cheqii_domain::ContributorIndex;

    struct NoBills;

    impl BillSource for NoBills {
        fn load(&self, bill_id: &str) -> Result<Bill, BillSourceError> {
            Err(BillSourceError::NotFound {
                bill_id: bill_id.to_string(),
            })
        }
    }

    #[test]
    fn missing_bill_surfaces_source_error() {
        let processor = BillProcessor::new(&NoBills);
        let err = processor.load_summary("nope").unwrap_err();
        assert!(matches!(
            err,
            BillProcessingError::Source(BillSourceError::NotFound { bill_id }) if bill_id == "nope"
        ));
    }

    #[test]
    fn failed_edit_leaves_bill_untouched() {
        let processor = BillProcessor::new(&NoBills);
        let mut bill = Bill::new("lunch");
        bill.add_contributor("Alice", 1);
        let snapshot = bill.clone();

        let result = processor.apply_edit(
            &bill,
            BillEdit::SetItemBuyer {
                position: 0,
                buyer: ContributorIndex(0),
            },
            &EditContext::default(),
        );

        assert!(matches!(result, Err(BillProcessingError::Bill(_))));
        assert_eq!(bill, snapshot);
    }
}
