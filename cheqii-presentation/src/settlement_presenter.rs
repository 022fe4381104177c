use crate::text_table::{Alignment, TextTableBuilder};
use cheqii_application::{BillSummary, ContributorDirectory};
use cheqii_domain::{ContributorIndex, Money};
use cheqii_locale::{CurrencyDescriptor, Locale, format_currency};
use std::borrow::Cow;

pub struct SettlementPresenter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementView {
    /// One line per payment, e.g. `Bob pays Alice $5.00`.
    pub instruction_lines: Vec<String>,
    /// Balances the resolver could not pair off, e.g. `$1.00 unaccounted for Alice`.
    pub unaccounted_lines: Vec<String>,
    pub summary_table: String,
}

impl SettlementPresenter {
    pub fn render(
        summary: &BillSummary,
        directory: &dyn ContributorDirectory,
        locale: &Locale,
        currency: &CurrencyDescriptor,
    ) -> SettlementView {
        let money = |amount: Money| format_currency(locale, currency, amount.amount());

        let instruction_lines = summary
            .settlement
            .instructions
            .iter()
            .map(|instruction| {
                format!(
                    "{} pays {} {}",
                    contributor_label(instruction.payer, directory),
                    contributor_label(instruction.receiver, directory),
                    money(instruction.amount)
                )
            })
            .collect();

        let unaccounted_lines = summary
            .settlement
            .unaccounted
            .iter()
            .map(|balance| {
                format!(
                    "{} unaccounted for {}",
                    money(balance.amount),
                    contributor_label(balance.contributor, directory)
                )
            })
            .collect();

        SettlementView {
            instruction_lines,
            unaccounted_lines,
            summary_table: Self::build_summary_table(summary, directory, locale, currency),
        }
    }

    pub fn build_summary_table(
        summary: &BillSummary,
        directory: &dyn ContributorDirectory,
        locale: &Locale,
        currency: &CurrencyDescriptor,
    ) -> String {
        let money = |amount: Money| Cow::Owned(format_currency(locale, currency, amount.amount()));

        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed("Contributor"),
                Cow::Borrowed("Paid"),
                Cow::Borrowed("Owing"),
                Cow::Borrowed("Balance"),
            ]);

        for row in &summary.contributors {
            let sign = if row.balance.is_positive() { "+" } else { "" };
            builder = builder.row([
                contributor_label(row.index, directory),
                money(row.paid),
                money(row.owing),
                Cow::Owned(format!(
                    "{sign}{}",
                    format_currency(locale, currency, row.balance.amount())
                )),
            ]);
        }

        let total_owing: Money = summary.totals.total_owing.values().sum();
        builder = builder.row([
            Cow::Borrowed("Total"),
            money(summary.totals.total_cost),
            money(total_owing),
            Cow::Borrowed(""),
        ]);

        let mut table = builder.build();
        match summary.totals.voided_items.len() {
            0 => {}
            1 => table.push_str("1 voided item not included\n"),
            count => table.push_str(&format!("{count} voided items not included\n")),
        }
        table
    }
}

fn contributor_label<'a>(
    contributor: ContributorIndex,
    directory: &'a dyn ContributorDirectory,
) -> Cow<'a, str> {
    match directory.display_name(contributor) {
        Some(name) if !name.trim().is_empty() => Cow::Borrowed(name),
        _ => Cow::Owned(contributor.to_string()),
    }
}
