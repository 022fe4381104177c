use crate::model::{Balance, SettlementInstruction, SettlementPlan, UnaccountedBalance};

/// Greedy debt settlement.
///
/// Creditors are served largest first; each takes money from the largest
/// debtor until either side is exhausted. This yields at most `n - 1`
/// instructions for `n` contributors but is not a minimum-transaction solver.
pub struct SettlementResolver;

impl SettlementResolver {
    pub fn resolve(balances: &[Balance]) -> SettlementPlan {
        let mut creditors: Vec<Balance> = balances
            .iter()
            .copied()
            .filter(|balance| balance.amount.is_positive())
            .collect();
        let mut debtors: Vec<Balance> = balances
            .iter()
            .copied()
            .filter(|balance| balance.amount.is_negative())
            .collect();

        // stable sorts: equal magnitudes keep contributor order
        creditors.sort_by(|a, b| b.amount.cmp(&a.amount));
        debtors.sort_by(|a, b| a.amount.cmp(&b.amount));

        let mut instructions = Vec::new();
        let mut unaccounted = Vec::new();
        let mut debtors = debtors
            .into_iter()
            .map(|balance| (balance.contributor, balance.amount.abs()));
        let mut current = debtors.next();

        for creditor in creditors {
            let mut remaining = creditor.amount;

            while remaining.is_positive() {
                let Some((payer, debt)) = current.as_mut() else {
                    break;
                };

                let amount = remaining.min(*debt);
                instructions.push(SettlementInstruction {
                    payer: *payer,
                    receiver: creditor.contributor,
                    amount,
                });
                remaining -= amount;
                *debt -= amount;

                if debt.is_zero() {
                    current = debtors.next();
                }
            }

            if remaining.is_positive() {
                tracing::warn!(
                    contributor = creditor.contributor.0,
                    amount = remaining.amount(),
                    "Creditor left with an unaccounted balance; debtors exhausted"
                );
                unaccounted.push(UnaccountedBalance {
                    contributor: creditor.contributor,
                    amount: remaining,
                });
            }
        }

        for (contributor, debt) in current.into_iter().chain(debtors) {
            tracing::warn!(
                contributor = contributor.0,
                amount = -debt.amount(),
                "Debtor left with an unaccounted balance; creditors exhausted"
            );
            unaccounted.push(UnaccountedBalance {
                contributor,
                amount: -debt,
            });
        }

        tracing::debug!(
            balance_count = balances.len(),
            instruction_count = instructions.len(),
            unaccounted_count = unaccounted.len(),
            "Settlement resolved"
        );

        SettlementPlan {
            instructions,
            unaccounted,
        }
    }
}
