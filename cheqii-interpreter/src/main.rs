#![warn(clippy::uninlined_format_args)]

mod bootstrap;

use bootstrap::{AppConfig, init_logging};
use cheqii_application::{BillEdit, BillProcessor};
use cheqii_infrastructure::JsonFileBillSource;
use cheqii_presentation::{SettlementPresenter, SettlementView};
use std::{borrow::Cow, env, error::Error, process};

type CliResult<T> = Result<T, Cow<'static, str>>;

const USAGE: &str = "Usage: cheqii-interpreter <bill.json | bill id> [--cost <item>=<amount>]...";

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let mut args = env::args().skip(1);
    let Some(bill_id) = args.next() else {
        return Err(USAGE.into());
    };
    let overrides = parse_cost_overrides(args)?;
    let config = AppConfig::from_env().map_err(|err| describe(&err))?;
    init_logging();
    tracing::debug!(
        locale = config.locale.tag,
        currency = config.currency.code,
        bill_dir = %config.bill_dir.display(),
        "Configuration loaded"
    );

    let source = JsonFileBillSource::new(&config.bill_dir);
    let processor = BillProcessor::new(&source);
    let (mut bill, mut summary) = processor
        .load_summary(&bill_id)
        .map_err(|err| describe(&err))?;

    if !overrides.is_empty() {
        let context = config.edit_context();
        for edit in overrides {
            bill = processor
                .apply_edit(&bill, edit, &context)
                .map_err(|err| describe(&err))?;
        }
        summary = processor.summarize(&bill);
    }

    let view = SettlementPresenter::render(&summary, &bill, &config.locale, &config.currency);
    println!("{}", render_output(bill.name(), &view));
    Ok(())
}

// `--cost 2=12.50` replaces the cost of item 2 before summarizing.
fn parse_cost_overrides(mut args: impl Iterator<Item = String>) -> CliResult<Vec<BillEdit>> {
    let mut edits = Vec::new();
    while let Some(flag) = args.next() {
        if flag != "--cost" {
            return Err(format!("Unknown argument '{flag}'\n{USAGE}").into());
        }
        let Some(assignment) = args.next() else {
            return Err("--cost expects <item>=<amount>".into());
        };
        let Some((position, cost)) = assignment.split_once('=') else {
            return Err(format!("--cost expects <item>=<amount> (got '{assignment}')").into());
        };
        let position = position
            .trim()
            .parse()
            .map_err(|_| format!("Invalid item position '{position}'"))?;
        edits.push(BillEdit::SetItemCost {
            position,
            cost: cost.to_string(),
        });
    }
    Ok(edits)
}

fn describe(err: &dyn Error) -> Cow<'static, str> {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message.into()
}

fn render_output(bill_name: &str, view: &SettlementView) -> String {
    let mut out = format!("{bill_name}\n\n");
    if view.instruction_lines.is_empty() {
        out.push_str("Everyone is settled up.\n");
    }
    for line in view.instruction_lines.iter().chain(&view.unaccounted_lines) {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&view.summary_table);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn cost_overrides_become_edits() {
        let edits = parse_cost_overrides(args(&["--cost", "0=12.50", "--cost", "3=$1,000"]))
            .expect("valid overrides");
        assert_eq!(
            edits,
            vec![
                BillEdit::SetItemCost {
                    position: 0,
                    cost: "12.50".to_string(),
                },
                BillEdit::SetItemCost {
                    position: 3,
                    cost: "$1,000".to_string(),
                },
            ]
        );
    }

    #[rstest]
    #[case::unknown_flag(&["--weight", "1=2"])]
    #[case::missing_value(&["--cost"])]
    #[case::missing_equals(&["--cost", "12.50"])]
    #[case::bad_position(&["--cost", "first=12.50"])]
    fn bad_overrides_are_rejected(#[case] values: &[&str]) {
        assert!(parse_cost_overrides(args(values)).is_err());
    }

    #[test]
    fn settled_bill_output() {
        let view = SettlementView {
            instruction_lines: Vec::new(),
            unaccounted_lines: Vec::new(),
            summary_table: "table\n".to_string(),
        };
        assert_eq!(
            render_output("Lunch", &view),
            "Lunch\n\nEveryone is settled up.\n\ntable\n"
        );
    }
}
