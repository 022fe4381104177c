use cheqii_application::{
    BillEdit, BillProcessingError, BillProcessor, BillSource, BillSourceError, ContributorDirectory,
    EditContext, InputPolicy,
};
use cheqii_domain::{Bill, BillError, ContributorIndex, Money, SettlementInstruction};
use cheqii_locale::{AmountParseError, CurrencyDescriptor, Locale};
use rstest::{fixture, rstest};
use std::collections::HashMap;

struct InMemoryBills(HashMap<String, Bill>);

impl BillSource for InMemoryBills {
    fn load(&self, bill_id: &str) -> Result<Bill, BillSourceError> {
        self.0
            .get(bill_id)
            .cloned()
            .ok_or_else(|| BillSourceError::NotFound {
                bill_id: bill_id.to_string(),
            })
    }
}

#[fixture]
fn dinner() -> Bill {
    let mut bill = Bill::new("dinner");
    let alice = bill.add_contributor("Alice", 1);
    bill.add_contributor("Bob", 1);
    bill.add_item("Pizza", Money::from_i64(1000), alice)
        .expect("buyer exists");
    bill
}

#[fixture]
fn lenient() -> EditContext {
    EditContext::default()
}

#[fixture]
fn strict() -> EditContext {
    EditContext {
        policy: InputPolicy::Reject,
        ..EditContext::default()
    }
}

fn empty_source() -> InMemoryBills {
    InMemoryBills(HashMap::new())
}

#[rstest]
fn summary_of_even_split(dinner: Bill) {
    let source = empty_source();
    let summary = BillProcessor::new(&source).summarize(&dinner);

    assert_eq!(summary.totals.total_cost, Money::from_i64(1000));
    assert_eq!(
        summary.settlement.instructions,
        vec![SettlementInstruction {
            payer: ContributorIndex(1),
            receiver: ContributorIndex(0),
            amount: Money::from_i64(500),
        }]
    );
    let rows: Vec<_> = summary
        .contributors
        .iter()
        .map(|row| (row.name.as_str(), row.paid.amount(), row.owing.amount(), row.balance.amount()))
        .collect();
    assert_eq!(rows, vec![("Alice", 1000, 500, 500), ("Bob", 0, 500, -500)]);
}

#[rstest]
fn summarizing_twice_is_identical(dinner: Bill) {
    let source = empty_source();
    let processor = BillProcessor::new(&source);
    assert_eq!(processor.summarize(&dinner), processor.summarize(&dinner));
}

#[rstest]
fn load_summary_uses_source(dinner: Bill) {
    let source = InMemoryBills(HashMap::from([("dinner".to_string(), dinner.clone())]));
    let (bill, summary) = BillProcessor::new(&source)
        .load_summary("dinner")
        .expect("bill exists");

    assert_eq!(bill, dinner);
    assert_eq!(summary.contributors.len(), 2);
}

#[rstest]
#[case::plain("12.50", 1250)]
#[case::symbol("$3", 300)]
#[case::garbage("twelve", 0)]
fn lenient_cost_edit(dinner: Bill, lenient: EditContext, #[case] text: &str, #[case] cents: i64) {
    let source = empty_source();
    let edited = BillProcessor::new(&source)
        .apply_edit(
            &dinner,
            BillEdit::SetItemCost {
                position: 0,
                cost: text.to_string(),
            },
            &lenient,
        )
        .expect("lenient edits accept any text");

    assert_eq!(edited.items()[0].cost, Money::from_i64(cents));
    assert_eq!(dinner.items()[0].cost, Money::from_i64(1000));
}

#[rstest]
fn strict_cost_edit_rejects_garbage(dinner: Bill, strict: EditContext) {
    let source = empty_source();
    let result = BillProcessor::new(&source).apply_edit(
        &dinner,
        BillEdit::AddItem {
            name: "Wine".to_string(),
            cost: "abc".to_string(),
            buyer: ContributorIndex(1),
        },
        &strict,
    );

    assert!(matches!(
        result,
        Err(BillProcessingError::InvalidAmount(AmountParseError::Invalid { .. }))
    ));
}

#[rstest]
fn cost_edit_past_the_bill_limit_is_reported(dinner: Bill, strict: EditContext) {
    let source = empty_source();
    let result = BillProcessor::new(&source).apply_edit(
        &dinner,
        BillEdit::AddItem {
            name: "Yacht".to_string(),
            cost: "$92,233,720,368,547,758".to_string(),
            buyer: ContributorIndex(1),
        },
        &strict,
    );

    assert!(matches!(
        result,
        Err(BillProcessingError::Bill(BillError::CostOverflow { item: 1 }))
    ));
}

#[rstest]
fn strict_weight_edit_rejects_fraction(dinner: Bill, strict: EditContext) {
    let source = empty_source();
    let result = BillProcessor::new(&source).apply_edit(
        &dinner,
        BillEdit::SetSplitWeight {
            position: 0,
            contributor: ContributorIndex(1),
            weight: "1.5".to_string(),
        },
        &strict,
    );

    assert!(matches!(result, Err(BillProcessingError::InvalidAmount(_))));
}

#[rstest]
fn weight_edit_uses_locale_grouping(dinner: Bill) {
    let source = empty_source();
    let context = EditContext {
        locale: Locale::from_tag("de-DE").expect("known locale"),
        currency: CurrencyDescriptor::from_code("EUR").expect("known currency"),
        policy: InputPolicy::Reject,
    };
    let edited = BillProcessor::new(&source)
        .apply_edit(
            &dinner,
            BillEdit::SetSplitWeight {
                position: 0,
                contributor: ContributorIndex(0),
                weight: "1.000".to_string(),
            },
            &context,
        )
        .expect("valid weight");

    assert_eq!(edited.items()[0].split, vec![1000, 1]);
}

#[rstest]
fn zero_weights_void_the_item(dinner: Bill, lenient: EditContext) {
    let source = empty_source();
    let processor = BillProcessor::new(&source);
    let mut bill = dinner;
    for contributor in [ContributorIndex(0), ContributorIndex(1)] {
        bill = processor
            .apply_edit(
                &bill,
                BillEdit::SetSplitWeight {
                    position: 0,
                    contributor,
                    weight: "0".to_string(),
                },
                &lenient,
            )
            .expect("valid weight");
    }

    let summary = processor.summarize(&bill);
    assert_eq!(summary.totals.voided_items, vec![0]);
    assert!(summary.settlement.instructions.is_empty());
    assert!(summary.balances.iter().all(|b| b.amount.is_zero()));
}

#[rstest]
fn removing_buyer_reassigns_item(dinner: Bill, lenient: EditContext) {
    let source = empty_source();
    let processor = BillProcessor::new(&source);
    let with_carol = processor
        .apply_edit(
            &dinner,
            BillEdit::AddContributor {
                name: "Carol".to_string(),
                default_weight: 2,
            },
            &lenient,
        )
        .expect("contributor added");
    assert_eq!(with_carol.items()[0].split, vec![1, 1, 2]);

    let bought_by_carol = processor
        .apply_edit(
            &with_carol,
            BillEdit::SetItemBuyer {
                position: 0,
                buyer: ContributorIndex(2),
            },
            &lenient,
        )
        .expect("buyer exists");
    let without_alice = processor
        .apply_edit(
            &bought_by_carol,
            BillEdit::RemoveContributor {
                contributor: ContributorIndex(0),
            },
            &lenient,
        )
        .expect("contributor removed");

    assert_eq!(without_alice.items()[0].buyer, ContributorIndex(1));
    assert_eq!(without_alice.items()[0].split, vec![1, 2]);
    assert_eq!(without_alice.display_name(ContributorIndex(1)), Some("Carol"));
}

#[rstest]
fn out_of_range_edit_is_reported(dinner: Bill, lenient: EditContext) {
    let source = empty_source();
    let result = BillProcessor::new(&source).apply_edit(
        &dinner,
        BillEdit::RenameItem {
            position: 3,
            name: "Salad".to_string(),
        },
        &lenient,
    );

    assert!(matches!(
        result,
        Err(BillProcessingError::Bill(BillError::ItemOutOfRange {
            position: 3,
            item_count: 1
        }))
    ));
}

#[test]
fn directory_from_map() {
    let names = HashMap::from([(ContributorIndex(4), "Dana".to_string())]);
    assert_eq!(names.display_name(ContributorIndex(4)), Some("Dana"));
    assert_eq!(names.display_name(ContributorIndex(0)), None);
}
