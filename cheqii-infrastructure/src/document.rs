use cheqii_domain::{
    Bill, BillError, Contributor, ContributorId, ContributorIndex, Item, ItemId, Money,
};
use serde::{Deserialize, Serialize};

/// Stored form of a bill. Costs are minor units, buyers are contributor
/// positions. Missing ids are generated on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDocument {
    pub name: String,
    #[serde(default)]
    pub contributors: Vec<ContributorDocument>,
    #[serde(default)]
    pub items: Vec<ItemDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub cost: i64,
    pub buyer: usize,
    pub split: Vec<u64>,
}

impl BillDocument {
    pub fn into_bill(self) -> Result<Bill, BillError> {
        let contributors = self
            .contributors
            .into_iter()
            .map(|contributor| Contributor {
                id: contributor
                    .id
                    .map(ContributorId::new)
                    .unwrap_or_else(ContributorId::generate),
                name: contributor.name,
            })
            .collect();
        let items = self
            .items
            .into_iter()
            .map(|item| Item {
                id: item.id.map(ItemId::new).unwrap_or_else(ItemId::generate),
                name: item.name,
                cost: Money::from_i64(item.cost),
                buyer: ContributorIndex(item.buyer),
                split: item.split,
            })
            .collect();
        Bill::try_new(self.name, contributors, items)
    }
}

impl From<&Bill> for BillDocument {
    fn from(bill: &Bill) -> Self {
        Self {
            name: bill.name().to_string(),
            contributors: bill
                .contributors()
                .iter()
                .map(|contributor| ContributorDocument {
                    id: Some(contributor.id.as_str().to_string()),
                    name: contributor.name.clone(),
                })
                .collect(),
            items: bill
                .items()
                .iter()
                .map(|item| ItemDocument {
                    id: Some(item.id.as_str().to_string()),
                    name: item.name.clone(),
                    cost: item.cost.amount(),
                    buyer: item.buyer.0,
                    split: item.split.clone(),
                })
                .collect(),
        }
    }
}
