use crate::error::BillSourceError;
use cheqii_domain::{Bill, ContributorIndex};
use std::collections::HashMap;

pub trait BillSource: Send + Sync {
    fn load(&self, bill_id: &str) -> Result<Bill, BillSourceError>;
}

pub trait ContributorDirectory: Send + Sync {
    fn display_name(&self, contributor: ContributorIndex) -> Option<&str>;
}

impl ContributorDirectory for HashMap<ContributorIndex, String> {
    fn display_name(&self, contributor: ContributorIndex) -> Option<&str> {
        self.get(&contributor).map(String::as_str)
    }
}

impl ContributorDirectory for Bill {
    fn display_name(&self, contributor: ContributorIndex) -> Option<&str> {
        self.contributor(contributor).map(|c| c.name.as_str())
    }
}
