use crate::document::BillDocument;
use cheqii_application::{BillSource, BillSourceError};
use cheqii_domain::Bill;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Loads bills stored as `<root>/<bill_id>.json`.
///
/// An id that already ends in `.json` is taken as a path as given.
#[derive(Debug, Clone)]
pub struct JsonFileBillSource {
    root: PathBuf,
}

impl JsonFileBillSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, bill_id: &str) -> PathBuf {
        if bill_id.ends_with(".json") {
            Path::new(bill_id).to_path_buf()
        } else {
            self.root.join(format!("{bill_id}.json"))
        }
    }
}

impl BillSource for JsonFileBillSource {
    fn load(&self, bill_id: &str) -> Result<Bill, BillSourceError> {
        let path = self.path_for(bill_id);
        tracing::debug!(bill_id, path = %path.display(), "Reading bill document");

        let content = fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => BillSourceError::NotFound {
                bill_id: bill_id.to_string(),
            },
            _ => BillSourceError::Io {
                bill_id: bill_id.to_string(),
                source,
            },
        })?;

        let document: BillDocument =
            serde_json::from_str(&content).map_err(|err| BillSourceError::Decode {
                bill_id: bill_id.to_string(),
                detail: err.to_string(),
            })?;

        document
            .into_bill()
            .map_err(|source| BillSourceError::Invalid {
                bill_id: bill_id.to_string(),
                source,
            })
    }
}
