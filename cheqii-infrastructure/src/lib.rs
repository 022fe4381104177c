#![warn(clippy::uninlined_format_args)]

pub mod document;
pub mod json_source;

pub use document::{BillDocument, ContributorDocument, ItemDocument};
pub use json_source::JsonFileBillSource;
