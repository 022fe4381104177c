#![warn(clippy::uninlined_format_args)]

pub mod bill_processor;
pub mod error;
pub mod model;
pub mod ports;

pub use bill_processor::BillProcessor;
pub use error::{BillProcessingError, BillSourceError};
pub use model::{BillEdit, BillSummary, ContributorSummary, EditContext, InputPolicy};
pub use ports::{BillSource, ContributorDirectory};
