use cheqii_domain::BillError;
use cheqii_locale::AmountParseError;
use thiserror::Error;

/// Failure to load a bill through a [`crate::BillSource`].
#[derive(Debug, Error)]
pub enum BillSourceError {
    #[error("Bill '{bill_id}' was not found")]
    NotFound { bill_id: String },
    #[error("Failed to read bill '{bill_id}'")]
    Io {
        bill_id: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Bill '{bill_id}' is not a valid document: {detail}")]
    Decode { bill_id: String, detail: String },
    #[error("Bill '{bill_id}' is inconsistent")]
    Invalid {
        bill_id: String,
        #[source]
        source: BillError,
    },
}

#[derive(Debug, Error)]
pub enum BillProcessingError {
    #[error(transparent)]
    Source(#[from] BillSourceError),
    #[error(transparent)]
    Bill(#[from] BillError),
    #[error("Invalid amount")]
    InvalidAmount(#[source] AmountParseError),
}
