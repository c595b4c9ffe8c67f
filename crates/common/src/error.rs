use thiserror::Error;

/// Errors raised while decoding stored values back into domain types.
///
/// Every variant carries the raw offending value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("bad date: {0}")]
    Date(String),

    #[error("bad document status: {0}")]
    DocumentStatus(i64),

    #[error("bad reference status: {0}")]
    ReferenceStatus(i64),
}
