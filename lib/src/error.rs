use alloy_primitives::Address;

/// Rejections raised while turning raw input into an [`Entitlement`](crate::Entitlement).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("identifier must be {expected} bytes, got {actual}")]
    InvalidIdentifierLength { expected: usize, actual: usize },

    #[error("identifier is not valid hex: {0}")]
    InvalidIdentifier(String),

    #[error("count {0} does not fit in uint64")]
    CountOutOfRange(u128),

    #[error("count is not a number: {0}")]
    InvalidCount(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("encoding: {0}")]
    Encoding(#[from] EncodingError),

    #[error("cannot build a tree from an empty entitlement list")]
    EmptyInput,

    #[error("tree has not been built")]
    NotBuilt,

    #[error("tree is already built; use a new prover to rebuild")]
    AlreadyBuilt,

    #[error("leaf index {index} out of range for {leaf_count} leaves")]
    IndexOutOfRange { index: usize, leaf_count: usize },

    #[error("account {0} is not in the allowlist")]
    AccountNotFound(Address),

    #[error("hash must be 32 bytes, got {0}")]
    InvalidHashLength(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
