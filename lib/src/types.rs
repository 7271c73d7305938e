use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::EncodingError;

/// 32-byte hash type
pub type H256 = [u8; 32];

/// Width in bytes of an account identifier.
pub const ADDRESS_LEN: usize = 20;

/// Width in bytes of the packed count.
pub const COUNT_LEN: usize = 8;

/// Length of a packed leaf: `address || uint64`.
pub const PACKED_LEAF_LEN: usize = ADDRESS_LEN + COUNT_LEN;

/// Length of an ABI-encoded leaf: two 32-byte words.
pub const ABI_LEAF_LEN: usize = 64;

/// How an entitlement is turned into leaf bytes before hashing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafEncoding {
    /// `abi.encodePacked(address, uint64)`: 20 address bytes followed by the
    /// count as 8 big-endian bytes.
    #[default]
    Packed,

    /// `abi.encode(address, uint64)`: each value left-padded to a 32-byte word.
    Abi,
}

impl LeafEncoding {
    /// Number of bytes an encoded leaf occupies in this mode.
    pub const fn leaf_len(self) -> usize {
        match self {
            LeafEncoding::Packed => PACKED_LEAF_LEN,
            LeafEncoding::Abi => ABI_LEAF_LEN,
        }
    }
}

/// One allowlisted account and the number of units it may claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entitlement {
    pub account: Address,
    pub count: u64,
}

impl Entitlement {
    pub const fn new(account: Address, count: u64) -> Self {
        Self { account, count }
    }

    /// Build an entitlement from untyped parts.
    ///
    /// The identifier must be exactly [`ADDRESS_LEN`] bytes; shorter or
    /// longer input is rejected rather than padded or truncated. The count
    /// must fit in a `u64`.
    pub fn from_parts(identifier: &[u8], count: u128) -> Result<Self, EncodingError> {
        if identifier.len() != ADDRESS_LEN {
            return Err(EncodingError::InvalidIdentifierLength {
                expected: ADDRESS_LEN,
                actual: identifier.len(),
            });
        }
        let count = u64::try_from(count).map_err(|_| EncodingError::CountOutOfRange(count))?;
        Ok(Self {
            account: Address::from_slice(identifier),
            count,
        })
    }

    /// Parse a hex account (with or without `0x`) and a decimal or
    /// `0x`-prefixed hex count.
    pub fn parse(account: &str, count: &str) -> Result<Self, EncodingError> {
        let account = account.trim();
        let digits = account.strip_prefix("0x").unwrap_or(account);
        let identifier = hex::decode(digits)
            .map_err(|_| EncodingError::InvalidIdentifier(account.to_string()))?;

        let count = count.trim();
        let parsed = match count.strip_prefix("0x") {
            Some(hex_digits) => u128::from_str_radix(hex_digits, 16),
            None => count.parse::<u128>(),
        }
        .map_err(|_| EncodingError::InvalidCount(count.to_string()))?;

        Self::from_parts(&identifier, parsed)
    }
}

/// A proof for one entitlement, ready to hand to the verifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowlistProof {
    pub index: usize,
    pub entitlement: Entitlement,
    pub leaf: H256,
    /// Sibling hashes, deepest first
    pub proof: Vec<H256>,
    pub root: H256,
}

/// Outcome of checking a claim against a committed root
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimVerificationResult {
    pub verified: bool,
    pub entitlement: Entitlement,
    pub root: H256,
}
