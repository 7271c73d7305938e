use alloy_sol_types::SolValue;
use sha3::{Digest, Keccak256};

use crate::types::{Entitlement, LeafEncoding, H256};

/// Compute Keccak256 hash
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash two nodes in sorted order: `keccak256(min(a, b) || max(a, b))`.
///
/// Comparison is lexicographic over the raw bytes, which makes the result
/// independent of whether `a` was the left or the right child.
pub fn hash_pair(a: &H256, b: &H256) -> H256 {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Keccak256::new();
    hasher.update(first);
    hasher.update(second);
    hasher.finalize().into()
}

/// Serialize an entitlement into the bytes the verifier recomputes.
pub fn encode_leaf(entitlement: &Entitlement, encoding: LeafEncoding) -> Vec<u8> {
    let values = (entitlement.account, entitlement.count);
    let encoded = match encoding {
        LeafEncoding::Packed => values.abi_encode_packed(),
        LeafEncoding::Abi => values.abi_encode_params(),
    };
    debug_assert_eq!(encoded.len(), encoding.leaf_len());
    encoded
}

/// Hash an entitlement into the leaf that is inserted into the tree.
pub fn hash_leaf(entitlement: &Entitlement, encoding: LeafEncoding) -> H256 {
    keccak256(&encode_leaf(entitlement, encoding))
}
