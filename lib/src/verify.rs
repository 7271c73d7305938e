use alloy_primitives::{Address, B256};
use alloy_sol_types::{SolCall, SolValue};

use crate::encoding::{hash_leaf, hash_pair};
use crate::error::{Error, Result};
use crate::types::{ClaimVerificationResult, Entitlement, LeafEncoding, H256};
use crate::{AllowlistCheckOutput, IWhitelist};

/// Verify a sorted-pair Merkle proof
///
/// # Arguments
/// * `root` - The committed root
/// * `leaf` - The hashed leaf being proven
/// * `proof` - Sibling hashes, deepest first
///
/// # Returns
/// * `true` if folding `leaf` with `proof` yields `root`, `false` otherwise.
///   With an empty proof this is `leaf == root`.
pub fn verify_proof(root: &H256, leaf: &H256, proof: &[H256]) -> bool {
    compute_root(leaf, proof) == *root
}

/// Fold a leaf with its proof into the root it commits to.
pub fn compute_root(leaf: &H256, proof: &[H256]) -> H256 {
    proof
        .iter()
        .fold(*leaf, |current, sibling| hash_pair(&current, sibling))
}

/// Verify a proof given as untyped byte slices.
///
/// Every element must be exactly 32 bytes; anything else is an error rather
/// than a failed verification.
pub fn verify_proof_slices(root: &[u8], leaf: &[u8], proof: &[Vec<u8>]) -> Result<bool> {
    let root = to_h256(root)?;
    let leaf = to_h256(leaf)?;
    let proof = proof
        .iter()
        .map(|node| to_h256(node))
        .collect::<Result<Vec<_>>>()?;
    Ok(verify_proof(&root, &leaf, &proof))
}

fn to_h256(bytes: &[u8]) -> Result<H256> {
    bytes
        .try_into()
        .map_err(|_| Error::InvalidHashLength(bytes.len()))
}

/// In-memory model of the whitelist contract: an immutable root and a
/// `checkInWhitelist` query answered for the calling account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Whitelist {
    root: H256,
    encoding: LeafEncoding,
}

impl Whitelist {
    pub fn new(root: H256) -> Self {
        Self::with_encoding(root, LeafEncoding::Packed)
    }

    pub fn with_encoding(root: H256, encoding: LeafEncoding) -> Self {
        Self { root, encoding }
    }

    pub fn root(&self) -> H256 {
        self.root
    }

    /// Whether `caller` may claim `count` given `proof`.
    pub fn check_in_whitelist(&self, caller: Address, proof: &[H256], count: u64) -> bool {
        let leaf = hash_leaf(&Entitlement::new(caller, count), self.encoding);
        verify_proof(&self.root, &leaf, proof)
    }

    /// Run the check and report it with the claimed record.
    pub fn verify_claim(&self, caller: Address, proof: &[H256], count: u64) -> ClaimVerificationResult {
        ClaimVerificationResult {
            verified: self.check_in_whitelist(caller, proof, count),
            entitlement: Entitlement::new(caller, count),
            root: self.root,
        }
    }
}

impl ClaimVerificationResult {
    /// ABI-encode as an `AllowlistCheckOutput` struct.
    pub fn abi_encode(&self) -> Vec<u8> {
        let output = AllowlistCheckOutput {
            verified: self.verified,
            root: B256::from(self.root),
            account: self.entitlement.account,
            count: self.entitlement.count,
        };
        SolValue::abi_encode(&output)
    }
}

/// Calldata for `checkInWhitelist(bytes32[],uint64)`.
pub fn check_in_whitelist_calldata(proof: &[H256], count: u64) -> Vec<u8> {
    let call = IWhitelist::checkInWhitelistCall {
        proof: proof.iter().copied().map(B256::from).collect(),
        maxAllowanceToMint: count,
    };
    SolCall::abi_encode(&call)
}
