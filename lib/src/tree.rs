use alloy_primitives::Address;
use tracing::{debug, trace};

use crate::encoding::{hash_leaf, hash_pair};
use crate::error::{Error, Result};
use crate::types::{AllowlistProof, Entitlement, LeafEncoding, H256};

/// A binary Merkle tree over hashed entitlements.
///
/// Parents are `keccak256(min(a, b) || max(a, b))`. When a layer has an odd
/// number of nodes the last one is carried to the next layer unchanged, so
/// a tree of `n` leaves is never padded. The tree is immutable once built.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    /// `layers[0]` holds the hashed leaves, the last layer holds the root.
    layers: Vec<Vec<H256>>,
    /// Source records in leaf order. Empty when built from raw hashes.
    entitlements: Vec<Entitlement>,
    encoding: LeafEncoding,
}

impl MerkleTree {
    /// Encode and hash every entitlement, then build the tree in input order.
    pub fn build(entitlements: &[Entitlement], encoding: LeafEncoding) -> Result<Self> {
        let leaves = entitlements
            .iter()
            .map(|entitlement| hash_leaf(entitlement, encoding))
            .collect();

        let mut tree = Self::from_leaf_hashes(leaves)?;
        tree.entitlements = entitlements.to_vec();
        tree.encoding = encoding;
        Ok(tree)
    }

    /// Build a tree from leaves that are already hashed.
    pub fn from_leaf_hashes(leaves: Vec<H256>) -> Result<Self> {
        if leaves.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut layers = vec![leaves];
        while let Some(current) = layers.last().filter(|layer| layer.len() > 1) {
            let next = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    [single] => *single,
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            layers.push(next);
        }

        let tree = Self {
            layers,
            entitlements: Vec::new(),
            encoding: LeafEncoding::default(),
        };
        debug!(
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            root = %hex::encode(tree.root()),
            "built merkle tree"
        );
        Ok(tree)
    }

    /// The committed root. Computed once at build time.
    pub fn root(&self) -> H256 {
        self.layers[self.layers.len() - 1][0]
    }

    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Number of layers above the leaves; `0` for a single-leaf tree.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn leaves(&self) -> &[H256] {
        &self.layers[0]
    }

    pub fn leaf(&self, index: usize) -> Result<H256> {
        self.leaves()
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                leaf_count: self.leaf_count(),
            })
    }

    pub fn entitlements(&self) -> &[Entitlement] {
        &self.entitlements
    }

    pub fn encoding(&self) -> LeafEncoding {
        self.encoding
    }

    /// Sibling hashes from the leaf at `index` up to the root, deepest first.
    ///
    /// Layers where the node was carried up unpaired contribute no sibling,
    /// so the proof can be shorter than [`depth`](Self::depth).
    pub fn proof(&self, index: usize) -> Result<Vec<H256>> {
        if index >= self.leaf_count() {
            return Err(Error::IndexOutOfRange {
                index,
                leaf_count: self.leaf_count(),
            });
        }

        let mut proof = Vec::with_capacity(self.depth());
        let mut position = index;
        for layer in &self.layers[..self.layers.len() - 1] {
            if let Some(sibling) = layer.get(position ^ 1) {
                proof.push(*sibling);
            }
            position /= 2;
        }

        trace!(index, siblings = proof.len(), "generated proof");
        Ok(proof)
    }

    /// Index of the first leaf belonging to `account`.
    pub fn position(&self, account: &Address) -> Option<usize> {
        self.entitlements
            .iter()
            .position(|entitlement| entitlement.account == *account)
    }

    /// Proof bundle for the first leaf belonging to `account`.
    pub fn proof_for_account(&self, account: &Address) -> Result<AllowlistProof> {
        let index = self
            .position(account)
            .ok_or(Error::AccountNotFound(*account))?;
        self.allowlist_proof(index)
    }

    /// Proof bundle for the leaf at `index`, including its record and root.
    pub fn allowlist_proof(&self, index: usize) -> Result<AllowlistProof> {
        let proof = self.proof(index)?;
        let entitlement = *self
            .entitlements
            .get(index)
            .ok_or(Error::IndexOutOfRange {
                index,
                leaf_count: self.entitlements.len(),
            })?;

        Ok(AllowlistProof {
            index,
            entitlement,
            leaf: self.layers[0][index],
            proof,
            root: self.root(),
        })
    }
}
