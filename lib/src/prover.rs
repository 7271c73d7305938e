use crate::error::{Error, Result};
use crate::tree::MerkleTree;
use crate::types::{Entitlement, LeafEncoding, H256};

/// Builds a single allowlist tree and answers root and proof queries.
///
/// A prover starts unbuilt. After a successful [`build`](Self::build) it is
/// built for the rest of its life; building again needs a new prover.
#[derive(Debug, Default)]
pub struct MerkleProver {
    encoding: LeafEncoding,
    tree: Option<MerkleTree>,
}

impl MerkleProver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(encoding: LeafEncoding) -> Self {
        Self {
            encoding,
            tree: None,
        }
    }

    /// Build the tree. A failed build leaves the prover unbuilt.
    pub fn build(&mut self, entitlements: &[Entitlement]) -> Result<&MerkleTree> {
        if self.tree.is_some() {
            return Err(Error::AlreadyBuilt);
        }
        let tree = MerkleTree::build(entitlements, self.encoding)?;
        let tree = self.tree.insert(tree);
        Ok(&*tree)
    }

    pub fn is_built(&self) -> bool {
        self.tree.is_some()
    }

    pub fn encoding(&self) -> LeafEncoding {
        self.encoding
    }

    pub fn tree(&self) -> Result<&MerkleTree> {
        self.tree.as_ref().ok_or(Error::NotBuilt)
    }

    pub fn root(&self) -> Result<H256> {
        Ok(self.tree()?.root())
    }

    pub fn proof(&self, index: usize) -> Result<Vec<H256>> {
        self.tree()?.proof(index)
    }

    /// Consume the prover and hand out the built tree.
    pub fn into_tree(self) -> Result<MerkleTree> {
        self.tree.ok_or(Error::NotBuilt)
    }
}
