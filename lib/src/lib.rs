//! Allowlist Merkle trees with sorted-pair keccak256 hashing.
//!
//! Entitlements are packed as `address || uint64`, hashed into leaves and
//! folded into a root that an on-chain whitelist contract stores. Proofs are
//! the sibling hashes from a leaf up to the root, deepest first.

use alloy_sol_types::sol;

pub mod encoding;
pub mod error;
pub mod prover;
pub mod tree;
pub mod types;
pub mod verify;

pub use encoding::*;
pub use error::*;
pub use prover::*;
pub use tree::*;
pub use types::*;
pub use verify::*;

sol! {
    /// The result of a whitelist check encoded as a struct for Solidity consumers.
    struct AllowlistCheckOutput {
        bool verified;
        bytes32 root;
        address account;
        uint64 count;
    }

    /// The verifier contract that holds the committed root.
    interface IWhitelist {
        function checkInWhitelist(bytes32[] calldata proof, uint64 maxAllowanceToMint) external view returns (bool);
    }
}
