//! Loading allowlists from JSON and rendering proofs for the verifier.

use std::fs;
use std::path::Path;

use allowlist_lib::{check_in_whitelist_calldata, AllowlistProof, Entitlement};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of an allowlist file. `count` may be a JSON number or a string.
#[derive(Debug, Deserialize)]
struct RawEntitlement {
    account: String,
    count: Value,
}

impl RawEntitlement {
    fn into_entitlement(self) -> Result<Entitlement> {
        let count = match self.count {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s,
            other => bail!("count for {} must be a number or string, got {other}", self.account),
        };
        Entitlement::parse(&self.account, &count)
            .with_context(|| format!("invalid entry for {}", self.account))
    }
}

/// Parse a JSON array of `{"account": "0x..", "count": N}` in file order.
pub fn parse_allowlist(json: &str) -> Result<Vec<Entitlement>> {
    let raw: Vec<RawEntitlement> =
        serde_json::from_str(json).context("allowlist must be a JSON array of entries")?;
    raw.into_iter()
        .enumerate()
        .map(|(i, entry)| entry.into_entitlement().with_context(|| format!("entry {i}")))
        .collect()
}

pub fn load_allowlist(path: &Path) -> Result<Vec<Entitlement>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read allowlist {}", path.display()))?;
    parse_allowlist(&json).with_context(|| format!("failed to parse {}", path.display()))
}

/// Hex-encoded proof bundle printed by the `proof` command.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProofReport {
    pub index: usize,
    pub account: String,
    pub count: u64,
    pub leaf: String,
    pub proof: Vec<String>,
    pub root: String,
    pub calldata: String,
}

impl From<&AllowlistProof> for ProofReport {
    fn from(bundle: &AllowlistProof) -> Self {
        Self {
            index: bundle.index,
            account: bundle.entitlement.account.to_checksum(None),
            count: bundle.entitlement.count,
            leaf: prefixed(&bundle.leaf),
            proof: bundle.proof.iter().map(|node| prefixed(node)).collect(),
            root: prefixed(&bundle.root),
            calldata: prefixed(&check_in_whitelist_calldata(
                &bundle.proof,
                bundle.entitlement.count,
            )),
        }
    }
}

pub fn prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
