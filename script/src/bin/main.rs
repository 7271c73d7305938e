//! Allowlist root and proof generation script
//!
//! You can run this script using the following command:
//! ```shell
//! RUST_LOG=info cargo run --release -- --allowlist allowlist.json root
//! ```
//! or
//! ```shell
//! RUST_LOG=info cargo run --release -- --allowlist allowlist.json proof --index 0
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use alloy_primitives::{Address, B256};
use allowlist_lib::{LeafEncoding, MerkleProver, Whitelist, H256};
use allowlist_script::{load_allowlist, prefixed, ProofReport};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

/// The arguments for the command.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON array of `{"account": "0x..", "count": N}` entries.
    #[arg(long, env = "ALLOWLIST_FILE")]
    allowlist: PathBuf,

    /// Hash leaves as `abi.encode(address, uint64)` instead of the packed form.
    #[arg(long, env = "ALLOWLIST_ABI_LEAVES")]
    abi_leaves: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the root to embed in the whitelist contract.
    Root,

    /// Print the proof bundle for one entry.
    Proof {
        #[arg(long, conflicts_with = "account")]
        index: Option<usize>,

        #[arg(long)]
        account: Option<Address>,
    },

    /// Check a claim against the root, the way the whitelist contract does.
    Verify {
        #[arg(long)]
        account: Address,

        #[arg(long)]
        count: u64,

        /// Sibling hash, deepest first. Repeat for each level.
        #[arg(long = "proof")]
        proof: Vec<B256>,
    },
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Setup the logger.
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse the command line arguments.
    let args = Args::parse();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `false` when a claim was checked and rejected.
fn run(args: Args) -> Result<bool> {
    let encoding = if args.abi_leaves {
        LeafEncoding::Abi
    } else {
        LeafEncoding::Packed
    };

    let entitlements = load_allowlist(&args.allowlist)?;
    info!(
        entries = entitlements.len(),
        file = %args.allowlist.display(),
        ?encoding,
        "loaded allowlist"
    );

    let mut prover = MerkleProver::with_encoding(encoding);
    let tree = prover.build(&entitlements)?;
    let root = tree.root();

    match args.command {
        Command::Root => {
            println!("Root: {}", prefixed(&root));
            println!("Leaves: {}", tree.leaf_count());
            println!("Depth: {}", tree.depth());
        }
        Command::Proof { index, account } => {
            let bundle = match (index, account) {
                (Some(index), _) => tree.allowlist_proof(index)?,
                (None, Some(account)) => tree.proof_for_account(&account)?,
                (None, None) => bail!("pass either --index or --account"),
            };
            let report = ProofReport::from(&bundle);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Verify {
            account,
            count,
            proof,
        } => {
            let proof: Vec<H256> = proof.into_iter().map(|node| node.0).collect();
            let result = Whitelist::with_encoding(root, encoding).verify_claim(account, &proof, count);

            println!("Verification Result:");
            println!("  Verified: {}", result.verified);
            println!("  Account: {}", result.entitlement.account);
            println!("  Count: {}", result.entitlement.count);
            println!("  Root: {}", prefixed(&result.root));
            println!("  Public values: {}", prefixed(&result.abi_encode()));

            if !result.verified {
                warn!(%account, count, "claim rejected");
                return Ok(false);
            }
        }
    }

    Ok(true)
}
