use std::str::FromStr;

use alloy_primitives::Address;
use allowlist_lib::{
    hash_leaf, verify_proof, Entitlement, Error, LeafEncoding, MerkleProver, MerkleTree, Whitelist,
    H256,
};
use proptest::prelude::*;

/// The first six default Hardhat accounts.
const SIGNERS: [&str; 6] = [
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
    "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
    "0x90F79bf6EB2c4f870365E785982E1f101E93b906",
    "0x15d34AAf54267DB7D7c367839AAf71A00a2C6A65",
    "0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc",
];

fn signers() -> Vec<Address> {
    SIGNERS
        .iter()
        .map(|s| Address::from_str(s).unwrap())
        .collect()
}

#[test]
fn six_signers_with_two_spots_each() {
    let records: Vec<Entitlement> = signers()
        .into_iter()
        .map(|account| Entitlement::new(account, 2))
        .collect();

    let mut prover = MerkleProver::new();
    prover.build(&records).unwrap();
    let root = prover.root().unwrap();
    let whitelist = Whitelist::new(root);

    let leaf = hash_leaf(&records[0], LeafEncoding::Packed);
    let proof = prover.proof(0).unwrap();
    assert!(verify_proof(&root, &leaf, &proof));
    assert!(whitelist.check_in_whitelist(records[0].account, &proof, 2));

    // An empty proof never substantiates a claim in a multi-leaf tree.
    assert!(!whitelist.check_in_whitelist(records[0].account, &[], 2));
}

#[test]
fn every_signer_verifies_in_both_encodings() {
    let records: Vec<Entitlement> = signers()
        .into_iter()
        .enumerate()
        .map(|(i, account)| Entitlement::new(account, i as u64 + 1))
        .collect();

    for encoding in [LeafEncoding::Packed, LeafEncoding::Abi] {
        let tree = MerkleTree::build(&records, encoding).unwrap();
        let whitelist = Whitelist::with_encoding(tree.root(), encoding);
        for (index, record) in records.iter().enumerate() {
            let proof = tree.proof(index).unwrap();
            assert!(whitelist.check_in_whitelist(record.account, &proof, record.count));
            assert!(!whitelist.check_in_whitelist(record.account, &proof, record.count + 1));
        }
    }
}

#[test]
fn proofs_verify_across_threads() {
    let records: Vec<Entitlement> = (0..257u32)
        .map(|i| {
            let mut bytes = [0u8; 20];
            bytes[16..].copy_from_slice(&i.to_be_bytes());
            Entitlement::new(Address::from(bytes), 1)
        })
        .collect();
    let tree = MerkleTree::build(&records, LeafEncoding::Packed).unwrap();
    let indices: Vec<usize> = (0..tree.leaf_count()).collect();

    std::thread::scope(|scope| {
        for chunk in indices.chunks(64) {
            let tree = &tree;
            scope.spawn(move || {
                for &index in chunk {
                    let proof = tree.proof(index).unwrap();
                    assert!(verify_proof(&tree.root(), &tree.leaf(index).unwrap(), &proof));
                }
            });
        }
    });
}

#[test]
fn index_past_end_is_rejected() {
    let records = vec![Entitlement::new(Address::ZERO, 1); 3];
    let tree = MerkleTree::build(&records, LeafEncoding::Packed).unwrap();
    assert_eq!(
        tree.proof(3).unwrap_err(),
        Error::IndexOutOfRange { index: 3, leaf_count: 3 }
    );
}

fn arb_records() -> impl Strategy<Value = Vec<Entitlement>> {
    prop::collection::vec(
        (any::<[u8; 20]>(), any::<u64>())
            .prop_map(|(account, count)| Entitlement::new(Address::from(account), count)),
        1..40,
    )
}

proptest! {
    #[test]
    fn build_is_deterministic(records in arb_records()) {
        let a = MerkleTree::build(&records, LeafEncoding::Packed).unwrap();
        let b = MerkleTree::build(&records, LeafEncoding::Packed).unwrap();
        prop_assert_eq!(a.root(), b.root());
    }

    #[test]
    fn every_permutation_is_self_consistent(
        (records, order) in arb_records().prop_flat_map(|records| {
            let indices: Vec<usize> = (0..records.len()).collect();
            (Just(records), Just(indices).prop_shuffle())
        })
    ) {
        let shuffled: Vec<Entitlement> = order.iter().map(|&i| records[i]).collect();
        let tree = MerkleTree::build(&shuffled, LeafEncoding::Packed).unwrap();
        let whitelist = Whitelist::new(tree.root());
        for (index, record) in shuffled.iter().enumerate() {
            let proof = tree.proof(index).unwrap();
            prop_assert!(whitelist.check_in_whitelist(record.account, &proof, record.count));
        }
    }

    #[test]
    fn flipped_proof_byte_fails(
        records in prop::collection::vec(
            (any::<[u8; 20]>(), any::<u64>())
                .prop_map(|(account, count)| Entitlement::new(Address::from(account), count)),
            2..24,
        ),
        pick in any::<prop::sample::Index>(),
        element in any::<prop::sample::Index>(),
        byte in 0usize..32,
        mask in 1u8..=255,
    ) {
        let tree = MerkleTree::build(&records, LeafEncoding::Packed).unwrap();
        let index = pick.index(records.len());
        let leaf = tree.leaf(index).unwrap();
        let mut proof = tree.proof(index).unwrap();
        prop_assert!(!proof.is_empty());

        let position = element.index(proof.len());
        proof[position][byte] ^= mask;
        prop_assert!(!verify_proof(&tree.root(), &leaf, &proof));
    }

    #[test]
    fn flipped_leaf_byte_fails(records in arb_records(), byte in 0usize..32, mask in 1u8..=255) {
        let tree = MerkleTree::build(&records, LeafEncoding::Packed).unwrap();
        let mut leaf: H256 = tree.leaf(0).unwrap();
        leaf[byte] ^= mask;
        prop_assert!(!verify_proof(&tree.root(), &leaf, &tree.proof(0).unwrap()));
    }

    #[test]
    fn empty_proof_only_matches_root(leaf in any::<[u8; 32]>(), root in any::<[u8; 32]>()) {
        prop_assert_eq!(verify_proof(&root, &leaf, &[]), leaf == root);
        prop_assert!(verify_proof(&leaf, &leaf, &[]));
    }
}
