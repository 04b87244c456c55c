//! Test vector generator for mint vouchers.
//!
//! Generates `test_vectors.json` covering the canonical encoding, both digest
//! functions and both signature schemes. Independent implementations (an
//! on-chain verifier, a browser signer) check themselves against this file.
//!
//! Usage:
//!   mintpass-testvec              # Generate test_vectors.json
//!   mintpass-testvec --verify     # Verify test vectors match expected values

use std::collections::BTreeMap;

use mintpass_crypto::{Ed25519Blake3, Eip191Secp256k1, SignatureScheme};
use mintpass_issuer::{encode, voucher_digest, VoucherIssuer};
use mintpass_types::{Address, TransactionId, Voucher};
use serde::{Deserialize, Serialize};

const VECTORS_PATH: &str = "tests/fixtures/test_vectors.json";

/// Secret scalar 1. Its address is the well-known 0x7e5f...5bdf.
const SECP256K1_SECRET: [u8; 32] = {
    let mut key = [0u8; 32];
    key[31] = 1;
    key
};

/// RFC 8032 Section 7.1 Test 1 seed.
const ED25519_SECRET: [u8; 32] = [0u8; 32];

const LABEL: &str = "Unique ID";
const RECIPIENT: &str = "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23";
const URI: &str = "https://example.com/metadata/1.json";

#[derive(Serialize, Deserialize)]
struct TestVectors {
    version: String,
    generated_by: String,
    vectors: BTreeMap<String, TestVector>,
}

#[derive(Serialize, Deserialize)]
struct TestVector {
    description: String,
    inputs: BTreeMap<String, String>,
    outputs: BTreeMap<String, String>,
}

fn sample_voucher() -> anyhow::Result<Voucher> {
    Ok(Voucher::new(
        TransactionId::from_label(LABEL)?,
        Address::from_hex(RECIPIENT)?,
        URI,
    ))
}

fn voucher_inputs(voucher: &Voucher) -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "transaction_id".to_string(),
            voucher.transaction_id().to_string(),
        ),
        ("recipient".to_string(), voucher.recipient().to_string()),
        (
            "resource_uri".to_string(),
            voucher.resource_uri().to_string(),
        ),
    ])
}

fn generate_encoding_vectors() -> anyhow::Result<BTreeMap<String, TestVector>> {
    let mut vectors = BTreeMap::new();
    let voucher = sample_voucher()?;

    vectors.insert(
        "encoding_packed".to_string(),
        TestVector {
            description: "transaction_id(32) || recipient(20) || utf8(resource_uri), no length prefixes"
                .to_string(),
            inputs: voucher_inputs(&voucher),
            outputs: BTreeMap::from([("encoded".to_string(), hex::encode(encode(&voucher)))]),
        },
    );

    // A label shorter than 32 bytes is right-padded with zeros.
    let label_id = TransactionId::from_label(LABEL)?;
    vectors.insert(
        "transaction_id_label".to_string(),
        TestVector {
            description: format!("TransactionId::from_label(\"{LABEL}\")"),
            inputs: BTreeMap::from([("label".to_string(), LABEL.to_string())]),
            outputs: BTreeMap::from([("transaction_id".to_string(), label_id.to_string())]),
        },
    );

    Ok(vectors)
}

fn generate_secp256k1_vectors() -> anyhow::Result<BTreeMap<String, TestVector>> {
    let mut vectors = BTreeMap::new();
    let voucher = sample_voucher()?;

    let digest = voucher_digest::<Eip191Secp256k1>(&voucher);
    let personal = mintpass_crypto::keccak::eip191_hash(&digest);
    vectors.insert(
        "eip191_voucher_digest".to_string(),
        TestVector {
            description: "keccak256(encoding), then keccak256(\"\\x19Ethereum Signed Message:\\n32\" || digest)"
                .to_string(),
            inputs: voucher_inputs(&voucher),
            outputs: BTreeMap::from([
                ("digest".to_string(), hex::encode(digest)),
                ("personal_message_hash".to_string(), hex::encode(personal)),
            ]),
        },
    );

    let issuer = VoucherIssuer::<Eip191Secp256k1>::new();
    let authority = issuer.authority(&SECP256K1_SECRET)?;
    let signed = issuer.issue_voucher(voucher.clone(), &SECP256K1_SECRET)?;
    let mut inputs = voucher_inputs(&voucher);
    inputs.insert("secret_key".to_string(), hex::encode(SECP256K1_SECRET));
    vectors.insert(
        "eip191_secp256k1_signature".to_string(),
        TestVector {
            description: "RFC 6979 deterministic recoverable signature r || s || v, v in {27, 28}"
                .to_string(),
            inputs,
            outputs: BTreeMap::from([
                ("authority".to_string(), hex::encode(authority)),
                (
                    "signature".to_string(),
                    hex::encode(signed.signature().as_bytes()),
                ),
            ]),
        },
    );

    Ok(vectors)
}

fn generate_ed25519_vectors() -> anyhow::Result<BTreeMap<String, TestVector>> {
    let mut vectors = BTreeMap::new();
    let voucher = sample_voucher()?;

    let digest = voucher_digest::<Ed25519Blake3>(&voucher);
    vectors.insert(
        "blake3_voucher_digest".to_string(),
        TestVector {
            description: format!(
                "BLAKE3::derive_key(\"{}\", encoding)",
                mintpass_crypto::blake3::VOUCHER_DIGEST_CONTEXT
            ),
            inputs: voucher_inputs(&voucher),
            outputs: BTreeMap::from([("digest".to_string(), hex::encode(digest))]),
        },
    );

    let issuer = VoucherIssuer::<Ed25519Blake3>::new();
    let authority = issuer.authority(&ED25519_SECRET)?;
    let signed = issuer.issue_voucher(voucher.clone(), &ED25519_SECRET)?;
    let mut inputs = voucher_inputs(&voucher);
    inputs.insert("secret_key".to_string(), hex::encode(ED25519_SECRET));
    vectors.insert(
        "ed25519_blake3_signature".to_string(),
        TestVector {
            description: "Ed25519 signature over the BLAKE3 voucher digest".to_string(),
            inputs,
            outputs: BTreeMap::from([
                (
                    "authority".to_string(),
                    hex::encode(Ed25519Blake3::identity_bytes(&authority)),
                ),
                (
                    "signature".to_string(),
                    hex::encode(signed.signature().as_bytes()),
                ),
            ]),
        },
    );

    Ok(vectors)
}

fn generate_all_vectors() -> anyhow::Result<TestVectors> {
    let mut all_vectors = BTreeMap::new();

    all_vectors.extend(generate_encoding_vectors()?);
    all_vectors.extend(generate_secp256k1_vectors()?);
    all_vectors.extend(generate_ed25519_vectors()?);

    Ok(TestVectors {
        version: "1.0".to_string(),
        generated_by: "mintpass-testvec".to_string(),
        vectors: all_vectors,
    })
}

fn verify_vectors(vectors: &TestVectors) -> anyhow::Result<bool> {
    let regenerated = generate_all_vectors()?;
    let mut all_pass = true;

    for (name, expected) in &vectors.vectors {
        if let Some(actual) = regenerated.vectors.get(name) {
            if actual.outputs != expected.outputs {
                eprintln!("FAIL: {name}");
                eprintln!("  expected: {:?}", expected.outputs);
                eprintln!("  actual:   {:?}", actual.outputs);
                all_pass = false;
            } else {
                eprintln!("PASS: {name}");
            }
        } else {
            eprintln!("MISSING: {name}");
            all_pass = false;
        }
    }

    Ok(all_pass)
}

fn write_vectors(vectors: &TestVectors) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(vectors)?;
    if let Some(parent) = std::path::Path::new(VECTORS_PATH).parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(VECTORS_PATH, json)?;
    eprintln!(
        "Generated {} test vectors to {VECTORS_PATH}",
        vectors.vectors.len()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let verify_mode = std::env::args().any(|a| a == "--verify");

    let vectors = match std::fs::read_to_string(VECTORS_PATH) {
        Ok(content) if verify_mode => serde_json::from_str(&content)?,
        _ => {
            if verify_mode {
                eprintln!("No existing test vectors found at {VECTORS_PATH}. Generating...");
            }
            let vectors = generate_all_vectors()?;
            write_vectors(&vectors)?;
            vectors
        }
    };

    if verify_vectors(&vectors)? {
        eprintln!("All test vectors verified successfully.");
        Ok(())
    } else {
        eprintln!("Test vector verification FAILED.");
        std::process::exit(1);
    }
}
