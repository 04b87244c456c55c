//! Integration test: replay rejection and tamper detection.
//!
//! 1. A second, differently worded but validly signed voucher reusing a
//!    consumed transaction id is rejected as a replay
//! 2. Flipping any single bit of any field, or of the signature, turns a
//!    valid voucher into a signature mismatch
//! 3. A consumed id stays consumed across ledger restarts

use mintpass_crypto::{Ed25519Blake3, Eip191Secp256k1, SignatureScheme};
use mintpass_issuer::VoucherIssuer;
use mintpass_ledger::{Ledger, LedgerError, MemoryConsumedSet, SqliteConsumedSet, Verifier};
use mintpass_types::{
    Address, MintStatus, SignedVoucher, TransactionId, Voucher, VoucherSignature,
};

const AUTHORITY_KEY: [u8; 32] = [0x21; 32];
const RECIPIENT: [u8; 20] = [0x0B; 20];

fn issue<S: SignatureScheme>(id: u64, uri: &str) -> SignedVoucher {
    VoucherIssuer::<S>::new()
        .issue_voucher(
            Voucher::new(TransactionId::from_u64(id), Address::new(RECIPIENT), uri),
            &AUTHORITY_KEY,
        )
        .expect("issue voucher")
}

fn replay_with_fresh_signature<S: SignatureScheme>() {
    let authority = S::identity(&AUTHORITY_KEY).expect("identity");
    let ledger: Ledger<S, _> = Ledger::new(MemoryConsumedSet::new());

    let original = issue::<S>(42, "https://example.test/original");
    let second = issue::<S>(42, "https://example.test/second");
    assert_ne!(original.signature(), second.signature());

    let receipt = ledger
        .verify_and_consume(&original, &authority)
        .expect("first mint");

    for attempt in [&original, &second, &original] {
        let result = ledger.verify_and_consume(attempt, &authority);
        assert!(
            matches!(
                result,
                Err(LedgerError::Replay { transaction_id })
                    if transaction_id == TransactionId::from_u64(42)
            ),
            "expected replay, got {result:?}"
        );
    }

    // The first mint is the only one and keeps its original metadata.
    assert_eq!(ledger.minted_count().expect("count"), 1);
    assert_eq!(
        ledger
            .token_uri(receipt.record.token_id)
            .expect("uri")
            .as_deref(),
        Some("https://example.test/original")
    );
    assert_eq!(
        ledger.status(&TransactionId::from_u64(42)).expect("status"),
        MintStatus::Minted {
            token_id: receipt.record.token_id
        }
    );
}

#[test]
fn eip191_secp256k1_replay_with_fresh_signature() {
    replay_with_fresh_signature::<Eip191Secp256k1>();
}

#[test]
fn ed25519_blake3_replay_with_fresh_signature() {
    replay_with_fresh_signature::<Ed25519Blake3>();
}

fn flip(bytes: &[u8], bit: usize) -> Vec<u8> {
    let mut out = bytes.to_vec();
    out[bit / 8] ^= 1 << (bit % 8);
    out
}

fn expect_mismatch<S: SignatureScheme>(
    ledger: &Ledger<S, MemoryConsumedSet>,
    authority: &S::Identity,
    tampered: SignedVoucher,
) {
    assert!(
        matches!(
            ledger.verify_and_consume(&tampered, authority),
            Err(LedgerError::SignatureMismatch)
        ),
        "tampered voucher {tampered:?} was not rejected"
    );
}

fn single_bit_flips<S: SignatureScheme>() {
    let authority = S::identity(&AUTHORITY_KEY).expect("identity");
    let ledger: Ledger<S, _> = Ledger::new(MemoryConsumedSet::new());
    let (voucher, signature) = issue::<S>(9, "https://example.test/9").into_parts();

    let id = voucher.transaction_id().as_bytes();
    for bit in (0..id.len() * 8).step_by(7) {
        let id = TransactionId::try_from(flip(id, bit).as_slice()).expect("32 bytes");
        let tampered = Voucher::new(id, *voucher.recipient(), voucher.resource_uri());
        expect_mismatch(&ledger, &authority, SignedVoucher::new(tampered, signature.clone()));
    }

    let recipient = voucher.recipient().as_bytes();
    for bit in (0..recipient.len() * 8).step_by(5) {
        let recipient = Address::try_from(flip(recipient, bit).as_slice()).expect("20 bytes");
        let tampered = Voucher::new(*voucher.transaction_id(), recipient, voucher.resource_uri());
        expect_mismatch(&ledger, &authority, SignedVoucher::new(tampered, signature.clone()));
    }

    // Low bit only, so the URI stays ASCII.
    let uri = voucher.resource_uri().as_bytes();
    for index in 0..uri.len() {
        let uri = String::from_utf8(flip(uri, index * 8)).expect("ascii");
        let tampered = Voucher::new(*voucher.transaction_id(), *voucher.recipient(), uri);
        expect_mismatch(&ledger, &authority, SignedVoucher::new(tampered, signature.clone()));
    }

    let sig = signature.as_bytes();
    for bit in (0..sig.len() * 8).step_by(11) {
        let tampered = VoucherSignature::new(flip(sig, bit));
        expect_mismatch(&ledger, &authority, SignedVoucher::new(voucher.clone(), tampered));
    }

    // None of the rejected attempts consumed anything.
    assert_eq!(ledger.minted_count().expect("count"), 0);
    ledger
        .verify_and_consume(&SignedVoucher::new(voucher, signature), &authority)
        .expect("untampered voucher still mints");
}

#[test]
fn eip191_secp256k1_single_bit_flips() {
    single_bit_flips::<Eip191Secp256k1>();
}

#[test]
fn ed25519_blake3_single_bit_flips() {
    single_bit_flips::<Ed25519Blake3>();
}

#[test]
fn consumed_id_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ledger.db");
    let authority = Eip191Secp256k1::identity(&AUTHORITY_KEY).expect("identity");
    let signed = issue::<Eip191Secp256k1>(3, "https://example.test/3");

    {
        let ledger: Ledger<Eip191Secp256k1, _> =
            Ledger::new(SqliteConsumedSet::open(&path).expect("open"));
        ledger
            .verify_and_consume(&signed, &authority)
            .expect("first mint");
    }

    let ledger: Ledger<Eip191Secp256k1, _> =
        Ledger::new(SqliteConsumedSet::open(&path).expect("reopen"));
    assert!(matches!(
        ledger.verify_and_consume(&signed, &authority),
        Err(LedgerError::Replay { .. })
    ));
    assert_eq!(
        ledger.status(&TransactionId::from_u64(3)).expect("status"),
        MintStatus::Minted { token_id: 1 }
    );
    assert_eq!(ledger.owner_of(1).expect("owner"), Some(Address::new(RECIPIENT)));
    drop(ledger);

    // The row on disk carries the digest the signature was checked against.
    let conn = mintpass_db::open(&path).expect("open db");
    assert_eq!(mintpass_db::queries::minted::count(&conn).expect("count"), 1);
    let record =
        mintpass_db::queries::minted::by_transaction(&conn, &TransactionId::from_u64(3))
            .expect("query")
            .expect("row");
    assert_eq!(record.resource_uri, "https://example.test/3");
}
