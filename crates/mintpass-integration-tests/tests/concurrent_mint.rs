//! Integration test: concurrent submissions of one transaction id.
//!
//! N blocking tasks race `verify_and_consume` on a shared ledger. Exactly one
//! mints; the other N-1 see a replay. Runs against the in-memory set, one
//! shared SQLite handle, and separate SQLite handles on one database file.

use std::sync::Arc;

use mintpass_crypto::{Ed25519Blake3, Eip191Secp256k1, SignatureScheme};
use mintpass_issuer::VoucherIssuer;
use mintpass_ledger::{
    ConsumedSet, Ledger, LedgerError, MemoryConsumedSet, SqliteConsumedSet, Verifier,
};
use mintpass_types::{Address, MintReceipt, SignedVoucher, TransactionId, Voucher};

const SUBMISSIONS: usize = 16;
const AUTHORITY_KEY: [u8; 32] = [0x33; 32];

fn contested_vouchers<S: SignatureScheme>() -> Vec<SignedVoucher> {
    let issuer = VoucherIssuer::<S>::new();
    (0..SUBMISSIONS)
        .map(|i| {
            issuer
                .issue_voucher(
                    Voucher::new(
                        TransactionId::from_u64(77),
                        Address::new([i as u8; 20]),
                        format!("https://example.test/{i}"),
                    ),
                    &AUTHORITY_KEY,
                )
                .expect("issue voucher")
        })
        .collect()
}

async fn race<S, C>(ledgers: Vec<Arc<Ledger<S, C>>>) -> Vec<Result<MintReceipt, LedgerError>>
where
    S: SignatureScheme,
    S::Identity: 'static,
    C: ConsumedSet + 'static,
{
    let authority = S::identity(&AUTHORITY_KEY).expect("identity");
    let vouchers = contested_vouchers::<S>();

    let handles: Vec<_> = vouchers
        .into_iter()
        .enumerate()
        .map(|(i, signed)| {
            let ledger = Arc::clone(&ledgers[i % ledgers.len()]);
            let authority = authority.clone();
            tokio::task::spawn_blocking(move || ledger.verify_and_consume(&signed, &authority))
        })
        .collect();

    let mut results = Vec::with_capacity(SUBMISSIONS);
    for handle in handles {
        results.push(handle.await.expect("task completed"));
    }
    results
}

fn assert_single_winner(results: &[Result<MintReceipt, LedgerError>]) {
    let winners = results.iter().filter(|r| r.is_ok()).count();
    let replays = results
        .iter()
        .filter(|r| {
            matches!(r, Err(LedgerError::Replay { transaction_id })
                if *transaction_id == TransactionId::from_u64(77))
        })
        .count();
    assert_eq!(winners, 1, "results: {results:?}");
    assert_eq!(replays, SUBMISSIONS - 1, "results: {results:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn memory_set_single_winner() {
    let ledger: Arc<Ledger<Eip191Secp256k1, _>> = Arc::new(Ledger::new(MemoryConsumedSet::new()));
    let results = race(vec![Arc::clone(&ledger)]).await;
    assert_single_winner(&results);
    assert_eq!(ledger.minted_count().expect("count"), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sqlite_set_single_winner() {
    let ledger: Arc<Ledger<Ed25519Blake3, _>> = Arc::new(Ledger::new(
        SqliteConsumedSet::open_memory().expect("open"),
    ));
    let results = race(vec![Arc::clone(&ledger)]).await;
    assert_single_winner(&results);
    assert_eq!(ledger.minted_count().expect("count"), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sqlite_file_shared_by_handles_single_winner() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ledger.db");
    let ledgers: Vec<Arc<Ledger<Eip191Secp256k1, _>>> = (0..4)
        .map(|_| Arc::new(Ledger::new(SqliteConsumedSet::open(&path).expect("open"))))
        .collect();

    let results = race(ledgers.clone()).await;
    assert_single_winner(&results);

    // The winner's record is visible through every handle.
    let winner = results
        .iter()
        .find_map(|r| r.as_ref().ok())
        .expect("one winner");
    for ledger in &ledgers {
        assert_eq!(
            ledger.owner_of(winner.record.token_id).expect("owner"),
            Some(winner.record.owner)
        );
    }
}
