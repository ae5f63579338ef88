use memeboard_core::db::open_db;
use memeboard_core::{CoinRepository, SqliteCoinRepository};
use std::collections::BTreeSet;
use std::thread;

const CONCURRENT_POKERS: i64 = 10;

// Each thread opens its own connection against the same database file, so
// the only thing serializing the increments is SQLite itself.
#[test]
fn concurrent_pokes_never_lose_updates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memeboard.db");

    let conn = open_db(&path).unwrap();
    let repo = SqliteCoinRepository::try_new(&conn).unwrap();
    let coin = repo.create_coin("DogeClone", "poked in parallel").unwrap();

    let handles: Vec<_> = (0..CONCURRENT_POKERS)
        .map(|_| {
            let path = path.clone();
            let id = coin.id;
            thread::spawn(move || {
                let conn = open_db(&path).unwrap();
                let repo = SqliteCoinRepository::try_new(&conn).unwrap();
                repo.poke_coin(id).unwrap()
            })
        })
        .collect();

    let scores: BTreeSet<i64> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    // Every poker observed a distinct new score and none were lost.
    let expected: BTreeSet<i64> = (1..=CONCURRENT_POKERS).collect();
    assert_eq!(scores, expected);

    let loaded = repo.get_coin(coin.id, false).unwrap().unwrap();
    assert_eq!(loaded.popularity_score, CONCURRENT_POKERS);
}

#[test]
fn concurrent_pokes_on_deleted_coin_all_miss() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memeboard.db");

    let conn = open_db(&path).unwrap();
    let repo = SqliteCoinRepository::try_new(&conn).unwrap();
    let coin = repo.create_coin("RugPull", "").unwrap();
    repo.soft_delete_coin(coin.id).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let path = path.clone();
            let id = coin.id;
            thread::spawn(move || {
                let conn = open_db(&path).unwrap();
                let repo = SqliteCoinRepository::try_new(&conn).unwrap();
                repo.poke_coin(id).is_err()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap(), "poking a tombstone must fail");
    }

    let tombstone = repo.get_coin(coin.id, true).unwrap().unwrap();
    assert_eq!(tombstone.popularity_score, 0);
}
