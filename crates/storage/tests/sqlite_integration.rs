use flipp_core::model::{Operation, Range, StreakRecord};
use storage::repository::KeyValueStore;
use storage::snapshot::{SessionSnapshot, load_snapshot, save_snapshot};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_kv_round_trip() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("score").await.unwrap(), None);
    repo.set("score", "12").await.unwrap();
    repo.set("score", "13").await.unwrap();
    assert_eq!(repo.get("score").await.unwrap().as_deref(), Some("13"));

    repo.remove("score").await.unwrap();
    assert_eq!(repo.get("score").await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_persists_session_snapshot() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_snapshot?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    // Migrations are idempotent.
    repo.migrate().await.expect("migrate twice");

    let mut snapshot = SessionSnapshot {
        score: 3,
        high_score: 8,
        ..SessionSnapshot::default()
    };
    snapshot.streak.set(Operation::Div, 3);
    snapshot.streak_history.push(
        StreakRecord::new(Operation::Add, 5, Range::new(-15, 15).unwrap(), 1_700_000_000_000)
            .unwrap(),
    );

    save_snapshot(&repo, &snapshot).await.expect("save");
    let loaded = load_snapshot(&repo).await;
    assert_eq!(loaded, snapshot);
}

#[tokio::test]
async fn sqlite_tolerates_corrupt_rows() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_corrupt?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.set("streak", "[1,2,3]").await.unwrap();
    repo.set("highScore", "4").await.unwrap();

    let loaded = load_snapshot(&repo).await;
    assert_eq!(loaded.streak.get(Operation::Add), 0);
    assert_eq!(loaded.high_score, 4);
}
