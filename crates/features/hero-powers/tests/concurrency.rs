use hhub_database::Database;
use hhub_domain::NewHeroPower;
use hhub_hero_powers::HeroPowerRepository;
use tokio::task::JoinSet;

const WRITERS: i64 = 32;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_links_all_commit_on_file_database() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("heroes.db").display());
    let db = Database::builder()
        .url(&url)
        .max_connections(8)
        .seed(true)
        .init()
        .await
        .expect("database");
    let repository = HeroPowerRepository::new(db.clone());

    let (before,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM hero_powers")
        .fetch_one(db.pool())
        .await
        .expect("count");

    let mut tasks = JoinSet::new();
    for _ in 0..WRITERS {
        let repository = repository.clone();
        tasks.spawn(async move {
            repository.create(NewHeroPower::new("Weak", 2, 1).expect("valid link")).await
        });
    }

    let mut failures = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        if let Err(err) = joined.expect("task panicked") {
            failures.push(err.to_string());
        }
    }

    assert!(failures.is_empty(), "{} of {WRITERS} links failed: {failures:?}", failures.len());
    let (after,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM hero_powers")
        .fetch_one(db.pool())
        .await
        .expect("count");
    assert_eq!(after, before + WRITERS);
}
