use hhub_database::Database;
use hhub_powers::PowerRepository;
use tokio::task::JoinSet;

const WRITERS: usize = 32;
const LONG: &str = "lets the wielder bend light around their body";

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_description_updates_all_commit_on_file_database() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("heroes.db").display());
    let db = Database::builder()
        .url(&url)
        .max_connections(8)
        .seed(true)
        .init()
        .await
        .expect("database");
    let repository = PowerRepository::new(db);

    let mut tasks = JoinSet::new();
    for n in 0..WRITERS {
        let repository = repository.clone();
        tasks.spawn(async move { repository.update_description(1, format!("{LONG} #{n}")).await });
    }

    let mut failures = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        if let Err(err) = joined.expect("task panicked") {
            failures.push(err.to_string());
        }
    }

    assert!(failures.is_empty(), "{} of {WRITERS} updates failed: {failures:?}", failures.len());
    let stored = repository.find(1).await.expect("find").expect("power 1");
    assert!(stored.description().starts_with(LONG));
}
