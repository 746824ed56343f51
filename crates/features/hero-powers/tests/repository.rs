use hhub_database::Database;
use hhub_domain::{NewHeroPower, Strength};
use hhub_hero_powers::{HeroPowerRepository, HeroPowersError};

async fn seeded() -> (Database, HeroPowerRepository) {
    let db = Database::builder().url("sqlite::memory:").seed(true).init().await.expect("database");
    let repository = HeroPowerRepository::new(db.clone());
    (db, repository)
}

async fn link_count(db: &Database) -> i64 {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM hero_powers").fetch_one(db.pool()).await.expect("count");
    count
}

#[tokio::test]
async fn create_returns_both_ends() {
    let (_db, repository) = seeded().await;

    let created = repository
        .create(NewHeroPower::new("Average", 1, 2).expect("valid link"))
        .await
        .expect("create");

    assert_eq!(created.link.strength, Strength::Average);
    assert_eq!(created.hero.super_name, "Ms. Marvel");
    assert_eq!(created.power.name, "flight");
    assert_eq!(repository.find(created.link.id).await.expect("find"), Some(created.link));
}

#[tokio::test]
async fn same_pair_can_be_linked_twice() {
    let (db, repository) = seeded().await;
    let before = link_count(&db).await;

    for _ in 0..2 {
        repository
            .create(NewHeroPower::new("Weak", 2, 2).expect("valid link"))
            .await
            .expect("create");
    }

    assert_eq!(link_count(&db).await, before + 2);
}

#[tokio::test]
async fn unknown_hero_or_power_writes_nothing() {
    let (db, repository) = seeded().await;
    let before = link_count(&db).await;

    let hero = repository.create(NewHeroPower::new("Strong", 999, 1).expect("valid")).await;
    let power = repository.create(NewHeroPower::new("Strong", 1, 999).expect("valid")).await;

    assert!(matches!(hero, Err(HeroPowersError::MissingHero { id: 999, .. })));
    assert!(matches!(power, Err(HeroPowersError::MissingPower { id: 999, .. })));
    assert_eq!(link_count(&db).await, before);
}
