use hhub_database::Database;
use hhub_domain::NewHero;
use hhub_heroes::HeroRepository;

async fn seeded() -> (Database, HeroRepository) {
    let db = Database::builder().url("sqlite::memory:").seed(true).init().await.expect("database");
    let repository = HeroRepository::new(db.clone());
    (db, repository)
}

#[tokio::test]
async fn lists_seeded_heroes() {
    let (_db, repository) = seeded().await;

    let heroes = repository.list().await.expect("list");

    assert_eq!(heroes.len(), 10);
    assert_eq!(heroes[0].super_name, "Ms. Marvel");
}

#[tokio::test]
async fn powers_are_derived_from_hero_powers() {
    let (_db, repository) = seeded().await;

    let (hero, powers) = repository.find_with_powers(1).await.expect("query").expect("hero 1");

    assert_eq!(hero.name, "Kamala Khan");
    let names: Vec<_> = powers.iter().map(|power| power.name.as_str()).collect();
    assert_eq!(names, ["super strength", "elasticity"]);
}

#[tokio::test]
async fn unknown_hero_has_no_detail() {
    let (_db, repository) = seeded().await;
    assert!(repository.find_with_powers(999).await.expect("query").is_none());
}

#[tokio::test]
async fn new_hero_starts_without_powers() {
    let (_db, repository) = seeded().await;

    let hero = repository
        .create(NewHero::new("Jennifer Walters", "She-Hulk").expect("valid hero"))
        .await
        .expect("create");

    assert_eq!(hero.id, 11);
    assert!(repository.powers_of(hero.id).await.expect("powers").is_empty());
}

#[tokio::test]
async fn delete_removes_hero_and_its_links_only() {
    let (db, repository) = seeded().await;

    assert!(repository.delete(1).await.expect("delete"));
    assert!(repository.find(1).await.expect("find").is_none());

    let (links,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM hero_powers WHERE hero_id = 1")
        .fetch_one(db.pool())
        .await
        .expect("count");
    let (powers,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM powers").fetch_one(db.pool()).await.expect("count");
    assert_eq!(links, 0);
    assert_eq!(powers, 4, "powers survive a hero delete");
}
