#![cfg(feature = "sqlite")]

use birthbook_core::{User, UserPatch, UserStatus, UserStore};
use birthbook_db::local::LocalUserRepo;
use birthbook_db::{connect_sqlite_with_max, open_store};
use uuid::Uuid;

async fn setup_local() -> LocalUserRepo {
    let db_path = std::env::temp_dir().join(format!(
        "birthbook-local-repo-{}.sqlite",
        Uuid::now_v7().simple()
    ));
    let db_url = format!("sqlite://{}", db_path.display());
    let pool = connect_sqlite_with_max(&db_url, 1).await.expect("sqlite");
    let repo = LocalUserRepo::new(pool);
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn insert_and_find_active() {
    let repo = setup_local().await;
    let user = User::new_active("Ada", "1815-12-10");
    repo.insert(&user).await.expect("insert");

    let found = repo
        .find_active(user.id)
        .await
        .expect("find")
        .expect("user present");
    assert_eq!(found, user);
    assert!(repo
        .find_active(Uuid::now_v7())
        .await
        .expect("find missing")
        .is_none());
}

#[tokio::test]
async fn update_applies_only_provided_fields() {
    let repo = setup_local().await;
    let user = User::new_active("Ada", "1815-12-10");
    repo.insert(&user).await.expect("insert");

    let patch = UserPatch {
        name: Some("Ada Lovelace".to_string()),
        birthday: None,
    };
    let updated = repo
        .update_fields(user.id, &patch)
        .await
        .expect("update")
        .expect("active user");
    assert_eq!(updated.name, "Ada Lovelace");
    assert_eq!(updated.birthday, "1815-12-10");
    assert_eq!(updated.status, UserStatus::Active);

    let patch = UserPatch {
        name: None,
        birthday: Some("1815-12-11".to_string()),
    };
    let updated = repo
        .update_fields(user.id, &patch)
        .await
        .expect("update")
        .expect("active user");
    assert_eq!(updated.name, "Ada Lovelace");
    assert_eq!(updated.birthday, "1815-12-11");
}

#[tokio::test]
async fn soft_delete_hides_but_keeps_the_row() {
    let repo = setup_local().await;
    let user = User::new_active("Grace", "1906-12-09");
    repo.insert(&user).await.expect("insert");

    assert!(repo.soft_delete(user.id).await.expect("delete"));
    assert!(!repo.soft_delete(user.id).await.expect("delete again"));
    assert!(repo.find_active(user.id).await.expect("find").is_none());
    assert!(repo.list_active().await.expect("list").is_empty());

    let patch = UserPatch {
        name: Some("Resurrected".to_string()),
        birthday: None,
    };
    assert!(repo
        .update_fields(user.id, &patch)
        .await
        .expect("update")
        .is_none());

    let stored = repo
        .get_including_deleted(user.id)
        .await
        .expect("raw lookup")
        .expect("row still stored");
    assert_eq!(stored.status, UserStatus::Deleted);
    assert_eq!(stored.name, "Grace");
}

#[tokio::test]
async fn list_active_keeps_creation_order() {
    let repo = setup_local().await;
    let first = User::new_active("first", "1990-01-01");
    let second = User::new_active("second", "1991-01-01");
    let third = User::new_active("third", "1992-01-01");
    for user in [&first, &second, &third] {
        repo.insert(user).await.expect("insert");
    }
    repo.soft_delete(second.id).await.expect("delete");

    let names: Vec<String> = repo
        .list_active()
        .await
        .expect("list")
        .into_iter()
        .map(|user| user.name)
        .collect();
    assert_eq!(names, vec!["first", "third"]);
}

#[tokio::test]
async fn open_store_selects_sqlite_from_url() {
    let db_path = std::env::temp_dir().join(format!(
        "birthbook-open-store-{}.sqlite",
        Uuid::now_v7().simple()
    ));
    let store = open_store(&format!("sqlite://{}", db_path.display()), 1)
        .await
        .expect("open store");
    assert_eq!(store.backend(), "sqlite");
    store.migrate().await.expect("migrate");
    store.ping().await.expect("ping");
    store.close().await;

    let err = open_store("mongodb://localhost:27017", 1)
        .await
        .err()
        .expect("unsupported scheme");
    assert!(err.to_string().contains("unsupported database url"));
}
