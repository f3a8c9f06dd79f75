use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    Engine, EngineError, Entry, EntryFilter, EntryKind, EntryStatus, INVALID_AMOUNT, MoneyCents,
    StatusTransitionPolicy, User, validate,
};
use migration::MigratorTrait;

async fn engine_with_db(policy: StatusTransitionPolicy) -> (Engine, DatabaseConnection, i64) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .status_policy(policy)
        .password_cost(4)
        .build()
        .await
        .unwrap();
    let user = engine
        .users()
        .register(&User::new("Alice", "alice@example.com", "password"))
        .await
        .unwrap();
    (engine, db, user.id.unwrap())
}

async fn count_entries(db: &DatabaseConnection) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            "SELECT COUNT(*) AS n FROM entries",
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}

#[tokio::test]
async fn save_then_find_by_id() {
    let (engine, _db, user_id) = engine_with_db(StatusTransitionPolicy::Revalidate).await;
    let entries = engine.entries();

    let mut entry = Entry::new("Salary", 5, 2024, MoneyCents::new(500_000), EntryKind::Income, user_id);
    entry.status = Some(EntryStatus::Confirmed);
    let stored = entries.save(&mut entry).await.unwrap();

    let id = stored.id.unwrap();
    let found = entries.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found, stored);
    assert_eq!(found.status, Some(EntryStatus::Pending));
    assert!(found.registered_on.is_some());

    assert_eq!(entries.find_by_id(id + 100).await.unwrap(), None);
}

#[tokio::test]
async fn invalid_entry_leaves_the_table_untouched() {
    let (engine, db, user_id) = engine_with_db(StatusTransitionPolicy::Revalidate).await;

    let mut entry = Entry::new("Rent", 5, 2024, MoneyCents::ZERO, EntryKind::Expense, user_id);
    let err = engine.entries().save(&mut entry).await.unwrap_err();

    assert_eq!(err, EngineError::InvalidEntry(INVALID_AMOUNT.to_string()));
    assert_eq!(count_entries(&db).await, 0);
}

#[tokio::test]
async fn update_keeps_the_registration_date() {
    let (engine, _db, user_id) = engine_with_db(StatusTransitionPolicy::Revalidate).await;
    let entries = engine.entries();

    let registered = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let mut entry = Entry::new("Rent", 1, 2024, MoneyCents::new(90_000), EntryKind::Expense, user_id);
    entry.registered_on = Some(registered);
    let mut stored = entries.save(&mut entry).await.unwrap();

    stored.description = Some("Rent January".to_string());
    stored.registered_on = NaiveDate::from_ymd_opt(2030, 1, 1);
    entries.update(&stored).await.unwrap();

    let found = entries.find_by_id(stored.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(found.description.as_deref(), Some("Rent January"));
    assert_eq!(found.registered_on, Some(registered));
}

#[tokio::test]
async fn update_and_delete_of_a_vanished_entry_fail() {
    let (engine, _db, user_id) = engine_with_db(StatusTransitionPolicy::Revalidate).await;
    let entries = engine.entries();

    let mut entry = Entry::new("Rent", 1, 2024, MoneyCents::new(90_000), EntryKind::Expense, user_id);
    let stored = entries.save(&mut entry).await.unwrap();
    entries.delete(&stored).await.unwrap();

    let err = entries.delete(&stored).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
    let err = entries.update(&stored).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn balance_counts_only_confirmed_entries() {
    let (engine, _db, user_id) = engine_with_db(StatusTransitionPolicy::Revalidate).await;
    let entries = engine.entries();

    assert_eq!(entries.compute_balance(user_id).await.unwrap(), MoneyCents::ZERO);

    let seed = [
        ("Salary", MoneyCents::new(10_000), EntryKind::Income, Some(EntryStatus::Confirmed)),
        ("Bonus", MoneyCents::new(7_000), EntryKind::Income, None),
        ("Rent", MoneyCents::new(5_000), EntryKind::Expense, Some(EntryStatus::Confirmed)),
        ("Gym", MoneyCents::new(1_000), EntryKind::Expense, Some(EntryStatus::Cancelled)),
    ];
    for (description, amount, kind, status) in seed {
        let mut entry = Entry::new(description, 6, 2024, amount, kind, user_id);
        let mut stored = entries.save(&mut entry).await.unwrap();
        if let Some(status) = status {
            entries.transition_status(&mut stored, status).await.unwrap();
        }
    }

    assert_eq!(entries.compute_balance(user_id).await.unwrap(), MoneyCents::new(5_000));
    assert_eq!(entries.compute_balance(user_id + 1).await.unwrap(), MoneyCents::ZERO);
}

#[tokio::test]
async fn search_matches_description_case_insensitively() {
    let (engine, _db, user_id) = engine_with_db(StatusTransitionPolicy::Revalidate).await;
    let entries = engine.entries();

    for (description, month) in [("Supermarket", 3), ("Rent", 3), ("Super Bowl bet", 4)] {
        let mut entry = Entry::new(description, month, 2024, MoneyCents::new(1_000), EntryKind::Expense, user_id);
        entries.save(&mut entry).await.unwrap();
    }

    let example = Entry {
        description: Some("super".to_string()),
        ..Entry::default()
    };
    let found = entries.search(&example).await.unwrap();
    let names: Vec<_> = found.iter().filter_map(|e| e.description.as_deref()).collect();
    assert_eq!(names, vec!["Supermarket", "Super Bowl bet"]);

    let filter = EntryFilter::default().owner(user_id).description("SUPER").month(3);
    assert_eq!(entries.find_matching(&filter).await.unwrap().len(), 1);

    let filter = EntryFilter::default().owner(user_id + 1);
    assert!(entries.find_matching(&filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn skipped_validation_writes_only_the_status() {
    let (engine, db, user_id) = engine_with_db(StatusTransitionPolicy::SkipValidation).await;
    let entries = engine.entries();

    let mut entry = Entry::new("Rent", 1, 2024, MoneyCents::new(90_000), EntryKind::Expense, user_id);
    let mut stored = entries.save(&mut entry).await.unwrap();

    stored.month = Some(13);
    stored.amount = Some(MoneyCents::new(-500));
    stored.description = Some("   ".to_string());
    let written = entries
        .transition_status(&mut stored, EntryStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(written.month, Some(1));

    let found = entries.find_by_id(stored.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(found.status, Some(EntryStatus::Confirmed));
    assert_eq!(found.month, Some(1));
    assert_eq!(found.amount, Some(MoneyCents::new(90_000)));
    assert_eq!(found.description.as_deref(), Some("Rent"));
    assert!(validate(&found).is_ok());

    let strict = Engine::builder().database(db).build().await.unwrap();
    let err = strict
        .entries()
        .transition_status(&mut stored, EntryStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn skipped_validation_on_a_vanished_entry_fails() {
    let (engine, _db, user_id) = engine_with_db(StatusTransitionPolicy::SkipValidation).await;
    let entries = engine.entries();

    let mut entry = Entry::new("Rent", 1, 2024, MoneyCents::new(90_000), EntryKind::Expense, user_id);
    let mut stored = entries.save(&mut entry).await.unwrap();
    entries.delete(&stored).await.unwrap();

    let err = entries
        .transition_status(&mut stored, EntryStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn search_treats_like_wildcards_literally() {
    let (engine, _db, user_id) = engine_with_db(StatusTransitionPolicy::Revalidate).await;
    let entries = engine.entries();

    for description in ["abc", "a_c fee", "100% refund", "wow! back\\slash"] {
        let mut entry = Entry::new(description, 2, 2024, MoneyCents::new(1_000), EntryKind::Income, user_id);
        entries.save(&mut entry).await.unwrap();
    }

    for (needle, expected) in [
        ("a_c", vec!["a_c fee"]),
        ("%", vec!["100% refund"]),
        ("!", vec!["wow! back\\slash"]),
        ("\\", vec!["wow! back\\slash"]),
        ("b", vec!["abc", "wow! back\\slash"]),
    ] {
        let filter = EntryFilter::default().owner(user_id).description(needle);
        let found = entries.find_matching(&filter).await.unwrap();
        assert!(found.iter().all(|e| filter.matches(e)), "needle {needle:?}");
        let names: Vec<_> = found.iter().filter_map(|e| e.description.as_deref()).collect();
        assert_eq!(names, expected, "needle {needle:?}");
    }
}
