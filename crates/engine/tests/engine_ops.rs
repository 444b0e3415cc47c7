use chrono::{Duration, Utc};
use sea_orm::Database;

use engine::{CategoryLimit, Engine, EngineError, TransactionKind, TransactionNew};
use migration::MigratorTrait;

async fn engine() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder()
        .database(db)
        .secret(b"test-secret")
        .build()
        .unwrap()
}

async fn registered_user(engine: &Engine, email: &str) -> (String, String) {
    let (token, user) = engine.register(email, "hunter2", "Alice").await.unwrap();
    (token, user.id)
}

fn expense(amount: f64, category: &str, mood: Option<&str>) -> TransactionNew {
    TransactionNew {
        amount,
        category: category.to_string(),
        description: "test".to_string(),
        kind: TransactionKind::Expense,
        mood: mood.map(str::to_string),
        date: None,
    }
}

#[tokio::test]
async fn register_issues_a_verifiable_token() {
    let engine = engine().await;
    let (token, user_id) = registered_user(&engine, "alice@example.com").await;

    assert_eq!(engine.verify_token(&token).unwrap(), user_id);

    let user = engine.user(&user_id).await.unwrap();
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.name, "Alice");
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let engine = engine().await;
    registered_user(&engine, "alice@example.com").await;

    let result = engine.register("alice@example.com", "other", "Bob").await;
    assert!(matches!(result, Err(EngineError::DuplicateEmail(_))));
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let engine = engine().await;
    let result = engine.register("not-an-email", "pw", "X").await;
    assert!(matches!(result, Err(EngineError::Validation(_))));
}

#[tokio::test]
async fn login_roundtrip() {
    let engine = engine().await;
    registered_user(&engine, "alice@example.com").await;

    let (token, user) = engine.login("alice@example.com", "hunter2").await.unwrap();
    assert_eq!(engine.verify_token(&token).unwrap(), user.id);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let engine = engine().await;
    registered_user(&engine, "alice@example.com").await;

    let wrong_password = engine.login("alice@example.com", "bad").await;
    let unknown_email = engine.login("nobody@example.com", "hunter2").await;

    assert_eq!(wrong_password, Err(EngineError::InvalidCredentials));
    assert_eq!(unknown_email, Err(EngineError::InvalidCredentials));
}

#[tokio::test]
async fn transactions_are_listed_newest_first() {
    let engine = engine().await;
    let (_, user_id) = registered_user(&engine, "alice@example.com").await;

    let now = Utc::now();
    for (amount, days_ago) in [(10.0, 3), (20.0, 1), (30.0, 2)] {
        let mut new = expense(amount, "Food", None);
        new.date = Some(now - Duration::days(days_ago));
        engine.new_transaction(&user_id, new).await.unwrap();
    }

    let txs = engine.transactions(&user_id).await.unwrap();
    let amounts: Vec<f64> = txs.iter().map(|t| t.amount).collect();
    assert_eq!(amounts, vec![20.0, 30.0, 10.0]);
}

#[tokio::test]
async fn deleting_another_users_transaction_is_not_found() {
    let engine = engine().await;
    let (_, alice) = registered_user(&engine, "alice@example.com").await;
    let (_, bob) = registered_user(&engine, "bob@example.com").await;

    let tx = engine
        .new_transaction(&alice, expense(5.0, "Food", None))
        .await
        .unwrap();

    let result = engine.delete_transaction(&bob, &tx.id).await;
    assert!(matches!(result, Err(EngineError::KeyNotFound(_))));

    // Still owned and visible to alice, and deletable by her.
    engine.delete_transaction(&alice, &tx.id).await.unwrap();
    assert!(engine.transactions(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn non_finite_amount_is_rejected() {
    let engine = engine().await;
    let (_, user_id) = registered_user(&engine, "alice@example.com").await;

    let result = engine
        .new_transaction(&user_id, expense(f64::NAN, "Food", None))
        .await;
    assert!(matches!(result, Err(EngineError::Validation(_))));
}

#[tokio::test]
async fn goal_progress_can_be_overwritten() {
    let engine = engine().await;
    let (_, user_id) = registered_user(&engine, "alice@example.com").await;

    let deadline = Utc::now() + Duration::days(90);
    let goal = engine
        .new_goal(&user_id, "Vacation", 1200.0, deadline)
        .await
        .unwrap();
    assert_eq!(goal.current_amount, 0.0);

    engine.set_goal_progress(&user_id, &goal.id, 300.0).await.unwrap();

    let goals = engine.goals(&user_id).await.unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].current_amount, 300.0);

    engine.delete_goal(&user_id, &goal.id).await.unwrap();
    assert!(engine.goals(&user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn goal_target_must_be_positive() {
    let engine = engine().await;
    let (_, user_id) = registered_user(&engine, "alice@example.com").await;

    let deadline = Utc::now() + Duration::days(30);
    let result = engine.new_goal(&user_id, "Nothing", 0.0, deadline).await;
    assert!(matches!(result, Err(EngineError::Validation(_))));
}

#[tokio::test]
async fn missing_goal_is_not_found() {
    let engine = engine().await;
    let (_, user_id) = registered_user(&engine, "alice@example.com").await;

    let result = engine.set_goal_progress(&user_id, "no-such-id", 1.0).await;
    assert!(matches!(result, Err(EngineError::KeyNotFound(_))));
}

#[tokio::test]
async fn category_limits_default_to_empty_and_replace_wholesale() {
    let engine = engine().await;
    let (_, user_id) = registered_user(&engine, "alice@example.com").await;

    assert!(engine.category_limits(&user_id).await.unwrap().is_empty());

    let limits = vec![
        CategoryLimit {
            category: "Food".to_string(),
            limit: 200.0,
        },
        CategoryLimit {
            category: "Fun".to_string(),
            limit: 50.0,
        },
    ];

    engine
        .set_category_limits(&user_id, limits.clone())
        .await
        .unwrap();
    // Posting the same payload again is an idempotent upsert.
    engine.set_category_limits(&user_id, limits).await.unwrap();

    let stored = engine.category_limits(&user_id).await.unwrap();
    assert_eq!(stored.len(), 2);

    let replacement = vec![CategoryLimit {
        category: "Rent".to_string(),
        limit: 900.0,
    }];
    engine
        .set_category_limits(&user_id, replacement)
        .await
        .unwrap();

    let stored = engine.category_limits(&user_id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].category, "Rent");
}

#[tokio::test]
async fn negative_limit_is_rejected() {
    let engine = engine().await;
    let (_, user_id) = registered_user(&engine, "alice@example.com").await;

    let result = engine
        .set_category_limits(
            &user_id,
            vec![CategoryLimit {
                category: "Food".to_string(),
                limit: -1.0,
            }],
        )
        .await;
    assert!(matches!(result, Err(EngineError::Validation(_))));
}

#[tokio::test]
async fn limit_check_warns_on_breached_categories() {
    let engine = engine().await;
    let (_, user_id) = registered_user(&engine, "alice@example.com").await;

    engine
        .set_category_limits(
            &user_id,
            vec![CategoryLimit {
                category: "Food".to_string(),
                limit: 100.0,
            }],
        )
        .await
        .unwrap();

    engine
        .new_transaction(&user_id, expense(120.0, "Food", None))
        .await
        .unwrap();
    engine
        .new_transaction(&user_id, expense(10.0, "Fun", None))
        .await
        .unwrap();

    let report = engine
        .check_category_limits(&user_id, Utc::now())
        .await
        .unwrap();

    assert_eq!(report.category_spending.get("Food"), Some(&120.0));
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].category, "Food");
    assert_eq!(report.warnings[0].percentage, 120.0);
}

#[tokio::test]
async fn dashboard_reflects_store_contents() {
    let engine = engine().await;
    let (_, user_id) = registered_user(&engine, "alice@example.com").await;

    engine
        .new_transaction(
            &user_id,
            TransactionNew {
                amount: 500.0,
                category: "Salary".to_string(),
                description: "pay".to_string(),
                kind: TransactionKind::Income,
                mood: None,
                date: None,
            },
        )
        .await
        .unwrap();
    engine
        .new_transaction(&user_id, expense(150.0, "Food", Some("stressed")))
        .await
        .unwrap();

    let stats = engine.dashboard_stats(&user_id).await.unwrap();
    assert_eq!(stats.balance, 350.0);
    assert_eq!(stats.total_income, 500.0);
    assert_eq!(stats.total_expenses, 150.0);
    assert_eq!(stats.transaction_count, 2);

    let moods = engine.mood_spending(&user_id).await.unwrap();
    assert_eq!(moods.get("stressed"), Some(&150.0));
    assert_eq!(moods.len(), 1);
}

#[tokio::test]
async fn profile_is_upserted_wholesale() {
    let engine = engine().await;
    let (_, user_id) = registered_user(&engine, "alice@example.com").await;

    assert!(engine.profile(&user_id).await.unwrap().is_none());

    let data = engine::ProfileData {
        monthly_income: Some(3000.0),
        spending_triggers: vec!["stress".to_string()],
        ..Default::default()
    };
    engine.save_profile(&user_id, data).await.unwrap();

    let replacement = engine::ProfileData {
        savings_goal: Some(500.0),
        ..Default::default()
    };
    engine.save_profile(&user_id, replacement).await.unwrap();

    let profile = engine.profile(&user_id).await.unwrap().unwrap();
    assert_eq!(profile.data.savings_goal, Some(500.0));
    assert_eq!(profile.data.monthly_income, None);
    assert!(profile.data.spending_triggers.is_empty());
}

#[tokio::test]
async fn builder_requires_a_secret() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let result = Engine::builder().database(db).build();
    assert!(matches!(result, Err(EngineError::Validation(_))));
}
