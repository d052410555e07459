//! PostgreSQL integration tests for the Todos domain
//!
//! Each test starts its own container through `test_utils::TestDatabase`.

use chrono::{Duration, Utc};
use domain_todos::models::NewTodo;
use domain_todos::*;
use sea_orm::ConnectionTrait;
use std::num::NonZeroU64;
use test_utils::{TestDataBuilder, TestDatabase, assertions};

fn new_todo(user_id: i64, title: &str, weather: &str) -> NewTodo {
    NewTodo {
        title: title.into(),
        contents: format!("{} contents", title),
        weather: weather.into(),
        user_id,
    }
}

fn page(n: u64, size: u64) -> PageRequest {
    PageRequest::new(NonZeroU64::new(n).unwrap(), NonZeroU64::new(size).unwrap())
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_and_get_todo() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("create_and_get");
    let user_id = db.create_test_user(&builder.email("owner"), "owner").await;

    let service = TodoService::new(PgTodoRepository::new(db.connection()), FixedWeather::new("Sunny"));
    let user = axum_helpers::AuthUser {
        id: user_id,
        email: builder.email("owner"),
        role: axum_helpers::UserRole::User,
    };

    let saved = service
        .save_todo(
            &user,
            CreateTodo {
                title: "walk the dog".into(),
                contents: "before dinner".into(),
            },
        )
        .await
        .unwrap();

    assert_eq!(saved.weather, "Sunny");
    assert_eq!(saved.owner.id, user_id);

    let fetched = service.get_todo(saved.id).await.unwrap();
    assert_eq!(fetched.title, "walk the dog");
    assert_eq!(fetched.owner.email, builder.email("owner"));
    assert_eq!(fetched.created_at, fetched.modified_at);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_for_missing_user_writes_nothing() {
    let db = TestDatabase::new().await;
    let repo = PgTodoRepository::new(db.connection());

    let result = repo.create(new_todo(12345, "ghost", "Sunny")).await;
    assert!(matches!(result, Err(TodoError::UserNotFound(12345))));

    let all = repo.search(SearchCriteria::default()).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_list_pages_newest_modification_first() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("list_pages");
    let user_id = db.create_test_user(&builder.email("owner"), "owner").await;

    let repo = PgTodoRepository::new(db.connection());
    for n in 0..5 {
        repo.create(new_todo(user_id, &format!("todo {}", n), "Sunny"))
            .await
            .unwrap();
    }

    // Touch the oldest row so it becomes the most recently modified
    db.connection
        .execute_unprepared("UPDATE todos SET title = 'touched' WHERE id = (SELECT MIN(id) FROM todos)")
        .await
        .unwrap();

    let service = TodoService::new(repo, FixedWeather::new("Sunny"));
    let first = service.get_todos(page(1, 2)).await.unwrap();
    let second = service.get_todos(page(2, 2)).await.unwrap();
    let last = service.get_todos(page(3, 2)).await.unwrap();

    assert_eq!(first.total_elements, 5);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.content[0].title, "touched");
    assert_eq!(first.content.len(), 2);
    assert_eq!(second.content.len(), 2);
    assert_eq!(last.content.len(), 1);

    let all: Vec<_> = [first.content, second.content, last.content].concat();
    assertions::assert_sorted_desc(&all, |t| (t.modified_at, t.id), "list order");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_search_filters_in_database() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("search_filters");
    let user_id = db.create_test_user(&builder.email("owner"), "owner").await;

    let repo = PgTodoRepository::new(db.connection());
    let (sunny, _) = repo.create(new_todo(user_id, "a", "Sunny")).await.unwrap();
    let (rainy, _) = repo.create(new_todo(user_id, "b", "Rainy")).await.unwrap();

    let service = TodoService::new(repo, FixedWeather::new("Sunny"));

    let everything = service.search_todos(SearchCriteria::default()).await.unwrap();
    assert_eq!(everything.len(), 2);

    let by_weather = service
        .search_todos(SearchCriteria {
            weather: Some("Rainy".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_weather.len(), 1);
    assert_eq!(by_weather[0].id, rainy.id);

    // Inclusive bounds on the exact stored timestamps
    let exact = service
        .search_todos(SearchCriteria {
            weather: Some("Sunny".into()),
            created_at_from: Some(sunny.created_at),
            modified_at_to: Some(sunny.modified_at),
        })
        .await
        .unwrap();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].id, sunny.id);

    let future = service
        .search_todos(SearchCriteria {
            created_at_from: Some(Utc::now() + Duration::days(1)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(future.is_empty());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_orphaned_todo_is_reported() {
    let db = TestDatabase::new().await;
    let orphan_id = db.create_orphan_todo(999).await;

    let service = TodoService::new(PgTodoRepository::new(db.connection()), FixedWeather::new("Sunny"));

    let result = service.get_todo(orphan_id).await;
    assert!(matches!(result, Err(TodoError::OrphanedTodo(id)) if id == orphan_id));

    let result = service.search_todos(SearchCriteria::default()).await;
    assert!(matches!(result, Err(TodoError::OrphanedTodo(_))));
}
