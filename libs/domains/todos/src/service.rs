use axum_helpers::AuthUser;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TodoError, TodoResult};
use crate::models::{
    CreateTodo, NewTodo, Page, PageRequest, TodoRecord, TodoResponse, TodoSaveResponse,
};
use crate::repository::TodoRepository;
use crate::search::SearchCriteria;
use crate::weather::WeatherProvider;

/// Todo use cases. Collaborators are injected, never constructed here.
pub struct TodoService<R: TodoRepository, W: WeatherProvider> {
    repository: Arc<R>,
    weather: Arc<W>,
}

impl<R: TodoRepository, W: WeatherProvider> Clone for TodoService<R, W> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            weather: Arc::clone(&self.weather),
        }
    }
}

impl<R: TodoRepository, W: WeatherProvider> TodoService<R, W> {
    pub fn new(repository: R, weather: W) -> Self {
        Self {
            repository: Arc::new(repository),
            weather: Arc::new(weather),
        }
    }

    /// Create a todo owned by `user`, stamped with today's weather.
    ///
    /// The weather is fetched first; if that fails nothing is written.
    #[instrument(skip(self, user, input), fields(user_id = user.id))]
    pub async fn save_todo(&self, user: &AuthUser, input: CreateTodo) -> TodoResult<TodoSaveResponse> {
        input
            .validate()
            .map_err(|e| TodoError::Validation(e.to_string()))?;

        let weather = self.weather.today_weather().await?;

        let (todo, owner) = self
            .repository
            .create(NewTodo {
                title: input.title,
                contents: input.contents,
                weather,
                user_id: user.id,
            })
            .await?;

        Ok(TodoSaveResponse::from_parts(todo, &owner))
    }

    /// One page of todos, most recently modified first. `page` is 1-based.
    #[instrument(skip(self))]
    pub async fn get_todos(&self, request: PageRequest) -> TodoResult<Page<TodoResponse>> {
        let size = request.size.get();
        let page = self.repository.list(request.store_index(), size).await?;

        let content = page
            .items
            .into_iter()
            .map(project)
            .collect::<TodoResult<Vec<_>>>()?;

        Ok(Page {
            content,
            page: request.page.get(),
            size,
            total_elements: page.total_items,
            total_pages: page.total_pages,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_todo(&self, id: i64) -> TodoResult<TodoResponse> {
        let record = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(id))?;

        project(record)
    }

    /// Every todo matching all supplied criteria. Unpaged.
    #[instrument(skip(self))]
    pub async fn search_todos(&self, criteria: SearchCriteria) -> TodoResult<Vec<TodoResponse>> {
        self.repository
            .search(criteria)
            .await?
            .into_iter()
            .map(project)
            .collect()
    }
}

fn project(record: TodoRecord) -> TodoResult<TodoResponse> {
    match record.owner {
        Some(owner) => Ok(TodoResponse::from_parts(record.todo, &owner)),
        None => {
            tracing::error!(
                todo_id = record.todo.id,
                user_id = record.todo.user_id,
                "Todo owner could not be resolved"
            );
            Err(TodoError::OrphanedTodo(record.todo.id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StorePage, Todo, User};
    use crate::repository::MockTodoRepository;
    use crate::weather::MockWeatherProvider;
    use axum_helpers::UserRole;
    use chrono::Utc;
    use mockall::predicate::eq;
    use std::num::NonZeroU64;

    fn auth_user() -> AuthUser {
        AuthUser {
            id: 3,
            email: "lee@example.com".into(),
            role: UserRole::User,
        }
    }

    fn owner() -> User {
        User {
            id: 3,
            email: "lee@example.com".into(),
            nickname: "lee".into(),
        }
    }

    fn todo(id: i64) -> Todo {
        let now = Utc::now();
        Todo {
            id,
            title: format!("todo {}", id),
            contents: "contents".into(),
            weather: "Sunny".into(),
            user_id: 3,
            created_at: now,
            modified_at: now,
        }
    }

    fn input() -> CreateTodo {
        CreateTodo {
            title: "plan trip".into(),
            contents: "book tickets".into(),
        }
    }

    fn sunny() -> MockWeatherProvider {
        let mut weather = MockWeatherProvider::new();
        weather
            .expect_today_weather()
            .returning(|| Ok("Sunny".to_string()));
        weather
    }

    fn page(n: u64, size: u64) -> PageRequest {
        PageRequest::new(NonZeroU64::new(n).unwrap(), NonZeroU64::new(size).unwrap())
    }

    #[tokio::test]
    async fn test_save_todo_stamps_weather_and_owner() {
        let mut repo = MockTodoRepository::new();
        repo.expect_create()
            .with(eq(NewTodo {
                title: "plan trip".into(),
                contents: "book tickets".into(),
                weather: "Sunny".into(),
                user_id: 3,
            }))
            .times(1)
            .returning(|input| {
                let mut saved = todo(11);
                saved.title = input.title;
                saved.contents = input.contents;
                saved.weather = input.weather;
                Ok((saved, owner()))
            });

        let service = TodoService::new(repo, sunny());
        let saved = service.save_todo(&auth_user(), input()).await.unwrap();

        assert_eq!(saved.id, 11);
        assert_eq!(saved.title, "plan trip");
        assert_eq!(saved.weather, "Sunny");
        assert_eq!(saved.owner.nickname, "lee");
    }

    #[tokio::test]
    async fn test_weather_failure_writes_nothing() {
        let mut repo = MockTodoRepository::new();
        repo.expect_create().never();

        let mut weather = MockWeatherProvider::new();
        weather
            .expect_today_weather()
            .returning(|| Err(TodoError::Weather("timed out".into())));

        let service = TodoService::new(repo, weather);
        let result = service.save_todo(&auth_user(), input()).await;

        assert!(matches!(result, Err(TodoError::Weather(_))));
    }

    #[tokio::test]
    async fn test_save_todo_rejects_empty_title() {
        let mut repo = MockTodoRepository::new();
        repo.expect_create().never();
        let mut weather = MockWeatherProvider::new();
        weather.expect_today_weather().never();

        let service = TodoService::new(repo, weather);
        let result = service
            .save_todo(
                &auth_user(),
                CreateTodo {
                    title: String::new(),
                    contents: "c".into(),
                },
            )
            .await;

        assert!(matches!(result, Err(TodoError::Validation(_))));
    }

    #[tokio::test]
    async fn test_save_todo_unknown_user_propagates() {
        let mut repo = MockTodoRepository::new();
        repo.expect_create()
            .returning(|input| Err(TodoError::UserNotFound(input.user_id)));

        let service = TodoService::new(repo, sunny());
        let result = service.save_todo(&auth_user(), input()).await;

        assert!(matches!(result, Err(TodoError::UserNotFound(3))));
    }

    #[tokio::test]
    async fn test_get_todos_converts_page_to_zero_based() {
        let mut repo = MockTodoRepository::new();
        repo.expect_list()
            .with(eq(2), eq(5))
            .times(1)
            .returning(|_, _| {
                Ok(StorePage {
                    items: vec![
                        TodoRecord::new(todo(2), Some(owner())),
                        TodoRecord::new(todo(1), Some(owner())),
                    ],
                    total_items: 12,
                    total_pages: 3,
                })
            });

        let service = TodoService::new(repo, MockWeatherProvider::new());
        let result = service.get_todos(page(3, 5)).await.unwrap();

        assert_eq!(result.page, 3);
        assert_eq!(result.size, 5);
        assert_eq!(result.total_elements, 12);
        assert_eq!(result.total_pages, 3);
        let ids: Vec<i64> = result.content.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_get_todos_first_page_is_index_zero() {
        let mut repo = MockTodoRepository::new();
        repo.expect_list()
            .with(eq(0), eq(10))
            .times(1)
            .returning(|_, _| {
                Ok(StorePage {
                    items: vec![],
                    total_items: 0,
                    total_pages: 0,
                })
            });

        let service = TodoService::new(repo, MockWeatherProvider::new());
        let result = service.get_todos(PageRequest::default()).await.unwrap();

        assert!(result.content.is_empty());
        assert_eq!(result.page, 1);
    }

    #[tokio::test]
    async fn test_get_todo_found() {
        let mut repo = MockTodoRepository::new();
        repo.expect_get_by_id()
            .with(eq(4))
            .returning(|id| Ok(Some(TodoRecord::new(todo(id), Some(owner())))));

        let service = TodoService::new(repo, MockWeatherProvider::new());
        let found = service.get_todo(4).await.unwrap();

        assert_eq!(found.id, 4);
        assert_eq!(found.owner.email, "lee@example.com");
    }

    #[tokio::test]
    async fn test_get_todo_not_found() {
        let mut repo = MockTodoRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = TodoService::new(repo, MockWeatherProvider::new());
        let result = service.get_todo(404).await;

        assert!(matches!(result, Err(TodoError::NotFound(404))));
    }

    #[tokio::test]
    async fn test_get_todo_without_owner_is_integrity_fault() {
        let mut repo = MockTodoRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(TodoRecord::new(todo(id), None))));

        let service = TodoService::new(repo, MockWeatherProvider::new());
        let result = service.get_todo(8).await;

        assert!(matches!(result, Err(TodoError::OrphanedTodo(8))));
    }

    #[tokio::test]
    async fn test_search_forwards_criteria_and_keeps_order() {
        let criteria = SearchCriteria {
            weather: Some("Sunny".into()),
            ..Default::default()
        };

        let mut repo = MockTodoRepository::new();
        repo.expect_search()
            .with(eq(criteria.clone()))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    TodoRecord::new(todo(5), Some(owner())),
                    TodoRecord::new(todo(2), Some(owner())),
                    TodoRecord::new(todo(9), Some(owner())),
                ])
            });

        let service = TodoService::new(repo, MockWeatherProvider::new());
        let found = service.search_todos(criteria).await.unwrap();

        let ids: Vec<i64> = found.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[tokio::test]
    async fn test_search_with_orphan_fails_whole_result() {
        let mut repo = MockTodoRepository::new();
        repo.expect_search().returning(|_| {
            Ok(vec![
                TodoRecord::new(todo(1), Some(owner())),
                TodoRecord::new(todo(2), None),
            ])
        });

        let service = TodoService::new(repo, MockWeatherProvider::new());
        let result = service.search_todos(SearchCriteria::default()).await;

        assert!(matches!(result, Err(TodoError::OrphanedTodo(2))));
    }
}
