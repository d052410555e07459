use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{TodoError, TodoResult};
use crate::models::{NewTodo, StorePage, Todo, TodoRecord, User};
use crate::search::SearchCriteria;

/// Persistence for todos, always read joined with their owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Resolve the owner and insert in one transaction.
    ///
    /// Fails with [`TodoError::UserNotFound`] and writes nothing when the owner is unknown.
    async fn create(&self, input: NewTodo) -> TodoResult<(Todo, User)>;

    /// 0-based page of todos, newest modification first
    async fn list(&self, page_index: u64, size: u64) -> TodoResult<StorePage<TodoRecord>>;

    async fn get_by_id(&self, id: i64) -> TodoResult<Option<TodoRecord>>;

    /// All todos matching every supplied criterion, unpaged, in store order
    async fn search(&self, criteria: SearchCriteria) -> TodoResult<Vec<TodoRecord>>;
}

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<i64, User>,
    todos: BTreeMap<i64, Todo>,
    next_id: i64,
}

impl Tables {
    fn record(&self, todo: &Todo) -> TodoRecord {
        TodoRecord::new(todo.clone(), self.users.get(&todo.user_id).cloned())
    }
}

/// In-memory implementation of TodoRepository (for development/testing)
///
/// Store order is ascending id, matching a heap scan of freshly inserted rows.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTodoRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, user: User) {
        self.tables.write().await.users.insert(user.id, user);
    }

    /// Insert a todo verbatim, timestamps and owner id included. No owner check.
    pub async fn seed_todo(&self, todo: Todo) {
        let mut tables = self.tables.write().await;
        tables.next_id = tables.next_id.max(todo.id);
        tables.todos.insert(todo.id, todo);
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, input: NewTodo) -> TodoResult<(Todo, User)> {
        let mut tables = self.tables.write().await;

        let owner = tables
            .users
            .get(&input.user_id)
            .cloned()
            .ok_or(TodoError::UserNotFound(input.user_id))?;

        tables.next_id += 1;
        let now = Utc::now();
        let todo = Todo {
            id: tables.next_id,
            title: input.title,
            contents: input.contents,
            weather: input.weather,
            user_id: owner.id,
            created_at: now,
            modified_at: now,
        };
        tables.todos.insert(todo.id, todo.clone());

        tracing::info!(todo_id = todo.id, user_id = owner.id, "Created todo");
        Ok((todo, owner))
    }

    async fn list(&self, page_index: u64, size: u64) -> TodoResult<StorePage<TodoRecord>> {
        let tables = self.tables.read().await;

        let mut todos: Vec<&Todo> = tables.todos.values().collect();
        todos.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total_items = todos.len() as u64;
        let items = todos
            .into_iter()
            .skip(page_index.saturating_mul(size) as usize)
            .take(size as usize)
            .map(|todo| tables.record(todo))
            .collect();

        Ok(StorePage {
            items,
            total_items,
            total_pages: total_items.div_ceil(size),
        })
    }

    async fn get_by_id(&self, id: i64) -> TodoResult<Option<TodoRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.todos.get(&id).map(|todo| tables.record(todo)))
    }

    async fn search(&self, criteria: SearchCriteria) -> TodoResult<Vec<TodoRecord>> {
        let tables = self.tables.read().await;

        Ok(tables
            .todos
            .values()
            .filter(|todo| criteria.matches(todo))
            .map(|todo| tables.record(todo))
            .collect())
    }
}
