use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{
    entity::{todo, user},
    error::{TodoError, TodoResult},
    models::{NewTodo, StorePage, Todo, TodoRecord, User},
    repository::TodoRepository,
    search::{Clause, SearchCriteria},
};

/// Largest value Postgres accepts for LIMIT and OFFSET
const MAX_BIGINT: u64 = i64::MAX as u64;

/// PostgreSQL implementation of TodoRepository
pub struct PgTodoRepository {
    db: DatabaseConnection,
}

impl PgTodoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn read_only(&self) -> TodoResult<DatabaseTransaction> {
        Ok(self
            .db
            .begin_with_config(None, Some(AccessMode::ReadOnly))
            .await?)
    }
}

/// AND of every clause. No clauses means no predicate.
pub(crate) fn condition(clauses: &[Clause]) -> Condition {
    clauses
        .iter()
        .fold(Condition::all(), |cond, clause| match clause {
            Clause::WeatherEq(weather) => cond.add(todo::Column::Weather.eq(weather.as_str())),
            Clause::CreatedAtFrom(from) => cond.add(todo::Column::CreatedAt.gte(*from)),
            Clause::ModifiedAtTo(to) => cond.add(todo::Column::ModifiedAt.lte(*to)),
        })
}

fn record((todo, owner): (todo::Model, Option<user::Model>)) -> TodoRecord {
    TodoRecord::new(todo.into(), owner.map(User::from))
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn create(&self, input: NewTodo) -> TodoResult<(Todo, User)> {
        let txn = self.db.begin().await?;

        let owner = user::Entity::find_by_id(input.user_id)
            .one(&txn)
            .await?
            .ok_or(TodoError::UserNotFound(input.user_id))?;

        let active_model: todo::ActiveModel = input.into();
        let model = active_model.insert(&txn).await?;

        txn.commit().await?;

        tracing::info!(todo_id = model.id, user_id = owner.id, "Created todo");
        Ok((model.into(), owner.into()))
    }

    async fn list(&self, page_index: u64, size: u64) -> TodoResult<StorePage<TodoRecord>> {
        let size = size.min(MAX_BIGINT);
        let txn = self.read_only().await?;

        let paginator = todo::Entity::find()
            .find_also_related(user::Entity)
            .order_by_desc(todo::Column::ModifiedAt)
            .order_by_desc(todo::Column::Id)
            .paginate(&txn, size);

        let totals = paginator.num_items_and_pages().await?;
        // An offset past the largest BIGINT lies beyond every row
        let rows = match page_index.checked_mul(size) {
            Some(offset) if offset <= MAX_BIGINT => paginator.fetch_page(page_index).await?,
            _ => {
                tracing::debug!(page_index, size, "Page offset out of range");
                Vec::new()
            }
        };
        txn.commit().await?;

        Ok(StorePage {
            items: rows.into_iter().map(record).collect(),
            total_items: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    async fn get_by_id(&self, id: i64) -> TodoResult<Option<TodoRecord>> {
        let txn = self.read_only().await?;

        let row = todo::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&txn)
            .await?;
        txn.commit().await?;

        Ok(row.map(record))
    }

    async fn search(&self, criteria: SearchCriteria) -> TodoResult<Vec<TodoRecord>> {
        let txn = self.read_only().await?;

        let rows = todo::Entity::find()
            .find_also_related(user::Entity)
            .filter(condition(&criteria.clauses()))
            .all(&txn)
            .await?;
        txn.commit().await?;

        tracing::debug!(count = rows.len(), "Searched todos");
        Ok(rows.into_iter().map(record).collect())
    }
}
