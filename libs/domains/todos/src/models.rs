use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Owner of a todo as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub nickname: String,
}

/// Todo row as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub contents: String,
    /// Weather recorded on the day of creation
    pub weather: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// One row of the todo-owner join. `owner` is `None` when the join found nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRecord {
    pub todo: Todo,
    pub owner: Option<User>,
}

impl TodoRecord {
    pub fn new(todo: Todo, owner: Option<User>) -> Self {
        Self { todo, owner }
    }
}

/// Request body for creating a todo
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTodo {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "contents must not be empty"))]
    pub contents: String,
}

/// Insert payload handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub nickname: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            nickname: user.nickname.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub owner: UserResponse,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl TodoResponse {
    /// The single projection from a stored todo and its owner to the read view.
    pub fn from_parts(todo: Todo, owner: &User) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            owner: UserResponse::from(owner),
            created_at: todo.created_at,
            modified_at: todo.modified_at,
        }
    }
}

/// Response to a successful create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoSaveResponse {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub owner: UserResponse,
}

impl TodoSaveResponse {
    pub fn from_parts(todo: Todo, owner: &User) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            owner: UserResponse::from(owner),
        }
    }
}

fn default_page() -> NonZeroU64 {
    NonZeroU64::MIN
}

fn default_page_size() -> NonZeroU64 {
    NonZeroU64::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU64::MIN)
}

/// 1-based page request. Zero is unrepresentable, so `page = 0` or `size = 0`
/// fails deserialization before reaching the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    #[param(value_type = u64, minimum = 1, default = 1)]
    pub page: NonZeroU64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(value_type = u64, minimum = 1, default = 10)]
    pub size: NonZeroU64,
}

impl PageRequest {
    pub fn new(page: NonZeroU64, size: NonZeroU64) -> Self {
        Self { page, size }
    }

    /// 0-based page index used by the store
    pub fn store_index(&self) -> u64 {
        self.page.get() - 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_page_size(),
        }
    }
}

/// One page as returned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePage<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Paged response with 1-based `page`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}
