//! Todos Domain
//!
//! Todo records owned by users and stamped with the weather of the day they
//! were created.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints under /todos
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────────┐
//! │   Service   │ ──▶ │ WeatherProvider │  ← today's weather
//! └──────┬──────┘     └─────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Store (trait + in-memory / PostgreSQL)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Records, requests, the shared response projection
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_todos::{
//!     handlers,
//!     repository::InMemoryTodoRepository,
//!     service::TodoService,
//!     weather::FixedWeather,
//! };
//!
//! let service = TodoService::new(InMemoryTodoRepository::new(), FixedWeather::new("Sunny"));
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod search;
pub mod service;
pub mod weather;

pub use error::{TodoError, TodoResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateTodo, Page, PageRequest, Todo, TodoRecord, TodoResponse, TodoSaveResponse, User,
    UserResponse,
};
pub use postgres::PgTodoRepository;
pub use repository::{InMemoryTodoRepository, TodoRepository};
pub use search::SearchCriteria;
pub use service::TodoService;
pub use weather::{FixedWeather, HttpWeatherClient, WeatherConfig, WeatherProvider};
