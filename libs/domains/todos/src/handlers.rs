use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, AuthUser, IdPath, QueryParams, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, ServiceUnavailableResponse, UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

use crate::entity;
use crate::error::TodoResult;
use crate::models::{CreateTodo, Page, PageRequest, TodoResponse, TodoSaveResponse, UserResponse};
use crate::repository::TodoRepository;
use crate::search::SearchCriteria;
use crate::service::TodoService;
use crate::weather::WeatherProvider;

/// OpenAPI documentation for the Todos API
#[derive(OpenApi)]
#[openapi(
    paths(create_todo, list_todos, search_todos, get_todo),
    components(
        schemas(CreateTodo, TodoResponse, TodoSaveResponse, UserResponse),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = entity::todo::Model::TAG, description = "Todo records stamped with the day's weather")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

type SharedService<R, W> = Arc<TodoService<R, W>>;

/// Todo routes. Every route expects the JWT middleware to run first.
pub fn router<R, W>(service: TodoService<R, W>) -> Router
where
    R: TodoRepository + 'static,
    W: WeatherProvider + 'static,
{
    Router::new()
        .route("/", get(list_todos::<R, W>).post(create_todo::<R, W>))
        .route("/search", get(search_todos::<R, W>))
        .route("/{id}", get(get_todo::<R, W>))
        .with_state(Arc::new(service))
}

/// Create a todo for the caller, stamped with today's weather
#[utoipa::path(
    post,
    path = "",
    tag = entity::todo::Model::TAG,
    request_body = CreateTodo,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Todo created", body = TodoSaveResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_todo<R: TodoRepository, W: WeatherProvider>(
    State(service): State<SharedService<R, W>>,
    user: AuthUser,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateTodo>,
) -> TodoResult<impl IntoResponse> {
    let saved = service.save_todo(&user, input).await?;

    AuditEvent::new(
        Some(user.id),
        "todo.create",
        Some(format!("todo:{}", saved.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({ "weather": saved.weather }))
    .log();

    Ok((StatusCode::CREATED, Json(saved)))
}

/// List todos, most recently modified first
#[utoipa::path(
    get,
    path = "",
    tag = entity::todo::Model::TAG,
    params(PageRequest),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "One page of todos", body = Page<TodoResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_todos<R: TodoRepository, W: WeatherProvider>(
    State(service): State<SharedService<R, W>>,
    QueryParams(request): QueryParams<PageRequest>,
) -> TodoResult<Json<Page<TodoResponse>>> {
    let page = service.get_todos(request).await?;
    Ok(Json(page))
}

/// Search todos by weather and date range. All filters are optional and combined with AND.
#[utoipa::path(
    get,
    path = "/search",
    tag = entity::todo::Model::TAG,
    params(SearchCriteria),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Matching todos", body = Vec<TodoResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_todos<R: TodoRepository, W: WeatherProvider>(
    State(service): State<SharedService<R, W>>,
    QueryParams(criteria): QueryParams<SearchCriteria>,
) -> TodoResult<Json<Vec<TodoResponse>>> {
    let todos = service.search_todos(criteria).await?;
    Ok(Json(todos))
}

/// Get a todo by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::todo::Model::TAG,
    params(
        ("id" = i64, Path, description = "Todo ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Todo found", body = TodoResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_todo<R: TodoRepository, W: WeatherProvider>(
    State(service): State<SharedService<R, W>>,
    IdPath(id): IdPath,
) -> TodoResult<Json<TodoResponse>> {
    let todo = service.get_todo(id).await?;
    Ok(Json(todo))
}
