use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "Todo records stamped with the weather of the day they were written"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = domain_todos::entity::todo::Model::URL, api = domain_todos::ApiDoc)
    )
)]
pub struct ApiDoc;
