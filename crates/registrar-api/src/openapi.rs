//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into one OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Resource Registration API",
        version = "0.1.0",
        description = "Registers and deregisters resources in an OGC API Records catalogue through two synchronous processes.",
        license(name = "Apache-2.0")
    ),
    paths(
        crate::routes::processes::list_processes,
        crate::routes::processes::describe_process,
        crate::routes::processes::execute_process,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::processes::ExecuteRequest,
        crate::routes::processes::ProcessList,
    )),
    tags(
        (name = "processes", description = "Resource registration processes"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
