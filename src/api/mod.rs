//! HTTP surface of the aggregator.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Redirects to `/docs` |
//! | `GET` | `/news/{lang}` | Cached news for `tr`, `en` or `all` |
//! | `GET` | `/docs` | Interactive API documentation |
//! | `GET` | `/openapi.json` | OpenAPI document |

pub mod error;
pub mod handlers;
pub mod state;

use axum::{Json, Router, routing::get};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_scalar::{Scalar, Servable};

pub use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Crypto News RSS Aggregator API",
        description = "Collects crypto news from English and Turkish RSS/Atom feeds.",
        version = "1.0.0"
    ),
    tags(
        (name = "News", description = "Aggregated news endpoints")
    )
)]
pub struct ApiDoc;

/// Build the documented API routes and their OpenAPI description.
pub fn create_router(state: AppState) -> (Router, utoipa::openapi::OpenApi) {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(handlers::get_news))
        .with_state(state)
        .split_for_parts()
}

/// Full application: API routes, root redirect and documentation pages.
pub fn create_app(state: AppState) -> Router {
    let (router, api) = create_router(state);
    let spec = api.clone();

    router
        .route("/", get(handlers::root))
        .route(
            "/openapi.json",
            get(move || {
                let spec = spec.clone();
                async move { Json(spec) }
            }),
        )
        .merge(Scalar::with_url("/docs", api))
}
