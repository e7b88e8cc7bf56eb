use axum::{
    Json,
    extract::{Path, State},
    response::Redirect,
};
use tracing::info;

use super::error::{AppResult, ErrorResponse};
use super::state::AppState;
use crate::models::{LanguageFilter, NewsItem};

/// Send visitors of `/` to the interactive API documentation.
pub async fn root() -> Redirect {
    Redirect::temporary("/docs")
}

/// Get news for a language
///
/// Returns the latest entries from every source publishing in `lang`
/// (`tr`, `en`) or from all sources (`all`). Results are cached for the
/// configured TTL, ten minutes by default.
#[utoipa::path(
    get,
    path = "/news/{lang}",
    tag = "News",
    params(
        ("lang" = String, Path, description = "Language filter: `tr`, `en` or `all`")
    ),
    responses(
        (status = 200, description = "Aggregated news, newest first when every date parses", body = Vec<NewsItem>),
        (status = 400, description = "Unknown language code", body = ErrorResponse)
    )
)]
pub async fn get_news(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> AppResult<Json<Vec<NewsItem>>> {
    let filter: LanguageFilter = lang.parse()?;

    let aggregator = state.aggregator.clone();
    let items = state
        .cache
        .get_or_compute(&filter.cache_key(), || async move {
            aggregator.collect_sorted(filter).await
        })
        .await;

    info!(%filter, count = items.len(), "Served news");
    Ok(Json(items))
}
