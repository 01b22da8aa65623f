//! # REST API for Articles
//!
//! Endpoints for listing, creating, retrieving, updating, and deleting
//! articles as JSON:API resources.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{
        header::{CONTENT_TYPE, LOCATION},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use shared::{SaveArticleDocument, JSON_API_MEDIA_TYPE};
use tracing::info;

use crate::domain::ArticleListQuery;
use crate::io::rest::errors::ApiError;
use crate::io::rest::extract::{JsonApiBody, JsonApiPath};
use crate::io::rest::mappers::ArticleMapper;
use crate::AppState;

// Query parameters for article listing API
#[derive(Debug, Deserialize)]
pub struct ArticleListParams {
    pub sort: Option<String>,
}

fn json_api_response<T: Serialize>(status: StatusCode, document: T) -> Response {
    (
        status,
        [(CONTENT_TYPE, HeaderValue::from_static(JSON_API_MEDIA_TYPE))],
        Json(document),
    )
        .into_response()
}

fn with_location(mut response: Response, location: &str) -> Result<Response, ApiError> {
    let value = HeaderValue::from_str(location)
        .map_err(|e| ApiError::Internal(format!("invalid Location header '{}': {}", location, e)))?;
    response.headers_mut().insert(LOCATION, value);
    Ok(response)
}

/// List articles, optionally sorted
pub async fn list_articles(
    State(state): State<AppState>,
    params: Result<Query<ArticleListParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    // `sort` is the only parameter read from the query string.
    let Query(params) = params.map_err(|e| ApiError::BadRequest {
        detail: e.body_text(),
        parameter: Some("sort".to_string()),
    })?;
    info!("GET /api/v1/articles - sort: {:?}", params.sort);

    let articles = state
        .article_service
        .list_articles(ArticleListQuery { sort: params.sort })
        .await?;

    let document = ArticleMapper::to_collection_document(articles, state.base_url());
    Ok(json_api_response(StatusCode::OK, document))
}

/// Create a new article
pub async fn create_article(
    State(state): State<AppState>,
    JsonApiBody(document): JsonApiBody<SaveArticleDocument>,
) -> Result<Response, ApiError> {
    info!("POST /api/v1/articles - attributes: {:?}", document.data.attributes);

    let command = ArticleMapper::to_save_command(document.data.attributes);
    let article = state.article_service.create_article(command).await?;

    let location = ArticleMapper::self_link(state.base_url(), &article.id);
    let document = ArticleMapper::to_document(article, state.base_url());
    with_location(json_api_response(StatusCode::CREATED, document), &location)
}

/// Get an article by ID
pub async fn get_article(
    State(state): State<AppState>,
    JsonApiPath(article_id): JsonApiPath<String>,
) -> Result<Response, ApiError> {
    info!("GET /api/v1/articles/{}", article_id);

    let article = state.article_service.get_article(&article_id).await?;

    let document = ArticleMapper::to_document(article, state.base_url());
    Ok(json_api_response(StatusCode::OK, document))
}

/// Replace the attributes of an article
pub async fn update_article(
    State(state): State<AppState>,
    JsonApiPath(article_id): JsonApiPath<String>,
    JsonApiBody(document): JsonApiBody<SaveArticleDocument>,
) -> Result<Response, ApiError> {
    info!(
        "PATCH /api/v1/articles/{} - attributes: {:?}",
        article_id, document.data.attributes
    );

    let command = ArticleMapper::to_save_command(document.data.attributes);
    let article = state
        .article_service
        .update_article(&article_id, command)
        .await?;

    let location = ArticleMapper::self_link(state.base_url(), &article.id);
    let document = ArticleMapper::to_document(article, state.base_url());
    with_location(json_api_response(StatusCode::OK, document), &location)
}

/// Delete an article
pub async fn delete_article(
    State(state): State<AppState>,
    JsonApiPath(article_id): JsonApiPath<String>,
) -> Result<Response, ApiError> {
    info!("DELETE /api/v1/articles/{}", article_id);

    state.article_service.delete_article(&article_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
