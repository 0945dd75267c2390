//! Quote handlers

use crate::storage::StoreError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use quote_types::{NewQuote, Quote};
use serde::Serialize;
use tracing::error;

/// JSON error body shared by the 400/404 paths.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: String,
}

type ApiError = (StatusCode, Json<MessageResponse>);

fn json_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    )
}

fn internal_error(err: StoreError) -> ApiError {
    error!("Failed to persist quotes: {}", err);
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<Quote>> {
    Json(state.store.all().await)
}

pub async fn random(State(state): State<AppState>) -> Result<Json<Quote>, ApiError> {
    match state.store.random().await {
        Some(quote) => Ok(Json(quote)),
        None => Err(json_error(StatusCode::NOT_FOUND, "No quotes available")),
    }
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Quote>, ApiError> {
    // A non-numeric id segment is a no-match, not a parse error
    let quote = match id.parse::<u64>() {
        Ok(id) => state.store.find_by_id(id).await,
        Err(_) => None,
    };

    match quote {
        Some(quote) => Ok(Json(quote)),
        None => Err(json_error(StatusCode::NOT_FOUND, "Quote not found")),
    }
}

#[derive(Debug, Serialize)]
pub struct CreateQuoteResponse {
    message: String,
    quote: Quote,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewQuote>,
) -> Result<(StatusCode, Json<CreateQuoteResponse>), ApiError> {
    let Some((text, author)) = req.fields() else {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            "Text and author are required",
        ));
    };

    let quote = state
        .store
        .append(text, author)
        .await
        .map_err(internal_error)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateQuoteResponse {
            message: "Quote added successfully".to_string(),
            quote,
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct BulkQuotesResponse {
    message: String,
    quotes: Vec<Quote>,
}

pub async fn bulk_create(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<BulkQuotesResponse>), ApiError> {
    let Some(items) = body.as_array() else {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            "Expected an array of quotes",
        ));
    };

    // Entries that are not objects (or carry non-string fields) become empty
    // candidates here and are dropped by the store like any other invalid entry.
    let candidates: Vec<NewQuote> = items
        .iter()
        .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
        .collect();

    let quotes = state
        .store
        .append_many(&candidates)
        .await
        .map_err(internal_error)?;

    Ok((
        StatusCode::CREATED,
        Json(BulkQuotesResponse {
            message: format!("{} quotes added successfully", quotes.len()),
            quotes,
        }),
    ))
}
