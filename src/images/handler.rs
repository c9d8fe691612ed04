//! HTTP Handlers for the Images API

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::{CreateImage, ImageRecord, ImageStore};
use crate::error::StoreError;
use crate::handler::AppState;
use crate::unpack_error;

#[derive(Debug, Deserialize)]
pub struct StoreImageRequest {
    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SingleImageParams {
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct StoredResponse {
    message: &'static str,
    data: ImageRecord,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn success<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

fn created(record: ImageRecord) -> Response {
    (
        StatusCode::CREATED,
        Json(StoredResponse {
            message: "Image data stored successfully",
            data: record,
        }),
    )
        .into_response()
}

fn bad_request(msg: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
        .into_response()
}

fn not_found(msg: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
        .into_response()
}

fn conflict(msg: &str) -> Response {
    (
        StatusCode::CONFLICT,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
        .into_response()
}

fn internal_error(msg: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
        .into_response()
}

pub async fn store_image(
    State(state): State<AppState>,
    Json(payload): Json<StoreImageRequest>,
) -> Response {
    let (image_url, description) = match (payload.image_url, payload.description) {
        (Some(url), Some(desc)) if !url.is_empty() && !desc.is_empty() => (url, desc),
        _ => return bad_request("Missing image_url or description"),
    };

    let store = ImageStore::new(state.db.connection());

    match store
        .create_image(CreateImage {
            image_url,
            description,
        })
        .await
    {
        Ok(record) => {
            tracing::info!(image_url = %record.image_url, "stored image");
            created(record)
        }
        Err(StoreError::DuplicateUrl(_)) => conflict("Image URL already exists"),
        Err(e) => {
            tracing::error!("Failed to store image: {}", e);
            internal_error(&unpack_error(&e))
        }
    }
}

pub async fn list_images(State(state): State<AppState>) -> Response {
    let store = ImageStore::new(state.db.connection());

    match store.list_images().await {
        Ok(records) => success(records),
        Err(e) => {
            tracing::error!("Failed to list images: {}", e);
            internal_error(&unpack_error(&e))
        }
    }
}

pub async fn get_image(
    State(state): State<AppState>,
    Query(params): Query<SingleImageParams>,
) -> Response {
    let image_url = match params.image_url {
        Some(url) if !url.is_empty() => url,
        _ => return bad_request("Missing image_url parameter"),
    };

    let store = ImageStore::new(state.db.connection());

    match store.find_by_url(&image_url).await {
        Ok(Some(record)) => success(record),
        Ok(None) => not_found("Image not found"),
        Err(e) => {
            tracing::error!("Failed to get image: {}", e);
            internal_error(&unpack_error(&e))
        }
    }
}
