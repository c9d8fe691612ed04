use axum::{
    Router,
    routing::{get, post},
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_images))
        .route("/", post(handler::store_image))
        .route("/single", get(handler::get_image))
}
