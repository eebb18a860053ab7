use crate::state::AppState;
use axum::{routing::get, Router};

mod dto;
pub mod handlers;
pub mod repo;

pub use repo::{load, CatalogData};

pub fn router() -> Router<AppState> {
    Router::new().route("/catalog", get(handlers::get_catalog))
}
