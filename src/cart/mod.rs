use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod lines;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::cart_routes()
}
