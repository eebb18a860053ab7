use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod repo;
pub mod status;

pub fn router() -> Router<AppState> {
    handlers::order_routes()
}
