use axum::{extract::State, Json};
use tracing::instrument;

use crate::{catalog::dto::CatalogResponse, error::AppError, state::AppState};

#[instrument(skip(state))]
pub async fn get_catalog(State(state): State<AppState>) -> Result<Json<CatalogResponse>, AppError> {
    let data = state.catalog.get().ok_or(AppError::ServiceUnavailable(
        "Food data not loaded. Please try again later.",
    ))?;

    Ok(Json(CatalogResponse {
        success: true,
        food_items: data.food_items.clone(),
        food_category: data.food_category.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn unavailable_before_load() {
        let state = AppState::fake();
        let err = get_catalog(State(state)).await.unwrap_err();
        assert_eq!(
            err.into_response().status(),
            axum::http::StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn serves_cached_documents_after_load() {
        let state = AppState::fake();
        state
            .catalog
            .set(crate::catalog::CatalogData {
                food_items: vec![serde_json::json!({"name": "Margherita"})],
                food_category: vec![],
            })
            .unwrap();
        let Json(resp) = get_catalog(State(state)).await.unwrap();
        assert!(resp.success);
        assert_eq!(resp.food_items.len(), 1);
    }
}
