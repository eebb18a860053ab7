use anyhow::Context;
use sqlx::PgPool;
use tracing::info;

use crate::state::AppState;

/// Menu documents cached for the lifetime of the process. Read-only after
/// startup, so concurrent readers never block.
#[derive(Debug, Clone)]
pub struct CatalogData {
    pub food_items: Vec<serde_json::Value>,
    pub food_category: Vec<serde_json::Value>,
}

async fn fetch_docs(db: &PgPool, table: &str) -> anyhow::Result<Vec<serde_json::Value>> {
    let query = format!("SELECT doc FROM {table} ORDER BY id");
    let docs = sqlx::query_scalar::<_, serde_json::Value>(&query)
        .fetch_all(db)
        .await
        .with_context(|| format!("fetch {table}"))?;
    Ok(docs)
}

/// Fetches the menu into process-wide memory. Called once at startup; a
/// failure here must abort the process since all browsing depends on it.
pub async fn load(state: &AppState) -> anyhow::Result<()> {
    let food_items = fetch_docs(&state.db, "food_items").await?;
    let food_category = fetch_docs(&state.db, "food_categories").await?;

    info!(
        items = food_items.len(),
        categories = food_category.len(),
        "catalog loaded"
    );

    state
        .catalog
        .set(CatalogData {
            food_items,
            food_category,
        })
        .map_err(|_| anyhow::anyhow!("catalog already loaded"))?;
    Ok(())
}
