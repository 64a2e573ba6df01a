use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use sheepify_core::state::UserState;
use sheepify_core::SheepifyError;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SpendBody {
    pub amount: u64,
    /// What the wool is being spent on (shop item id).
    pub item: String,
}

/// GET /api/v1/wool/balance — balance plus daily generation rate.
pub async fn balance(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let user = UserState::load(&root)?;
        Ok::<_, SheepifyError>(serde_json::json!({
            "wool_balance": user.wool_balance,
            "generation_rate": user.generation_rate(),
            "total_sheep": user.flock.len(),
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// POST /api/v1/wool/spend — debit the balance for a shop purchase.
pub async fn spend(
    State(app): State<AppState>,
    Json(body): Json<SpendBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut user = UserState::load(&root)?;
        let balance = user.spend_wool(body.amount, body.item)?;
        user.save(&root)?;
        Ok::<_, SheepifyError>(serde_json::json!({ "wool_balance": balance }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/v1/wool/history — the transaction ledger, oldest first.
pub async fn history(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let user = UserState::load(&root)?;
        Ok::<_, SheepifyError>(serde_json::json!({
            "total": user.ledger.len(),
            "entries": user.ledger,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
