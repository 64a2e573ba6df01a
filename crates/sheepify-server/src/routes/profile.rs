use axum::extract::State;
use axum::Json;
use sheepify_core::state::UserState;
use sheepify_core::SheepifyError;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/v1/profile — shepherd summary.
pub async fn get(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let user = UserState::load(&root)?;
        Ok::<_, SheepifyError>(serde_json::json!({
            "shepherd_name": user.shepherd_name,
            "streak": user.streak,
            "wool_balance": user.wool_balance,
            "shepherd_tokens": user.shepherd_tokens,
            "prank_tokens": user.prank_tokens,
            "total_sheep_earned": user.total_sheep_earned,
            "living_sheep": user.living_count(),
            "bad_nights": user.penalty.bad_nights,
            "in_penalty": user.penalty.in_penalty,
            "last_sleep": user.last_sleep,
            "created_at": user.created_at,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// POST /api/v1/penalty/reset — clear bad-night debt.
pub async fn reset_penalty(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut user = UserState::load(&root)?;
        user.reset_penalty();
        user.save(&root)?;
        Ok::<_, SheepifyError>(serde_json::json!({
            "bad_nights": user.penalty.bad_nights,
            "in_penalty": user.penalty.in_penalty,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
