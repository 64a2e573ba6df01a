use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use sheepify_core::state::UserState;
use sheepify_core::SheepifyError;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UpdateBody {
    pub name: Option<String>,
    /// Cosmetic outfit id.
    pub outfit: Option<String>,
    /// Set true to remove the current outfit.
    #[serde(default)]
    pub undress: bool,
    pub favorite: Option<bool>,
}

/// GET /api/v1/sheep — the whole flock, dead sheep included.
pub async fn list(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let user = UserState::load(&root)?;
        Ok::<_, SheepifyError>(serde_json::json!({
            "total": user.flock.len(),
            "living": user.living_count(),
            "sheep": user.flock,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// PUT /api/v1/sheep/{id} — rename, dress, or favorite a sheep.
pub async fn update(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut user = UserState::load(&root)?;
        if let Some(name) = body.name {
            user.rename_sheep(id, name)?;
        }
        if body.undress {
            user.dress_sheep(id, None)?;
        } else if let Some(outfit) = body.outfit {
            user.dress_sheep(id, Some(outfit))?;
        }
        if body.favorite == Some(true) {
            user.favorite_sheep(id)?;
        }
        user.save(&root)?;
        let sheep = user.find_sheep(id)?.clone();
        Ok::<_, SheepifyError>(serde_json::to_value(sheep)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// POST /api/v1/sheep/clear — remove every sheep from the flock.
pub async fn clear(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut user = UserState::load(&root)?;
        let removed = user.clear_flock();
        user.save(&root)?;
        Ok::<_, SheepifyError>(serde_json::json!({ "removed": removed }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
