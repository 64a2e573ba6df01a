use axum::extract::State;
use axum::Json;
use mascot_agent::{NightBucket, SleepContext};
use sheepify_core::state::UserState;
use sheepify_core::types::Quality;
use sheepify_core::SheepifyError;

use crate::error::AppError;
use crate::state::AppState;

fn bucket_for(quality: Quality) -> NightBucket {
    match quality {
        Quality::Poor => NightBucket::Poor,
        Quality::Good => NightBucket::Good,
        Quality::Perfect => NightBucket::Perfect,
    }
}

/// POST /api/v1/mascot/message — a mascot line about the latest night.
pub async fn message(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let ctx = tokio::task::spawn_blocking(move || {
        let user = UserState::load(&root)?;
        let latest = user
            .history
            .first()
            .ok_or_else(|| SheepifyError::SessionNotFound("no nights recorded yet".into()))?;
        Ok::<_, SheepifyError>(SleepContext {
            shepherd_name: user.shepherd_name.clone(),
            duration_hours: latest.duration_hours,
            bucket: bucket_for(latest.quality),
            score: latest.score,
            streak: user.streak,
            bad_nights: user.penalty.bad_nights,
            in_penalty: user.penalty.in_penalty,
            sheep_count: user.living_count(),
        })
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let text = app.mascot.generate_message(&ctx).await;
    Ok(Json(serde_json::json!({ "message": text })))
}
