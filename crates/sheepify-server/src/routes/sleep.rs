use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sheepify_core::config::Config;
use sheepify_core::engine::{self, Completion};
use sheepify_core::state::UserState;
use sheepify_core::SheepifyError;

use crate::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct StartBody {
    /// Bed time; defaults to now.
    pub bed: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct CompleteBody {
    /// Wake time; defaults to now.
    pub wake: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct LogBody {
    pub bed: DateTime<Utc>,
    pub wake: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct SessionsQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    10
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/sleep/start — open a sleep session.
pub async fn start(
    State(app): State<AppState>,
    Json(body): Json<StartBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut user = UserState::load(&root)?;
        let active = user.start_session(body.bed.unwrap_or_else(Utc::now))?.clone();
        user.save(&root)?;
        Ok::<_, SheepifyError>(serde_json::json!({
            "id": active.id,
            "bed": active.bed,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok((StatusCode::CREATED, Json(result)))
}

/// POST /api/v1/sleep/complete — finalize the open session and run rewards.
pub async fn complete(
    State(app): State<AppState>,
    Json(body): Json<CompleteBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = Config::load(&root)?;
        let mut user = UserState::load(&root)?;
        let completion = engine::complete_active(&mut user, body.wake.unwrap_or_else(Utc::now), &config)?;
        user.save(&root)?;
        Ok::<_, SheepifyError>(completion_json(&completion, &user))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// POST /api/v1/sleep/log — record a night from raw bed/wake timestamps.
pub async fn log(
    State(app): State<AppState>,
    Json(body): Json<LogBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = Config::load(&root)?;
        let mut user = UserState::load(&root)?;
        let completion = engine::complete_night(&mut user, body.bed, body.wake, &config)?;
        user.save(&root)?;
        Ok::<_, SheepifyError>(completion_json(&completion, &user))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/v1/sleep/sessions — history, most recent first.
pub async fn sessions(
    State(app): State<AppState>,
    Query(query): Query<SessionsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let user = UserState::load(&root)?;
        let page: Vec<_> = user
            .history
            .iter()
            .skip(query.offset)
            .take(query.limit)
            .collect();
        Ok::<_, SheepifyError>(serde_json::json!({
            "total": user.history.len(),
            "sessions": page,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/v1/sleep/stats — weekly summary.
pub async fn stats(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let user = UserState::load(&root)?;
        let stats = sheepify_core::stats::weekly(&user, Utc::now());
        Ok::<_, SheepifyError>(serde_json::to_value(stats)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

// ---------------------------------------------------------------------------
// Shared JSON shape
// ---------------------------------------------------------------------------

pub(crate) fn completion_json(completion: &Completion, user: &UserState) -> serde_json::Value {
    serde_json::json!({
        "session": completion.session,
        "quality": completion.quality,
        "score": completion.score,
        "wool_awarded": completion.wool_awarded,
        "sheep_awarded": completion.sheep_awarded,
        "token_granted": completion.token_granted,
        "sheep_lost": completion.sheep_lost,
        "entered_penalty": completion.entered_penalty,
        "left_penalty": completion.left_penalty,
        "too_short": completion.too_short,
        "streak": user.streak,
        "wool_balance": user.wool_balance,
        "shepherd_tokens": user.shepherd_tokens,
    })
}
