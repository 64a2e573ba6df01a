use crate::error::{MascotError, Result};
use crate::fallback;
use crate::types::{ChatMessage, ContentBlock, MessagesRequest, MessagesResponse, SleepContext};
use std::time::Duration;

pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const SYSTEM_PROMPT: &str = "You are Shleepy, the sheep mascot of a sleep-tracking farm game. \
Respond with ONE witty line (max 2 sentences) about the shepherd's night. \
Sheep puns are encouraged ('ewe', 'baa-d', 'wool'). Praise perfect nights, \
gently roast poor ones, and be somber if a sheep was just lost to the penalty. \
No emoji descriptions, no preamble, just the line.";

// ---------------------------------------------------------------------------
// MascotClient
// ---------------------------------------------------------------------------

/// Claude-backed message generator for the mascot.
///
/// Construction never fails: a missing API key puts the client in fallback
/// mode, where [`MascotClient::generate_message`] serves canned lines.
pub struct MascotClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl MascotClient {
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::warn!("{API_KEY_VAR} not set; mascot using canned fallback lines");
        }
        Self::new(api_key, DEFAULT_BASE_URL)
    }

    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key,
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Generate a one-liner about the night. Infallible: any API problem
    /// (missing key, timeout, bad status, unparseable body) degrades to a
    /// canned line so the reward flow is never blocked.
    pub async fn generate_message(&self, ctx: &SleepContext) -> String {
        match self.request_message(ctx).await {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!("mascot message generation failed: {err}; using fallback");
                fallback::line(ctx)
            }
        }
    }

    async fn request_message(&self, ctx: &SleepContext) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(MascotError::MissingApiKey(API_KEY_VAR))?;

        let prompt = format!(
            "Shepherd: {}\nSlept: {:.1} hours ({})\nQuality score: {}/100\nStreak: {} nights\nBad nights in a row: {}\nIn penalty: {}\nFlock size: {}",
            ctx.shepherd_name,
            ctx.duration_hours,
            ctx.bucket.as_str(),
            ctx.score,
            ctx.streak,
            ctx.bad_nights,
            ctx.in_penalty,
            ctx.sheep_count,
        );

        let body = MessagesRequest {
            model: self.model.clone(),
            max_tokens: 150,
            system: SYSTEM_PROMPT.to_string(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MascotError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MessagesResponse = response.json().await?;
        let text = parsed
            .content
            .iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text.trim().to_string()),
                ContentBlock::Other => None,
            })
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MascotError::Shape("no text block in response".to_string()))?;

        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
