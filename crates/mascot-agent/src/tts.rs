use crate::error::{MascotError, Result};
use crate::types::SpeechRequest;
use serde::Serialize;
use std::time::Duration;

pub const API_KEY_VAR: &str = "FISH_AUDIO_API_KEY";
const DEFAULT_BASE_URL: &str = "https://api.fish.audio";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_RETRIES: u32 = 3;
const BASE_DELAY_MS: u64 = 1000;

// ---------------------------------------------------------------------------
// TtsClient
// ---------------------------------------------------------------------------

/// Fish Audio text-to-speech client for the mascot's voice lines.
///
/// Rate-limited requests are retried with exponential backoff; depleted
/// credits surface as [`MascotError::NoCredits`] so callers can stop asking.
pub struct TtsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    base_delay_ms: u64,
}

#[derive(Serialize)]
struct TtsBody<'a> {
    text: &'a str,
    speed: f32,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    voice_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    emotion: Option<&'a str>,
}

impl TtsClient {
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var(API_KEY_VAR).map_err(|_| MascotError::MissingApiKey(API_KEY_VAR))?;
        if api_key.is_empty() {
            return Err(MascotError::MissingApiKey(API_KEY_VAR));
        }
        Ok(Self::new(api_key, DEFAULT_BASE_URL))
    }

    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            base_delay_ms: BASE_DELAY_MS,
        }
    }

    #[cfg(test)]
    fn with_base_delay_ms(mut self, ms: u64) -> Self {
        self.base_delay_ms = ms;
        self
    }

    /// Synthesize speech, returning the raw audio bytes.
    pub async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>> {
        let text = strip_emojis(&request.text);
        if text.is_empty() {
            return Err(MascotError::EmptyText);
        }
        if !(0.5..=2.0).contains(&request.speed) {
            return Err(MascotError::InvalidSpeed(request.speed));
        }

        let body = TtsBody {
            text: &text,
            speed: request.speed,
            format: request.format.as_str(),
            voice_id: request.voice_id.as_deref(),
            emotion: request.emotion.as_deref(),
        };

        for attempt in 0..MAX_RETRIES {
            let response = self
                .http
                .post(format!("{}/v1/tts", self.base_url))
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            match status.as_u16() {
                200 => return Ok(response.bytes().await?.to_vec()),
                402 => return Err(MascotError::NoCredits),
                429 => {
                    // No point backing off after the last attempt.
                    if attempt + 1 == MAX_RETRIES {
                        break;
                    }
                    let delay = self.base_delay_ms * 2u64.pow(attempt);
                    tracing::warn!(
                        "fish audio rate limited (attempt {}/{MAX_RETRIES}); backing off {delay}ms",
                        attempt + 1
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                _ => {
                    let message = response.text().await.unwrap_or_default();
                    return Err(MascotError::Api {
                        status: status.as_u16(),
                        message,
                    });
                }
            }
        }

        Err(MascotError::RateLimited {
            attempts: MAX_RETRIES,
        })
    }
}

// ---------------------------------------------------------------------------
// Emoji stripping
// ---------------------------------------------------------------------------

/// Remove emoji before sending: the TTS engine reads them out loud otherwise.
pub fn strip_emojis(text: &str) -> String {
    text.chars()
        .filter(|&c| !is_emoji(c))
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_emoji(c: char) -> bool {
    matches!(c,
        '\u{1F300}'..='\u{1F5FF}'
        | '\u{1F600}'..='\u{1F64F}'
        | '\u{1F680}'..='\u{1F6FF}'
        | '\u{1F700}'..='\u{1F77F}'
        | '\u{1F780}'..='\u{1F7FF}'
        | '\u{1F800}'..='\u{1F8FF}'
        | '\u{1F900}'..='\u{1F9FF}'
        | '\u{1FA00}'..='\u{1FAFF}'
        | '\u{2600}'..='\u{26FF}'
        | '\u{2700}'..='\u{27BF}'
        | '\u{FE0F}'
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
