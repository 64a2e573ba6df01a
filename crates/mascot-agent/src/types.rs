use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// NightBucket
// ---------------------------------------------------------------------------

/// The coarse verdict on a night, as the mascot sees it. Mirrors the core
/// quality classification without pulling the whole domain crate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NightBucket {
    Poor,
    Good,
    Perfect,
}

impl NightBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            NightBucket::Poor => "poor",
            NightBucket::Good => "good",
            NightBucket::Perfect => "perfect",
        }
    }
}

// ---------------------------------------------------------------------------
// SleepContext
// ---------------------------------------------------------------------------

/// Everything the mascot needs to comment on a night.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepContext {
    pub shepherd_name: String,
    pub duration_hours: f64,
    pub bucket: NightBucket,
    pub score: u32,
    pub streak: u32,
    pub bad_nights: u32,
    pub in_penalty: bool,
    pub sheep_count: usize,
}

// ---------------------------------------------------------------------------
// Speech
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
    Opus,
}

impl AudioFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Opus => "opus",
        }
    }
}

/// A text-to-speech request for the mascot's voice.
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    pub voice_id: Option<String>,
    pub speed: f32,
    pub emotion: Option<String>,
    pub format: AudioFormat,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: None,
            speed: 1.0,
            emotion: None,
            format: AudioFormat::Mp3,
        }
    }
}

// ---------------------------------------------------------------------------
// Claude messages API (request/response subset)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessagesResponse {
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
