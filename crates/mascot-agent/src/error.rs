use thiserror::Error;

#[derive(Debug, Error)]
pub enum MascotError {
    #[error("API key not found: set {0} in the environment")]
    MissingApiKey(&'static str),

    #[error("text cannot be empty")]
    EmptyText,

    #[error("speed must be between 0.5 and 2.0, got {0}")]
    InvalidSpeed(f32),

    #[error("rate limit exceeded after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("API credits depleted")]
    NoCredits,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response shape: {0}")]
    Shape(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MascotError>;
