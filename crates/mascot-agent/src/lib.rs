//! `mascot-agent` — Shleepy the mascot's voice and wit.
//!
//! Two HTTP clients, both optional to the reward flow:
//!
//! ```text
//! SleepContext
//!     │
//!     ▼
//! MascotClient   ← Claude messages API; one witty line per night.
//!     │             Any failure degrades to a canned fallback line.
//!     ▼
//! TtsClient      ← Fish Audio TTS; text in, audio bytes out,
//!                   with backoff on rate limits.
//! ```
//!
//! A failed or slow call must never block or corrupt the reward transaction:
//! callers invoke these clients only after the night's state is saved, and
//! [`MascotClient::generate_message`] is deliberately infallible.

pub mod claude;
pub mod error;
pub mod fallback;
pub mod tts;
pub mod types;

pub use claude::MascotClient;
pub use error::MascotError;
pub use tts::TtsClient;
pub use types::{AudioFormat, NightBucket, SleepContext, SpeechRequest};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, MascotError>;
