pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod paths;
pub mod quality;
pub mod session;
pub mod sheep;
pub mod state;
pub mod stats;
pub mod types;

pub use error::{Result, SheepifyError};
