pub mod config;
pub mod init;
pub mod mascot;
pub mod penalty;
pub mod serve;
pub mod sheep;
pub mod sleep;
pub mod status;
pub mod wool;
