pub mod mascot;
pub mod profile;
pub mod sheep;
pub mod sleep;
pub mod wool;
