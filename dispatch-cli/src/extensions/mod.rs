//! Module provides various helper functionality.

pub mod config;
pub mod formats;
pub mod generate;
pub mod interruption;
pub mod render;
