//! Neon Love Test — AI-generated charm quiz for the terminal.

pub mod config;
pub mod error;
pub mod genai;
pub mod quiz;
pub mod ui;
