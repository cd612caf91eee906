//! Gemini API integration module.
//!
//! This module provides the HTTP client for the generateContent backend and
//! the failure classification used at the key-validation boundary.

mod classify;
mod client;

pub use classify::{classify, KeyFailure};
pub use client::{
    validate_prompt, GeminiClient, GeminiError, ModelInfo, GEMINI_API_BASE_URL,
    GEMINI_API_KEY_ENV,
};
