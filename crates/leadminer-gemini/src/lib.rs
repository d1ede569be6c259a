//! Client for the Gemini `generateContent` API that turns a lead query into
//! one page of business contacts.
//!
//! The model is asked for a markdown table; [`parse_contacts`] extracts the
//! rows and [`extract_sources`] normalizes the grounding citations.

pub mod client;
pub mod error;
pub mod grounding;
pub mod parse;
pub mod prompt;
pub mod types;

pub use client::{ClientOptions, GeminiClient};
pub use error::GeminiError;
pub use grounding::extract_sources;
pub use parse::parse_contacts;
pub use prompt::{build_prompt, page_temperature, PageStrategy, SYSTEM_INSTRUCTION};
