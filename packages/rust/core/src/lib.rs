//! Audit pipeline: rubric, prompt composition, Gemini client, and rendering.
//!
//! This crate provides:
//! - [`rubric`] — the versioned audit rubric asset and prompt composer
//! - [`gemini`] — the Gemini `generateContent` client
//! - [`render`] — escape-token substitution for terminal output
//! - [`pipeline`] — the end-to-end [`pipeline::run_audit`] sequence

pub mod gemini;
pub mod pipeline;
pub mod render;
pub mod rubric;

pub use gemini::GeminiClient;
pub use pipeline::{AuditOutcome, run_audit};
pub use render::unescape_color_codes;
pub use rubric::{Rubric, compose_prompt};
