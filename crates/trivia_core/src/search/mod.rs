//! Substring search over question text.
//!
//! # Responsibility
//! - Parse user search terms and reject empty input.
//! - Decide whether a question text matches a term.

pub mod term;
