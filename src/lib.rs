//! kousei - Japanese Markdown proofreading
//!
//! Rule-based checks for technical-term spelling, proper nouns and
//! readability, exposed as a CLI and as a Language Server.

pub mod checker;
pub mod config;
pub mod dictionary;
pub mod discover;
pub mod extractor;
pub mod format;
pub mod linter;
pub mod position;
pub mod result;
pub mod server;
