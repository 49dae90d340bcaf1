//! Order-N Markov word model library.
//!
//! This crate provides a word-level Markov text generator, including:
//! - Fixed-width prefix keys mapped to successor multisets
//! - Streaming training over whitespace-delimited tokens
//! - Sentence generation by random walk from the sentence-start prefix
//! - A session context tracking configuration and trained sources
//!
//! Randomness is always injected by the caller, so generation is
//! reproducible with a seeded generator.

/// Core prefix model, training and generation logic.
pub mod model;

/// Error type shared by every operation of the crate.
pub mod error;

/// I/O utilities (source loading, folder listing).
pub mod io;

pub use error::{MarkovError, MarkovResult};
