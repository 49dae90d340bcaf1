//! Top-level module for the Markov word model.
//!
//! This module provides:
//! - Content-keyed prefixes and their successor multisets (`Prefix`)
//! - The prefix map of one model order (`PrefixModel`)
//! - Streaming training and retraining (`trainer`)
//! - Random-walk sentence generation (`generator`)
//! - A session context tying configuration, model and sources together (`Session`)

/// Fixed-width prefix keys and successor multisets.
pub mod prefix;

/// Mapping from prefix keys to prefixes for one model order.
pub mod prefix_model;

/// Sentence-end and punctuation rules shared by training and generation.
pub mod terminator;

/// Sliding-window training over token streams.
pub mod trainer;

/// Sentence generation by random suffix draws.
pub mod generator;

/// User-settable parameters and their validation.
pub mod config;

/// Session context: configuration, active model and trained sources.
pub mod session;

pub use config::SessionConfig;
pub use prefix::{Prefix, PrefixKey};
pub use prefix_model::{ModelStats, PrefixModel};
pub use session::{Session, SourceRegistry};
pub use trainer::TrainOutcome;
