//! Error taxonomy for the tournament layer.
//!
//! The map itself never errors: absence is `None`/`false`. Everything a
//! roster, matchup list, or weight vector can get wrong surfaces here and
//! propagates to the binary, which reports it and exits non-zero.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlottoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("duplicate player {0:?}")]
    DuplicatePlayer(String),

    #[error("player id {0:?} is longer than 31 characters")]
    IdTooLong(String),

    #[error("invalid distribution for player {id:?}: {reason}")]
    InvalidDistribution { id: String, reason: String },

    #[error("empty player roster")]
    EmptyRoster,

    #[error("malformed matchup line {0:?}")]
    MalformedMatchup(String),

    #[error("empty matchup list")]
    EmptyMatchups,

    #[error("matchup references unknown player {0:?}")]
    UnknownPlayer(String),

    #[error("mode must be \"win\" or \"score\", got {0:?}")]
    InvalidMode(String),

    #[error("expected {expected} battlefield weights, got {actual}")]
    WeightCount { expected: usize, actual: usize },

    #[error("battlefield weights must be positive numbers, got {0}")]
    InvalidWeight(f64),
}
