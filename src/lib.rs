/*!
This library computes chunk-level precision, recall and F1 of a predicted annotation against a
gold annotation of the same token stream, under BIO/BIOES-style tagging. The tagged rows are
reconstructed into sets of chunk spans and the guess chunks are scored against the gold chunks
by exact-span-match overlap.

# THE MATH
* precision = |correct chunks| / |guessed chunks|
* recall    = |correct chunks| / |gold chunks|
* f1 score  = 100 * 2 * precision * recall / (precision + recall)

A chunk is correct only when an identical chunk exists on the other side: same boundaries, same
token content, same tag. There is no partial-span credit.

# SCHEMES
Tags carry a single-character prefix marking the position of the token in its chunk:
* `B`: the token begins a chunk.
* `I`: the token is inside a chunk.
* `O`: the token is outside any chunk.
* `E`: the token ends a chunk.
* `S`: the token is a single-token chunk.

A boundary prefix (`B`, `O` or `S`) closes the open chunk and starts a new one; a continuation
prefix (`I` or `E`) extends it. A sequence must start on a boundary prefix.

# Terminology
* A chunk is a maximal contiguous span of tokens sharing one label, such as `["B-NP", "I-NP"]`.
* The gold column is the reference annotation; the guess column is the predicted annotation
    being scored.
* A chunk whose tag is the outside label (`"O"` by default) is a placeholder and never
    participates in the scores.
*/

mod chunks;
mod config;
mod metrics;
pub mod mock;
mod reporter;
mod schemes;

// The public api starts here
pub use chunks::{extract_chunks, Chunk, ChunkSet, Row, Token};

pub use config::{EvalConfig, EvalConfigBuilder};

pub use metrics::{
    evaluate, fscore, FloatExt, Metric, Score, ScoringError, TokenCountMismatchError,
    UndefinedScoreError,
};

pub use reporter::{ScoreAccumulator, ScoreRecord, ScoreReport};

pub use schemes::{InvalidTagError, Prefix, TagColumn, TagParseError};

use std::error::Error;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
/// Enum of errors wrapping the actual error structs: everything that can go wrong between
/// receiving the rows and returning the score triple.
pub enum EvalError {
    /// A tag violated the scheme during extraction.
    InvalidTag(InvalidTagError),
    /// The chunk sets could not be scored.
    Scoring(ScoringError),
}

impl Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTag(tag_err) => Display::fmt(tag_err, f),
            Self::Scoring(score_err) => Display::fmt(score_err, f),
        }
    }
}

impl Error for EvalError {}

impl From<InvalidTagError> for EvalError {
    fn from(value: InvalidTagError) -> Self {
        Self::InvalidTag(value)
    }
}

impl From<ScoringError> for EvalError {
    fn from(value: ScoringError) -> Self {
        Self::Scoring(value)
    }
}

/// Main entrypoint of the chunkeval library. Chunks the rows by their gold and guess columns
/// and scores the guess chunks against the gold chunks, with the default configuration:
/// percentages rounded to two decimal places, `"O"` as the outside label.
///
/// # Example
/// ```rust
/// use chunkeval::{evaluate_rows, Row};
///
/// let rows = vec![
///     Row::new(vec!["Gold", "N"], "B-NP", "B-NP"),
///     Row::new(vec!["is", "V"], "B-MV", "B-MV"),
///     Row::new(vec!["golden", "J"], "B-AP", "O"),
/// ];
///
/// let score = evaluate_rows(&rows).unwrap();
/// assert_eq!(score.precision, 100.0);
/// assert_eq!(score.recall, 66.67);
/// assert_eq!(score.fscore, 80.0);
/// ```
pub fn evaluate_rows<'a>(rows: &'a [Row<'a>]) -> Result<Score<f64>, EvalError> {
    evaluate_rows_conf(rows, &EvalConfig::default())
}

/// Chunks the rows by their gold and guess columns and scores the guess chunks against the gold
/// chunks, honoring the given configuration.
///
/// # Example
/// ```rust
/// use chunkeval::{evaluate_rows_conf, EvalConfigBuilder, Row};
///
/// let rows = vec![
///     Row::new(vec!["Gold", "N"], "B-NP", "B-NP"),
///     Row::new(vec!["is", "V"], "B-MV", "B-MV"),
///     Row::new(vec!["golden", "J"], "B-AP", "O"),
/// ];
/// let config = EvalConfigBuilder::new().do_round(false).build();
///
/// let score = evaluate_rows_conf(&rows, &config).unwrap();
/// assert!((score.recall - 200.0 / 3.0).abs() < 1e-9);
/// ```
pub fn evaluate_rows_conf<'a>(
    rows: &'a [Row<'a>],
    config: &EvalConfig,
) -> Result<Score<f64>, EvalError> {
    let (gold, guess) = extract_chunks(rows)?;
    let score = evaluate(&gold, &guess, config.do_round(), config.outside_label())?;
    Ok(score)
}
