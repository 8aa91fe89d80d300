/**
This module computes the overlap metrics (precision, recall, f-score) between a gold chunk set
and a guess chunk set.
*/
use crate::chunks::ChunkSet;
use core::fmt;
use num::Float;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Debug, Display};

/// Internal extension trait for Num's Float trait
pub trait FloatExt: Float + Send + Sync + Clone + Debug + Display {}

impl<T: Float + Send + Sync + Clone + Copy + Debug + Display> FloatExt for T {}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
/// The three metrics derived from the chunk overlap. Used to report which denominator of the
/// computation was undefined.
pub enum Metric {
    FScore,
    Precision,
    Recall,
}

impl Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Error type to represent when the flattened gold and guess token counts disagree. The two
/// chunk sets do not describe the same underlying token stream.
pub struct TokenCountMismatchError(pub usize, pub usize);

impl Display for TokenCountMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Non-matching number of tokens. The gold chunks hold {} tokens, the guess chunks hold {}",
            self.0, self.1
        )
    }
}

impl Error for TokenCountMismatchError {}

#[derive(Debug, PartialEq, Clone, Copy)]
/// A metric's denominator is zero, so the metric is undefined. Surfaced instead of letting a
/// NaN or an infinity propagate.
pub struct UndefinedScoreError(pub Metric);

impl Display for UndefinedScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Encountered a division by zero while computing {}", self.0)
    }
}

impl Error for UndefinedScoreError {}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Enum error encompassing the failures that can happen when scoring two chunk sets.
pub enum ScoringError {
    TokenCountMismatch(TokenCountMismatchError),
    UndefinedScore(UndefinedScoreError),
}

impl Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenCountMismatch(count_err) => Display::fmt(count_err, f),
            Self::UndefinedScore(score_err) => Display::fmt(score_err, f),
        }
    }
}

impl Error for ScoringError {}

impl From<TokenCountMismatchError> for ScoringError {
    fn from(value: TokenCountMismatchError) -> Self {
        Self::TokenCountMismatch(value)
    }
}

impl From<UndefinedScoreError> for ScoringError {
    fn from(value: UndefinedScoreError) -> Self {
        Self::UndefinedScore(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// The score triple of one evaluation: f-score, precision and recall, each a percentage in
/// [0, 100].
pub struct Score<F: FloatExt> {
    pub fscore: F,
    pub precision: F,
    pub recall: F,
}

impl<F: FloatExt> Display for Score<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(fscore: {}, precision: {}, recall: {})",
            self.fscore, self.precision, self.recall
        )
    }
}

impl<F: FloatExt> Score<F> {
    /// Rounds all three components to two decimal places. Ties at the second decimal round to
    /// the even neighbour, so the output lines up with externally generated reference tables.
    pub fn rounded(self) -> Self {
        Score {
            fscore: round2(self.fscore),
            precision: round2(self.precision),
            recall: round2(self.recall),
        }
    }
}

/// The harmonic mean of precision and recall. Operates on whatever scale its inputs use.
pub fn fscore<F: FloatExt>(precision: F, recall: F) -> F {
    let two: F = cast(2);
    two * precision * recall / (precision + recall)
}

/// Rounds to two decimal places, ties to the even neighbour.
fn round2<F: FloatExt>(value: F) -> F {
    let scale: F = cast(100);
    let scaled = value * scale;
    let floored = scaled.floor();
    let half = F::from(0.5).expect("0.5 is representable in any float");
    let rounded = if scaled - floored == half {
        let two: F = cast(2);
        if (floored % two).is_zero() {
            floored
        } else {
            floored + F::one()
        }
    } else {
        scaled.round()
    };
    rounded / scale
}

pub(crate) fn cast<F: FloatExt>(count: usize) -> F {
    F::from(count).expect("a chunk count always fits into a float")
}

/// Scores a guess chunk set against a gold chunk set.
///
/// The assumption is simple: once the token stream has been reconstructed into chunks, counting
/// the correct chunks is a set intersection under full tuple equality. The chunks whose leading
/// tag equals `outside` never participate.
///
/// * `gold`: Chunk set of the reference annotation.
/// * `guess`: Chunk set of the predicted annotation.
/// * `do_round`: Round the percentages to two decimal places (see `Score::rounded`).
/// * `outside`: The label marking tokens outside any chunk, usually `"O"`.
///
/// Fails with `TokenCountMismatchError` when the two sets flatten to different token counts and
/// with `UndefinedScoreError` when a denominator is zero. No partial result is returned.
pub fn evaluate<'a, F: FloatExt>(
    gold: &ChunkSet<'a>,
    guess: &ChunkSet<'a>,
    do_round: bool,
    outside: &str,
) -> Result<Score<F>, ScoringError> {
    let gold_tokens = gold.token_count();
    let guess_tokens = guess.token_count();
    if gold_tokens != guess_tokens {
        return Err(TokenCountMismatchError(gold_tokens, guess_tokens).into());
    }
    let gold_labelled = gold.labelled(outside);
    let guess_labelled = guess.labelled(outside);
    if guess_labelled.is_empty() {
        return Err(UndefinedScoreError(Metric::Precision).into());
    }
    if gold_labelled.is_empty() {
        return Err(UndefinedScoreError(Metric::Recall).into());
    }
    let correct = gold_labelled.intersection(&guess_labelled).count();
    let precision: F = cast::<F>(correct) / cast(guess_labelled.len());
    let recall: F = cast::<F>(correct) / cast(gold_labelled.len());
    if (precision + recall).is_zero() {
        return Err(UndefinedScoreError(Metric::FScore).into());
    }
    let hundred: F = cast(100);
    let score = Score {
        fscore: hundred * fscore(precision, recall),
        precision: hundred * precision,
        recall: hundred * recall,
    };
    if do_round {
        Ok(score.rounded())
    } else {
        Ok(score)
    }
}
