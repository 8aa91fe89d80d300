/**
Deterministic builders for chunked test data. They are used by the benchmarks and the test
suite; being free of randomness, they produce the same chunk sets on every run.
*/
use crate::chunks::{Chunk, ChunkSet, Row, Token};
use std::borrow::Cow;

const CLASSES: [&str; 4] = ["NP", "VP", "PP", "AP"];

/// Builds an owned token with synthetic feature columns.
pub fn mock_token(index: usize, tag: &str) -> Token<'static> {
    Token::new(
        index,
        vec![Cow::Owned(format!("w{}", index)), Cow::Borrowed("X")],
        Cow::Owned(tag.to_string()),
    )
}

/// Builds a chunk of `len` tokens starting at token index `start`, labelled `class` with `B-`
/// and `I-` prefixes.
pub fn mock_chunk(start: usize, len: usize, class: &str) -> Chunk<'static> {
    let mut tokens = Vec::with_capacity(len);
    tokens.push(mock_token(start, &format!("B-{}", class)));
    for offset in 1..len {
        tokens.push(mock_token(start + offset, &format!("I-{}", class)));
    }
    Chunk::new(tokens)
}

/// Builds a gold and a guess chunk set with exactly `ncor` chunks in common out of `n` per side.
/// The diverging chunks cover the same token spans under different labels, so the flattened
/// token counts of the two sets always agree. Neither set contains outside placeholders.
pub fn mock_chunk_sets(n: usize, ncor: usize) -> (ChunkSet<'static>, ChunkSet<'static>) {
    assert!(ncor <= n, "cannot share more chunks than the sets hold");
    let mut gold = ChunkSet::default();
    let mut guess = ChunkSet::default();
    let mut index = 0;
    for i in 0..n {
        let len = i % 3 + 1;
        if i < ncor {
            let class = CLASSES[i % CLASSES.len()];
            let shared = mock_chunk(index, len, class);
            gold.insert(shared.clone());
            guess.insert(shared);
        } else {
            gold.insert(mock_chunk(index, len, "GOLDONLY"));
            guess.insert(mock_chunk(index, len, "GUESSONLY"));
        }
        index += len;
    }
    (gold, guess)
}

/// Builds an asymmetric pair: the gold set splits every two-token span into two singleton
/// chunks, while the guess set merges the first `merged` spans into one chunk each. The counts
/// are known exactly: gold holds `2 * pairs` chunks, the guess `2 * pairs - merged`, and the
/// intersection `2 * (pairs - merged)`.
pub fn mock_shifted_sets(pairs: usize, merged: usize) -> (ChunkSet<'static>, ChunkSet<'static>) {
    assert!(merged <= pairs, "cannot merge more spans than there are");
    let mut gold = ChunkSet::default();
    let mut guess = ChunkSet::default();
    for i in 0..pairs {
        let first = 2 * i;
        let second = first + 1;
        let left = Chunk::new(vec![mock_token(first, "B-NP")]);
        let right = Chunk::new(vec![mock_token(second, "B-VP")]);
        if i < merged {
            guess.insert(Chunk::new(vec![
                mock_token(first, "B-NP"),
                mock_token(second, "I-NP"),
            ]));
        } else {
            guess.insert(left.clone());
            guess.insert(right.clone());
        }
        gold.insert(left);
        gold.insert(right);
    }
    (gold, guess)
}

/// Builds a valid BIO row stream of `chunks` labelled spans separated by outside rows. The guess
/// column relabels every `shift_every`-th span, so extracting and scoring the rows exercises the
/// full pipeline with a known density of mismatches.
pub fn mock_rows(chunks: usize, shift_every: usize) -> Vec<Row<'static>> {
    assert!(shift_every > 0, "the divergence period cannot be zero");
    let mut rows = Vec::new();
    for i in 0..chunks {
        let len = i % 3 + 1;
        let class = CLASSES[i % CLASSES.len()];
        let diverges = i % shift_every == 0;
        for offset in 0..len {
            let prefix = if offset == 0 { "B" } else { "I" };
            let gold = format!("{}-{}", prefix, class);
            let guess = if diverges {
                format!("{}-XX", prefix)
            } else {
                gold.clone()
            };
            let form = format!("w{}_{}", i, offset);
            rows.push(Row::new(vec![Cow::Owned(form), Cow::Borrowed("X")], gold, guess));
        }
        if i % 4 == 3 {
            let form = format!("p{}", i);
            rows.push(Row::new(
                vec![Cow::Owned(form), Cow::Borrowed(".")],
                String::from("O"),
                String::from("O"),
            ));
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunks::extract_chunks;
    use crate::metrics::{evaluate, fscore, Score};
    use quickcheck::{QuickCheck, TestResult};

    #[test]
    fn test_mock_chunk_sets_share_exactly_ncor() {
        for (n, ncor) in [(10, 0), (10, 4), (10, 10), (1, 1), (200, 137)] {
            let (gold, guess) = mock_chunk_sets(n, ncor);
            assert_eq!(gold.len(), n);
            assert_eq!(guess.len(), n);
            assert_eq!(gold.token_count(), guess.token_count());
            let shared = gold
                .labelled("O")
                .intersection(&guess.labelled("O"))
                .count();
            assert_eq!(shared, ncor);
        }
    }

    #[test]
    fn test_mock_chunk_sets_score_to_the_shared_fraction() {
        let (gold, guess) = mock_chunk_sets(8, 6);
        let score: Score<f64> = evaluate(&gold, &guess, false, "O").unwrap();
        let expected = 100.0 * 6.0 / 8.0;
        assert!((score.precision - expected).abs() < 1e-9);
        assert!((score.recall - expected).abs() < 1e-9);
        assert!((score.fscore - 100.0 * fscore(0.75, 0.75)).abs() < 1e-9);
    }

    #[test]
    fn test_mock_shifted_sets_counts() {
        fn counts(pairs: u8, merged: u8) -> TestResult {
            let pairs = pairs as usize % 30 + 1;
            let merged = merged as usize % (pairs + 1);
            let (gold, guess) = mock_shifted_sets(pairs, merged);
            let sizes = gold.len() == 2 * pairs && guess.len() == 2 * pairs - merged;
            let tokens = gold.token_count() == guess.token_count();
            let shared = gold
                .labelled("O")
                .intersection(&guess.labelled("O"))
                .count();
            TestResult::from_bool(sizes && tokens && shared == 2 * (pairs - merged))
        }
        let mut qc = QuickCheck::new().tests(500);
        qc.quickcheck(counts as fn(u8, u8) -> TestResult)
    }

    #[test]
    fn test_mock_rows_extract_cleanly() {
        let rows = mock_rows(50, 7);
        let (gold, guess) = extract_chunks(&rows).unwrap();
        assert_eq!(gold.token_count(), rows.len());
        assert_eq!(guess.token_count(), rows.len());
        let score: Score<f64> = evaluate(&gold, &guess, true, "O").unwrap();
        assert!(score.precision < 100.0);
        assert!(score.recall < 100.0);
    }
}
