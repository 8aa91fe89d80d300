/**
This module reconstructs chunks out of a linear stream of tagged rows. A chunk is a maximal
contiguous span of tokens sharing one label, delimited by the boundary prefixes of the tagging
scheme. The same row stream is chunked twice, once by its gold column and once by its guess
column, since the two annotations may disagree on where chunks open and close.
*/
use crate::schemes::{InvalidTagError, Prefix, TagColumn};
use ahash::AHashSet;
use itertools::Itertools;
use std::borrow::Cow;
use std::fmt::Display;
use std::mem::take;
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A single tagged token: its position in the original sequence, its passthrough feature columns
/// (surface form, part-of-speech, ...) and the tag of the column it was extracted from. Tokens are
/// immutable once created.
pub struct Token<'a> {
    index: usize,
    fields: Vec<Cow<'a, str>>,
    tag: Cow<'a, str>,
}

impl<'a> Token<'a> {
    pub fn new(index: usize, fields: Vec<Cow<'a, str>>, tag: Cow<'a, str>) -> Self {
        Token { index, fields, tag }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn fields(&self) -> &[Cow<'a, str>] {
        &self.fields
    }
}

impl<'a> Display for Token<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.index,
            self.fields.iter().format(", "),
            self.tag
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// An ordered, non-empty sequence of tokens forming one labeled span, or a singleton placeholder
/// for an outside-tagged token. Two chunks are equal iff every token matches at every position,
/// index, fields and tag included. There is no partial or fuzzy matching.
pub struct Chunk<'a>(Vec<Token<'a>>);

impl<'a> Chunk<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        debug_assert!(!tokens.is_empty(), "a chunk holds at least one token");
        Chunk(tokens)
    }

    pub fn tokens(&self) -> &[Token<'a>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The tag of the first token, which labels the whole span.
    pub fn leading_tag(&self) -> &str {
        self.0[0].tag()
    }

    /// Whether this chunk is a placeholder for tokens outside any chunk.
    pub fn is_outside(&self, outside: &str) -> bool {
        self.leading_tag() == outside
    }
}

impl<'a> Display for Chunk<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.iter().format(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// An unordered collection of unique chunks. Structurally identical chunks collapse to a single
/// entry; chunk identity includes the token index, so two distinct spans only collide if the
/// caller mishandles indices.
pub struct ChunkSet<'a> {
    chunks: AHashSet<Chunk<'a>>,
}

impl<'a> Deref for ChunkSet<'a> {
    type Target = AHashSet<Chunk<'a>>;

    fn deref(&self) -> &Self::Target {
        &self.chunks
    }
}

impl<'a> DerefMut for ChunkSet<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.chunks
    }
}

impl<'a> FromIterator<Chunk<'a>> for ChunkSet<'a> {
    fn from_iter<I: IntoIterator<Item = Chunk<'a>>>(iter: I) -> Self {
        ChunkSet {
            chunks: AHashSet::from_iter(iter),
        }
    }
}

impl<'a> IntoIterator for ChunkSet<'a> {
    type Item = Chunk<'a>;
    type IntoIter = <AHashSet<Chunk<'a>> as IntoIterator>::IntoIter;
    fn into_iter(self) -> Self::IntoIter {
        self.chunks.into_iter()
    }
}

impl<'a> ChunkSet<'a> {
    /// Total number of tokens across all chunks of the set.
    pub fn token_count(&self) -> usize {
        self.chunks.iter().map(Chunk::len).sum()
    }

    /// Filters out the outside placeholders and returns the labelled chunks in a HashSet.
    pub fn labelled(&self, outside: &str) -> AHashSet<&Chunk<'a>> {
        AHashSet::from_iter(self.chunks.iter().filter(|c| !c.is_outside(outside)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the tagged input: the passthrough feature columns plus the gold and guess tags. The
/// position of the row in the input slice is its zero-based token index.
pub struct Row<'a> {
    pub fields: Vec<Cow<'a, str>>,
    pub gold: Cow<'a, str>,
    pub guess: Cow<'a, str>,
}

impl<'a> Row<'a> {
    pub fn new<I, S, T>(fields: I, gold: T, guess: T) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'a, str>>,
        T: Into<Cow<'a, str>>,
    {
        Row {
            fields: fields.into_iter().map(Into::into).collect(),
            gold: gold.into(),
            guess: guess.into(),
        }
    }
}

fn column_prefix(tag: &str, column: TagColumn, row: usize) -> Result<Prefix, InvalidTagError> {
    Prefix::of_tag(tag).map_err(|source| InvalidTagError::Malformed { column, row, source })
}

fn check_opening(
    prefix: Prefix,
    tag: &str,
    column: TagColumn,
) -> Result<(), InvalidTagError> {
    if prefix.is_continuation() {
        return Err(InvalidTagError::OpensMidChunk {
            column,
            row: 0,
            tag: tag.to_string(),
        });
    }
    Ok(())
}

/// Runs the two chunking passes over the rows and returns the gold and guess chunk sets, in that
/// order. The passes share a single iteration: each row closes or extends one open buffer per
/// column, depending on whether its tag carries a boundary or a continuation prefix. The first
/// row must open both columns on a boundary prefix and every tag must carry a recognized prefix,
/// otherwise extraction fails with an `InvalidTagError` naming the column and row offset.
///
/// An empty row slice yields two empty chunk sets.
pub fn extract_chunks<'a>(
    rows: &'a [Row<'a>],
) -> Result<(ChunkSet<'a>, ChunkSet<'a>), InvalidTagError> {
    let mut gold_set = ChunkSet::default();
    let mut guess_set = ChunkSet::default();
    let first = match rows.first() {
        Some(row) => row,
        None => return Ok((gold_set, guess_set)),
    };
    let gold_prefix = column_prefix(&first.gold, TagColumn::Gold, 0)?;
    check_opening(gold_prefix, &first.gold, TagColumn::Gold)?;
    let guess_prefix = column_prefix(&first.guess, TagColumn::Guess, 0)?;
    check_opening(guess_prefix, &first.guess, TagColumn::Guess)?;

    let mut open_gold = vec![Token::new(0, first.fields.clone(), first.gold.clone())];
    let mut open_guess = vec![Token::new(0, first.fields.clone(), first.guess.clone())];
    for (row_id, row) in rows.iter().enumerate().skip(1) {
        if column_prefix(&row.gold, TagColumn::Gold, row_id)?.is_boundary() {
            gold_set.insert(Chunk::new(take(&mut open_gold)));
        }
        open_gold.push(Token::new(row_id, row.fields.clone(), row.gold.clone()));
        if column_prefix(&row.guess, TagColumn::Guess, row_id)?.is_boundary() {
            guess_set.insert(Chunk::new(take(&mut open_guess)));
        }
        open_guess.push(Token::new(row_id, row.fields.clone(), row.guess.clone()));
    }
    gold_set.insert(Chunk::new(open_gold));
    guess_set.insert(Chunk::new(open_guess));
    Ok((gold_set, guess_set))
}
