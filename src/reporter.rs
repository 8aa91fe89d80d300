/**
This module aggregates the scores of several evaluation runs. The accumulator is an explicit
value folding per-run score records, with a pure `merge` operation for combining accumulators
built independently (one per worker, per fold, per shard). Finishing an accumulator averages
the runs of every category into a report that can be prettyprinted or queried.
*/
use crate::metrics::{cast, FloatExt, Score};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// The score of one evaluation run, tagged with the category it belongs to.
pub struct ScoreRecord<F: FloatExt> {
    pub category: String,
    pub score: Score<F>,
}

impl<F: FloatExt> ScoreRecord<F> {
    pub fn new<S: Into<String>>(category: S, score: Score<F>) -> Self {
        ScoreRecord {
            category: category.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CategorySum<F: FloatExt> {
    fscore: F,
    precision: F,
    recall: F,
    runs: usize,
}

impl<F: FloatExt> CategorySum<F> {
    fn new(score: Score<F>) -> Self {
        CategorySum {
            fscore: score.fscore,
            precision: score.precision,
            recall: score.recall,
            runs: 1,
        }
    }

    fn add(&mut self, score: Score<F>) {
        self.fscore = self.fscore + score.fscore;
        self.precision = self.precision + score.precision;
        self.recall = self.recall + score.recall;
        self.runs += 1;
    }

    fn combine(&mut self, other: Self) {
        self.fscore = self.fscore + other.fscore;
        self.precision = self.precision + other.precision;
        self.recall = self.recall + other.recall;
        self.runs += other.runs;
    }

    fn mean(self) -> Score<F> {
        let runs: F = cast(self.runs);
        Score {
            fscore: self.fscore / runs,
            precision: self.precision / runs,
            recall: self.recall / runs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Accumulates score records across evaluation runs, keyed by category.
pub struct ScoreAccumulator<F: FloatExt> {
    sums: BTreeMap<String, CategorySum<F>>,
}

impl<F: FloatExt> Default for ScoreAccumulator<F> {
    fn default() -> Self {
        ScoreAccumulator {
            sums: BTreeMap::new(),
        }
    }
}

impl<F: FloatExt> ScoreAccumulator<F> {
    /// Folds a sequence of records into a fresh accumulator.
    pub fn fold<I: IntoIterator<Item = ScoreRecord<F>>>(records: I) -> Self {
        let mut accumulator = Self::default();
        for record in records {
            accumulator.push(record);
        }
        accumulator
    }

    pub fn push(&mut self, record: ScoreRecord<F>) {
        match self.sums.get_mut(&record.category) {
            Some(sum) => sum.add(record.score),
            None => {
                self.sums.insert(record.category, CategorySum::new(record.score));
            }
        }
    }

    /// Pure merge of two accumulators. The result holds the runs of both; no shared state is
    /// involved, so independently built accumulators can be combined in any order.
    pub fn merge(mut self, other: Self) -> Self {
        for (category, sum) in other.sums {
            match self.sums.get_mut(&category) {
                Some(existing) => existing.combine(sum),
                None => {
                    self.sums.insert(category, sum);
                }
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Averages the accumulated runs of every category into a report.
    pub fn finish(self) -> ScoreReport<F> {
        let classes = self
            .sums
            .into_iter()
            .map(|(category, sum)| (category, sum.mean()))
            .collect();
        ScoreReport { classes }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Per-category mean scores, with an optional distinguished `Total` aggregate row. The report
/// acts as a dataframe when displayed: one header row, the categories in lexicographic order
/// and `Total` last.
pub struct ScoreReport<F: FloatExt> {
    classes: BTreeMap<String, Score<F>>,
}

impl<F: FloatExt> ScoreReport<F> {
    /// Name of the aggregate category in the report.
    pub const TOTAL: &'static str = "Total";

    pub fn get(&self, category: &str) -> Option<&Score<F>> {
        self.classes.get(category)
    }

    pub fn total(&self) -> Option<&Score<F>> {
        self.classes.get(Self::TOTAL)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Score<F>)> {
        self.classes
            .iter()
            .map(|(category, score)| (category.as_str(), score))
    }
}

impl<F: FloatExt> Display for ScoreReport<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Category, Precision, Recall, Fscore")?;
        let per_category = self
            .classes
            .iter()
            .filter(|(category, _)| category.as_str() != Self::TOTAL);
        let total = self.classes.get_key_value(Self::TOTAL);
        let rows = per_category.chain(total);
        write!(
            f,
            "{}",
            rows.format_with("\n", |(category, score), f| {
                f(&format_args!(
                    "{}, {}, {}, {}",
                    category, score.precision, score.recall, score.fscore
                ))
            })
        )
    }
}
