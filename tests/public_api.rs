use chunkeval::{
    evaluate_rows, evaluate_rows_conf, fscore, EvalConfigBuilder, Row, Score, ScoreAccumulator,
    ScoreRecord, ScoreReport,
};
use std::fs::read_to_string;

fn read_corpus(content: &str) -> Vec<Row<'_>> {
    let mut rows = vec![];
    for line in content.lines() {
        if line.is_empty() {
            continue;
        }
        let vect: Vec<_> = line.split(' ').collect();
        rows.push(Row::new(vec![vect[0], vect[1]], vect[2], vect[3]));
    }
    rows
}

/// The reference values were derived by hand, the way the CoNLL evaluation script counts: the
/// corpus holds eight labelled gold chunks and eight labelled guess chunks, five of which
/// agree on boundaries, content and tag.
#[test]
fn comparison_to_reference_scorer() {
    let content =
        read_to_string("tests/corpus.txt").expect("file corpus.txt not found in test directory");
    let rows = read_corpus(&content);
    assert_eq!(rows.len(), 15);

    let score = evaluate_rows(&rows).unwrap();
    assert_eq!(score.precision, 62.5);
    assert_eq!(score.recall, 62.5);
    assert_eq!(score.fscore, 62.5);

    let config = EvalConfigBuilder::new().do_round(false).build();
    let exact = evaluate_rows_conf(&rows, &config).unwrap();
    assert!((exact.fscore - 100.0 * fscore(5.0 / 8.0, 5.0 / 8.0)).abs() < 1e-9);
}

#[test]
fn accumulating_runs_into_a_report() {
    let content =
        read_to_string("tests/corpus.txt").expect("file corpus.txt not found in test directory");
    let rows = read_corpus(&content);
    let corpus_score = evaluate_rows(&rows).unwrap();

    let identity_rows = vec![
        Row::new(vec!["one", "N"], "B-foo", "B-foo"),
        Row::new(vec!["two", "N"], "B-bar", "B-bar"),
    ];
    let identity_score = evaluate_rows(&identity_rows).unwrap();

    let first_fold = ScoreAccumulator::fold(vec![ScoreRecord::new("chunking", corpus_score)]);
    let second_fold =
        ScoreAccumulator::fold(vec![ScoreRecord::new("chunking", identity_score)]);
    let report = first_fold.merge(second_fold).finish();

    let expected = Score {
        fscore: (62.5 + 100.0) / 2.0,
        precision: (62.5 + 100.0) / 2.0,
        recall: (62.5 + 100.0) / 2.0,
    };
    assert_eq!(report.get("chunking"), Some(&expected));
    assert_eq!(report.total(), None);
    assert_eq!(
        report.to_string(),
        "Category, Precision, Recall, Fscore\nchunking, 81.25, 81.25, 81.25"
    );
}

#[test]
fn report_with_total_row() {
    let records = vec![
        ScoreRecord::new(
            "foo",
            Score {
                fscore: 60.0,
                precision: 60.0,
                recall: 60.0,
            },
        ),
        ScoreRecord::new(
            "bar",
            Score {
                fscore: 80.0,
                precision: 80.0,
                recall: 80.0,
            },
        ),
        ScoreRecord::new(
            ScoreReport::<f64>::TOTAL,
            Score {
                fscore: 70.0,
                precision: 70.0,
                recall: 70.0,
            },
        ),
    ];
    let report = ScoreAccumulator::fold(records).finish();
    let expected = "Category, Precision, Recall, Fscore
bar, 80, 80, 80
foo, 60, 60, 60
Total, 70, 70, 70";
    assert_eq!(report.to_string(), expected);
}
