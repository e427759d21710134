//! End-to-end collection runs through the public API: scripted source,
//! lexicon classification and real CSV files, including a restart that
//! resumes from the existing rows.

use std::path::Path;

use collector::{
    collect, CollectorConfig, CsvSink, Engagement, LexiconClassifier, MockModel, MockSource,
    PacingConfig, Page, Post, WaitRange,
};

fn fast_pacing() -> PacingConfig {
    PacingConfig {
        jitter: 0.0,
        per_post: WaitRange::fixed(1),
        per_page: WaitRange::fixed(1),
        session_break: WaitRange::fixed(1),
    }
}

fn qualifying(id: &str, text: &str) -> Post {
    Post::new(id, text).with_metrics(Engagement::new(1, 2, 6))
}

fn read_seqs(path: &Path) -> Vec<u64> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader
        .records()
        .map(|row| row.unwrap()[0].parse().unwrap())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_run_resumes_across_restart_with_contiguous_seqs() {
    let dir = tempfile::tempdir().unwrap();
    let posts = dir.path().join("tweets.csv");
    let replies = dir.path().join("replies.csv");

    let config = CollectorConfig::new("q")
        .with_target(3)
        .with_pacing(fast_pacing())
        .without_replies();

    // First run: the source dries up after two qualifying posts, one
    // of them spanning two lines.
    {
        let source = MockSource::new().with_page(Page::new(vec![
            qualifying("1", "fried junk dinner\nso greasy"),
            qualifying("2", "fresh organic homemade meal"),
        ]));
        let classifier = LexiconClassifier::new(MockModel::new());
        let sink = CsvSink::open(&posts, &replies).unwrap();

        let result = collect(&config, &source, &classifier, &sink)
            .await
            .unwrap();
        assert_eq!(result.collected, 2);
        assert!(!result.reached_target);
    }

    // Second run against the same files picks up at seq 3.
    let source = MockSource::new().with_page(Page::new(vec![qualifying(
        "3",
        "microwave dinner again",
    )]));
    let classifier = LexiconClassifier::new(MockModel::new());
    let sink = CsvSink::open(&posts, &replies).unwrap();

    let result = collect(&config, &source, &classifier, &sink)
        .await
        .unwrap();
    assert_eq!(result.collected, 3);
    assert!(result.reached_target);

    assert_eq!(read_seqs(&posts), vec![1, 2, 3]);
}

#[tokio::test(start_paused = true)]
async fn test_replies_persist_alongside_posts() {
    let dir = tempfile::tempdir().unwrap();
    let posts = dir.path().join("tweets.csv");
    let replies = dir.path().join("replies.csv");

    let source = MockSource::new()
        .with_page(Page::new(vec![qualifying("parent", "fried junk dinner")]))
        .with_replies(
            "parent",
            vec![
                Post::new("parent", "fried junk dinner"),
                Post::new("r1", "looks amazing").with_metrics(Engagement::new(0, 3, 0)),
            ],
        );
    let classifier = LexiconClassifier::new(MockModel::new());
    let sink = CsvSink::open(&posts, &replies).unwrap();
    let config = CollectorConfig::new("q")
        .with_target(1)
        .with_pacing(fast_pacing());

    let result = collect(&config, &source, &classifier, &sink)
        .await
        .unwrap();
    assert_eq!(result.collected, 1);

    // Self-reply excluded; the one real reply carries the parent's
    // text and category.
    let mut reader = csv::Reader::from_path(&replies).unwrap();
    let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "fried junk dinner");
    assert_eq!(&rows[0][1], "unhealthy");
    assert_eq!(&rows[0][2], "looks amazing");
}
