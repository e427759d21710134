//! CSV sink: append-only tabular files with resume-by-row-count.

use std::fs::{File, OpenOptions};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;

use crate::error::SinkResult;
use crate::traits::sink::RecordSink;
use crate::types::record::{PostRecord, ReplyRecord};

const POST_HEADER: [&str; 7] = [
    "seq",
    "text",
    "reposts",
    "favorites",
    "replies",
    "image_url",
    "category",
];

const REPLY_HEADER: [&str; 5] = [
    "original_text",
    "category",
    "reply_text",
    "favorites",
    "reposts",
];

/// Append-only CSV sink writing a primary post file and a secondary
/// reply file.
///
/// If a file already exists its rows are kept and new records append;
/// otherwise the file is created with a header row. Each append opens,
/// writes one fully formed record and flushes, so a crash never leaves
/// a partial record behind.
pub struct CsvSink {
    posts_path: PathBuf,
    replies_path: PathBuf,
}

impl CsvSink {
    /// Open (or create) the two output files.
    pub fn open(posts_path: impl AsRef<Path>, replies_path: impl AsRef<Path>) -> SinkResult<Self> {
        let sink = Self {
            posts_path: posts_path.as_ref().to_path_buf(),
            replies_path: replies_path.as_ref().to_path_buf(),
        };
        ensure_header(&sink.posts_path, &POST_HEADER)?;
        ensure_header(&sink.replies_path, &REPLY_HEADER)?;
        Ok(sink)
    }

    /// Count data records in the primary file, excluding the header.
    ///
    /// Counts CSV records, not lines: quoted fields may contain
    /// newlines, so a line count would overstate the resume offset.
    fn count_posts(&self) -> SinkResult<u64> {
        let file = File::open(&self.posts_path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));
        let mut count: u64 = 0;
        for record in reader.byte_records() {
            record?;
            count += 1;
        }
        Ok(count)
    }

    fn append<T: Serialize>(path: &Path, record: &T) -> SinkResult<()> {
        let file = OpenOptions::new().append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

/// Write the header row if the file is missing or empty.
fn ensure_header(path: &Path, header: &[&str]) -> SinkResult<()> {
    let needs_header = match std::fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    };
    if needs_header {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(header)?;
        writer.flush().map_err(csv::Error::from)?;
    }
    Ok(())
}

#[async_trait]
impl RecordSink for CsvSink {
    async fn post_count(&self) -> SinkResult<u64> {
        self.count_posts()
    }

    async fn append_post(&self, record: &PostRecord) -> SinkResult<()> {
        Self::append(&self.posts_path, record)
    }

    async fn append_reply(&self, record: &ReplyRecord) -> SinkResult<()> {
        Self::append(&self.replies_path, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Category;

    fn record(seq: u64) -> PostRecord {
        PostRecord {
            seq,
            text: format!("post {seq}"),
            reposts: 1,
            favorites: 2,
            replies: 6,
            image_url: "N/A".to_string(),
            category: Category::Healthy,
        }
    }

    #[tokio::test]
    async fn test_creates_files_with_headers() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts.csv");
        let replies = dir.path().join("replies.csv");

        let sink = CsvSink::open(&posts, &replies).unwrap();
        assert_eq!(sink.post_count().await.unwrap(), 0);

        let contents = std::fs::read_to_string(&posts).unwrap();
        assert!(contents.starts_with("seq,text,reposts"));
        let contents = std::fs::read_to_string(&replies).unwrap();
        assert!(contents.starts_with("original_text,category"));
    }

    #[tokio::test]
    async fn test_append_and_count() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::open(dir.path().join("p.csv"), dir.path().join("r.csv")).unwrap();

        sink.append_post(&record(1)).await.unwrap();
        sink.append_post(&record(2)).await.unwrap();
        assert_eq!(sink.post_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_reopen_resumes_count_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("p.csv");
        let replies = dir.path().join("r.csv");

        {
            let sink = CsvSink::open(&posts, &replies).unwrap();
            sink.append_post(&record(1)).await.unwrap();
            sink.append_post(&record(2)).await.unwrap();
        }

        // Reopen: existing rows count as the resume offset.
        let sink = CsvSink::open(&posts, &replies).unwrap();
        assert_eq!(sink.post_count().await.unwrap(), 2);
        sink.append_post(&record(3)).await.unwrap();

        let contents = std::fs::read_to_string(&posts).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 4); // header + 3 records

        // Sequence numbers contiguous across the reopen boundary.
        for (i, line) in lines.iter().skip(1).enumerate() {
            assert!(line.starts_with(&format!("{},", i + 1)));
        }
    }

    #[tokio::test]
    async fn test_multiline_text_counts_as_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("p.csv");
        let replies = dir.path().join("r.csv");

        let sink = CsvSink::open(&posts, &replies).unwrap();
        let mut multiline = record(1);
        multiline.text = "first line\nsecond line".to_string();
        sink.append_post(&multiline).await.unwrap();

        // The quoted field spans two lines but is one record.
        assert_eq!(sink.post_count().await.unwrap(), 1);

        // Reopen: the resume offset stays one, and the next record
        // keeps the sequence contiguous.
        let sink = CsvSink::open(&posts, &replies).unwrap();
        assert_eq!(sink.post_count().await.unwrap(), 1);
        sink.append_post(&record(2)).await.unwrap();
        assert_eq!(sink.post_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_category_serialized_as_label() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::open(dir.path().join("p.csv"), dir.path().join("r.csv")).unwrap();

        sink.append_post(&record(1)).await.unwrap();

        let contents = std::fs::read_to_string(dir.path().join("p.csv")).unwrap();
        assert!(contents.lines().nth(1).unwrap().ends_with("healthy"));
    }
}
