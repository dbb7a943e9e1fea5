//! JSON file output
//!
//! In stream mode each day is written to `<date-key>_<source>.json` as soon
//! as it is complete and then dropped from memory. Files already written stay
//! on disk if the run later fails.

use crate::crawler::Source;
use crate::output::records::{CrawlResult, DayBucket};
use crate::output::traits::{DaySink, OutputError, OutputResult};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Streaming sink writing one JSON file per day
#[derive(Debug)]
pub struct JsonDaySink {
    directory: PathBuf,
    source: Source,
}

impl JsonDaySink {
    /// Creates the sink, making sure the output directory exists
    pub fn new(directory: impl Into<PathBuf>, source: Source) -> OutputResult<Self> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory).map_err(|source| OutputError::Io {
            path: directory.display().to_string(),
            source,
        })?;
        Ok(Self { directory, source })
    }

    /// Path of the file holding the given day
    pub fn path_for(&self, bucket: &DayBucket) -> PathBuf {
        self.directory
            .join(format!("{}_{}.json", bucket.date, self.source.as_str()))
    }
}

impl DaySink for JsonDaySink {
    fn accept(&mut self, bucket: DayBucket) -> OutputResult<()> {
        let path = self.path_for(&bucket);
        write_json(&path, &bucket)?;
        tracing::debug!(
            "Wrote {} papers for {} to {}",
            bucket.papers.len(),
            bucket.date,
            path.display()
        );
        Ok(())
    }

    fn take_result(&mut self) -> CrawlResult {
        Vec::new()
    }
}

/// Writes a full crawl result to a single JSON file
pub fn write_crawl_result(path: &Path, result: &CrawlResult) -> OutputResult<()> {
    write_json(path, result)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> OutputResult<()> {
    let io_err = |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}
