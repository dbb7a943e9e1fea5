use crate::date::DateKey;
use crate::output::records::{CrawlResult, DayBucket, PaperRecord};
use crate::output::traits::{DaySink, OutputResult};

/// Groups page fragments into day buckets before they reach the sink
///
/// A listing day can continue from one page onto the next. Fragments for the
/// same date as the open bucket are appended to it; a new date closes the
/// open bucket and hands it to the sink. Only the open bucket is held here,
/// so a streaming sink never has more than one day in memory.
pub struct DayMerger {
    sink: Box<dyn DaySink>,
    open: Option<DayBucket>,
    days_emitted: usize,
}

impl DayMerger {
    pub fn new(sink: Box<dyn DaySink>) -> Self {
        Self {
            sink,
            open: None,
            days_emitted: 0,
        }
    }

    /// Adds the papers one page listed under `date`
    pub fn push(&mut self, date: DateKey, papers: Vec<PaperRecord>) -> OutputResult<()> {
        match self.open.as_mut() {
            Some(bucket) if bucket.date == date => {
                bucket.papers.extend(papers);
            }
            _ => {
                self.flush()?;
                self.open = Some(DayBucket::new(date, papers));
            }
        }
        Ok(())
    }

    /// Number of buckets handed to the sink so far
    pub fn days_emitted(&self) -> usize {
        self.days_emitted
    }

    /// Closes the open bucket and returns what the sink kept
    pub fn finish(&mut self) -> OutputResult<CrawlResult> {
        self.flush()?;
        Ok(self.sink.take_result())
    }

    fn flush(&mut self) -> OutputResult<()> {
        if let Some(bucket) = self.open.take() {
            tracing::info!("Completed {} with {} papers", bucket.date, bucket.papers.len());
            self.sink.accept(bucket)?;
            self.days_emitted += 1;
        }
        Ok(())
    }
}
