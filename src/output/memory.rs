use crate::output::records::{CrawlResult, DayBucket};
use crate::output::traits::{DaySink, OutputResult};

/// Accumulating sink: keeps every bucket and returns them at the end
#[derive(Debug, Default)]
pub struct MemorySink {
    days: CrawlResult,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DaySink for MemorySink {
    fn accept(&mut self, bucket: DayBucket) -> OutputResult<()> {
        self.days.push(bucket);
        Ok(())
    }

    fn take_result(&mut self) -> CrawlResult {
        std::mem::take(&mut self.days)
    }
}
