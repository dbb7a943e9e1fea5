//! Request pacing shared by every request a crawl makes
//!
//! One `Pacer` is shared between the listing loop and all abstract-page
//! workers, so the delay holds across the whole crawl rather than per task.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Global limiter enforcing a minimum gap between requests
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_slot: Mutex::new(None),
        }
    }

    pub fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }

    /// Waits until the next request slot and claims it
    ///
    /// The first call returns immediately. The lock is not held while
    /// sleeping, so a finishing request can push the slot back and every
    /// waiter re-checks it after waking.
    pub async fn wait(&self) {
        loop {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();

            match *next_slot {
                Some(slot) if slot > now => {
                    drop(next_slot);
                    tokio::time::sleep_until(slot).await;
                }
                _ => {
                    *next_slot = Some(now + self.delay);
                    return;
                }
            }
        }
    }

    /// Re-arms the delay once a response has arrived
    ///
    /// The next request may start no earlier than `delay` after this call,
    /// however long the response took.
    pub async fn release(&self) {
        let mut next_slot = self.next_slot.lock().await;
        let rearmed = Instant::now() + self.delay;
        *next_slot = Some(next_slot.map_or(rearmed, |slot| slot.max(rearmed)));
    }
}
