use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use std::thread::sleep;

use crate::{Error, Result};

/// How an acquisition waits for the instrument to finish.
///
/// The default polls back to back with no deadline, which blocks until the instrument reports
/// completion. A trigger that never fires then blocks forever unless the instrument has an
/// auto-trigger timeout configured.
#[derive(Debug, Clone, Default)]
pub struct Poll {
    interval: Duration,
    max_interval: Duration,
    timeout: Option<Duration>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Poll {
    pub fn busy() -> Poll {
        Poll::default()
    }

    /// Sleeps `interval` between status reads.
    pub fn interval(mut self, interval: Duration) -> Poll {
        self.interval = interval;
        self.max_interval = self.max_interval.max(interval);
        self
    }

    /// Doubles the sleep after each status read, up to `max_interval`.
    pub fn backoff(mut self, max_interval: Duration) -> Poll {
        self.max_interval = max_interval.max(self.interval);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Poll {
        self.timeout = Some(timeout);
        self
    }

    /// Gives up with `Error::Cancelled` once `flag` is set, which may happen from another thread.
    pub fn cancel_on(mut self, flag: Arc<AtomicBool>) -> Poll {
        self.cancel = Some(flag);
        self
    }

    /// Calls `done` until it returns `true`.
    pub(crate) fn wait_until(&self, mut done: impl FnMut() -> Result<bool>) -> Result<()> {
        let started = Instant::now();
        let mut delay = self.interval;
        let mut polls = 0usize;
        loop {
            if let Some(flag) = &self.cancel {
                if flag.load(Ordering::Relaxed) {
                    log::debug!("wait: cancelled after {} polls", polls);
                    return Err(Error::Cancelled)
                }
            }
            polls += 1;
            if done()? {
                log::trace!("wait: done after {} polls", polls);
                return Ok(())
            }
            if let Some(timeout) = self.timeout {
                if started.elapsed() >= timeout {
                    log::debug!("wait: timed out after {} polls", polls);
                    return Err(Error::Timeout)
                }
            }
            if !delay.is_zero() {
                sleep(delay);
                delay = (delay * 2).min(self.max_interval);
            }
        }
    }
}
