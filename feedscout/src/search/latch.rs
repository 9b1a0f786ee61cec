use std::sync::{Arc, Condvar, Mutex, MutexGuard};

/// Counts outstanding workers and lets one thread block until all of them
/// are done.
///
/// The count is raised with [`increment`](Self::increment) before a worker
/// starts and lowered once it finishes, usually through a [`LatchTicket`].
/// [`wait`](Self::wait) returns as soon as the count is zero.
#[derive(Debug, Clone, Default)]
pub struct CountdownLatch {
    inner: Arc<LatchState>,
}

#[derive(Debug, Default)]
struct LatchState {
    count: Mutex<usize>,
    zero: Condvar,
}

impl CountdownLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        *self.lock() += 1;
    }

    /// Lowers the count by one and wakes waiters when it reaches zero
    pub fn count_down(&self) {
        let mut count = self.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.inner.zero.notify_all();
        }
    }

    /// Blocks until the count is zero
    pub fn wait(&self) {
        let mut count = self.lock();
        while *count > 0 {
            count = self
                .inner
                .zero
                .wait(count)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    pub fn count(&self) -> usize {
        *self.lock()
    }

    /// Raises the count and returns a guard that lowers it again on drop.
    /// The guard also fires while unwinding, so a panicking worker still
    /// releases the waiter.
    pub fn ticket(&self) -> LatchTicket {
        self.increment();
        LatchTicket {
            latch: self.clone(),
        }
    }

    // The count stays meaningful even if a holder panicked
    fn lock(&self) -> MutexGuard<'_, usize> {
        self.inner
            .count
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// One outstanding unit of work on a [`CountdownLatch`]
#[derive(Debug)]
#[must_use = "dropping the ticket immediately counts the latch down"]
pub struct LatchTicket {
    latch: CountdownLatch,
}

impl Drop for LatchTicket {
    fn drop(&mut self) {
        self.latch.count_down();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_wait_on_zero_returns_immediately() {
        let latch = CountdownLatch::new();
        latch.wait();
        assert_eq!(latch.count(), 0);
    }

    #[test]
    fn test_tickets_track_count() {
        let latch = CountdownLatch::new();
        let first = latch.ticket();
        let second = latch.ticket();
        assert_eq!(latch.count(), 2);

        drop(first);
        assert_eq!(latch.count(), 1);
        drop(second);
        assert_eq!(latch.count(), 0);
    }

    #[test]
    fn test_wait_blocks_until_all_workers_finish() {
        let latch = CountdownLatch::new();
        let finished = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ticket = latch.ticket();
                let finished = Arc::clone(&finished);
                thread::spawn(move || {
                    let _ticket = ticket;
                    thread::sleep(Duration::from_millis(5 * i));
                    finished.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        latch.wait();
        assert_eq!(finished.load(Ordering::SeqCst), 8);

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_ticket_released_on_panic() {
        let latch = CountdownLatch::new();
        let ticket = latch.ticket();

        let handle = thread::spawn(move || {
            let _ticket = ticket;
            panic!("worker failed");
        });

        latch.wait();
        assert!(handle.join().is_err());
        assert_eq!(latch.count(), 0);
    }
}
