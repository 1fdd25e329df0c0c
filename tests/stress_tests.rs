//! Stress tests for concurrent dispatch
//!
//! These tests verify:
//! - Concurrent writers never lose records
//! - Lines written by a shared file provider never interleave
//! - A slow provider does not block concurrent readers of the provider list

use fanout_logger::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

const THREADS: usize = 8;
const MESSAGES_PER_THREAD: usize = 250;

struct CountingProvider {
    count: Arc<AtomicUsize>,
    delay: Duration,
}

impl Provider for CountingProvider {
    fn write(
        &self,
        _ctx: Option<&LogContext>,
        _level: LogLevel,
        _message: &str,
        _fields: &Fields,
    ) -> Result<()> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn should_log(&self, _ctx: Option<&LogContext>, _level: LogLevel) -> bool {
        true
    }

    fn close(&self, _ctx: Option<&LogContext>) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

#[test]
fn test_concurrent_writers_lose_nothing() {
    let count = Arc::new(AtomicUsize::new(0));
    let logger = Arc::new(
        Logger::builder()
            .provider(CountingProvider {
                count: Arc::clone(&count),
                delay: Duration::ZERO,
            })
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                let ctx = LogContext::new().with_trace_id(format!("thread-{}", thread_id));
                for i in 0..MESSAGES_PER_THREAD {
                    logger.info_with_fields(
                        Some(&ctx),
                        &Fields::new().with("i", i),
                        format!("Thread {} - Message {}", thread_id, i),
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let expected = THREADS * MESSAGES_PER_THREAD;
    assert_eq!(count.load(Ordering::Relaxed), expected);
    assert_eq!(logger.metrics().records_dispatched(), expected as u64);
    assert_eq!(logger.metrics().write_failures(), 0);
}

#[test]
fn test_shared_file_provider_lines_intact() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("concurrent.log");

    let logger = Arc::new(
        Logger::builder()
            .provider(
                FileProvider::new(&log_file, ProviderConfig::new(LogLevel::Debug))
                    .expect("Failed to create provider"),
            )
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..MESSAGES_PER_THREAD {
                    logger.warning(None, format!("t{}-m{}", thread_id, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    drop(logger);

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let messages: HashSet<&str> = content
        .lines()
        .map(|line| {
            assert!(line.contains("] warning \"t"), "malformed line: {}", line);
            line.split('"').nth(1).expect("quoted message")
        })
        .collect();
    assert_eq!(messages.len(), THREADS * MESSAGES_PER_THREAD);
}

#[test]
fn test_slow_provider_does_not_serialize_callers() {
    let count = Arc::new(AtomicUsize::new(0));
    let delay = Duration::from_millis(100);
    let logger = Arc::new(
        Logger::builder()
            .provider(CountingProvider {
                count: Arc::clone(&count),
                delay,
            })
            .build(),
    );
    let barrier = Arc::new(Barrier::new(THREADS));

    let start = Instant::now();
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = Arc::clone(&logger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                logger.error(None, "slow");
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(count.load(Ordering::Relaxed), THREADS);
    // Serialized dispatch would need THREADS * delay
    assert!(
        start.elapsed() < delay * (THREADS as u32 / 2),
        "dispatch took {:?}",
        start.elapsed()
    );
}
