//! Process termination strategy used by fatal log calls

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};

/// Exit status used by [`ProcessExit`].
pub const FATAL_EXIT_CODE: i32 = 1;

/// Invoked once a fatal record has reached every provider.
///
/// Production code exits the process; tests inject an implementation that
/// records the call and returns.
pub trait Terminator: Send + Sync {
    fn terminate(&self, message: &str);
}

/// Flushes stdio, reports the fatal message on stderr and exits the process.
///
/// The exit happens even when stderr or stdout cannot be written.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, message: &str) {
        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            let _ = std::io::stdout().flush();
            report(&mut std::io::stderr(), "FATAL", message);
        }));
        std::process::exit(FATAL_EXIT_CODE);
    }
}

impl<F> Terminator for F
where
    F: Fn(&str) + Send + Sync,
{
    fn terminate(&self, message: &str) {
        self(message)
    }
}

/// Write a `[LOGGER <tag>] <message>` line, ignoring write errors
pub(crate) fn report<W: Write + ?Sized>(out: &mut W, tag: &str, message: &str) {
    let _ = writeln!(out, "[LOGGER {}] {}", tag, message);
    let _ = out.flush();
}

/// [`report`] on stderr
pub(crate) fn report_stderr(tag: &str, message: &str) {
    report(&mut std::io::stderr(), tag, message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader gone"))
        }
    }

    #[test]
    fn test_report_format() {
        let mut out = Vec::new();
        report(&mut out, "FATAL", "disk full");
        assert_eq!(String::from_utf8(out).unwrap(), "[LOGGER FATAL] disk full\n");
    }

    #[test]
    fn test_report_ignores_failing_writer() {
        let outcome = panic::catch_unwind(|| report(&mut BrokenPipe, "FATAL", "boom"));
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_closure_terminator() {
        let seen = parking_lot::Mutex::new(Vec::new());
        let terminator = |message: &str| seen.lock().push(message.to_string());
        terminator.terminate("bye");
        assert_eq!(*seen.lock(), vec!["bye".to_string()]);
    }
}
