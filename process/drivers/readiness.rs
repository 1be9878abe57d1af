//! Polling wait for a container to report readiness through its
//! log output.
//!
//! The clock and the log source are injected so the loop can be
//! driven deterministically in tests.

use std::time::{Duration, Instant};

use log::trace;
use miette::Diagnostic;
use thiserror::Error;

/// How long to wait for the readiness marker before giving up.
pub const READY_TIMEOUT: Duration = Duration::from_secs(60);

/// Fixed delay between log polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Error, Diagnostic)]
pub enum ReadyError {
    #[error("Timed out waiting for container {0} to become ready")]
    Timeout(String),

    #[error("Could not get logs for container {0}: {1}")]
    Logs(String, miette::Report),
}

/// A source of wall-clock time.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl Clock for WallClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A source of container log output.
pub trait LogSource {
    /// Fetches the current logs of the named container.
    ///
    /// # Errors
    /// Will error if the logs can't be read.
    fn logs(&self, name: &str) -> miette::Result<String>;
}

/// Polls the logs of the named container once per second until
/// the marker appears or the timeout elapses. A failed log read
/// aborts the wait immediately.
///
/// # Errors
/// Will error if the logs can't be read or the marker doesn't
/// appear within the timeout.
pub fn await_container<C, L>(clock: &C, logs: &L, name: &str, marker: &str) -> Result<(), ReadyError>
where
    C: Clock,
    L: LogSource,
{
    trace!("await_container({name}, {marker})");

    let deadline = clock.now() + READY_TIMEOUT;

    loop {
        if clock.now() >= deadline {
            return Err(ReadyError::Timeout(name.into()));
        }

        let output = logs
            .logs(name)
            .map_err(|e| ReadyError::Logs(name.into(), e))?;

        if output.contains(marker) {
            return Ok(());
        }

        trace!("{output}");
        clock.sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod test {
    use std::{
        cell::Cell,
        time::{Duration, Instant},
    };

    use miette::miette;
    use rstest::rstest;

    use super::{await_container, Clock, LogSource, ReadyError};

    const MARKER: &str = "Web Server is available";

    struct FakeClock {
        start: Instant,
        elapsed: Cell<Duration>,
    }

    impl FakeClock {
        fn new() -> Self {
            Self {
                start: Instant::now(),
                elapsed: Cell::new(Duration::ZERO),
            }
        }

        fn seconds(&self) -> u64 {
            self.elapsed.get().as_secs()
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            self.start + self.elapsed.get()
        }

        fn sleep(&self, duration: Duration) {
            self.elapsed.set(self.elapsed.get() + duration);
        }
    }

    struct ScriptedLogs {
        calls: Cell<u64>,
        ready_after: Option<u64>,
    }

    impl ScriptedLogs {
        fn new(ready_after: Option<u64>) -> Self {
            Self {
                calls: Cell::new(0),
                ready_after,
            }
        }
    }

    impl LogSource for ScriptedLogs {
        fn logs(&self, _name: &str) -> miette::Result<String> {
            let call = self.calls.get();
            self.calls.set(call + 1);

            Ok(match self.ready_after {
                Some(ready_after) if call >= ready_after => {
                    format!("Start building sites...\n{MARKER} at http://localhost:1313/")
                }
                _ => String::from("Start building sites..."),
            })
        }
    }

    struct FailingLogs;

    impl LogSource for FailingLogs {
        fn logs(&self, name: &str) -> miette::Result<String> {
            Err(miette!("no such container: {name}"))
        }
    }

    #[rstest]
    #[case(0, 0)]
    #[case(3, 3)]
    fn ready_when_marker_appears(#[case] ready_after: u64, #[case] expected_seconds: u64) {
        let clock = FakeClock::new();
        let logs = ScriptedLogs::new(Some(ready_after));

        let result = await_container(&clock, &logs, "site", MARKER);

        assert!(result.is_ok());
        assert_eq!(clock.seconds(), expected_seconds);
    }

    #[test]
    fn times_out_when_marker_never_appears() {
        let clock = FakeClock::new();
        let logs = ScriptedLogs::new(None);

        let result = await_container(&clock, &logs, "site", MARKER);

        assert!(matches!(result, Err(ReadyError::Timeout(name)) if name == "site"));
        assert_eq!(clock.seconds(), 60);
    }

    #[test]
    fn aborts_on_log_failure() {
        let clock = FakeClock::new();

        let result = await_container(&clock, &FailingLogs, "site", MARKER);

        assert!(matches!(result, Err(ReadyError::Logs(..))));
        assert_eq!(clock.seconds(), 0);
    }
}
