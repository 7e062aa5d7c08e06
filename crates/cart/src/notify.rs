//! User-facing notices.
//!
//! Cart handlers report outcomes as short toast-style notices through a
//! [`Notifier`]. Notices are fire-and-forget; nothing is returned.

use std::sync::{Arc, Mutex};

use serde::Serialize;

/// Receives success, error and informational notices.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// A recorded notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl NoticeLevel {
    /// Wire name of the level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// Notifier that writes notices to the tracing log.
///
/// Error notices are logged at `WARN`, everything else at `INFO`. The notice
/// level is attached as the `notice` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Log level used for notices of `level`.
    #[must_use]
    pub const fn log_level(level: NoticeLevel) -> tracing::Level {
        match level {
            NoticeLevel::Error => tracing::Level::WARN,
            NoticeLevel::Success | NoticeLevel::Info => tracing::Level::INFO,
        }
    }

    fn emit(level: NoticeLevel, message: &str) {
        let notice = level.as_str();
        if Self::log_level(level) == tracing::Level::WARN {
            tracing::warn!(notice, "{message}");
        } else {
            tracing::info!(notice, "{message}");
        }
    }
}

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        Self::emit(NoticeLevel::Success, message);
    }

    fn error(&self, message: &str) {
        Self::emit(NoticeLevel::Error, message);
    }

    fn info(&self, message: &str) {
        Self::emit(NoticeLevel::Info, message);
    }
}

/// Notifier that keeps every notice in memory, in emission order.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl NoticeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: NoticeLevel, message: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(Notice {
                level,
                message: message.to_owned(),
            });
        }
    }

    /// Every notice recorded so far.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }

    /// The most recent notice.
    #[must_use]
    pub fn last(&self) -> Option<Notice> {
        self.notices
            .lock()
            .ok()
            .and_then(|notices| notices.last().cloned())
    }

    /// Remove and return every notice recorded so far.
    #[must_use]
    pub fn take(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|mut notices| std::mem::take(&mut *notices))
            .unwrap_or_default()
    }
}

impl Notifier for NoticeLog {
    fn success(&self, message: &str) {
        self.push(NoticeLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(NoticeLevel::Error, message);
    }

    fn info(&self, message: &str) {
        self.push(NoticeLevel::Info, message);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;

    use super::*;

    /// Writer that appends formatted log lines to a shared buffer.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tracing_notifier_levels() {
        assert_eq!(
            TracingNotifier::log_level(NoticeLevel::Error),
            tracing::Level::WARN
        );
        assert_eq!(
            TracingNotifier::log_level(NoticeLevel::Success),
            tracing::Level::INFO
        );
        assert_eq!(
            TracingNotifier::log_level(NoticeLevel::Info),
            tracing::Level::INFO
        );
    }

    #[test]
    fn test_tracing_notifier_writes_notices() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingNotifier.error("only 2 in stock");
            TracingNotifier.success("Order placed successfully");
        });

        let lines: Vec<String> = log.contents().lines().map(str::to_owned).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("WARN"));
        assert!(lines[0].contains("notice=\"error\""));
        assert!(lines[0].contains("only 2 in stock"));
        assert!(lines[1].contains("INFO"));
        assert!(lines[1].contains("notice=\"success\""));
    }

    #[test]
    fn test_notice_log_records_in_order() {
        let log = NoticeLog::new();
        log.info("first");
        log.error("second");
        log.success("third");

        let levels: Vec<_> = log.notices().iter().map(|n| n.level).collect();
        assert_eq!(
            levels,
            [NoticeLevel::Info, NoticeLevel::Error, NoticeLevel::Success]
        );
        assert_eq!(log.last().unwrap().message, "third");
    }

    #[test]
    fn test_take_drains_log() {
        let log = NoticeLog::new();
        let shared = log.clone();
        shared.success("saved");

        assert_eq!(log.take().len(), 1);
        assert!(log.notices().is_empty());
    }
}
