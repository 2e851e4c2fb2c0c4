//! Seam to an external error-reporting backend.
//!
//! The backend itself (client construction, transport, credentials) is an
//! external collaborator; this module only defines the interface it plugs
//! into and the fixed mapping from log severities onto its coarser enum.

use once_cell::sync::OnceCell;

use crate::chain::Severity;

/// The full level set of the structured-logging backend, as seen by the
/// reporting bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogSeverity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl LogSeverity {
    /// Every level, for exhaustive iteration.
    pub const ALL: [LogSeverity; 7] = [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
        LogSeverity::Fatal,
        LogSeverity::Panic,
    ];
}

/// Severity enum of the external reporting backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportSeverity {
    Default,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl From<LogSeverity> for ReportSeverity {
    /// Total mapping with no fallthrough gap. `Fatal` and `Panic` both
    /// collapse to `Critical`: the external system has no finer granularity
    /// at that end, and the collapse is deliberate.
    fn from(level: LogSeverity) -> Self {
        match level {
            LogSeverity::Trace => ReportSeverity::Default,
            LogSeverity::Debug => ReportSeverity::Debug,
            LogSeverity::Info => ReportSeverity::Info,
            LogSeverity::Warn => ReportSeverity::Warning,
            LogSeverity::Error => ReportSeverity::Error,
            LogSeverity::Fatal | LogSeverity::Panic => ReportSeverity::Critical,
        }
    }
}

impl From<Severity> for LogSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug => LogSeverity::Debug,
            Severity::Info => LogSeverity::Info,
            Severity::Error => LogSeverity::Error,
        }
    }
}

/// Receives severity-tagged messages for an external incident tracker.
pub trait Reporter: Send + Sync {
    fn report(&self, severity: ReportSeverity, message: &str);
}

static REPORTER: OnceCell<Box<dyn Reporter>> = OnceCell::new();

/// Installs the process-wide reporter. Only the first call takes effect;
/// install once at startup, before concurrent logging begins.
pub fn set_reporter(reporter: Box<dyn Reporter>) {
    let _ = REPORTER.set(reporter);
}

/// Forwards one record to the reporter, when one is installed.
pub(crate) fn forward(level: LogSeverity, message: &str) {
    if let Some(reporter) = REPORTER.get() {
        reporter.report(level.into(), message);
    }
}
