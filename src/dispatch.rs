//! Maps resolved error chains onto the structured log sink.
//!
//! [`log`] is the single logging entry point. It emits exactly one sink
//! record per call (plus one reporter record when a reporter is installed)
//! and holds no state of its own.

use std::error::Error as StdError;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::chain::frame::Attr;
use crate::chain::{resolve, Frame, Severity};
use crate::report::{self, LogSeverity};
use crate::sink;

/// Logs any error-shaped value.
///
/// A [`Frame`] chain is resolved first: its operation stack, primary caller,
/// and innermost diagnostic fields travel as the `stackTrace`, `caller`, and
/// `extraFields` record keys, and the outermost message is emitted at the
/// level matching the outermost severity (Debug, Error, anything else Info).
/// A foreign error is forwarded as-is at the error level, with no chain
/// metadata.
pub fn log(err: &(dyn StdError + 'static)) {
    sink::ensure();

    let Some(frame) = err.downcast_ref::<Frame>() else {
        let text = err.to_string();
        error!("{}", text);
        report::forward(LogSeverity::Error, &text);
        return;
    };

    let stack = render(&resolve::ops(frame));
    let caller = resolve::caller(frame);
    let extra = render(&resolve::fields(frame));
    let message = frame.message().as_str();

    match frame.severity() {
        Severity::Debug => {
            debug!(stackTrace = %stack, caller = %caller, extraFields = %extra, "{}", message);
        }
        Severity::Error => {
            error!(stackTrace = %stack, caller = %caller, extraFields = %extra, "{}", message);
        }
        Severity::Info => {
            info!(stackTrace = %stack, caller = %caller, extraFields = %extra, "{}", message);
        }
    }

    report::forward(frame.severity().into(), message);
}

/// Builds a frame and logs it in one step, then hands it back for
/// propagation. The captured caller is the call site of `log_new` itself.
#[track_caller]
pub fn log_new(attrs: impl IntoIterator<Item = Attr>) -> Frame {
    let frame = Frame::new(attrs);
    log(&frame);
    frame
}

fn render<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("null"))
}
