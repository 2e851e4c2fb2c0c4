//! Structured error chaining with operation trails and structured log
//! dispatch.
//!
//! Errors are immutable [`Frame`]s linked through their cause into a
//! singly-linked chain. Each frame carries the logical operation that raised
//! it, an application-defined category [`Kind`], a human message, optional
//! diagnostic [`Fields`], a chain [`Severity`], and the `file:line` where it
//! was built. Context is added by wrapping, never by mutation.
//!
//! [`resolve`] offers the read-only accessors over a chain (operation stack,
//! category, fields, caller trail); [`log`] emits a resolved chain to the
//! process-wide structured sink configured via [`init`]; [`report`] is the
//! seam for forwarding records to an external error-reporting backend.
//!
//! ```
//! use errtrail::{Attr, Fields, Frame};
//!
//! let inner = Frame::new([
//!     Attr::op("store.find"),
//!     Attr::kind("not_found"),
//!     Attr::message("no such record"),
//!     Attr::fields(Fields::new().with("record_id", 42)),
//! ]);
//! let outer = Frame::new([Attr::op("handler.get"), Attr::cause(inner)]);
//!
//! assert_eq!(errtrail::resolve::kind(&outer).as_str(), "not_found");
//! assert_eq!(errtrail::resolve::ops(&outer).len(), 2);
//! ```

pub mod chain;
pub mod dispatch;
pub mod report;
pub mod sink;

pub use chain::resolve;
pub use chain::{Attr, Cause, Fields, Frame, Kind, Message, Op, Severity};
pub use dispatch::{log, log_new};
pub use report::{set_reporter, LogSeverity, Reporter, ReportSeverity};
pub use sink::{init, Verbosity};
