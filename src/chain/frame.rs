//! The error chain frame and its construction protocol.
//!
//! A [`Frame`] is one link in an error chain. Frames are immutable after
//! construction: new context is added by wrapping an existing error in a new
//! frame, never by editing one in place. Construction goes through
//! [`Frame::new`], which accepts an unordered sequence of [`Attr`] values:
//! the attribute tag, not its position, decides which field it sets.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;

use serde::{Deserialize, Serialize};

/// Logical operation identifier, naming the function or method that raised
/// the frame (e.g. `"store.find"`). Non-empty by convention, not enforced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Op(String);

impl Op {
    pub fn new(op: impl Into<String>) -> Self {
        Self(op.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human-readable message text. May be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(String);

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque, application-defined category code used for programmatic branching
/// (e.g. mapping to an HTTP status). The empty string is the unset value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kind(Cow<'static, str>);

impl Kind {
    /// The zero value: no category assigned.
    pub const UNSET: Kind = Kind(Cow::Borrowed(""));

    pub fn new(code: impl Into<Cow<'static, str>>) -> Self {
        Self(code.into())
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unordered diagnostic key/value payload. Only meaningful at the frame where
/// it was set; chain-level resolution picks the innermost frame's fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, serde_json::Value>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// How the chain as a whole should be logged. Set once, typically at the
/// outermost frame; defaults to `Info` when never supplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Debug,
    #[default]
    Info,
    Error,
}

/// The wrapped error below a frame.
///
/// Chain traversal follows `Frame` links and bottoms out at `None` or at a
/// `Foreign` error the chain does not model. Ownership is exclusive, so a
/// well-formed chain cannot contain cycles.
#[derive(Debug, Default)]
pub enum Cause {
    #[default]
    None,
    Frame(Box<Frame>),
    Foreign(Box<dyn StdError + Send + Sync + 'static>),
}

impl Cause {
    /// The next frame in the chain, if the cause is one.
    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            Cause::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cause::None)
    }
}

/// One construction argument for [`Frame::new`].
///
/// Attributes form a closed set, so an argument of an unrecognized kind is a
/// compile error rather than a construction-time fault. When the same
/// attribute kind appears more than once the last occurrence wins.
#[derive(Debug)]
pub enum Attr {
    Op(Op),
    Message(Message),
    Kind(Kind),
    Fields(Fields),
    Severity(Severity),
    Cause(Cause),
}

impl Attr {
    pub fn op(op: impl Into<String>) -> Self {
        Attr::Op(Op::new(op))
    }

    pub fn message(text: impl Into<String>) -> Self {
        Attr::Message(Message::new(text))
    }

    pub fn kind(code: impl Into<Cow<'static, str>>) -> Self {
        Attr::Kind(Kind::new(code))
    }

    pub fn fields(fields: Fields) -> Self {
        Attr::Fields(fields)
    }

    pub fn severity(severity: Severity) -> Self {
        Attr::Severity(severity)
    }

    /// Wraps an existing error as the new frame's cause. Another [`Frame`]
    /// keeps the chain linked; any other error type becomes the terminal
    /// link that traversal stops at.
    pub fn cause<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let boxed: Box<dyn StdError + Send + Sync + 'static> = Box::new(err);
        match boxed.downcast::<Frame>() {
            Ok(frame) => Attr::Cause(Cause::Frame(frame)),
            Err(foreign) => Attr::Cause(Cause::Foreign(foreign)),
        }
    }
}

impl From<Op> for Attr {
    fn from(op: Op) -> Self {
        Attr::Op(op)
    }
}

impl From<Message> for Attr {
    fn from(message: Message) -> Self {
        Attr::Message(message)
    }
}

impl From<Kind> for Attr {
    fn from(kind: Kind) -> Self {
        Attr::Kind(kind)
    }
}

impl From<Fields> for Attr {
    fn from(fields: Fields) -> Self {
        Attr::Fields(fields)
    }
}

impl From<Severity> for Attr {
    fn from(severity: Severity) -> Self {
        Attr::Severity(severity)
    }
}

impl From<Frame> for Attr {
    fn from(frame: Frame) -> Self {
        Attr::Cause(Cause::Frame(Box::new(frame)))
    }
}

/// One link in an error chain.
///
/// Carries an operation identifier, a category [`Kind`], a message, optional
/// diagnostic [`Fields`], a chain [`Severity`], the wrapped [`Cause`], and the
/// `file:line` of the call site that built it. All fields are fixed at
/// construction.
#[derive(Debug)]
pub struct Frame {
    kind: Kind,
    message: Message,
    op: Op,
    cause: Cause,
    extra_fields: Fields,
    severity: Severity,
    caller: String,
}

impl Frame {
    /// Builds one chain frame from an unordered attribute sequence.
    ///
    /// Unsupplied attributes take their zero values, except `severity`,
    /// which defaults to [`Severity::Info`]. The call site is captured
    /// unconditionally: `#[track_caller]` makes the recorded location the
    /// caller's, not this function's.
    #[track_caller]
    #[must_use]
    pub fn new(attrs: impl IntoIterator<Item = Attr>) -> Self {
        let location = Location::caller();
        let mut frame = Frame {
            kind: Kind::UNSET,
            message: Message::default(),
            op: Op::default(),
            cause: Cause::None,
            extra_fields: Fields::default(),
            severity: Severity::Info,
            caller: format!("{}:{}", location.file(), location.line()),
        };

        for attr in attrs {
            match attr {
                Attr::Op(op) => frame.op = op,
                Attr::Message(message) => frame.message = message,
                Attr::Kind(kind) => frame.kind = kind,
                Attr::Fields(fields) => frame.extra_fields = fields,
                Attr::Severity(severity) => frame.severity = severity,
                Attr::Cause(cause) => frame.cause = cause,
            }
        }

        frame
    }

    /// This frame's own category code; [`Kind::UNSET`] when none was given.
    /// Chain-level resolution lives in [`resolve::kind`](crate::resolve::kind).
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn op(&self) -> &Op {
        &self.op
    }

    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// This frame's own diagnostic fields, not the chain-resolved set.
    pub fn extra_fields(&self) -> &Fields {
        &self.extra_fields
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// `file:line` of the call site that constructed this frame.
    pub fn caller(&self) -> &str {
        &self.caller
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl StdError for Frame {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.cause {
            Cause::None => None,
            Cause::Frame(frame) => Some(frame.as_ref()),
            Cause::Foreign(err) => Some(err.as_ref()),
        }
    }
}
