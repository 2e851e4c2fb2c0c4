//! Error chain data model and traversal.

pub mod frame;
pub mod resolve;

pub use frame::{Attr, Cause, Fields, Frame, Kind, Message, Op, Severity};
