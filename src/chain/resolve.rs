//! Read-only chain traversal.
//!
//! Each accessor walks the `cause` links from the frame it is given to the
//! chain's base case and never mutates anything. All of them are O(depth)
//! and total for any well-formed chain.
//!
//! Resolution direction is deliberately asymmetric: [`kind`] walks
//! outermost-first and returns the first category it finds, while [`fields`]
//! returns the innermost frame's payload. A category reflects the most
//! general classification an outer layer assigned; diagnostic fields reflect
//! the most specific data recorded at the point of origin.

use std::error::Error as StdError;

use super::frame::{Fields, Frame, Kind, Op};

/// The stack of operations for the chain, outermost first, one entry per
/// frame. A foreign terminal error contributes nothing.
pub fn ops(frame: &Frame) -> Vec<Op> {
    let mut stack = Vec::new();
    let mut current = Some(frame);
    while let Some(f) = current {
        stack.push(f.op().clone());
        current = f.cause().as_frame();
    }
    stack
}

/// The first non-unset [`Kind`] found walking outermost to innermost, or
/// [`Kind::UNSET`] when no frame in the chain assigned one.
pub fn kind(frame: &Frame) -> Kind {
    let mut current = Some(frame);
    while let Some(f) = current {
        if !f.kind().is_unset() {
            return f.kind().clone();
        }
        current = f.cause().as_frame();
    }
    Kind::UNSET
}

/// [`kind`] for any error-shaped value: a foreign error resolves to
/// [`Kind::UNSET`]. Useful where only a `dyn Error` is in hand, e.g. an HTTP
/// layer mapping categories to status codes.
pub fn kind_of(err: &(dyn StdError + 'static)) -> Kind {
    match err.downcast_ref::<Frame>() {
        Some(frame) => kind(frame),
        None => Kind::UNSET,
    }
}

/// The diagnostic fields of the *innermost* frame in the chain. Empty when
/// that frame set none. Innermost wins by design, see the module docs.
pub fn fields(frame: &Frame) -> Fields {
    let mut current = frame;
    while let Some(f) = current.cause().as_frame() {
        current = f;
    }
    current.extra_fields().clone()
}

/// The outermost frame's own construction call site.
pub fn caller(frame: &Frame) -> &str {
    frame.caller()
}

/// Construction call sites of every sub-frame, outermost first. The outermost
/// frame's own caller is excluded, so a depth-1 chain yields an empty trail.
pub fn callers(frame: &Frame) -> Vec<String> {
    let mut trail = Vec::new();
    let mut current = frame.cause().as_frame();
    while let Some(f) = current {
        trail.push(f.caller().to_string());
        current = f.cause().as_frame();
    }
    trail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::frame::Attr;

    fn depth_three() -> Frame {
        let inner = Frame::new([
            Attr::op("store.find"),
            Attr::kind("not_found"),
            Attr::fields(Fields::new().with("record_id", 42)),
        ]);
        let middle = Frame::new([Attr::op("svc.get"), Attr::cause(inner)]);
        Frame::new([Attr::op("handler.get"), Attr::cause(middle)])
    }

    #[test]
    fn test_ops_outermost_first() {
        let chain = depth_three();
        let stack: Vec<_> = ops(&chain).iter().map(|op| op.as_str().to_string()).collect();
        assert_eq!(stack, ["handler.get", "svc.get", "store.find"]);
    }

    #[test]
    fn test_ops_single_frame() {
        let frame = Frame::new([Attr::op("svc.get")]);
        assert_eq!(ops(&frame).len(), 1);
    }

    #[test]
    fn test_kind_found_at_any_depth() {
        let chain = depth_three();
        assert_eq!(kind(&chain).as_str(), "not_found");
    }

    #[test]
    fn test_outer_kind_wins_over_inner() {
        let inner = Frame::new([Attr::op("inner"), Attr::kind("not_found")]);
        let outer = Frame::new([Attr::op("outer"), Attr::kind("conflict"), Attr::cause(inner)]);
        assert_eq!(kind(&outer).as_str(), "conflict");
    }

    #[test]
    fn test_kind_unset_when_no_frame_sets_one() {
        let inner = Frame::new([Attr::op("inner")]);
        let outer = Frame::new([Attr::op("outer"), Attr::cause(inner)]);
        assert!(kind(&outer).is_unset());
    }

    #[test]
    fn test_kind_of_foreign_error_is_unset() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert!(kind_of(&io).is_unset());
    }

    #[test]
    fn test_fields_come_from_innermost_frame() {
        let inner = Frame::new([Attr::fields(Fields::new().with("record_id", 42))]);
        let outer = Frame::new([
            Attr::fields(Fields::new().with("request_id", "abc")),
            Attr::cause(inner),
        ]);
        let resolved = fields(&outer);
        assert_eq!(resolved.get("record_id"), Some(&serde_json::json!(42)));
        assert_eq!(resolved.get("request_id"), None);
    }

    #[test]
    fn test_fields_empty_when_none_set() {
        let chain = Frame::new([Attr::op("svc.get")]);
        assert!(fields(&chain).is_empty());
    }

    #[test]
    fn test_caller_trail_excludes_outermost() {
        let chain = depth_three();
        let trail = callers(&chain);
        assert_eq!(trail.len(), 2);
        assert!(!trail.contains(&caller(&chain).to_string()));
    }

    #[test]
    fn test_caller_trail_empty_for_depth_one() {
        let frame = Frame::new([Attr::op("svc.get")]);
        assert!(callers(&frame).is_empty());
    }

    #[test]
    fn test_traversal_stops_at_foreign_terminal() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let inner = Frame::new([Attr::op("store.read"), Attr::cause(io)]);
        let outer = Frame::new([Attr::op("svc.get"), Attr::cause(inner)]);
        assert_eq!(ops(&outer).len(), 2);
        assert_eq!(callers(&outer).len(), 1);
    }
}
