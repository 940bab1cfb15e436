// SPDX-License-Identifier: Apache-2.0

//! Event callbacks for the push parser.

use crate::Number;

/// Discriminator for the items reported through [`ParseHandler`].
///
/// Text values have no variant here; they are implicit in the dedicated
/// [`ParseHandler::on_text`] callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// A numeric value.
    Number,
    /// `true` or `false`.
    Bool,
    /// `null`.
    Null,
    /// `{` opening an object.
    ObjectBegin,
    /// `}` closing an object.
    ObjectEnd,
    /// `[` opening an array.
    ArrayBegin,
    /// `]` closing an array.
    ArrayEnd,
}

/// Receiver for the events of one parse.
///
/// All three methods default to doing nothing and returning `true`, so a
/// handler only implements the event classes it cares about; the rest of
/// the document is still validated. Returning `false` from any method stops
/// the parse immediately and surfaces as a cancellation error at the
/// current scan offset.
///
/// `key` and `value` spans borrow from the input buffer and are only valid
/// for the duration of the call; copy them out if they need to live longer.
/// They are raw bytes: escape sequences are left intact (see the unescape
/// helpers) and no UTF-8 validation has been performed. `key` is present
/// only for direct members of an object — array elements and the root
/// container report `None`.
///
/// Per-parse state lives in the handler itself, so one handler type can
/// serve any number of concurrent parses by giving each call its own
/// instance.
pub trait ParseHandler {
    /// Called for every string value, with the enclosing member key if any.
    fn on_text(&mut self, key: Option<&[u8]>, value: &[u8], depth: usize, index: usize) -> bool {
        let _ = (key, value, depth, index);
        true
    }

    /// Called for every number, boolean, or null. `kind` is one of
    /// [`ItemKind::Number`], [`ItemKind::Bool`], [`ItemKind::Null`].
    fn on_scalar(
        &mut self,
        kind: ItemKind,
        key: Option<&[u8]>,
        value: Number,
        depth: usize,
        index: usize,
    ) -> bool {
        let _ = (kind, key, value, depth, index);
        true
    }

    /// Called when a container opens or closes. Begin and end of the same
    /// container report the same key, depth, and index: those of the
    /// container itself as an item of its parent. The root container
    /// reports depth 0 and index 0, and its children start at depth 1.
    fn on_structural(
        &mut self,
        kind: ItemKind,
        key: Option<&[u8]>,
        depth: usize,
        index: usize,
    ) -> bool {
        let _ = (kind, key, depth, index);
        true
    }
}
