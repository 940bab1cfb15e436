// SPDX-License-Identifier: Apache-2.0

//! A SAX-style JSON push parser.
//!
//! One recursive scan over a byte buffer, reporting every item through
//! [`ParseHandler`] callbacks as it is discovered. Key and value spans
//! borrow from the input; the engine itself never copies or allocates.
//! Objects and arrays share a single state machine that walks the
//! key/value/separator grammar, recursing on nested containers, so the
//! call stack mirrors the document's nesting.

use log::trace;

use crate::handler::{ItemKind, ParseHandler};
use crate::number::Number;
use crate::parse_error::{ErrorKind, ParseError};

const NULL_LITERAL: &[u8] = b"null";
const TRUE_LITERAL: &[u8] = b"true";
const FALSE_LITERAL: &[u8] = b"false";

/// Position within the key/value/separator grammar of the container
/// currently being scanned.
///
/// Objects enter at `KeyStart` and walk every step; arrays enter at
/// `ValueStart` and never visit the key steps. One enum serves both, which
/// keeps the two grammars in a single scanning loop.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    /// Awaiting the opening quote of a member key (objects only).
    KeyStart,
    /// Inside key text.
    InKey,
    /// Key closed, awaiting `:` (objects only).
    KeyDone,
    /// Awaiting the first byte of a value.
    ValueStart,
    /// Inside a text value.
    InValue,
    /// Value closed, awaiting `,` or the container closer.
    ValueEnd,
}

/// Parses one JSON document whose root is an object or array.
///
/// Leading whitespace is skipped. On success the returned offset is one
/// past the last consumed byte — the matching root closer; bytes after it
/// are not inspected. On failure the error carries the offset of the
/// offending byte. The input need not be NUL-terminated, but a NUL byte
/// acts as an early end of input.
///
/// Recursion depth equals document nesting depth; for untrusted input see
/// [`parse_json_with_depth_limit`].
pub fn parse_json<H: ParseHandler>(input: &[u8], handler: &mut H) -> Result<usize, ParseError> {
    Engine {
        input,
        handler,
        max_depth: usize::MAX,
    }
    .parse_document()
}

/// Like [`parse_json`], but fails with [`ErrorKind::DepthLimitExceeded`]
/// when more than `max_depth` containers would be open at once. The root
/// container counts as one.
pub fn parse_json_with_depth_limit<H: ParseHandler>(
    input: &[u8],
    handler: &mut H,
    max_depth: usize,
) -> Result<usize, ParseError> {
    Engine {
        input,
        handler,
        max_depth,
    }
    .parse_document()
}

fn is_scalar_start(c: u8) -> bool {
    matches!(c, b'n' | b't' | b'f' | b'+' | b'-' | b'.') || c.is_ascii_digit()
}

fn key_span(input: &[u8], is_object: bool, start: usize, len: usize) -> Option<&[u8]> {
    is_object.then(|| &input[start..start + len])
}

struct Engine<'a, 'h, H> {
    input: &'a [u8],
    handler: &'h mut H,
    max_depth: usize,
}

impl<'a, H: ParseHandler> Engine<'a, '_, H> {
    fn parse_document(&mut self) -> Result<usize, ParseError> {
        let input = self.input;
        let mut pos = 0;
        while pos < input.len() && input[pos] <= b' ' {
            pos += 1;
        }
        let Some(&opener) = input.get(pos) else {
            return Err(ParseError::new(ErrorKind::UnexpectedEnd, pos));
        };
        let is_object = match opener {
            b'{' => true,
            b'[' => false,
            _ => return Err(ParseError::new(ErrorKind::UnexpectedCharacter, pos)),
        };
        if self.max_depth == 0 {
            return Err(ParseError::new(ErrorKind::DepthLimitExceeded, pos));
        }
        trace!(
            "document root {} at offset {pos}",
            if is_object { "object" } else { "array" }
        );

        let (begin, end) = if is_object {
            (ItemKind::ObjectBegin, ItemKind::ObjectEnd)
        } else {
            (ItemKind::ArrayBegin, ItemKind::ArrayEnd)
        };
        if !self.handler.on_structural(begin, None, 0, 0) {
            return Err(ParseError::new(ErrorKind::Cancelled, pos + 1));
        }
        let consumed = self.parse_container(pos + 1, is_object, 1)?;
        if !self.handler.on_structural(end, None, 0, 0) {
            return Err(ParseError::new(ErrorKind::Cancelled, pos + 1));
        }
        Ok(consumed)
    }

    /// Scans one container whose opener has already been consumed.
    ///
    /// `start` is the offset just past the opener; `depth` is the depth of
    /// this container's children. Returns the offset just past the
    /// matching closer.
    fn parse_container(
        &mut self,
        start: usize,
        is_object: bool,
        depth: usize,
    ) -> Result<usize, ParseError> {
        let input = self.input;
        let entry = if is_object {
            Step::KeyStart
        } else {
            Step::ValueStart
        };
        let mut step = entry;
        let mut index = 0usize;

        let mut key_start = 0usize;
        let mut key_len = 0usize;
        let mut value_start = 0usize;
        let mut value_len = 0usize;
        let mut escaped = false;

        let mut pos = start;
        while pos < input.len() {
            let c = input[pos];
            if c == 0 {
                // early end-of-input marker
                break;
            }

            // One character of lookback: a quote preceded by an unconsumed
            // backslash is text content, not a delimiter.
            let is_quote = !escaped && c == b'"';
            if escaped {
                escaped = false;
            } else if c == b'\\' {
                escaped = true;
            }

            if is_quote {
                match step {
                    Step::KeyStart => {
                        key_start = pos + 1;
                        key_len = 0;
                        step = Step::InKey;
                    }
                    Step::InKey => step = Step::KeyDone,
                    Step::ValueStart => {
                        value_start = pos + 1;
                        value_len = 0;
                        step = Step::InValue;
                    }
                    Step::InValue => {
                        let key = key_span(input, is_object, key_start, key_len);
                        let value = &input[value_start..value_start + value_len];
                        if !self.handler.on_text(key, value, depth, index) {
                            return Err(ParseError::new(ErrorKind::Cancelled, pos));
                        }
                        step = Step::ValueEnd;
                    }
                    _ => return Err(ParseError::new(ErrorKind::UnexpectedQuote, pos)),
                }
            } else if step == Step::InKey {
                key_len += 1;
            } else if step == Step::InValue {
                value_len += 1;
            } else if step == Step::ValueStart && is_scalar_start(c) {
                let key = key_span(input, is_object, key_start, key_len);
                pos = self.parse_scalar(pos, key, depth, index)?;
                step = Step::ValueEnd;
                continue;
            } else {
                match c {
                    b':' if step == Step::KeyDone => step = Step::ValueStart,
                    b',' if step == Step::ValueEnd => {
                        step = entry;
                        index += 1;
                    }
                    b'{' | b'[' if step == Step::ValueStart => {
                        let key = key_span(input, is_object, key_start, key_len);
                        pos = self.parse_nested(pos, c == b'{', key, depth, index)?;
                        step = Step::ValueEnd;
                        continue;
                    }
                    // A closer is accepted after a complete value or in a
                    // still-empty container, and only for the matching
                    // container kind.
                    b'}' if is_object && (step == Step::ValueEnd || (step == entry && index == 0)) => {
                        return Ok(pos + 1);
                    }
                    b']' if !is_object
                        && (step == Step::ValueEnd || (step == entry && index == 0)) =>
                    {
                        return Ok(pos + 1);
                    }
                    b' ' | b'\t' | b'\r' | b'\n' => {}
                    _ => return Err(ParseError::new(ErrorKind::UnexpectedCharacter, pos)),
                }
            }
            pos += 1;
        }
        Err(ParseError::new(ErrorKind::UnexpectedEnd, pos))
    }

    /// Scans a number or keyword starting at `pos`; returns the offset just
    /// past it.
    fn parse_scalar(
        &mut self,
        pos: usize,
        key: Option<&'a [u8]>,
        depth: usize,
        index: usize,
    ) -> Result<usize, ParseError> {
        let input = self.input;
        let first = input[pos];
        if matches!(first, b'n' | b't' | b'f') {
            let (literal, kind, value) = match first {
                b'n' => (NULL_LITERAL, ItemKind::Null, Number::Null),
                b't' => (TRUE_LITERAL, ItemKind::Bool, Number::Bool(true)),
                _ => (FALSE_LITERAL, ItemKind::Bool, Number::Bool(false)),
            };
            let mut matched = 1;
            while matched < literal.len() {
                match input.get(pos + matched) {
                    Some(&b) if b == literal[matched] => matched += 1,
                    _ => break,
                }
            }
            // The full keyword must match, and a byte must remain after it
            // for the enclosing container's closer.
            if matched < literal.len()
                || pos + matched >= input.len()
                || input[pos + matched] == 0
            {
                return Err(ParseError::new(ErrorKind::InvalidLiteral, pos + matched));
            }
            if !self.handler.on_scalar(kind, key, value, depth, index) {
                return Err(ParseError::new(ErrorKind::Cancelled, pos));
            }
            Ok(pos + matched)
        } else {
            let (value, consumed) = Number::parse(&input[pos..])
                .map_err(|offset| ParseError::new(ErrorKind::InvalidNumber, pos + offset))?;
            let end = pos + consumed;
            // the literal must be followed by whitespace, `,` or a closer
            match input.get(end).copied() {
                Some(b' ' | b'\t' | b'\r' | b'\n' | b',' | b'}' | b']') => {}
                _ => return Err(ParseError::new(ErrorKind::InvalidNumber, end)),
            }
            if !self.handler.on_scalar(ItemKind::Number, key, value, depth, index) {
                return Err(ParseError::new(ErrorKind::Cancelled, pos));
            }
            Ok(end)
        }
    }

    /// Recurses into a container opening at `pos`, emitting the begin and
    /// end structural events around it; returns the offset just past its
    /// closer.
    fn parse_nested(
        &mut self,
        pos: usize,
        nested_is_object: bool,
        key: Option<&'a [u8]>,
        depth: usize,
        index: usize,
    ) -> Result<usize, ParseError> {
        if depth >= self.max_depth {
            return Err(ParseError::new(ErrorKind::DepthLimitExceeded, pos));
        }
        let (begin, end) = if nested_is_object {
            (ItemKind::ObjectBegin, ItemKind::ObjectEnd)
        } else {
            (ItemKind::ArrayBegin, ItemKind::ArrayEnd)
        };
        if !self.handler.on_structural(begin, key, depth, index) {
            return Err(ParseError::new(ErrorKind::Cancelled, pos));
        }
        trace!("container opens at offset {pos}, depth {depth}");
        let after = self.parse_container(pos + 1, nested_is_object, depth + 1)?;
        if !self.handler.on_structural(end, key, depth, index) {
            return Err(ParseError::new(ErrorKind::Cancelled, pos));
        }
        Ok(after)
    }
}
