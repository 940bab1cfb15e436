// SPDX-License-Identifier: Apache-2.0

//! Zero-copy, SAX-style JSON parsing.
//!
//! One recursive scan over a byte buffer classifies every item and reports
//! it through [`ParseHandler`] callbacks: text spans borrow from the input
//! with escapes intact, numbers land in the narrowest exact-width
//! [`Number`] variant, and container begin/end events carry nesting depth
//! and sibling index. Nothing is allocated and no tree is built; a callback
//! returning `false` stops the scan at its current offset.
//!
//! ```
//! use saxjson::{parse_json, ItemKind, Number, ParseHandler};
//!
//! struct CountNumbers(usize);
//!
//! impl ParseHandler for CountNumbers {
//!     fn on_scalar(
//!         &mut self,
//!         kind: ItemKind,
//!         _key: Option<&[u8]>,
//!         _value: Number,
//!         _depth: usize,
//!         _index: usize,
//!     ) -> bool {
//!         if kind == ItemKind::Number {
//!             self.0 += 1;
//!         }
//!         true
//!     }
//! }
//!
//! let mut counter = CountNumbers(0);
//! let consumed = parse_json(br#"{"a":1,"b":[2,3]}"#, &mut counter).unwrap();
//! assert_eq!(counter.0, 3);
//! assert_eq!(consumed, 17);
//! ```

#![cfg_attr(not(test), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod escape_processor;
mod handler;
mod number;
mod parse_error;
mod push_parser;

#[cfg(feature = "alloc")]
pub use escape_processor::unescape;
pub use escape_processor::unescape_into;
pub use handler::{ItemKind, ParseHandler};
pub use number::Number;
pub use parse_error::{ErrorKind, ParseError};
pub use push_parser::{parse_json, parse_json_with_depth_limit};
