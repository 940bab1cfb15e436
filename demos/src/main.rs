// SPDX-License-Identifier: Apache-2.0

//! Prints the event stream of a JSON document.
//!
//! Reads the file named by the first argument, or stdin when none is
//! given, and dumps one line per event with indentation matching the
//! nesting depth. Set `RUST_LOG=trace` to watch the engine scan.

use std::io::Read;
use std::process::ExitCode;

use saxjson::{parse_json, ItemKind, Number, ParseHandler};

struct EventPrinter;

fn show_key(key: Option<&[u8]>) -> String {
    match key {
        Some(bytes) => format!("{:?}: ", String::from_utf8_lossy(bytes)),
        None => String::new(),
    }
}

impl ParseHandler for EventPrinter {
    fn on_text(&mut self, key: Option<&[u8]>, value: &[u8], depth: usize, index: usize) -> bool {
        println!(
            "{:indent$}{}{:?}  [depth {depth}, index {index}]",
            "",
            show_key(key),
            String::from_utf8_lossy(value),
            indent = depth * 2,
        );
        true
    }

    fn on_scalar(
        &mut self,
        _kind: ItemKind,
        key: Option<&[u8]>,
        value: Number,
        depth: usize,
        index: usize,
    ) -> bool {
        println!(
            "{:indent$}{}{value:?}  [depth {depth}, index {index}]",
            "",
            show_key(key),
            indent = depth * 2,
        );
        true
    }

    fn on_structural(
        &mut self,
        kind: ItemKind,
        key: Option<&[u8]>,
        depth: usize,
        index: usize,
    ) -> bool {
        let marker = match kind {
            ItemKind::ObjectBegin => "{",
            ItemKind::ObjectEnd => "}",
            ItemKind::ArrayBegin => "[",
            ItemKind::ArrayEnd => "]",
            _ => "?",
        };
        println!(
            "{:indent$}{}{marker}  [depth {depth}, index {index}]",
            "",
            show_key(key),
            indent = depth * 2,
        );
        true
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let mut data = Vec::new();
    match std::env::args().nth(1) {
        Some(path) => match std::fs::read(&path) {
            Ok(bytes) => data = bytes,
            Err(err) => {
                eprintln!("cannot read {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            if let Err(err) = std::io::stdin().read_to_end(&mut data) {
                eprintln!("cannot read stdin: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    log::debug!("parsing {} bytes", data.len());
    match parse_json(&data, &mut EventPrinter) {
        Ok(consumed) => {
            println!("parsed {consumed} of {} bytes", data.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("parse failed: {err}");
            ExitCode::FAILURE
        }
    }
}
