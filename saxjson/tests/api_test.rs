// SPDX-License-Identifier: Apache-2.0

//! Event-sequence tests for the push parser API.

use saxjson::{parse_json, ItemKind, Number, ParseHandler};
use test_log::test;

#[derive(Debug, Clone, PartialEq)]
enum Recorded {
    Text {
        key: Option<String>,
        value: String,
        depth: usize,
        index: usize,
    },
    Scalar {
        kind: ItemKind,
        key: Option<String>,
        value: Number,
        depth: usize,
        index: usize,
    },
    Structural {
        kind: ItemKind,
        key: Option<String>,
        depth: usize,
        index: usize,
    },
}

fn own(bytes: Option<&[u8]>) -> Option<String> {
    bytes.map(|b| String::from_utf8_lossy(b).into_owned())
}

#[derive(Default)]
struct Recorder {
    events: Vec<Recorded>,
}

impl ParseHandler for Recorder {
    fn on_text(&mut self, key: Option<&[u8]>, value: &[u8], depth: usize, index: usize) -> bool {
        self.events.push(Recorded::Text {
            key: own(key),
            value: String::from_utf8_lossy(value).into_owned(),
            depth,
            index,
        });
        true
    }

    fn on_scalar(
        &mut self,
        kind: ItemKind,
        key: Option<&[u8]>,
        value: Number,
        depth: usize,
        index: usize,
    ) -> bool {
        self.events.push(Recorded::Scalar {
            kind,
            key: own(key),
            value,
            depth,
            index,
        });
        true
    }

    fn on_structural(
        &mut self,
        kind: ItemKind,
        key: Option<&[u8]>,
        depth: usize,
        index: usize,
    ) -> bool {
        self.events.push(Recorded::Structural {
            kind,
            key: own(key),
            depth,
            index,
        });
        true
    }
}

fn text(key: Option<&str>, value: &str, depth: usize, index: usize) -> Recorded {
    Recorded::Text {
        key: key.map(str::to_owned),
        value: value.to_owned(),
        depth,
        index,
    }
}

fn scalar(kind: ItemKind, key: Option<&str>, value: Number, depth: usize, index: usize) -> Recorded {
    Recorded::Scalar {
        kind,
        key: key.map(str::to_owned),
        value,
        depth,
        index,
    }
}

fn structural(kind: ItemKind, key: Option<&str>, depth: usize, index: usize) -> Recorded {
    Recorded::Structural {
        kind,
        key: key.map(str::to_owned),
        depth,
        index,
    }
}

#[test]
fn object_event_sequence() {
    let doc = br#"{"name":"value","number":42,"flag":true}"#;
    let mut recorder = Recorder::default();
    assert_eq!(parse_json(doc, &mut recorder), Ok(doc.len()));
    assert_eq!(
        recorder.events,
        vec![
            structural(ItemKind::ObjectBegin, None, 0, 0),
            text(Some("name"), "value", 1, 0),
            scalar(ItemKind::Number, Some("number"), Number::UInt16(42), 1, 1),
            scalar(ItemKind::Bool, Some("flag"), Number::Bool(true), 1, 2),
            structural(ItemKind::ObjectEnd, None, 0, 0),
        ]
    );
}

#[test]
fn array_elements_have_no_key() {
    let doc = br#"["a", 1, null, false]"#;
    let mut recorder = Recorder::default();
    assert_eq!(parse_json(doc, &mut recorder), Ok(doc.len()));
    assert_eq!(
        recorder.events,
        vec![
            structural(ItemKind::ArrayBegin, None, 0, 0),
            text(None, "a", 1, 0),
            scalar(ItemKind::Number, None, Number::UInt16(1), 1, 1),
            scalar(ItemKind::Null, None, Number::Null, 1, 2),
            scalar(ItemKind::Bool, None, Number::Bool(false), 1, 3),
            structural(ItemKind::ArrayEnd, None, 0, 0),
        ]
    );
}

#[test]
fn depth_and_index_bookkeeping() {
    let doc = br#"{"a":{"b":1,"c":2},"d":3}"#;
    let mut recorder = Recorder::default();
    assert_eq!(parse_json(doc, &mut recorder), Ok(doc.len()));
    assert_eq!(
        recorder.events,
        vec![
            structural(ItemKind::ObjectBegin, None, 0, 0),
            structural(ItemKind::ObjectBegin, Some("a"), 1, 0),
            scalar(ItemKind::Number, Some("b"), Number::UInt16(1), 2, 0),
            scalar(ItemKind::Number, Some("c"), Number::UInt16(2), 2, 1),
            structural(ItemKind::ObjectEnd, Some("a"), 1, 0),
            scalar(ItemKind::Number, Some("d"), Number::UInt16(3), 1, 1),
            structural(ItemKind::ObjectEnd, None, 0, 0),
        ]
    );
}

#[test]
fn mixed_nesting_reports_container_keys() {
    let doc = br#"{"arr":[[1],{"x":2}]}"#;
    let mut recorder = Recorder::default();
    assert_eq!(parse_json(doc, &mut recorder), Ok(doc.len()));
    assert_eq!(
        recorder.events,
        vec![
            structural(ItemKind::ObjectBegin, None, 0, 0),
            structural(ItemKind::ArrayBegin, Some("arr"), 1, 0),
            structural(ItemKind::ArrayBegin, None, 2, 0),
            scalar(ItemKind::Number, None, Number::UInt16(1), 3, 0),
            structural(ItemKind::ArrayEnd, None, 2, 0),
            structural(ItemKind::ObjectBegin, None, 2, 1),
            scalar(ItemKind::Number, Some("x"), Number::UInt16(2), 3, 0),
            structural(ItemKind::ObjectEnd, None, 2, 1),
            structural(ItemKind::ArrayEnd, Some("arr"), 1, 0),
            structural(ItemKind::ObjectEnd, None, 0, 0),
        ]
    );
}

#[test]
fn text_spans_keep_escapes_raw() {
    let doc = br#"{"a":"x\"y\nz"}"#;
    let mut recorder = Recorder::default();
    assert_eq!(parse_json(doc, &mut recorder), Ok(doc.len()));
    assert_eq!(
        recorder.events[1],
        text(Some("a"), r#"x\"y\nz"#, 1, 0),
        "escapes must arrive untouched"
    );
}

#[test]
fn empty_key_and_empty_value() {
    let doc = br#"{"":""}"#;
    let mut recorder = Recorder::default();
    assert_eq!(parse_json(doc, &mut recorder), Ok(doc.len()));
    assert_eq!(recorder.events[1], text(Some(""), "", 1, 0));
}

#[test]
fn consumed_offset_ignores_trailing_bytes() {
    let mut recorder = Recorder::default();
    assert_eq!(parse_json(br#"{"a":"b"} extra"#, &mut recorder), Ok(9));
    assert_eq!(recorder.events.len(), 3);
}

#[test]
fn numbers_classify_through_the_parser() {
    let doc = br#"[0,-1,65536,1.5]"#;
    let mut recorder = Recorder::default();
    assert_eq!(parse_json(doc, &mut recorder), Ok(doc.len()));
    assert_eq!(
        recorder.events,
        vec![
            structural(ItemKind::ArrayBegin, None, 0, 0),
            scalar(ItemKind::Number, None, Number::UInt16(0), 1, 0),
            scalar(ItemKind::Number, None, Number::Int16(-1), 1, 1),
            scalar(ItemKind::Number, None, Number::UInt32(65536), 1, 2),
            scalar(ItemKind::Number, None, Number::Float64(1.5), 1, 3),
            structural(ItemKind::ArrayEnd, None, 0, 0),
        ]
    );
}

#[test]
fn event_stream_rebuilds_the_document() {
    // Serializing the observed events back out must reproduce a
    // whitespace-free document byte for byte (no numbers involved, so no
    // formatting ambiguity).
    let doc = br#"{"a":["x","y"],"b":{"c":"d"}}"#;
    let mut recorder = Recorder::default();
    assert_eq!(parse_json(doc, &mut recorder), Ok(doc.len()));

    let mut rebuilt = String::new();
    for event in &recorder.events {
        match event {
            Recorded::Structural {
                kind,
                key,
                depth,
                index,
            } => {
                let closer = matches!(kind, ItemKind::ObjectEnd | ItemKind::ArrayEnd);
                if !closer {
                    if *depth > 0 && *index > 0 {
                        rebuilt.push(',');
                    }
                    if let Some(key) = key {
                        rebuilt.push_str(&format!("\"{key}\":"));
                    }
                }
                rebuilt.push(match kind {
                    ItemKind::ObjectBegin => '{',
                    ItemKind::ObjectEnd => '}',
                    ItemKind::ArrayBegin => '[',
                    _ => ']',
                });
            }
            Recorded::Text {
                key, value, index, ..
            } => {
                if *index > 0 {
                    rebuilt.push(',');
                }
                if let Some(key) = key {
                    rebuilt.push_str(&format!("\"{key}\":"));
                }
                rebuilt.push_str(&format!("\"{value}\""));
            }
            Recorded::Scalar { .. } => unreachable!("document has no scalars"),
        }
    }
    assert_eq!(rebuilt.as_bytes(), doc);

    let mut again = Recorder::default();
    assert_eq!(parse_json(rebuilt.as_bytes(), &mut again), Ok(doc.len()));
    assert_eq!(again.events, recorder.events);
}

#[test]
fn reparsing_is_idempotent() {
    let doc = br#"{"a":{"b":[1,2.5,"s"]},"c":null}"#;
    let mut first = Recorder::default();
    let mut second = Recorder::default();
    let r1 = parse_json(doc, &mut first);
    let r2 = parse_json(doc, &mut second);
    assert_eq!(r1, r2);
    assert_eq!(first.events, second.events);
}
