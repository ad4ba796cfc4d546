//! Line provenance: serialize a document with fixed formatting and remember
//! which lines every node occupies.
//!
//! The text is byte-identical to `serde_json::to_string_pretty` (two-space
//! indentation, `": "` after keys, `[]`/`{}` for empty containers). Object
//! keys keep the document's insertion order, so the same document always maps
//! to the same lines.

use std::collections::HashMap;
use std::fmt::Write as _;

use dashdiff_json_pointer::{escape_component, format_json_pointer, PathStep};
use serde::Serialize;
use serde_json::Value;

const INDENT: &str = "  ";

/// Lines a serialized node occupies, 1-based and inclusive.
///
/// `start` is the line the value begins on; for object members that is the
/// line of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

/// Pointer-to-line index over one serialized document.
#[derive(Debug, Clone)]
pub struct SourceMap {
    text: String,
    pointers: HashMap<String, LineSpan>,
}

impl SourceMap {
    pub fn new(doc: &Value) -> Self {
        let mut writer = Writer {
            out: String::new(),
            line: 1,
            pointer: String::new(),
            pointers: HashMap::new(),
        };
        writer.write_value(doc, 0);
        SourceMap {
            text: writer.out,
            pointers: writer.pointers,
        }
    }

    /// The serialized document.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Span of the node at a slash-joined pointer (`""` is the root).
    pub fn get(&self, pointer: &str) -> Option<LineSpan> {
        self.pointers.get(pointer).copied()
    }

    pub fn span(&self, path: &[PathStep]) -> Option<LineSpan> {
        self.get(&format_json_pointer(path))
    }
}

struct Writer {
    out: String,
    line: usize,
    pointer: String,
    pointers: HashMap<String, LineSpan>,
}

impl Writer {
    fn write_value(&mut self, val: &Value, depth: usize) {
        let start = self.line;
        match val {
            Value::Object(map) if !map.is_empty() => {
                self.out.push('{');
                let last = map.len() - 1;
                for (i, (key, item)) in map.iter().enumerate() {
                    self.newline(depth + 1);
                    // Value's Display escapes exactly like the pretty printer.
                    let _ = write!(self.out, "{}: ", Value::from(key.as_str()));
                    self.write_member(&escape_component(key), item, depth + 1);
                    if i < last {
                        self.out.push(',');
                    }
                }
                self.newline(depth);
                self.out.push('}');
            }
            Value::Array(arr) if !arr.is_empty() => {
                self.out.push('[');
                let last = arr.len() - 1;
                for (i, item) in arr.iter().enumerate() {
                    self.newline(depth + 1);
                    self.write_member(&i.to_string(), item, depth + 1);
                    if i < last {
                        self.out.push(',');
                    }
                }
                self.newline(depth);
                self.out.push(']');
            }
            scalar => {
                let _ = write!(self.out, "{scalar}");
            }
        }
        self.pointers.insert(self.pointer.clone(), LineSpan { start, end: self.line });
    }

    fn write_member(&mut self, component: &str, item: &Value, depth: usize) {
        let saved = self.pointer.len();
        self.pointer.push('/');
        self.pointer.push_str(component);
        self.write_value(item, depth);
        self.pointer.truncate(saved);
    }

    fn newline(&mut self, depth: usize) {
        self.out.push('\n');
        self.line += 1;
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
    }
}
