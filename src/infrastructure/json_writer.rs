//! Streaming writer for nested, attributed elements.
//!
//! An element is rendered as `["tag", [children...], {attributes...}]`.
//! The writer keeps a frame stack so that every opened element, list and
//! attribute block is closed exactly once and in order. Misuse is reported
//! as an error instead of producing a malformed document.

use std::io::Write;

use serde::Serialize;
use serde_json::Number;
use thiserror::Error;

use crate::domain::source::SourceRange;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unbalanced close: `{expected}` is open, `{found}` was closed")]
    Unbalanced {
        expected: &'static str,
        found: &'static str,
    },

    #[error("misplaced {0}")]
    Misplaced(&'static str),

    #[error("stream finished with {0} open frame(s)")]
    Unterminated(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Tag written, nothing else.
    Opened,
    /// Inside the children list.
    Children,
    /// Children list written.
    Listed,
    /// Inside the attribute block.
    Attributes,
    /// Attribute block written.
    Attributed,
}

#[derive(Debug)]
enum Frame {
    List { items: usize },
    Element { tag: &'static str, phase: Phase },
    Attributes { items: usize },
}

#[derive(Debug, Clone, Copy)]
enum Closer {
    List,
    Attributes,
    Element(&'static str),
}

impl Frame {
    fn closer(&self) -> Closer {
        match self {
            Frame::List { .. } => Closer::List,
            Frame::Attributes { .. } => Closer::Attributes,
            Frame::Element { tag, .. } => Closer::Element(*tag),
        }
    }
}

pub struct JsonWriter<W: Write> {
    out: W,
    stack: Vec<Frame>,
    rooted: bool,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, stack: Vec::new(), rooted: false }
    }

    /// Number of open frames.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Items
    // ═══════════════════════════════════════════════════════════════════

    /// Account for a new item in the enclosing list, writing its separator.
    fn item(&mut self, what: &'static str) -> Result<(), WriteError> {
        match self.stack.last_mut() {
            None if !self.rooted => {
                self.rooted = true;
                Ok(())
            }
            Some(Frame::List { items }) => {
                if *items > 0 {
                    self.out.write_all(b",")?;
                }
                *items += 1;
                Ok(())
            }
            _ => Err(WriteError::Misplaced(what)),
        }
    }

    pub fn string(&mut self, s: &str) -> Result<(), WriteError> {
        self.item("string")?;
        serde_json::to_writer(&mut self.out, s)?;
        Ok(())
    }

    pub fn number(&mut self, n: impl Into<Number>) -> Result<(), WriteError> {
        self.item("number")?;
        write!(self.out, "{}", n.into())?;
        Ok(())
    }

    /// A string item, optionally without a single trailing newline.
    pub fn text(&mut self, s: &str, skip_trailing_newline: bool) -> Result<(), WriteError> {
        let s = if skip_trailing_newline {
            s.strip_suffix('\n').unwrap_or(s)
        } else {
            s
        };
        self.string(s)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Elements
    // ═══════════════════════════════════════════════════════════════════

    pub fn open(&mut self, tag: &'static str) -> Result<(), WriteError> {
        self.item("element")?;
        self.out.write_all(b"[")?;
        serde_json::to_writer(&mut self.out, tag)?;
        self.stack.push(Frame::Element { tag, phase: Phase::Opened });
        Ok(())
    }

    /// Open an element that will never have children.
    pub fn open_empty(&mut self, tag: &'static str) -> Result<(), WriteError> {
        self.open(tag)?;
        self.out.write_all(b",[]")?;
        if let Some(Frame::Element { phase, .. }) = self.stack.last_mut() {
            *phase = Phase::Listed;
        }
        Ok(())
    }

    pub fn close(&mut self, tag: &'static str) -> Result<(), WriteError> {
        let phase = match self.stack.last() {
            Some(Frame::Element { tag: open, phase }) => {
                if *open != tag {
                    return Err(WriteError::Unbalanced { expected: *open, found: tag });
                }
                *phase
            }
            _ => return Err(WriteError::Misplaced("close")),
        };

        match phase {
            Phase::Opened => self.out.write_all(b",[],{}]")?,
            Phase::Listed => self.out.write_all(b",{}]")?,
            Phase::Attributed => self.out.write_all(b"]")?,
            Phase::Children | Phase::Attributes => return Err(WriteError::Misplaced("close")),
        }
        self.stack.pop();
        Ok(())
    }

    /// Close the root element and terminate the stream.
    pub fn close_final(&mut self, tag: &'static str) -> Result<(), WriteError> {
        self.close(tag)?;
        self.terminate()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lists
    // ═══════════════════════════════════════════════════════════════════

    /// Begin a children list: the children phase of the open element, or
    /// a list item of the enclosing list.
    pub fn enter(&mut self) -> Result<(), WriteError> {
        match self.stack.last_mut() {
            Some(Frame::Element { phase, .. }) => {
                if *phase != Phase::Opened {
                    return Err(WriteError::Misplaced("children"));
                }
                *phase = Phase::Children;
                self.out.write_all(b",[")?;
            }
            _ => {
                self.item("list")?;
                self.out.write_all(b"[")?;
            }
        }
        self.stack.push(Frame::List { items: 0 });
        Ok(())
    }

    pub fn exit(&mut self) -> Result<(), WriteError> {
        if !matches!(self.stack.last(), Some(Frame::List { .. })) {
            return Err(WriteError::Misplaced("exit"));
        }
        self.out.write_all(b"]")?;
        self.stack.pop();

        if let Some(Frame::Element { phase, .. }) = self.stack.last_mut() {
            if *phase == Phase::Children {
                *phase = Phase::Listed;
            }
        }
        Ok(())
    }

    /// Exit the root list and terminate the stream.
    pub fn exit_final(&mut self) -> Result<(), WriteError> {
        self.exit()?;
        self.terminate()
    }

    fn terminate(&mut self) -> Result<(), WriteError> {
        if !self.stack.is_empty() {
            return Err(WriteError::Unterminated(self.stack.len()));
        }
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Attributes
    // ═══════════════════════════════════════════════════════════════════

    pub fn attributes_open(&mut self) -> Result<(), WriteError> {
        match self.stack.last_mut() {
            Some(Frame::Element { phase, .. }) => {
                match *phase {
                    Phase::Opened => self.out.write_all(b",[],{")?,
                    Phase::Listed => self.out.write_all(b",{")?,
                    _ => return Err(WriteError::Misplaced("attributes")),
                }
                *phase = Phase::Attributes;
            }
            _ => return Err(WriteError::Misplaced("attributes")),
        }
        self.stack.push(Frame::Attributes { items: 0 });
        Ok(())
    }

    pub fn attributes_close(&mut self) -> Result<(), WriteError> {
        if !matches!(self.stack.last(), Some(Frame::Attributes { .. })) {
            return Err(WriteError::Misplaced("attributes close"));
        }
        self.out.write_all(b"}")?;
        self.stack.pop();

        if let Some(Frame::Element { phase, .. }) = self.stack.last_mut() {
            *phase = Phase::Attributed;
        }
        Ok(())
    }

    fn key(&mut self, name: &str) -> Result<(), WriteError> {
        match self.stack.last_mut() {
            Some(Frame::Attributes { items }) => {
                if *items > 0 {
                    self.out.write_all(b",")?;
                }
                *items += 1;
            }
            _ => return Err(WriteError::Misplaced("attribute")),
        }
        serde_json::to_writer(&mut self.out, name)?;
        self.out.write_all(b":")?;
        Ok(())
    }

    /// String attribute. `None` is the absent marker and writes nothing.
    pub fn attribute(&mut self, name: &str, value: Option<&str>) -> Result<(), WriteError> {
        let Some(value) = value else {
            return Ok(());
        };
        self.key(name)?;
        serde_json::to_writer(&mut self.out, value)?;
        Ok(())
    }

    pub fn number_attribute(&mut self, name: &str, value: impl Into<Number>) -> Result<(), WriteError> {
        self.key(name)?;
        write!(self.out, "{}", value.into())?;
        Ok(())
    }

    /// Any serializable value as an attribute.
    pub fn json_attribute<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> Result<(), WriteError> {
        self.key(name)?;
        serde_json::to_writer(&mut self.out, value)?;
        Ok(())
    }

    /// `[[start_line, start_column], [end_line, end_column]]`
    pub fn area_attribute(&mut self, name: &str, range: &SourceRange) -> Result<(), WriteError> {
        self.json_attribute(name, &range.area())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Scopes
    // ═══════════════════════════════════════════════════════════════════

    /// Close frames until only `depth` remain. Best effort: used on the
    /// error path, where the first failing write ends the unwinding.
    pub fn unwind(&mut self, depth: usize) {
        while self.stack.len() > depth {
            let step = match self.stack.last().map(Frame::closer) {
                Some(Closer::List) => self.exit(),
                Some(Closer::Attributes) => self.attributes_close(),
                Some(Closer::Element(tag)) => self.close(tag),
                None => break,
            };
            if step.is_err() {
                self.stack.truncate(depth);
                break;
            }
        }
    }

    fn scoped<B>(&mut self, depth: usize, body: B, end: fn(&mut Self) -> Result<(), WriteError>) -> Result<(), WriteError>
    where
        B: FnOnce(&mut Self) -> Result<(), WriteError>,
    {
        match body(self) {
            Ok(()) => end(self),
            Err(e) => {
                self.unwind(depth);
                Err(e)
            }
        }
    }

    /// Open `tag`, run `body`, close `tag`. The element is closed even if
    /// `body` fails.
    pub fn element<B>(&mut self, tag: &'static str, body: B) -> Result<(), WriteError>
    where
        B: FnOnce(&mut Self) -> Result<(), WriteError>,
    {
        let depth = self.depth();
        self.open(tag)?;
        match body(self) {
            Ok(()) => self.close(tag),
            Err(e) => {
                self.unwind(depth);
                Err(e)
            }
        }
    }

    /// Like [`element`](Self::element) for elements without children.
    pub fn empty_element<B>(&mut self, tag: &'static str, body: B) -> Result<(), WriteError>
    where
        B: FnOnce(&mut Self) -> Result<(), WriteError>,
    {
        let depth = self.depth();
        self.open_empty(tag)?;
        match body(self) {
            Ok(()) => self.close(tag),
            Err(e) => {
                self.unwind(depth);
                Err(e)
            }
        }
    }

    pub fn children<B>(&mut self, body: B) -> Result<(), WriteError>
    where
        B: FnOnce(&mut Self) -> Result<(), WriteError>,
    {
        let depth = self.depth();
        self.enter()?;
        self.scoped(depth, body, Self::exit)
    }

    pub fn attributes<B>(&mut self, body: B) -> Result<(), WriteError>
    where
        B: FnOnce(&mut Self) -> Result<(), WriteError>,
    {
        let depth = self.depth();
        self.attributes_open()?;
        self.scoped(depth, body, Self::attributes_close)
    }

    /// Flush and hand back the sink. Fails if anything is left open.
    pub fn finish(mut self) -> Result<W, WriteError> {
        if !self.stack.is_empty() {
            return Err(WriteError::Unterminated(self.stack.len()));
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::source::Position;

    fn rendered(w: JsonWriter<Vec<u8>>) -> String {
        String::from_utf8(w.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_element_with_children_and_attributes() {
        let mut w = JsonWriter::new(Vec::new());
        w.open("unit").unwrap();
        w.enter().unwrap();
        w.open("function").unwrap();
        w.attributes_open().unwrap();
        w.attribute("identifier", Some("main")).unwrap();
        w.attribute("missing", None).unwrap();
        w.number_attribute("line", 3u32).unwrap();
        w.attributes_close().unwrap();
        w.close("function").unwrap();
        w.open_empty("include").unwrap();
        w.close("include").unwrap();
        w.exit().unwrap();
        w.close_final("unit").unwrap();

        let text = rendered(w);
        assert_eq!(
            text,
            "[\"unit\",[[\"function\",[],{\"identifier\":\"main\",\"line\":3}],[\"include\",[],{}]],{}]\n"
        );
        serde_json::from_str::<serde_json::Value>(&text).unwrap();
    }

    #[test]
    fn test_unbalanced_close_is_rejected() {
        let mut w = JsonWriter::new(Vec::new());
        w.open("structure").unwrap();
        let err = w.close("union").unwrap_err();
        assert!(matches!(err, WriteError::Unbalanced { expected: "structure", found: "union" }));
    }

    #[test]
    fn test_attributes_after_attributes_are_misplaced() {
        let mut w = JsonWriter::new(Vec::new());
        w.open("field").unwrap();
        w.attributes(|w| w.attribute("identifier", Some("x"))).unwrap();
        assert!(matches!(w.attributes_open(), Err(WriteError::Misplaced(_))));
        assert!(matches!(w.enter(), Err(WriteError::Misplaced(_))));
        // Attributes outside an attribute block are rejected too.
        assert!(matches!(w.attribute("k", Some("v")), Err(WriteError::Misplaced(_))));
    }

    #[test]
    fn test_finish_reports_open_frames() {
        let mut w = JsonWriter::new(Vec::new());
        w.open("unit").unwrap();
        w.enter().unwrap();
        assert!(matches!(w.finish(), Err(WriteError::Unterminated(2))));
    }

    #[test]
    fn test_scoped_element_closes_on_error() {
        let mut w = JsonWriter::new(Vec::new());
        w.enter().unwrap();
        let result = w.element("method", |w| {
            w.children(|w| {
                w.string("partial")?;
                Err(WriteError::Misplaced("forced"))
            })
        });
        assert!(matches!(result, Err(WriteError::Misplaced("forced"))));
        assert_eq!(w.depth(), 1);
        w.exit_final().unwrap();

        let text = rendered(w);
        assert_eq!(text, "[[\"method\",[\"partial\"],{}]]\n");
    }

    #[test]
    fn test_text_escapes_and_drops_one_newline() {
        let mut w = JsonWriter::new(Vec::new());
        w.enter().unwrap();
        w.text("/* say \"hi\"\\ */\n\n", true).unwrap();
        w.text("kept\n", false).unwrap();
        w.exit_final().unwrap();

        let value: serde_json::Value = serde_json::from_str(&rendered(w)).unwrap();
        assert_eq!(value[0], "/* say \"hi\"\\ */\n");
        assert_eq!(value[1], "kept\n");
    }

    #[test]
    fn test_area_and_nested_lists() {
        let mut w = JsonWriter::new(Vec::new());
        w.enter().unwrap();
        w.children(|w| {
            w.number(4u32)?;
            w.number(2u32)
        })
        .unwrap();
        w.empty_element("macro", |w| {
            w.attributes(|w| {
                let range = SourceRange::new(None, Position::new(1, 9), Position::new(1, 20));
                w.area_attribute("area", &range)?;
                w.json_attribute("elements", &[2u64, 3])
            })
        })
        .unwrap();
        w.exit_final().unwrap();

        assert_eq!(
            rendered(w),
            "[[4,2],[\"macro\",[],{\"area\":[[1,9],[1,20]],\"elements\":[2,3]}]]\n"
        );
    }

    #[test]
    fn test_second_root_is_misplaced() {
        let mut w = JsonWriter::new(Vec::new());
        w.enter().unwrap();
        w.exit().unwrap();
        assert!(matches!(w.enter(), Err(WriteError::Misplaced("list"))));
    }
}
