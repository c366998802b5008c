//! Source positions and extents as reported by the frontend.

use serde::{Deserialize, Serialize};

/// A `(line, column)` pair. Line 0 never occurs in real sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    pub fn is_origin(&self) -> bool {
        self.line == 0
    }
}

/// A presumed location: the file it is attributed to plus its position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub file: Option<String>,
    pub position: Position,
}

/// A start/stop pair of presumed locations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceRange {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceRange {
    pub fn new(file: Option<String>, start: Position, end: Position) -> Self {
        Self {
            start: SourceLocation { file: file.clone(), position: start },
            end: SourceLocation { file, position: end },
        }
    }

    /// The file the start of the range is attributed to.
    pub fn file(&self) -> Option<&str> {
        self.start.file.as_deref()
    }

    /// `[[start_line, start_column], [end_line, end_column]]`
    pub fn area(&self) -> [[u32; 2]; 2] {
        let (s, e) = (self.start.position, self.end.position);
        [[s.line, s.column], [e.line, e.column]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_layout() {
        let r = SourceRange::new(Some("a.c".into()), Position::new(3, 1), Position::new(5, 2));
        assert_eq!(r.area(), [[3, 1], [5, 2]]);
        assert_eq!(r.file(), Some("a.c"));
        assert!(Position::default().is_origin());
    }
}
