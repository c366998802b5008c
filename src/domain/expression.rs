//! Position-coalesced expression groups.
//!
//! Consecutive expression and statement nodes that start at the same
//! position share one group. The grouping is purely positional: any change
//! of start position closes the open group, whatever the tree shape.

use super::source::{Position, SourceRange};

/// One member of an expression group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionNode {
    pub label: &'static str,
    /// Inclusive end position (the frontend reports an exclusive column).
    pub end: Position,
}

/// Writes implied by recording one node, in the order they must happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub close_previous: bool,
    pub open: Option<Position>,
    pub node: ExpressionNode,
}

#[derive(Debug, Default)]
pub struct ExpressionTracker {
    anchor: Position,
    pending_expansion: Option<SourceRange>,
}

impl ExpressionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: &'static str, range: &SourceRange) -> Step {
        let start = range.start.position;
        let mut step = Step {
            close_previous: false,
            open: None,
            node: ExpressionNode {
                label,
                end: Position::new(range.end.position.line, range.end.position.column.saturating_sub(1)),
            },
        };

        if start != self.anchor {
            step.close_previous = !self.anchor.is_origin();
            step.open = Some(start);
            self.anchor = start;
        }

        step
    }

    /// Whether a group has been opened and not yet closed by finalization.
    pub fn is_open(&self) -> bool {
        !self.anchor.is_origin()
    }

    /// Remember the furthest extent reached inside an expansion.
    pub fn hold_expansion(&mut self, range: SourceRange) {
        self.pending_expansion = Some(range);
    }

    pub fn take_expansion(&mut self) -> Option<SourceRange> {
        self.pending_expansion.take()
    }
}
