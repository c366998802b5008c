//! Ports: what the traversal needs from a language frontend.

use std::fmt::Debug;

use crate::domain::cursor::CursorKind;
use crate::domain::language::Language;
use crate::domain::source::SourceRange;
use crate::domain::types::CType;

/// Walk control returned by a visitor for each child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildVisit {
    /// Let the walk descend into this child's children.
    Recurse,
    /// Move to the next sibling without descending.
    Continue,
    /// Stop the whole walk.
    Break,
}

/// Metadata describing the translation unit as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitInfo {
    /// Main source file of the unit.
    pub file: String,
    pub engine: String,
    pub version: Option<String>,
    pub language: Option<Language>,
    /// Target triple.
    pub target: Option<String>,
}

/// An already-parsed syntax tree, exposed cursor by cursor.
///
/// Cursors are cheap handles that are only meaningful for the frontend that
/// produced them. Every accessor returns `None`/`false` for data the node
/// does not carry.
pub trait Frontend {
    type Cursor: Copy + Debug;

    /// The translation-unit cursor.
    fn root(&self) -> Self::Cursor;

    fn unit(&self) -> UnitInfo;

    /// Depth-first walk of `parent`'s children. The visitor receives
    /// `(cursor, parent)` and decides how the walk proceeds. Returns `true`
    /// when the walk was stopped by [`ChildVisit::Break`].
    fn visit_children(
        &self,
        parent: Self::Cursor,
        visitor: &mut dyn FnMut(Self::Cursor, Self::Cursor) -> ChildVisit,
    ) -> bool;

    fn kind(&self, cursor: Self::Cursor) -> CursorKind;
    fn semantic_parent(&self, cursor: Self::Cursor) -> Option<Self::Cursor>;
    fn spelling(&self, cursor: Self::Cursor) -> Option<String>;

    /// Presumed (expansion-aware) extent of the node.
    fn extent(&self, cursor: Self::Cursor) -> SourceRange;

    /// Whether the node's physical location is in the unit's main file.
    fn is_from_main_file(&self, cursor: Self::Cursor) -> bool;

    fn raw_comment(&self, cursor: Self::Cursor) -> Option<String>;
    fn comment_range(&self, cursor: Self::Cursor) -> Option<SourceRange>;

    fn is_definition(&self, cursor: Self::Cursor) -> bool;
    fn is_macro_function_like(&self, cursor: Self::Cursor) -> bool;

    /// Formal arguments of a callable or function-like macro.
    fn arguments(&self, cursor: Self::Cursor) -> Vec<Self::Cursor>;

    /// Resolved path of an inclusion directive's target.
    fn included_file(&self, cursor: Self::Cursor) -> Option<String>;
    fn enum_constant_value(&self, cursor: Self::Cursor) -> Option<i64>;

    fn cursor_type(&self, cursor: Self::Cursor) -> Option<CType>;
    fn result_type(&self, cursor: Self::Cursor) -> Option<CType>;
    fn typedef_underlying_type(&self, cursor: Self::Cursor) -> Option<CType>;

    /// Storage class (`extern`, `static`, `local`, `register`).
    fn storage(&self, _cursor: Self::Cursor) -> Option<String> {
        None
    }

    /// Member access (`public`, `private`, `protected`).
    fn access(&self, _cursor: Self::Cursor) -> Option<String> {
        None
    }
}
