//! Frontend over a serialized syntax tree.
//!
//! A dump is a JSON document describing one translation unit and its
//! cursors. It lets the traversal run end to end without a native parser.
//!
//! ```json
//! {"file": "main.c", "children": [
//!   {"kind": "FunctionDecl", "spelling": "main", "definition": true,
//!    "extent": [[3, 1], [5, 2]], "result_type": {"kind": "Int", "spelling": "int"}}
//! ]}
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::domain::cursor::CursorKind;
use crate::domain::language::Language;
use crate::domain::source::{Position, SourceRange};
use crate::domain::types::CType;
use crate::error::{DelineateError, Result};
use crate::ports::{ChildVisit, Frontend, UnitInfo};

type Extent = [[u32; 2]; 2];

#[derive(Debug, Deserialize)]
struct UnitDump {
    file: String,
    #[serde(default)]
    engine: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    language: Option<Language>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    children: Vec<NodeDump>,
}

#[derive(Debug, Deserialize)]
struct NodeDump {
    kind: String,
    /// Frontend number of the kind; classifies kinds missing from the table.
    #[serde(default)]
    kind_number: Option<u32>,
    #[serde(default)]
    spelling: Option<String>,
    /// Presumed file; inherited from the parent when absent.
    #[serde(default)]
    file: Option<String>,
    /// Physical file; defaults to `file`, then to the parent's origin.
    #[serde(default)]
    origin: Option<String>,
    #[serde(default)]
    extent: Option<Extent>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    comment_extent: Option<Extent>,
    #[serde(default)]
    definition: bool,
    #[serde(default)]
    function_like: bool,
    #[serde(default)]
    included_file: Option<String>,
    #[serde(default)]
    value: Option<i64>,
    #[serde(default, rename = "type")]
    ty: Option<CType>,
    #[serde(default)]
    result_type: Option<CType>,
    #[serde(default)]
    underlying_type: Option<CType>,
    #[serde(default)]
    storage: Option<String>,
    #[serde(default)]
    access: Option<String>,
    #[serde(default)]
    arguments: Option<Vec<NodeDump>>,
    #[serde(default)]
    children: Vec<NodeDump>,
}

/// Cursor into a [`FixtureFrontend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    kind: CursorKind,
    spelling: Option<String>,
    file: Option<String>,
    origin: Option<String>,
    extent: Extent,
    comment: Option<String>,
    comment_extent: Option<Extent>,
    definition: bool,
    function_like: bool,
    included_file: Option<String>,
    value: Option<i64>,
    ty: Option<CType>,
    result_type: Option<CType>,
    underlying_type: Option<CType>,
    storage: Option<String>,
    access: Option<String>,
    parent: Option<NodeId>,
    arguments: Option<Vec<NodeId>>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
pub struct FixtureFrontend {
    unit: UnitInfo,
    nodes: Vec<Node>,
}

const ROOT: NodeId = NodeId(0);

impl FixtureFrontend {
    pub fn from_json(text: &str) -> Result<Self> {
        let dump: UnitDump = serde_json::from_str(text)
            .map_err(|e| DelineateError::frontend(format!("invalid syntax tree dump: {}", e)))?;
        Self::build(dump)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let dump: UnitDump = serde_json::from_value(value)
            .map_err(|e| DelineateError::frontend(format!("invalid syntax tree dump: {}", e)))?;
        Self::build(dump)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DelineateError::frontend(format!("{}: {}", path.display(), e)))?;
        let dump: UnitDump = serde_json::from_str(&text)
            .map_err(|e| DelineateError::frontend(format!("{}: {}", path.display(), e)))?;
        Self::build(dump)
    }

    fn build(dump: UnitDump) -> Result<Self> {
        let language = dump.language.or_else(|| Language::from_path(Path::new(&dump.file)));
        let unit = UnitInfo {
            file: dump.file.clone(),
            engine: dump.engine.unwrap_or_else(|| "fixture".to_string()),
            version: dump.version,
            language,
            target: dump.target,
        };

        let mut frontend = FixtureFrontend { unit, nodes: Vec::new() };
        frontend.nodes.push(Node {
            kind: CursorKind::TranslationUnit,
            spelling: Some(dump.file.clone()),
            file: Some(dump.file.clone()),
            origin: Some(dump.file),
            extent: [[0, 0], [0, 0]],
            comment: None,
            comment_extent: None,
            definition: false,
            function_like: false,
            included_file: None,
            value: None,
            ty: None,
            result_type: None,
            underlying_type: None,
            storage: None,
            access: None,
            parent: None,
            arguments: None,
            children: Vec::new(),
        });

        for child in dump.children {
            let id = frontend.insert(child, ROOT)?;
            frontend.nodes[ROOT.0].children.push(id);
        }

        debug!(file = %frontend.unit.file, nodes = frontend.nodes.len(), "loaded syntax tree dump");
        Ok(frontend)
    }

    fn insert(&mut self, dump: NodeDump, parent: NodeId) -> Result<NodeId> {
        let kind = CursorKind::resolve(&dump.kind, dump.kind_number);
        if let CursorKind::Unknown(number) = kind {
            debug!(kind = %dump.kind, ?number, "unlisted cursor kind");
        }

        let inherited = &self.nodes[parent.0];
        let file = dump.file.clone().or_else(|| inherited.file.clone());
        let origin = dump
            .origin
            .or_else(|| dump.file.clone())
            .or_else(|| inherited.origin.clone());

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            spelling: dump.spelling,
            file,
            origin,
            extent: dump.extent.unwrap_or_default(),
            comment: dump.comment,
            comment_extent: dump.comment_extent,
            definition: dump.definition,
            function_like: dump.function_like,
            included_file: dump.included_file,
            value: dump.value,
            ty: dump.ty,
            result_type: dump.result_type,
            underlying_type: dump.underlying_type,
            storage: dump.storage,
            access: dump.access,
            parent: Some(parent),
            arguments: None,
            children: Vec::new(),
        });

        if let Some(arguments) = dump.arguments {
            let mut ids = Vec::with_capacity(arguments.len());
            for argument in arguments {
                ids.push(self.insert(argument, id)?);
            }
            self.nodes[id.0].arguments = Some(ids);
        }

        for child in dump.children {
            let child = self.insert(child, id)?;
            self.nodes[id.0].children.push(child);
        }

        Ok(id)
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn range(&self, file: &Option<String>, extent: &Extent) -> SourceRange {
        let [[sl, sc], [el, ec]] = *extent;
        SourceRange::new(file.clone(), Position::new(sl, sc), Position::new(el, ec))
    }

    fn walk(&self, parent: NodeId, visitor: &mut dyn FnMut(NodeId, NodeId) -> ChildVisit) -> bool {
        for &child in &self.node(parent).children {
            match visitor(child, parent) {
                ChildVisit::Break => return true,
                ChildVisit::Continue => {}
                ChildVisit::Recurse => {
                    if self.walk(child, visitor) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

impl Frontend for FixtureFrontend {
    type Cursor = NodeId;

    fn root(&self) -> NodeId {
        ROOT
    }

    fn unit(&self) -> UnitInfo {
        self.unit.clone()
    }

    fn visit_children(&self, parent: NodeId, visitor: &mut dyn FnMut(NodeId, NodeId) -> ChildVisit) -> bool {
        self.walk(parent, visitor)
    }

    fn kind(&self, cursor: NodeId) -> CursorKind {
        self.node(cursor).kind
    }

    fn semantic_parent(&self, cursor: NodeId) -> Option<NodeId> {
        self.node(cursor).parent
    }

    fn spelling(&self, cursor: NodeId) -> Option<String> {
        self.node(cursor).spelling.clone()
    }

    fn extent(&self, cursor: NodeId) -> SourceRange {
        let node = self.node(cursor);
        self.range(&node.file, &node.extent)
    }

    fn is_from_main_file(&self, cursor: NodeId) -> bool {
        self.node(cursor).origin.as_deref() == Some(self.unit.file.as_str())
    }

    fn raw_comment(&self, cursor: NodeId) -> Option<String> {
        self.node(cursor).comment.clone()
    }

    fn comment_range(&self, cursor: NodeId) -> Option<SourceRange> {
        let node = self.node(cursor);
        node.comment_extent.as_ref().map(|extent| self.range(&node.file, extent))
    }

    fn is_definition(&self, cursor: NodeId) -> bool {
        self.node(cursor).definition
    }

    fn is_macro_function_like(&self, cursor: NodeId) -> bool {
        self.node(cursor).function_like
    }

    fn arguments(&self, cursor: NodeId) -> Vec<NodeId> {
        let node = self.node(cursor);
        match &node.arguments {
            Some(ids) => ids.clone(),
            None => node
                .children
                .iter()
                .copied()
                .filter(|&c| self.node(c).kind == CursorKind::ParmDecl)
                .collect(),
        }
    }

    fn included_file(&self, cursor: NodeId) -> Option<String> {
        self.node(cursor).included_file.clone()
    }

    fn enum_constant_value(&self, cursor: NodeId) -> Option<i64> {
        self.node(cursor).value
    }

    fn cursor_type(&self, cursor: NodeId) -> Option<CType> {
        self.node(cursor).ty.clone()
    }

    fn result_type(&self, cursor: NodeId) -> Option<CType> {
        self.node(cursor).result_type.clone()
    }

    fn typedef_underlying_type(&self, cursor: NodeId) -> Option<CType> {
        self.node(cursor).underlying_type.clone()
    }

    fn storage(&self, cursor: NodeId) -> Option<String> {
        self.node(cursor).storage.clone()
    }

    fn access(&self, cursor: NodeId) -> Option<String> {
        self.node(cursor).access.clone()
    }
}
