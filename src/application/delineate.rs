//! The traversal engine.
//!
//! Walks the frontend's tree depth first, classifies every node and drives
//! the image: declarations become nested elements, expressions and
//! statements feed the expression tracker, comments become documentation
//! records. All per-unit state lives in [`Delineator`].

use std::io::Write;

use tracing::{debug, info, trace};

use crate::application::render::write_type;
use crate::domain::classifier::{classify, Directive, Handler};
use crate::domain::cursor::CursorKind;
use crate::domain::documentation::QualifiedPath;
use crate::domain::expression::ExpressionTracker;
use crate::domain::source::SourceRange;
use crate::infrastructure::image::{Finalized, Image};
use crate::infrastructure::json_writer::WriteError;
use crate::ports::{ChildVisit, Frontend};

type Outcome = Result<ChildVisit, WriteError>;

pub struct Delineator<'f, F: Frontend, W: Write> {
    frontend: &'f F,
    image: Image<W>,
    tracker: ExpressionTracker,
    unit_file: String,
    /// Non-zero after an inclusion directive until the walk is back in the
    /// main file.
    include_depth: u32,
    /// First write failure; stops the walk.
    failure: Option<WriteError>,
}

impl<'f, F: Frontend, W: Write> Delineator<'f, F, W> {
    pub fn new(frontend: &'f F, image: Image<W>) -> Self {
        Self {
            frontend,
            image,
            tracker: ExpressionTracker::new(),
            unit_file: frontend.unit().file,
            include_depth: 0,
            failure: None,
        }
    }

    /// Traverse the whole unit and finalize the image.
    pub fn run(mut self) -> Result<Finalized<W>, WriteError> {
        let unit = self.frontend.unit();
        info!(file = %unit.file, engine = %unit.engine, "delineating unit");

        self.image.begin()?;
        self.descend(self.frontend.root())?;

        let group_open = self.tracker.is_open();
        if let Some(range) = self.tracker.take_expansion() {
            debug!(?range, "expansion still pending at end of unit");
        }

        let finalized = self.image.finalize(&unit, group_open)?;
        info!(
            file = %unit.file,
            documents = finalized.summary.documents,
            groups = finalized.summary.expression_groups,
            expressions = finalized.summary.expression_nodes,
            "unit complete"
        );
        Ok(finalized)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Walk
    // ═══════════════════════════════════════════════════════════════════

    /// Walk the children of `parent`, surfacing the first write failure.
    fn descend(&mut self, parent: F::Cursor) -> Result<(), WriteError> {
        let frontend = self.frontend;
        frontend.visit_children(parent, &mut |cursor, _| self.visit(cursor));

        match self.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn visit(&mut self, cursor: F::Cursor) -> ChildVisit {
        match self.dispatch(cursor) {
            Ok(next) => next,
            Err(e) => {
                self.failure = Some(e);
                ChildVisit::Break
            }
        }
    }

    fn dispatch(&mut self, cursor: F::Cursor) -> Outcome {
        let fe = self.frontend;
        let kind = fe.kind(cursor);
        trace!(%kind, ?cursor, "visit");

        if !fe.is_from_main_file(cursor) {
            // Outside an inclusion, a node spelled elsewhere but presumed in
            // the main file comes from a macro expansion.
            if self.include_depth == 0 {
                let range = fe.extent(cursor);
                if range.file() == Some(self.unit_file.as_str()) {
                    self.tracker.hold_expansion(range);
                }
            }
            return Ok(ChildVisit::Recurse);
        } else if self.include_depth > 0 {
            debug!(depth = self.include_depth, "back in main file");
            self.include_depth = 0;
        } else if let Some(range) = self.tracker.take_expansion() {
            debug!(?range, "flushing expansion");
            self.expression("expansion", &range)?;
        }

        let disposition = classify(kind);
        match disposition.directive {
            Directive::Skip => Ok(ChildVisit::Continue),
            Directive::Flatten => Ok(ChildVisit::Recurse),
            Directive::EmitLeaf => {
                self.expression(disposition.label, &fe.extent(cursor))?;
                Ok(ChildVisit::Recurse)
            }
            Directive::Expand(handler) => self.expand(handler, cursor),
        }
    }

    fn expression(&mut self, label: &'static str, range: &SourceRange) -> Result<(), WriteError> {
        let step = self.tracker.record(label, range);
        self.image.expression_step(&step)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Handlers
    // ═══════════════════════════════════════════════════════════════════

    fn expand(&mut self, handler: Handler, cursor: F::Cursor) -> Outcome {
        match handler {
            Handler::Typedef => self.typedef(cursor),
            Handler::Enumeration => self.container("enumeration", cursor),
            Handler::EnumConstant => self.constant(cursor),
            Handler::Inclusion => self.inclusion(cursor),
            Handler::Macro => self.macro_definition(cursor),
            Handler::Method => self.callable("method", cursor),
            Handler::Function => self.callable("function", cursor),
            Handler::Union => self.union(cursor),
            Handler::Collection(tag) => self.container(tag, cursor),
            Handler::Field => self.field(cursor),
            Handler::NamespaceAlias => self.namespace_alias(cursor),
            Handler::Namespace => self.namespace(cursor),
        }
    }

    fn typedef(&mut self, cursor: F::Cursor) -> Outcome {
        let underlying = self.frontend.typedef_underlying_type(cursor);

        self.comment(cursor)?;
        self.element("typedef", |this| {
            this.children(|this| match &underlying {
                Some(ty) => write_type(&mut this.image.elements, ty),
                None => Ok(()),
            })?;
            this.declaration_attributes(cursor)
        })?;
        Ok(ChildVisit::Recurse)
    }

    /// Enumerations and struct-like collections: children are walked once,
    /// inside the element.
    fn container(&mut self, tag: &'static str, cursor: F::Cursor) -> Outcome {
        self.comment(cursor)?;
        self.element(tag, |this| {
            this.children(|this| this.descend(cursor))?;
            this.declaration_attributes(cursor)
        })?;
        Ok(ChildVisit::Continue)
    }

    fn constant(&mut self, cursor: F::Cursor) -> Outcome {
        let identifier = self.frontend.spelling(cursor);
        let value = self.frontend.enum_constant_value(cursor);

        self.image.elements.empty_element("constant", |w| {
            w.attributes(|w| {
                w.attribute("identifier", identifier.as_deref())?;
                match value {
                    Some(v) => w.number_attribute("integer", v),
                    None => Ok(()),
                }
            })
        })?;
        Ok(ChildVisit::Recurse)
    }

    fn inclusion(&mut self, cursor: F::Cursor) -> Outcome {
        let system = self.frontend.included_file(cursor);
        let area = self.frontend.extent(cursor);

        self.image.elements.empty_element("include", |w| {
            w.attributes(|w| {
                w.attribute("system", system.as_deref())?;
                w.area_attribute("area", &area)
            })
        })?;

        self.include_depth += 1;
        debug!(file = ?system, depth = self.include_depth, "entered inclusion");
        Ok(ChildVisit::Continue)
    }

    fn macro_definition(&mut self, cursor: F::Cursor) -> Outcome {
        let fe = self.frontend;
        let function_like = fe.is_macro_function_like(cursor);
        let tag = if function_like { "macro" } else { "define" };
        let parameters: Vec<Option<String>> = if function_like {
            fe.arguments(cursor).into_iter().map(|arg| fe.spelling(arg)).collect()
        } else {
            Vec::new()
        };

        self.comment(cursor)?;
        self.element(tag, |this| {
            this.children(|this| {
                for name in &parameters {
                    this.image.elements.empty_element("parameter", |w| {
                        w.attributes(|w| w.attribute("identifier", name.as_deref()))
                    })?;
                }
                Ok(())
            })?;
            this.declaration_attributes(cursor)
        })?;
        Ok(ChildVisit::Recurse)
    }

    /// Methods and functions. Only definitions are emitted.
    fn callable(&mut self, tag: &'static str, cursor: F::Cursor) -> Outcome {
        if !self.frontend.is_definition(cursor) {
            trace!(tag, "skipping declaration without body");
            return Ok(ChildVisit::Recurse);
        }

        self.comment(cursor)?;
        self.element(tag, |this| {
            this.children(|this| {
                this.signature(cursor)?;
                this.descend(cursor)
            })?;
            this.declaration_attributes(cursor)
        })?;
        Ok(ChildVisit::Continue)
    }

    /// Return type, then one `parameter` element per formal argument.
    fn signature(&mut self, cursor: F::Cursor) -> Result<(), WriteError> {
        let fe = self.frontend;
        let elements = &mut self.image.elements;

        if let Some(result) = fe.result_type(cursor) {
            write_type(elements, &result)?;
        }

        for arg in fe.arguments(cursor) {
            let ty = fe.cursor_type(arg);
            let name = fe.spelling(arg);
            elements.element("parameter", |w| {
                w.children(|w| match &ty {
                    Some(ty) => write_type(w, ty),
                    None => Ok(()),
                })?;
                w.attributes(|w| w.attribute("identifier", name.as_deref()))
            })?;
        }
        Ok(())
    }

    /// Unions are emitted only when they are not definitions; definitions
    /// are walked through.
    fn union(&mut self, cursor: F::Cursor) -> Outcome {
        if self.frontend.is_definition(cursor) {
            return Ok(ChildVisit::Recurse);
        }

        self.comment(cursor)?;
        self.element("union", |this| {
            this.children(|this| this.descend(cursor))?;
            this.identifier_attributes(cursor)
        })?;
        Ok(ChildVisit::Continue)
    }

    fn field(&mut self, cursor: F::Cursor) -> Outcome {
        let ty = self.frontend.cursor_type(cursor);

        self.comment(cursor)?;
        self.element("field", |this| {
            this.children(|this| match &ty {
                Some(ty) => write_type(&mut this.image.elements, ty),
                None => Ok(()),
            })?;
            this.identifier_attributes(cursor)
        })?;
        Ok(ChildVisit::Recurse)
    }

    fn namespace_alias(&mut self, cursor: F::Cursor) -> Outcome {
        let identifier = self.frontend.spelling(cursor);
        let area = self.frontend.extent(cursor);

        self.image.elements.empty_element("namespace-alias", |w| {
            w.attributes(|w| {
                w.attribute("identifier", identifier.as_deref())?;
                w.area_attribute("area", &area)
            })
        })?;
        Ok(ChildVisit::Recurse)
    }

    fn namespace(&mut self, cursor: F::Cursor) -> Outcome {
        self.comment(cursor)?;
        self.element("namespace", |this| {
            this.children(|this| this.descend(cursor))?;
            this.identifier_attributes(cursor)
        })?;
        Ok(ChildVisit::Continue)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Documentation and attributes
    // ═══════════════════════════════════════════════════════════════════

    /// Record the node's comment, if any. Returns whether one was found.
    fn comment(&mut self, cursor: F::Cursor) -> Result<bool, WriteError> {
        let Some(text) = self.frontend.raw_comment(cursor) else {
            return Ok(false);
        };
        let path = self.qualified_path(cursor);
        trace!(path = %path.joined("::"), "documented");
        self.image.document(&path, &text)?;
        Ok(true)
    }

    /// Spellings from the outermost named ancestor down to `cursor`,
    /// excluding the translation unit.
    fn qualified_path(&self, cursor: F::Cursor) -> QualifiedPath {
        let fe = self.frontend;
        let mut segments = Vec::new();
        let mut current = Some(cursor);

        while let Some(c) = current {
            let kind = fe.kind(c);
            if kind == CursorKind::TranslationUnit || kind.is_invalid() {
                break;
            }
            if let Some(spelling) = fe.spelling(c) {
                segments.push(spelling);
            }
            current = fe.semantic_parent(c);
        }

        segments.reverse();
        QualifiedPath(segments)
    }

    fn declaration_attributes(&mut self, cursor: F::Cursor) -> Result<(), WriteError> {
        let fe = self.frontend;
        let identifier = fe.spelling(cursor);
        let area = fe.extent(cursor);
        let documented = fe.comment_range(cursor);
        let storage = fe.storage(cursor);
        let access = fe.access(cursor);

        self.image.elements.attributes(|w| {
            w.attribute("identifier", identifier.as_deref())?;
            w.area_attribute("area", &area)?;
            if let Some(range) = &documented {
                w.area_attribute("documented", range)?;
            }
            w.attribute("storage", storage.as_deref())?;
            w.attribute("access", access.as_deref())
        })
    }

    fn identifier_attributes(&mut self, cursor: F::Cursor) -> Result<(), WriteError> {
        let identifier = self.frontend.spelling(cursor);
        let access = self.frontend.access(cursor);

        self.image.elements.attributes(|w| {
            w.attribute("identifier", identifier.as_deref())?;
            w.attribute("access", access.as_deref())
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Scopes
    // ═══════════════════════════════════════════════════════════════════

    /// Open `tag` in the element stream around `body`. The element is
    /// closed even when `body` fails.
    fn element<B>(&mut self, tag: &'static str, body: B) -> Result<(), WriteError>
    where
        B: FnOnce(&mut Self) -> Result<(), WriteError>,
    {
        let depth = self.image.elements.depth();
        self.image.elements.open(tag)?;
        match body(self) {
            Ok(()) => self.image.elements.close(tag),
            Err(e) => {
                self.image.elements.unwind(depth);
                Err(e)
            }
        }
    }

    fn children<B>(&mut self, body: B) -> Result<(), WriteError>
    where
        B: FnOnce(&mut Self) -> Result<(), WriteError>,
    {
        let depth = self.image.elements.depth();
        self.image.elements.enter()?;
        match body(self) {
            Ok(()) => self.image.elements.exit(),
            Err(e) => {
                self.image.elements.unwind(depth);
                Err(e)
            }
        }
    }
}
