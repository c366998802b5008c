//! The five output streams of one translation unit.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::StreamNames;
use crate::domain::documentation::QualifiedPath;
use crate::domain::expression::{ExpressionNode, Step};
use crate::domain::source::Position;
use crate::error::DelineateError;
use crate::infrastructure::json_writer::{JsonWriter, WriteError};
use crate::ports::UnitInfo;

/// Counts reported once a unit has been finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageSummary {
    pub documents: usize,
    pub expression_groups: usize,
    pub expression_nodes: usize,
}

/// The sinks handed back by [`Image::finalize`].
#[derive(Debug)]
pub struct Streams<W> {
    pub elements: W,
    pub documented: W,
    pub documentation: W,
    pub data: W,
    pub expressions: W,
}

#[derive(Debug)]
pub struct Finalized<W> {
    pub summary: ImageSummary,
    pub streams: Streams<W>,
}

pub struct Image<W: Write> {
    /// Declaration tree.
    pub elements: JsonWriter<W>,
    /// Qualified paths of documented nodes.
    pub documented: JsonWriter<W>,
    /// Comment text, index-correlated with `documented`.
    pub documentation: JsonWriter<W>,
    /// Unit metadata.
    pub data: JsonWriter<W>,
    /// Expression groups.
    pub expressions: JsonWriter<W>,
    summary: ImageSummary,
}

impl Image<BufWriter<File>> {
    /// Create `dir` if needed and open the five stream files inside it.
    pub fn create(dir: &Path, names: &StreamNames) -> Result<Self, DelineateError> {
        fs::create_dir_all(dir).map_err(|source| DelineateError::Setup {
            path: dir.to_path_buf(),
            source,
        })?;

        let open = |name: &str| -> Result<BufWriter<File>, DelineateError> {
            let path = dir.join(name);
            File::create(&path)
                .map(BufWriter::new)
                .map_err(|source| DelineateError::Stream { path, source })
        };

        Ok(Image::new(
            open(&names.elements)?,
            open(&names.documented)?,
            open(&names.documentation)?,
            open(&names.data)?,
            open(&names.expressions)?,
        ))
    }
}

impl<W: Write> Image<W> {
    pub fn new(elements: W, documented: W, documentation: W, data: W, expressions: W) -> Self {
        Self {
            elements: JsonWriter::new(elements),
            documented: JsonWriter::new(documented),
            documentation: JsonWriter::new(documentation),
            data: JsonWriter::new(data),
            expressions: JsonWriter::new(expressions),
            summary: ImageSummary::default(),
        }
    }

    /// Open the unit element and the root lists.
    pub fn begin(&mut self) -> Result<(), WriteError> {
        self.elements.open("unit")?;
        self.elements.enter()?;
        self.documented.enter()?;
        self.documentation.enter()?;
        self.expressions.enter()?;
        Ok(())
    }

    /// Write one documentation record pair.
    pub fn document(&mut self, path: &QualifiedPath, text: &str) -> Result<(), WriteError> {
        self.documented.children(|w| {
            for segment in path.segments() {
                w.string(segment)?;
            }
            Ok(())
        })?;
        self.documentation.text(text, true)?;
        self.summary.documents += 1;
        Ok(())
    }

    // Groups are `[[line, column], [nodes...]]`; the node list stays open
    // until the group is closed.

    pub fn expression_open(&mut self, anchor: Position) -> Result<(), WriteError> {
        self.expressions.enter()?;
        self.expressions.children(|w| {
            w.number(anchor.line)?;
            w.number(anchor.column)
        })?;
        self.expressions.enter()?;
        self.summary.expression_groups += 1;
        Ok(())
    }

    /// `["label", end_line, end_column]`
    pub fn expression_node(&mut self, node: &ExpressionNode) -> Result<(), WriteError> {
        self.expressions.children(|w| {
            w.string(node.label)?;
            w.number(node.end.line)?;
            w.number(node.end.column)
        })?;
        self.summary.expression_nodes += 1;
        Ok(())
    }

    pub fn expression_close(&mut self) -> Result<(), WriteError> {
        self.expressions.exit()?;
        self.expressions.exit()
    }

    /// Apply the writes a tracker step calls for.
    pub fn expression_step(&mut self, step: &Step) -> Result<(), WriteError> {
        if step.close_previous {
            self.expression_close()?;
        }
        if let Some(anchor) = step.open {
            self.expression_open(anchor)?;
        }
        self.expression_node(&step.node)
    }

    /// Balance and terminate all five streams.
    pub fn finalize(mut self, unit: &UnitInfo, group_open: bool) -> Result<Finalized<W>, WriteError> {
        self.elements.exit()?;
        self.elements.attributes(|w| unit_attributes(w, unit))?;

        self.data.open("data")?;
        self.data.attributes(|w| unit_attributes(w, unit))?;
        self.data.close_final("data")?;

        if group_open {
            self.expression_close()?;
        }
        self.expressions.exit_final()?;
        self.documented.exit_final()?;
        self.documentation.exit_final()?;
        self.elements.close_final("unit")?;

        Ok(Finalized {
            summary: self.summary,
            streams: Streams {
                elements: self.elements.finish()?,
                documented: self.documented.finish()?,
                documentation: self.documentation.finish()?,
                data: self.data.finish()?,
                expressions: self.expressions.finish()?,
            },
        })
    }
}

fn unit_attributes<W: Write>(w: &mut JsonWriter<W>, unit: &UnitInfo) -> Result<(), WriteError> {
    w.attribute("version", unit.version.as_deref())?;
    w.attribute("engine", Some(unit.engine.as_str()))?;
    w.attribute("language", unit.language.map(|l| l.name()))?;
    w.attribute("target", unit.target.as_deref())
}
