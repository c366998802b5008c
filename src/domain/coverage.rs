//! Flattening of structured coverage records into line-oriented listings.
//!
//! Records are produced elsewhere (instrumented-binary readers are out of
//! scope); these routines only walk them and print.

use std::collections::BTreeSet;
use std::io::{self, Write};

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    Code,
    Skipped,
    Expansion,
    Gap,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MappingRegion {
    pub file_id: usize,
    #[serde(default)]
    pub expanded_file_id: usize,
    pub kind: RegionKind,
    pub line_start: u32,
    pub column_start: u32,
    pub line_end: u32,
    pub column_end: u32,
}

/// Counter mapping of a single function.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FunctionRecord {
    pub function_name: String,
    pub filenames: Vec<String>,
    #[serde(default)]
    pub regions: Vec<MappingRegion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Segment {
    pub line: u32,
    pub column: u32,
    pub count: u64,
    #[serde(default)]
    pub has_count: bool,
    #[serde(default)]
    pub is_region_entry: bool,
}

/// Merged coverage of one source file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileCoverage {
    pub filename: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

fn filename(record: &FunctionRecord, id: usize) -> io::Result<&str> {
    record.filenames.get(id).map(String::as_str).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{}: file id {} out of range", record.function_name, id),
        )
    })
}

/// `@function`, then `id:file` whenever the file changes, then
/// `ls cs le ce kind` per region.
pub fn write_regions<W: Write>(out: &mut W, records: &[FunctionRecord]) -> io::Result<()> {
    let mut last: Option<usize> = None;

    for record in records {
        writeln!(out, "@{}", record.function_name)?;

        for region in &record.regions {
            let file = filename(record, region.file_id)?;
            if last != Some(region.file_id) {
                writeln!(out, "{}:{}", region.file_id, file)?;
                last = Some(region.file_id);
            }

            let kind = match region.kind {
                RegionKind::Code => "+",
                RegionKind::Skipped => "-",
                RegionKind::Expansion => filename(record, region.expanded_file_id)?,
                RegionKind::Gap => ".",
                RegionKind::Unknown => "U",
            };

            writeln!(
                out,
                "{} {} {} {} {}",
                region.line_start, region.column_start, region.line_end, region.column_end, kind
            )?;
        }
    }

    Ok(())
}

/// Every source file named by the records, sorted and de-duplicated.
pub fn write_sources<W: Write>(out: &mut W, records: &[FunctionRecord]) -> io::Result<()> {
    let paths: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.filenames.iter().map(String::as_str))
        .collect();

    for path in paths {
        writeln!(out, "{}", path)?;
    }
    Ok(())
}

/// `@file`, then `line column count` for each counted region entry.
pub fn write_counters<W: Write>(out: &mut W, files: &[FileCoverage]) -> io::Result<()> {
    for file in files {
        if file.segments.is_empty() {
            continue;
        }

        writeln!(out, "@{}", file.filename)?;
        for seg in &file.segments {
            if seg.has_count && seg.is_region_entry && seg.count > 0 {
                writeln!(out, "{} {} {}", seg.line, seg.column, seg.count)?;
            }
        }
    }
    Ok(())
}
