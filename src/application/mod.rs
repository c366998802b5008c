// Use cases of Delineate.

pub mod delineate;
pub mod render;

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{error, info};

use crate::config::DelineateConfig;
use crate::error::{DelineateError, Result};
use crate::infrastructure::concurrency::build_pool;
use crate::infrastructure::fixture::FixtureFrontend;
use crate::infrastructure::image::{Finalized, Image, ImageSummary};
use crate::infrastructure::json_writer::WriteError;
use crate::ports::Frontend;

pub use self::delineate::Delineator;

/// Traverse one unit into `image` and finalize it.
pub fn delineate<F: Frontend, W: Write>(
    frontend: &F,
    image: Image<W>,
) -> std::result::Result<Finalized<W>, WriteError> {
    Delineator::new(frontend, image).run()
}

pub struct DelineateUsecase<'a> {
    pub config: &'a DelineateConfig,
}

impl<'a> DelineateUsecase<'a> {
    /// Write the five streams of `frontend`'s unit into `output`.
    pub fn run<F: Frontend>(&self, frontend: &F, output: &Path) -> Result<ImageSummary> {
        let image = Image::create(output, &self.config.streams)?;
        let finalized = delineate(frontend, image)?;
        Ok(finalized.summary)
    }

    /// Load a syntax tree dump and delineate it. The dump is read before
    /// anything is created on disk.
    pub fn run_file(&self, input: &Path, output: &Path) -> Result<ImageSummary> {
        let frontend = FixtureFrontend::load(input)?;
        self.run(&frontend, output)
    }

    /// Delineate several dumps in parallel, each into `output/<file stem>`.
    /// Inputs sharing a stem are rejected before anything is written.
    pub fn run_batch(&self, inputs: &[PathBuf], output: &Path) -> Result<Vec<ImageSummary>> {
        let targets = unit_directories(inputs, output)?;
        let pool = build_pool(self.config.workers)?;

        let results: Vec<Result<ImageSummary>> = pool.install(|| {
            inputs
                .par_iter()
                .zip(targets.par_iter())
                .map(|(input, target)| {
                    let result = self.run_file(input, target);
                    match &result {
                        Ok(summary) => info!(input = %input.display(), documents = summary.documents, "unit written"),
                        Err(e) => error!(input = %input.display(), "{}", e),
                    }
                    result
                })
                .collect()
        });

        results.into_iter().collect()
    }
}

/// Target directory of every batch input, in input order.
fn unit_directories(inputs: &[PathBuf], output: &Path) -> Result<Vec<PathBuf>> {
    let mut claimed: HashMap<PathBuf, &PathBuf> = HashMap::with_capacity(inputs.len());
    let mut targets = Vec::with_capacity(inputs.len());

    for input in inputs {
        let target = output.join(unit_directory(input));
        if let Some(first) = claimed.insert(target.clone(), input) {
            return Err(DelineateError::Batch {
                directory: target,
                first: first.clone(),
                second: input.clone(),
            });
        }
        targets.push(target);
    }
    Ok(targets)
}

/// Directory name for a unit in a batch run.
fn unit_directory(input: &Path) -> PathBuf {
    input
        .file_stem()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("unit"))
}
