//! DPR Generation: orchestrates the full pipeline.
//!
//! Flow: validate input → assemble outline against the candidate pool →
//!       render to a temp file → rename into the output directory → report.

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::errors::DprError;
use crate::extraction::FieldExtractor;
use crate::generation::assembler::assemble;
use crate::matching::FieldMatcher;
use crate::models::input::ProjectInput;
use crate::outline::annexure3;
use crate::output::{output_file_name, write_atomically};
use crate::render::{renderer_for, OutputFormat};
use crate::report::RunReport;

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
}

/// Generates the document for `input`, stamped with the current local time.
pub fn generate_dpr(input: &ProjectInput, options: &GenerateOptions) -> Result<RunReport, DprError> {
    generate_dpr_at(input, options, Local::now().naive_local())
}

/// Runs the pipeline with an explicit timestamp for the file name.
///
/// Steps:
/// 1. validate basic fields
/// 2. assemble the Annexure-3 outline, binding fields to slots
/// 3. render into a temp file beside the target, then rename into place
/// 4. build the run report from the final pool
pub fn generate_dpr_at(
    input: &ProjectInput,
    options: &GenerateOptions,
    timestamp: NaiveDateTime,
) -> Result<RunReport, DprError> {
    input.validate()?;
    info!(
        "Generating DPR for '{}' with {} field(s)",
        input.project_name,
        input.fields.len()
    );

    let matcher = FieldMatcher::default();
    let assembly = assemble(annexure3(), input, &matcher);
    for record in &assembly.matches {
        debug!(
            "slot '{}' <- '{}' (score {}, exact {})",
            record.slot, record.key, record.score, record.exact
        );
    }

    let renderer = renderer_for(options.format);
    let file_name = output_file_name(&input.project_name, timestamp, renderer.extension());
    let path = write_atomically(&options.output_dir, &file_name, |temp| {
        renderer.render(&assembly.document, temp)
    })?;

    let report = RunReport::new(input, path, &assembly);
    info!(
        "Fields filled: {} out of {} provided",
        report.fields_filled, report.fields_provided
    );
    Ok(report)
}

/// Natural-language path: extract fields, then generate.
pub async fn generate_from_description(
    extractor: &dyn FieldExtractor,
    description: &str,
    options: &GenerateOptions,
) -> Result<RunReport, DprError> {
    if description.trim().is_empty() {
        return Err(DprError::Validation("project description is empty".to_string()));
    }
    let input = extractor.extract(description).await?;
    generate_dpr(&input, options)
}
