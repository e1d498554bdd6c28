//! End-of-run summary: who the report is for, where it was written, how many
//! fields were placed, and which keys were and were not used.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::errors::DprError;
use crate::generation::assembler::{Assembly, MatchRecord};
use crate::models::input::ProjectInput;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub project_name: String,
    pub candidate_name: String,
    pub address: String,
    pub output_path: PathBuf,
    pub fields_provided: usize,
    pub fields_filled: usize,
    /// Sorted.
    pub used_keys: Vec<String>,
    /// Sorted.
    pub unused_keys: Vec<String>,
    pub matches: Vec<MatchRecord>,
}

impl RunReport {
    pub fn new(input: &ProjectInput, output_path: PathBuf, assembly: &Assembly) -> Self {
        Self {
            project_name: input.project_name.trim().to_string(),
            candidate_name: input.candidate_name.trim().to_string(),
            address: input.address.trim().to_string(),
            output_path,
            fields_provided: assembly.pool.len(),
            fields_filled: assembly.pool.consumed_count(),
            used_keys: assembly.pool.consumed_keys(),
            unused_keys: assembly.pool.unused_keys(),
            matches: assembly.matches.clone(),
        }
    }

    /// Machine-readable form for `--json`.
    pub fn to_json(&self) -> Result<String, DprError> {
        serde_json::to_string_pretty(self).map_err(|e| DprError::Internal(e.into()))
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Project Name: {}", self.project_name)?;
        writeln!(f, "Candidate/SPV: {}", self.candidate_name)?;
        writeln!(f, "Address: {}", self.address)?;
        if let Some(name) = self.output_path.file_name() {
            writeln!(f, "Filename: {}", name.to_string_lossy())?;
        }
        writeln!(f, "Full path: {}", self.output_path.display())?;
        writeln!(
            f,
            "Fields filled: {} out of {} provided",
            self.fields_filled, self.fields_provided
        )?;

        if !self.used_keys.is_empty() {
            writeln!(f, "\nSuccessfully filled keys:")?;
            for key in &self.used_keys {
                writeln!(f, "  - {key}")?;
            }
        }
        if !self.unused_keys.is_empty() {
            writeln!(f, "\nUnused keys (no match found):")?;
            for key in &self.unused_keys {
                writeln!(f, "  - {key}")?;
            }
        }
        Ok(())
    }
}
