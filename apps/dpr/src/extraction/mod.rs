//! Field extraction: turns user input into a `ProjectInput`.
//!
//! Two front ends produce the same shape. Direct input is parsed line by line
//! (`direct`); natural-language input goes through the LLM and is checked
//! against the payload schema (`schema`) before anything downstream sees it.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

pub mod direct;
pub mod prompts;
pub mod schema;

use crate::errors::DprError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_INVENTION_INSTRUCTION};
use crate::llm_client::{strip_json_fences, LlmClient};
use crate::models::input::ProjectInput;
use prompts::{EXTRACTION_PROMPT_TEMPLATE, EXTRACTION_SYSTEM};

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Turns a free-form project description into structured input.
/// Tests swap in a canned implementation; production uses `LlmFieldExtractor`.
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    async fn extract(&self, description: &str) -> Result<ProjectInput, DprError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmFieldExtractor
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmFieldExtractor {
    llm: LlmClient,
}

impl LlmFieldExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl FieldExtractor for LlmFieldExtractor {
    async fn extract(&self, description: &str) -> Result<ProjectInput, DprError> {
        let prompt = EXTRACTION_PROMPT_TEMPLATE.replace("{description}", description);
        let system = format!("{EXTRACTION_SYSTEM}\n\n{NO_INVENTION_INSTRUCTION}\n\n{JSON_ONLY_SYSTEM}");

        let raw = self.llm.complete(&prompt, &system).await?;
        let input = parse_extraction(&raw)?;
        info!(
            "Extracted project '{}' with {} field(s)",
            input.project_name,
            input.fields.len()
        );
        Ok(input)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing
// ────────────────────────────────────────────────────────────────────────────

/// Parses raw model output into a validated `ProjectInput`.
///
/// The text is parsed as JSON; if that fails, exactly one recovery is tried
/// (fence stripping, then the outermost `{...}` slice). The result is then
/// checked against the payload schema.
pub fn parse_extraction(raw: &str) -> Result<ProjectInput, DprError> {
    let value = match serde_json::from_str::<Value>(raw.trim()) {
        Ok(v) => v,
        Err(first) => {
            warn!("Model output is not bare JSON ({first}), attempting recovery");
            let recovered = recover_json(raw).ok_or_else(|| DprError::Extraction {
                message: format!("no JSON object found in model output ({first})"),
                raw: raw.to_string(),
            })?;
            serde_json::from_str::<Value>(recovered).map_err(|e| DprError::Extraction {
                message: format!("model output is not valid JSON: {e}"),
                raw: raw.to_string(),
            })?
        }
    };

    schema::validate_payload(&value).map_err(DprError::Schema)
}

/// Finds the JSON object inside fenced or chatty model output.
fn recover_json(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let unfenced = match trimmed.find("```") {
        Some(start) => strip_json_fences(&trimmed[start..]),
        None => trimmed,
    };
    let start = unfenced.find('{')?;
    let end = unfenced.rfind('}')?;
    (start < end).then(|| &unfenced[start..=end])
}
