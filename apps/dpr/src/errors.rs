use thiserror::Error;

use crate::extraction::schema::SchemaViolation;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Every failure a run can hit ends up here; `exit_code` maps it onto the
/// process status the CLI returns.
#[derive(Debug, Error)]
pub enum DprError {
    #[error("Extraction failed: {message}")]
    Extraction { message: String, raw: String },

    #[error("Extraction output failed schema validation ({} violation(s))", .0.len())]
    Schema(Vec<SchemaViolation>),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DprError {
    pub fn exit_code(&self) -> u8 {
        match self {
            DprError::Validation(_) => 2,
            DprError::Extraction { .. } | DprError::Schema(_) => 3,
            DprError::Llm(_) => 4,
            DprError::Render(_) | DprError::Io(_) => 5,
            DprError::Internal(_) => 1,
        }
    }

    /// Logs the error with whatever diagnostics it carries. The raw model
    /// output and each schema violation only go to the log, never to stdout.
    pub fn log(&self) {
        match self {
            DprError::Extraction { message, raw } => {
                tracing::error!("Extraction failed: {message}");
                tracing::error!("Raw model output:\n{raw}");
            }
            DprError::Schema(violations) => {
                tracing::error!("Extraction output rejected by schema");
                for violation in violations {
                    tracing::error!("  {violation}");
                }
            }
            DprError::Llm(e) => tracing::error!("LLM error: {e}"),
            DprError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            other => tracing::error!("{other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_category() {
        assert_eq!(DprError::Validation("x".into()).exit_code(), 2);
        assert_eq!(
            DprError::Extraction {
                message: "bad".into(),
                raw: "{".into()
            }
            .exit_code(),
            3
        );
        assert_eq!(DprError::Schema(vec![]).exit_code(), 3);
        assert_eq!(DprError::Llm(LlmError::EmptyContent).exit_code(), 4);
        assert_eq!(DprError::Render("x".into()).exit_code(), 5);
        assert_eq!(
            DprError::Internal(anyhow::anyhow!("boom")).exit_code(),
            1
        );
    }

    #[test]
    fn test_schema_message_counts_violations() {
        let err = DprError::Schema(vec![
            SchemaViolation::new("project_name", "required key is missing"),
            SchemaViolation::new("fields", "expected an object, found array"),
        ]);
        assert!(err.to_string().contains("2 violation(s)"));
    }
}
