use indexmap::IndexMap;
use serde::Serialize;

use crate::errors::DprError;

/// A value supplied for a field: one string, or an ordered list of strings
/// that fills consecutive table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    Sequence(Vec<String>),
}

impl FieldValue {
    /// A value with nothing printable in it never binds to a slot.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Scalar(s) => s.trim().is_empty(),
            FieldValue::Sequence(items) => items.iter().all(|s| s.trim().is_empty()),
        }
    }

    /// Text shown under a narrative heading. Sequences are joined with ", ".
    pub fn display_text(&self) -> String {
        match self {
            FieldValue::Scalar(s) => s.clone(),
            FieldValue::Sequence(items) => items.join(", "),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Scalar(s.to_string())
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::Sequence(items.into_iter().map(str::to_string).collect())
    }
}

/// Field keys in the order they were supplied. Order matters: it breaks ties
/// between equally scored candidates.
pub type FieldMap = IndexMap<String, FieldValue>;

/// Everything a generation run needs: the three basic fields plus the
/// free-form field map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectInput {
    pub project_name: String,
    pub candidate_name: String,
    pub address: String,
    pub fields: FieldMap,
}

impl ProjectInput {
    /// The basic fields are mandatory; nothing is generated without them.
    pub fn validate(&self) -> Result<(), DprError> {
        let missing: Vec<&str> = [
            ("project_name", &self.project_name),
            ("candidate_name", &self.candidate_name),
            ("address", &self.address),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DprError::Validation(format!(
                "basic fields are required: {}",
                missing.join(", ")
            )))
        }
    }

    /// "Name, Address" as printed in the SPV table's pre-filled row.
    pub fn name_and_address(&self) -> String {
        format!("{}, {}", self.candidate_name.trim(), self.address.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(project: &str, candidate: &str, address: &str) -> ProjectInput {
        ProjectInput {
            project_name: project.to_string(),
            candidate_name: candidate.to_string(),
            address: address.to_string(),
            fields: FieldMap::new(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        assert!(input("CFC", "SPV Ltd", "Pune").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_basic_fields() {
        let err = input("  ", "SPV Ltd", "").validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("project_name"));
        assert!(msg.contains("address"));
        assert!(!msg.contains("candidate_name"));
    }

    #[test]
    fn test_blank_values() {
        assert!(FieldValue::from("   ").is_blank());
        assert!(FieldValue::from(vec!["", " "]).is_blank());
        assert!(!FieldValue::from(vec!["", "35"]).is_blank());
    }

    #[test]
    fn test_display_text_joins_sequences() {
        assert_eq!(FieldValue::from(vec!["a", "b"]).display_text(), "a, b");
        assert_eq!(FieldValue::from("x").display_text(), "x");
    }

    #[test]
    fn test_serializes_as_plain_payload() {
        let mut payload = input("CFC", "SPV Ltd", "Pune");
        payload.fields.insert("Income".into(), vec!["10", "20"].into());
        payload.fields.insert("Technology".into(), "Looms".into());
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"project_name":"CFC","candidate_name":"SPV Ltd","address":"Pune","fields":{"Income":["10","20"],"Technology":"Looms"}}"#
        );
    }

    #[test]
    fn test_name_and_address() {
        assert_eq!(
            input("P", " Acme SPV ", "Plot 4, MIDC ").name_and_address(),
            "Acme SPV, Plot 4, MIDC"
        );
    }
}
