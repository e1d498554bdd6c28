// LLM prompt constants for field extraction.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for DPR field extraction.
pub const EXTRACTION_SYSTEM: &str =
    "You are an analyst who prepares Detailed Project Reports (DPR) for Common \
    Facility Centres under the MSE Cluster Development Programme. \
    Read a free-form project description and map every fact in it onto the \
    field names of the Annexure-3 proposal format.";

/// Extraction prompt template. Replace `{description}` before sending.
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract the DPR fields from the project description below.

Return a JSON object with this EXACT schema:
{
  "project_name": "short project title",
  "candidate_name": "name of the SPV / applicant",
  "address": "registered address of the SPV",
  "fields": {
    "Field_Name": "value",
    "Other_Field": ["value for column 1", "value for column 2"]
  }
}

Field naming rules:
- Name a field after the row label or heading it answers, words joined by "_".
  Examples: "Registration_details_of_SPV", "Number_of_MSE_Member_Units",
  "Main_objectives_of_the_SPV", "Implementation_Period", "Technology",
  "Raw_materials_/_components", "Effluent_disposal", "Land_and_Building",
  "Margin_money_for_Working_Capital", "Total", "Usage_Charges", "Conclusion".
- Table rows with several columns take a list, one item per column, in column order:
  - promoters table (up to 7 people): "Age_(years)": ["45", "52"]
  - financial projections FY1..FY5: "Net_Block": ["100", "95", "90", "85", "80"]
  - cluster performance before/after intervention: "Employment": ["200", "500"]
  - implementation schedule start/completion: "Trial_Run": ["Jan 2026", "Mar 2026"]
- Narrative answers are plain strings; separate paragraphs with a blank line.
- All values are strings. Write numbers as strings, e.g. "250" or "250 lakh".
- Leave out any field the description says nothing about.

Project description:
{description}"#;
