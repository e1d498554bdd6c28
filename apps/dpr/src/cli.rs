//! Command-line surface and input collection.
//!
//! Input readers take any `BufRead`/`Write` pair so the interactive flows can
//! be driven from tests.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::warn;

use crate::errors::DprError;
use crate::extraction::direct::{parse_line, parse_lines, DirectLine};
use crate::models::input::{FieldMap, ProjectInput};
use crate::render::OutputFormat;

/// Line that ends a natural-language description on stdin.
const DESCRIPTION_TERMINATOR: &str = "END";

#[derive(Parser)]
#[command(name = "dpr")]
#[command(about = "Generate an MSE-CDP Annexure-3 Detailed Project Report")]
#[command(version)]
pub struct Cli {
    /// Directory for the generated file (default: $DPR_OUTPUT_DIR or ~/Downloads)
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pdf)]
    pub format: OutputFormat,

    /// Print the run report (or, for `validate`, the checked payload) as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Supply fields as key=value lines (key=[a,b,c] for lists)
    Direct(DirectArgs),
    /// Describe the project in plain language; fields are extracted by the model
    Natural {
        /// Read the description from a file instead of stdin
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Check a saved extraction JSON file against the payload schema
    Validate {
        file: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
pub struct DirectArgs {
    #[arg(long)]
    pub project: Option<String>,

    /// Candidate / SPV name
    #[arg(long)]
    pub candidate: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    /// A field as key=value; repeatable. Disables the interactive prompt.
    #[arg(long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// Read key=value lines from a file. Disables the interactive prompt.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

// ────────────────────────────────────────────────────────────────────────────
// Direct input
// ────────────────────────────────────────────────────────────────────────────

/// Gathers basic fields and key=value fields for the direct path.
///
/// Basic fields missing from the flags are prompted for. Fields come from
/// `--field` flags, then `--input FILE`; with neither, lines are read from
/// `reader` until `done` or end of input.
pub fn collect_direct_input<R: BufRead, W: Write>(
    args: &DirectArgs,
    reader: &mut R,
    prompt: &mut W,
) -> Result<ProjectInput, DprError> {
    let project_name = basic_field(args.project.as_deref(), "Project Name", reader, prompt)?;
    let candidate_name = basic_field(args.candidate.as_deref(), "Candidate/SPV Name", reader, prompt)?;
    let address = basic_field(args.address.as_deref(), "Address", reader, prompt)?;

    let mut fields = FieldMap::new();
    for raw in &args.fields {
        match parse_line(raw) {
            Ok(DirectLine::Field { key, value }) => {
                fields.insert(key, value);
            }
            Ok(_) => {}
            Err(e) => {
                return Err(DprError::Validation(format!("--field '{raw}': {e}")));
            }
        }
    }

    if let Some(path) = &args.input {
        let contents = std::fs::read_to_string(path)?;
        let parsed = parse_lines(contents.lines());
        for (line, e) in &parsed.rejected {
            warn!("{}:{line}: {e}, skipped", path.display());
        }
        fields.extend(parsed.fields);
    } else if args.fields.is_empty() {
        read_interactive_fields(&mut fields, reader, prompt)?;
    }

    let input = ProjectInput {
        project_name,
        candidate_name,
        address,
        fields,
    };
    input.validate()?;
    Ok(input)
}

fn basic_field<R: BufRead, W: Write>(
    given: Option<&str>,
    label: &str,
    reader: &mut R,
    prompt: &mut W,
) -> Result<String, DprError> {
    if let Some(value) = given {
        return Ok(value.trim().to_string());
    }
    write!(prompt, "{label}: ")?;
    prompt.flush()?;
    Ok(read_line(reader)?.unwrap_or_default().trim().to_string())
}

fn read_interactive_fields<R: BufRead, W: Write>(
    fields: &mut FieldMap,
    reader: &mut R,
    prompt: &mut W,
) -> Result<(), DprError> {
    writeln!(prompt, "Enter key=value pairs (key=[a,b,c] for lists). Type 'done' when finished.")?;
    loop {
        write!(prompt, "Enter data (or 'done'): ")?;
        prompt.flush()?;
        let Some(line) = read_line(reader)? else {
            break;
        };
        match parse_line(&line) {
            Ok(DirectLine::Done) => break,
            Ok(DirectLine::Blank) => {}
            Ok(DirectLine::Field { key, value }) => {
                writeln!(prompt, "✓ Added: {key}")?;
                fields.insert(key, value);
            }
            Err(e) => writeln!(prompt, "✗ {e}")?,
        }
    }
    writeln!(prompt, "✓ Total {} data fields captured", fields.len())?;
    Ok(())
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>, DprError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Natural-language input
// ────────────────────────────────────────────────────────────────────────────

/// Reads a description until a line reading `END` or end of input.
pub fn read_description<R: BufRead, W: Write>(reader: &mut R, prompt: &mut W) -> Result<String, DprError> {
    writeln!(
        prompt,
        "Describe your project. Finish with a line containing only {DESCRIPTION_TERMINATOR}."
    )?;
    let mut lines = Vec::new();
    while let Some(line) = read_line(reader)? {
        if line.trim() == DESCRIPTION_TERMINATOR {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::input::FieldValue;
    use std::io::Cursor;

    fn run_direct(args: &DirectArgs, stdin: &str) -> (Result<ProjectInput, DprError>, String) {
        let mut reader = Cursor::new(stdin.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = collect_direct_input(args, &mut reader, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_cli_parses_direct_flags() {
        let cli = Cli::try_parse_from([
            "dpr",
            "--format",
            "text",
            "direct",
            "--project",
            "Textile CFC",
            "--field",
            "Technology=Looms",
            "--field",
            "Income=[1,2]",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.json);
        match cli.command {
            Command::Direct(args) => {
                assert_eq!(args.project.as_deref(), Some("Textile CFC"));
                assert_eq!(args.fields.len(), 2);
            }
            _ => panic!("expected direct"),
        }
    }

    #[test]
    fn test_interactive_session() {
        let (result, prompts) = run_direct(
            &DirectArgs::default(),
            "Textile CFC\nAcme SPV\nPune\nTechnology=Looms\nnot a pair\nAge (years)=[35,42]\ndone\nLate=ignored\n",
        );
        let input = result.unwrap();
        assert_eq!(input.project_name, "Textile CFC");
        assert_eq!(input.address, "Pune");
        let keys: Vec<&str> = input.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Technology", "Age (years)"]);
        assert!(prompts.contains("Project Name: "));
        assert!(prompts.contains("✗ invalid format, expected key=value"));
    }

    #[test]
    fn test_eof_ends_interactive_input() {
        let (result, _) = run_direct(&DirectArgs::default(), "P\nC\nA\nProfit=50");
        assert_eq!(result.unwrap().fields["Profit"], FieldValue::from("50"));
    }

    #[test]
    fn test_missing_basic_field_is_validation_error() {
        let args = DirectArgs {
            project: Some("P".into()),
            candidate: Some("C".into()),
            fields: vec!["Technology=Looms".into()],
            ..Default::default()
        };
        let (result, _) = run_direct(&args, "\n");
        assert_eq!(result.unwrap_err().exit_code(), 2);
    }

    #[test]
    fn test_field_flags_skip_prompt() {
        let args = DirectArgs {
            project: Some("P".into()),
            candidate: Some("C".into()),
            address: Some("A".into()),
            fields: vec!["Technology=Looms".into()],
            input: None,
        };
        let (result, prompts) = run_direct(&args, "Other=value\ndone\n");
        assert_eq!(result.unwrap().fields.len(), 1);
        assert!(prompts.is_empty());
    }

    #[test]
    fn test_bad_field_flag_rejected() {
        let args = DirectArgs {
            project: Some("P".into()),
            candidate: Some("C".into()),
            address: Some("A".into()),
            fields: vec!["Technology".into()],
            input: None,
        };
        let (result, _) = run_direct(&args, "");
        assert!(matches!(result, Err(DprError::Validation(_))));
    }

    #[test]
    fn test_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fields.txt");
        std::fs::write(&path, "Technology=Looms\nbroken\nIncome=[1,2]\n").unwrap();
        let args = DirectArgs {
            project: Some("P".into()),
            candidate: Some("C".into()),
            address: Some("A".into()),
            fields: vec![],
            input: Some(path),
        };
        let (result, _) = run_direct(&args, "");
        let input = result.unwrap();
        assert_eq!(input.fields.len(), 2);
        assert_eq!(input.fields["Income"], FieldValue::from(vec!["1", "2"]));
    }

    #[test]
    fn test_read_description_stops_at_end() {
        let mut reader = Cursor::new(b"Line one\nLine two\nEND\nafter\n".to_vec());
        let mut out = Vec::new();
        assert_eq!(read_description(&mut reader, &mut out).unwrap(), "Line one\nLine two");
    }
}
