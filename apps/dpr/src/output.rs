//! Output file naming and placement.
//!
//! Files are named `DPR_<sanitized project name>_<YYYYMMDD_HHMMSS>.<ext>` and
//! land in the configured output directory. Rendering happens into a temp file
//! in that same directory, which is then renamed into place, so a failed
//! render never leaves a partial file under the final name.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::info;

use crate::errors::DprError;

const UNSAFE_FILENAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
const MAX_NAME_CHARS: usize = 50;
const FALLBACK_NAME: &str = "project";

/// Removes characters that are unsafe in file names, turns spaces into `_`,
/// and keeps at most 50 characters.
pub fn sanitize_project_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .filter(|c| !UNSAFE_FILENAME_CHARS.contains(c) && !c.is_control())
        .map(|c| if c == ' ' { '_' } else { c })
        .take(MAX_NAME_CHARS)
        .collect();

    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned
    }
}

pub fn output_file_name(project_name: &str, timestamp: NaiveDateTime, extension: &str) -> String {
    format!(
        "DPR_{}_{}.{}",
        sanitize_project_name(project_name),
        timestamp.format("%Y%m%d_%H%M%S"),
        extension
    )
}

/// Runs `render` against a temp path inside `dir` and moves the result to
/// `dir/file_name`. The directory is created if missing.
pub fn write_atomically<F>(dir: &Path, file_name: &str, render: F) -> Result<PathBuf, DprError>
where
    F: FnOnce(&Path) -> Result<(), DprError>,
{
    std::fs::create_dir_all(dir)?;

    let temp = tempfile::Builder::new()
        .prefix(".dpr-")
        .suffix(".partial")
        .tempfile_in(dir)?;
    render(temp.path())?;

    let target = dir.join(file_name);
    temp.persist(&target).map_err(|e| DprError::Io(e.error))?;
    info!("Wrote {}", target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 9)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .unwrap()
    }

    #[test]
    fn test_sanitize_removes_unsafe_chars() {
        assert_eq!(sanitize_project_name("A/B: Test?"), "AB_Test");
    }

    #[test]
    fn test_sanitize_truncates_to_fifty_chars() {
        let name = "x".repeat(80);
        assert_eq!(sanitize_project_name(&name).chars().count(), 50);
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_project_name("???"), "project");
    }

    #[test]
    fn test_output_file_name_format() {
        assert_eq!(
            output_file_name("A/B: Test?", at(14, 5, 9), "pdf"),
            "DPR_AB_Test_20260309_140509.pdf"
        );
    }

    #[test]
    fn test_write_atomically_creates_dir_and_file() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("out");
        let path = write_atomically(&dir, "DPR_x.txt", |p| {
            std::fs::write(p, "hello")?;
            Ok(())
        })
        .unwrap();
        assert_eq!(path, dir.join("DPR_x.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_render_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let result = write_atomically(dir.path(), "DPR_x.pdf", |_| {
            Err(DprError::Render("boom".to_string()))
        });
        assert!(matches!(result, Err(DprError::Render(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
