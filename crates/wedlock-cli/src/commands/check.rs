//! Check command implementation.
//!
//! Reads the snapshot file strictly and reports everything the server would
//! silently skip or repair when loading it.

use crate::error::Result;
use crate::output::Formatter;
use serde::Serialize;
use std::fs;
use wedlock_host::HostConfig;
use wedlock_store::codec;
use wedlock_store::JsonSnapshotFile;

/// Findings for one snapshot file
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    /// File that was checked
    pub path: String,
    /// Couples that survive loading
    pub couples: usize,
    /// Of those, couples with a color
    pub colored: usize,
    /// Entries that could not be decoded
    pub skipped: Vec<String>,
    /// Repairs applied while loading
    pub repairs: Vec<String>,
    /// Couple colors missing from the configured palette
    pub off_palette: Vec<String>,
}

impl CheckReport {
    /// Every finding, in report order
    pub fn problems(&self) -> impl Iterator<Item = &str> {
        self.skipped
            .iter()
            .chain(&self.repairs)
            .chain(&self.off_palette)
            .map(String::as_str)
    }

    /// Number of findings
    pub fn problem_count(&self) -> usize {
        self.skipped.len() + self.repairs.len() + self.off_palette.len()
    }
}

/// Execute the check command.
///
/// Fails when the file is missing or not a JSON document; findings inside a
/// readable file are reported but do not fail.
pub fn execute_check(
    file: &JsonSnapshotFile,
    config: &HostConfig,
    formatter: &Formatter,
) -> Result<()> {
    let report = check_file(file, config)?;
    println!("{}", formatter.format_check(&report)?);
    Ok(())
}

fn check_file(file: &JsonSnapshotFile, config: &HostConfig) -> Result<CheckReport> {
    let contents = fs::read_to_string(file.path())?;
    let decoded = codec::decode_report(&contents)?;
    let (snapshot, repairs) = codec::sanitize(decoded.snapshot);

    let off_palette = snapshot
        .colors
        .iter()
        .filter(|(_, color)| !config.uses_color(**color))
        .map(|(couple, color)| format!("couple {} has color {} outside the palette", couple, color))
        .collect();

    Ok(CheckReport {
        path: file.path().display().to_string(),
        couples: snapshot.couples().len(),
        colored: snapshot.colors.len(),
        skipped: decoded.skipped,
        repairs,
        off_palette,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use tempfile::TempDir;
    use wedlock_domain::PlayerId;

    #[test]
    fn test_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let file = JsonSnapshotFile::new(dir.path().join("absent.json"));
        assert!(matches!(
            check_file(&file, &HostConfig::default()),
            Err(CliError::Io(_))
        ));
    }

    #[test]
    fn test_reports_every_kind_of_problem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("marriagemod.json");
        let (a, b, c) = (
            PlayerId::from_value(1),
            PlayerId::from_value(2),
            PlayerId::from_value(3),
        );
        fs::write(
            &path,
            format!(
                r#"{{
                    "marriedPlayers": {{ "{a}": "{b}", "{b}": "{a}", "{c}": "{a}", "nobody": "{a}" }},
                    "coupleColors": {{ "{a}": "dark_red" }}
                }}"#
            ),
        )
        .unwrap();

        let report = check_file(&JsonSnapshotFile::new(&path), &HostConfig::default()).unwrap();
        assert_eq!(report.couples, 1);
        assert_eq!(report.colored, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.repairs.len(), 1);
        assert_eq!(report.off_palette.len(), 1);
        assert_eq!(report.problem_count(), 3);
    }

    #[test]
    fn test_clean_file() {
        let dir = TempDir::new().unwrap();
        let file = JsonSnapshotFile::new(dir.path().join("marriagemod.json"));
        file.save(&wedlock_domain::Snapshot::new()).unwrap();

        let report = check_file(&file, &HostConfig::default()).unwrap();
        assert_eq!(report.problem_count(), 0);
        assert_eq!(report.problems().count(), 0);
    }
}
