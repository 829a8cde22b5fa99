//! CSV writer for the final leaderboard.
//!
//! One `Name,Score` header row, then one row per player.

use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::parse::ScoreEntry;

/// CSV header row.
const CSV_HEADER: &str = "Name,Score";

/// Default output file name.
pub const DEFAULT_FILE_NAME: &str = "monster_invasion_scores.csv";

/// Appends `.csv` unless the name already ends with it.
pub fn with_csv_extension(file_name: &str) -> String {
    if file_name.ends_with(".csv") {
        file_name.to_string()
    } else {
        format!("{}.csv", file_name)
    }
}

/// Full output path for `file_name` inside `output_dir`.
pub fn output_path(output_dir: &Path, file_name: &str) -> PathBuf {
    output_dir.join(with_csv_extension(file_name))
}

/// Quotes a field if it contains a comma, quote or line break.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Writes the entries to `path`, replacing any existing file.
///
/// Creates the parent directory if needed.
pub fn write_scores(path: &Path, entries: &[ScoreEntry]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output dir: {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", CSV_HEADER).context("Failed to write CSV header")?;
    for entry in entries {
        writeln!(
            writer,
            "{},{}",
            escape_field(&entry.name),
            escape_field(&entry.score)
        )
        .context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV file")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(name: &str, score: &str) -> ScoreEntry {
        ScoreEntry {
            name: name.to_string(),
            score: score.to_string(),
        }
    }

    #[test]
    fn test_with_csv_extension() {
        assert_eq!(with_csv_extension("scores"), "scores.csv");
        assert_eq!(with_csv_extension("scores.csv"), "scores.csv");
        assert_eq!(
            output_path(Path::new("output"), "week1"),
            Path::new("output").join("week1.csv")
        );
    }

    #[test]
    fn test_write_scores() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("out").join("test.csv");

        write_scores(&csv_path, &[entry("Alice", "12.5M"), entry("Bob", "3B")]).unwrap();

        let content = std::fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["Name,Score", "Alice,12.5M", "Bob,3B"]);
    }

    #[test]
    fn test_write_scores_quotes_special_names() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("test.csv");

        write_scores(&csv_path, &[entry("Smith, J", "1M"), entry("The \"Boss\"", "2M")])
            .unwrap();

        let content = std::fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "\"Smith, J\",1M");
        assert_eq!(lines[2], "\"The \"\"Boss\"\"\",2M");
    }

    #[test]
    fn test_write_scores_replaces_existing() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("test.csv");
        std::fs::write(&csv_path, "old,data\n1,2\n3,4\n").unwrap();

        write_scores(&csv_path, &[]).unwrap();

        let content = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(content, "Name,Score\n");
    }
}
