use anyhow::{Context, Result};
use partsong_core::theory::{validate_chord, ChordReport};
use partsong_core::{ChordProgression, RuleEngine, ValidationError};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct CheckReport {
    file: String,
    key: String,
    chapter: u32,
    valid: bool,
    errors: Vec<ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    structure: Option<Vec<ChordReport>>,
}

fn build_report(
    path: &Path,
    progression: &ChordProgression,
    chapter: u32,
    structure: bool,
) -> Result<CheckReport> {
    let result = RuleEngine::with_basic_rules().validate(progression, chapter);

    let structure = if structure {
        let reports = progression
            .chords
            .iter()
            .map(|chord| validate_chord(chord.notes()))
            .collect::<partsong_core::Result<Vec<_>>>()?;
        Some(reports)
    } else {
        None
    };

    Ok(CheckReport {
        file: path.display().to_string(),
        key: progression.key.clone(),
        chapter,
        valid: result.is_valid(),
        errors: result.errors,
        structure,
    })
}

/// Validate a progression document. Returns whether it passed every rule.
pub fn run_check(path: &Path, chapter: u32, json: bool, structure: bool) -> Result<bool> {
    let progression = ChordProgression::load(path)
        .with_context(|| format!("Failed to load progression from {}", path.display()))?;
    let report = build_report(path, &progression, chapter, structure)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(report.valid);
    }

    println!(
        "\nChecking {} ({} chords in {}, chapter {})\n",
        report.file,
        progression.len(),
        report.key,
        chapter
    );

    if report.valid {
        println!("✓ No part-writing errors");
    } else {
        println!("✗ {} error(s):", report.errors.len());
        for error in &report.errors {
            println!("  {error}");
        }
    }

    if let Some(reports) = &report.structure {
        println!("\nChord structure:");
        for (index, (chord, findings)) in progression.chords.iter().zip(reports).enumerate() {
            let notes: Vec<String> = chord.notes().iter().map(ToString::to_string).collect();
            let label = chord.label().unwrap_or("-");
            if findings.errors.is_empty() && findings.warnings.is_empty() {
                println!("  {}. {label} [{}] ok", index + 1, notes.join(" "));
                continue;
            }
            println!("  {}. {label} [{}]", index + 1, notes.join(" "));
            for error in &findings.errors {
                println!("       error: {error}");
            }
            for warning in &findings.warnings {
                println!("       warning: {warning}");
            }
        }
    }

    Ok(report.valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_progression(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_report_for_parallel_fifths() {
        let file = write_progression(
            r#"
key = "C major"

[[chords]]
notes = ["E4", "C4", "G3", "C3"]

[[chords]]
notes = ["F4", "D4", "A3", "D3"]
"#,
        );
        let progression = ChordProgression::load(file.path()).unwrap();

        let report = build_report(file.path(), &progression, 1, false).unwrap();
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].rule_id, "parallel-fifths");
        assert!(report.structure.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["chapter"], 1);
        assert!(json.get("structure").is_none());
    }

    #[test]
    fn test_structure_findings_do_not_fail_check() {
        let file = write_progression(
            r#"
key = "C major"

[[chords]]
label = "I"
notes = ["C5", "C4", "E3", "C3"]
"#,
        );
        let progression = ChordProgression::load(file.path()).unwrap();

        let report = build_report(file.path(), &progression, 1, true).unwrap();
        assert!(report.valid);
        let structure = report.structure.unwrap();
        assert_eq!(structure.len(), 1);
        assert!(structure[0].is_valid());
        assert!(!structure[0].warnings.is_empty());
    }

    #[test]
    fn test_missing_file() {
        assert!(run_check(Path::new("/nonexistent/progression.toml"), 1, false, false).is_err());
    }
}
