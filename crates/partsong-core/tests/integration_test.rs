//! End-to-end tests: documents on disk through the rule engine and the
//! constraint checker.

use partsong_core::constraints::can_submit_progression;
use partsong_core::theory::{can_add_note_to_chord, validate_chord, StructureWarning};
use partsong_core::validation::{FnRule, RulePriority};
use partsong_core::{
    validate_constraints, ChordProgression, ExerciseId, ExerciseSet, Note, RuleEngine,
    ValidationResult, Voice,
};
use std::io::Write;
use std::path::PathBuf;

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data").join(name)
}

/// Test that the shipped cadence passes every chapter 1 rule
#[test]
fn test_cadence_is_clean() {
    let progression = ChordProgression::load(&data_file("progressions/cadence.toml"))
        .expect("Failed to load cadence");
    assert_eq!(progression.len(), 4);
    assert_eq!(progression.labels().collect::<Vec<_>>(), vec!["I", "IV", "V", "I"]);

    let engine = RuleEngine::with_basic_rules();
    let result = engine.validate(&progression, 1);
    assert!(result.is_valid(), "unexpected errors: {:?}", result.errors);

    for chord in &progression.chords {
        assert!(validate_chord(chord.notes()).unwrap().is_valid());
    }
}

/// Test that the parallels example trips both parallel rules, in priority order
#[test]
fn test_parallels_document() {
    let progression = ChordProgression::load(&data_file("progressions/parallels.json"))
        .expect("Failed to load parallels");

    let result = RuleEngine::with_basic_rules().validate(&progression, 1);
    let ids: Vec<&str> = result.errors.iter().map(|e| e.rule_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["parallel-fifths", "parallel-fifths", "parallel-octaves"],
        "errors: {:?}",
        result.errors
    );
    assert!(result.errors.iter().all(|e| e.affected_chords == vec![0, 1]));
    assert_eq!(result.errors[2].affected_voices, vec![Voice::Tenor, Voice::Bass]);
}

/// Test that structural errors sort ahead of voice-leading errors
#[test]
fn test_structure_errors_come_first() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(
        br#"
key = "C major"

[[chords]]
notes = ["G4", "E4", "C4", "C3"]

[[chords]]
notes = ["A4", "F4", "D4", "D3"]

[[chords]]
notes = ["C6", "F4", "D4", "D3"]
"#,
    )
    .unwrap();

    let progression = ChordProgression::load(file.path()).unwrap();
    let result = RuleEngine::with_basic_rules().validate(&progression, 1);
    assert!(!result.is_valid());
    assert_eq!(result.errors[0].rule_id, "voice-range");
    assert_eq!(result.errors[0].affected_chords, vec![2]);
    assert!(result.errors[1..].iter().all(|e| e.rule_id.starts_with("parallel-")));
}

/// Test that later chapters keep earlier rules and add their own
#[test]
fn test_custom_rule_in_later_chapter() {
    let mut engine = RuleEngine::with_basic_rules();
    engine.register(Box::new(FnRule::new(
        "no-repeated-labels",
        "No repeated labels",
        3,
        RulePriority::Style.value(),
        |progression: &ChordProgression, index: usize| {
            let repeated = index > 0
                && progression.chords[index].label().is_some()
                && progression.chords[index].label() == progression.chords[index - 1].label();
            if repeated {
                ValidationResult::from_errors(vec![partsong_core::ValidationError {
                    rule_id: "no-repeated-labels".to_string(),
                    rule_name: "No repeated labels".to_string(),
                    message: "same chord twice in a row".to_string(),
                    chapter_reference: "Chapter 3".to_string(),
                    affected_voices: Voice::ALL.to_vec(),
                    affected_chords: vec![index - 1, index],
                }])
            } else {
                ValidationResult::success()
            }
        },
    )));

    let mut progression = ChordProgression::load(&data_file("progressions/cadence.toml")).unwrap();
    progression.chords.push(progression.chords[3].clone());

    assert!(engine.validate(&progression, 2).is_valid());
    let result = engine.validate(&progression, 3);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].affected_chords, vec![3, 4]);
}

/// Test that every shipped solution passes both the rules and its constraints
#[test]
fn test_shipped_exercises_are_solvable() {
    let set = ExerciseSet::load(&data_file("exercises.toml")).expect("Failed to load exercises");
    assert!(set.check().is_valid());
    assert!(set.check().warnings.is_empty());

    let engine = RuleEngine::with_basic_rules();
    for exercise in set.exercises() {
        let rules = engine.validate(&exercise.solution, exercise.chapter);
        assert!(rules.is_valid(), "{}: {:?}", exercise.id, rules.errors);

        let constraints = validate_constraints(&exercise.solution, exercise.constraints.as_ref());
        assert!(constraints.is_valid(), "{}: {:?}", exercise.id, constraints.violations);
        assert!(can_submit_progression(
            &exercise.solution,
            exercise.constraints.as_ref(),
            exercise.expected_length
        ));
    }

    let first = set.exercise(ExerciseId::new(1, 1)).unwrap();
    assert_eq!(first.starting_progression().len(), 1);
}

/// Test building a chord one voice at a time
#[test]
fn test_incremental_chord_entry() {
    let n = |s: &str| s.parse::<Note>().unwrap();
    let mut partial: [Option<Note>; 4] = [None, None, None, None];

    partial[0] = Some(n("E5"));
    assert!(can_add_note_to_chord(&partial, &n("C5"), 1).warnings.is_empty());
    assert!(!can_add_note_to_chord(&partial, &n("C5"), 4).is_valid());

    // Alto an octave and a third below the soprano.
    partial[1] = Some(n("C4"));
    let report = can_add_note_to_chord(&partial, &n("C3"), 3);
    assert!(report.is_valid());
    assert!(matches!(
        report.warnings.as_slice(),
        [StructureWarning::WideSpacing { upper: Voice::Soprano, lower: Voice::Alto, .. }]
    ));
}
