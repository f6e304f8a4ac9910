//! Integration tests for the liftplan binary.
//!
//! These tests verify end-to-end behavior including:
//! - Plan generation from flags and from a stored profile
//! - Saving, exporting and swapping exercises in saved plans
//! - Config and resource file overrides

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory with an empty config file
fn setup_test_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("config.toml"), "").expect("Failed to write config");
    temp_dir
}

/// CLI pointed at the temp dir for both data and config
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("liftplan"));
    cmd.arg("--data-dir")
        .arg(dir)
        .arg("--config")
        .arg(dir.join("config.toml"));
    cmd
}

fn generate_json(dir: &Path, args: &[&str]) -> Value {
    let output = cli(dir)
        .arg("generate")
        .args(args)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("stdout is not JSON")
}

fn exercise_names(plan: &Value) -> Vec<String> {
    plan["days"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|d| d["exercises"].as_array().unwrap().clone())
        .map(|e| e["name"].as_str().unwrap().to_string())
        .collect()
}

fn read_plan(dir: &Path, file: &str) -> Value {
    let contents = fs::read_to_string(dir.join("plans").join(file)).expect("Failed to read plan");
    serde_json::from_str(&contents).unwrap()
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("liftplan"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Training plan generator"));
}

#[test]
fn test_splits_lists_all_templates() {
    let temp_dir = setup_test_dir();
    let output = cli(temp_dir.path())
        .arg("splits")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.lines().count(), 15);
    assert!(text.lines().next().unwrap().contains("full body"));
    assert!(text.contains("push | pull | legs"));
}

#[test]
fn test_generate_from_flags_as_json() {
    let temp_dir = setup_test_dir();
    let plan = generate_json(
        temp_dir.path(),
        &["--frequency", "3", "--experience", "Advanced", "--gender", "male"],
    );

    assert_eq!(plan["split_index"], 4);
    assert_eq!(plan["days"].as_array().unwrap().len(), 3);

    let names = exercise_names(&plan);
    let unique: HashSet<_> = names.iter().collect();
    assert!(!names.is_empty());
    assert_eq!(names.len(), unique.len(), "exercise repeated in {:?}", names);

    let muscles = plan["days"][0]["muscles"].as_array().unwrap();
    assert!(!muscles.is_empty());
}

#[test]
fn test_generate_expands_shoulder_priority() {
    let temp_dir = setup_test_dir();
    let plan = generate_json(
        temp_dir.path(),
        &["--frequency", "5", "--experience", "novice", "--priorities", " Shoulders "],
    );

    assert_eq!(plan["split_index"], 3);
    assert_eq!(
        plan["prioritized"],
        serde_json::json!(["front delts", "side delts", "rear delts"])
    );
}

#[test]
fn test_generate_text_output() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("generate")
        .args(["--frequency", "1", "--experience", "novice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Split 0 (1 days): full body"))
        .stdout(predicate::str::contains("Day 1:"))
        .stdout(predicate::str::contains("  1. "));
}

#[test]
fn test_generate_reads_stored_profile() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("profile.json"),
        r#"{"frequency": 7, "experience": "elite", "gender": "female", "prioritized_muscle_groups": ""}"#,
    )
    .unwrap();

    let plan = generate_json(temp_dir.path(), &[]);
    assert_eq!(plan["split_index"], 7);
    assert_eq!(plan["days"].as_array().unwrap().len(), 7);
}

#[test]
fn test_profile_command_feeds_flagless_generate() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("profile")
        .args(["--frequency", "7", "--experience", "elite", "--gender", "female"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved profile"));

    assert!(temp_dir.path().join("profile.json").exists());

    let plan = generate_json(temp_dir.path(), &[]);
    assert_eq!(plan["split_index"], 7);
    assert_eq!(plan["days"].as_array().unwrap().len(), 7);
}

#[test]
fn test_profile_command_rejects_bad_frequency() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("profile")
        .args(["--frequency", "9", "--experience", "novice"])
        .assert()
        .failure();

    assert!(!temp_dir.path().join("profile.json").exists());
}

#[test]
fn test_generate_without_profile_fails() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no profile"));
}

#[test]
fn test_out_of_range_frequency_fails() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("generate")
        .args(["--frequency", "8", "--experience", "novice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("training frequency"));
}

#[test]
fn test_unknown_experience_fails() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("generate")
        .args(["--frequency", "3", "--experience", "expert"])
        .assert()
        .failure();
}

#[test]
fn test_frequency_requires_experience() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("generate")
        .args(["--frequency", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--experience"));
}

#[test]
fn test_save_and_export_to_stdout() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("generate")
        .args(["--frequency", "2", "--experience", "beginner", "--save", "Upper Lower"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved plan 'Upper Lower'"));

    assert!(temp_dir.path().join("plans/upper_lower.json").exists());

    let output = cli(temp_dir.path())
        .arg("export")
        .args(["--plan", "Upper Lower"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("day,position,exercise,sets,reps"));
    let first = lines.next().unwrap();
    assert!(first.starts_with("1,1,"));
    assert!(first.ends_with(",3,10"));
}

#[test]
fn test_export_to_file_uses_configured_prescription() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[handoff]\nsets = 5\nreps = 5\n",
    )
    .unwrap();

    cli(temp_dir.path())
        .arg("generate")
        .args(["--frequency", "1", "--experience", "novice", "--save", "fb"])
        .assert()
        .success();

    let out = temp_dir.path().join("exports/fb.csv");
    cli(temp_dir.path())
        .arg("export")
        .args(["--plan", "fb", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported"));

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.lines().skip(1).all(|l| l.ends_with(",5,5")));
}

#[test]
fn test_export_unknown_plan_fails() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("export")
        .args(["--plan", "nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no saved plan"));
}

#[test]
fn test_swap_offers_alternatives_in_same_division() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("generate")
        .args(["--frequency", "1", "--experience", "novice", "--save", "fb"])
        .assert()
        .success();

    let plan = read_plan(temp_dir.path(), "fb.json");
    let current = plan["days"][0]["exercises"][0]["name"].as_str().unwrap().to_string();

    let output = cli(temp_dir.path())
        .arg("swap")
        .args(["--plan", "fb", "--day", "1", "--slot", "1", "--count", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();

    assert!(text.contains(&format!("Alternatives for {}", current)));
    assert!(text.contains("  1. "));
    assert!(text.contains("  2. "));

    // Not applied: the exercises are unchanged, only the offers are recorded
    let after = read_plan(temp_dir.path(), "fb.json");
    assert_eq!(after["days"], plan["days"]);
    let offered = after["offers"][0]["offered"].as_array().unwrap();
    assert_eq!(offered.len(), 3);
    assert!(offered.iter().any(|n| n == &Value::from(current.clone())));

    // A second run continues past the names already offered
    let output = cli(temp_dir.path())
        .arg("swap")
        .args(["--plan", "fb", "--day", "1", "--slot", "1", "--count", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let second = String::from_utf8(output).unwrap();
    for name in offered.iter().map(|n| n.as_str().unwrap()).filter(|n| *n != current) {
        assert!(!second.contains(name), "{} offered twice", name);
    }
}

#[test]
fn test_repeated_swap_apply_cycles_through_division() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("generate")
        .args(["--frequency", "1", "--experience", "novice", "--save", "fb"])
        .assert()
        .success();

    let original = read_plan(temp_dir.path(), "fb.json")["days"][0]["exercises"][0]["name"]
        .as_str()
        .unwrap()
        .to_string();

    let mut replacements = Vec::new();
    for _ in 0..3 {
        cli(temp_dir.path())
            .arg("swap")
            .args(["--plan", "fb", "--day", "1", "--slot", "1", "--apply"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Replaced"));

        let plan = read_plan(temp_dir.path(), "fb.json");
        replacements.push(plan["days"][0]["exercises"][0]["name"].as_str().unwrap().to_string());
    }

    assert!(!replacements.contains(&original), "{:?}", replacements);
    let unique: HashSet<_> = replacements.iter().collect();
    assert_eq!(unique.len(), 3, "{:?}", replacements);
}

#[test]
fn test_swap_apply_rewrites_plan_without_duplicates() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("generate")
        .args(["--frequency", "1", "--experience", "novice", "--save", "fb"])
        .assert()
        .success();

    let before = read_plan(temp_dir.path(), "fb.json");
    let current = before["days"][0]["exercises"][0]["name"].as_str().unwrap().to_string();

    cli(temp_dir.path())
        .arg("swap")
        .args(["--plan", "fb", "--day", "1", "--slot", "1", "--apply"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Replaced"));

    let after = read_plan(temp_dir.path(), "fb.json");
    assert_eq!(after["id"], before["id"]);

    let names: Vec<_> = after["days"][0]["exercises"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_string())
        .collect();
    assert_ne!(names[0], current);
    let unique: HashSet<_> = names.iter().collect();
    assert_eq!(unique.len(), names.len());
}

#[test]
fn test_swap_out_of_range_slot_fails() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("generate")
        .args(["--frequency", "1", "--experience", "novice", "--save", "fb"])
        .assert()
        .success();

    cli(temp_dir.path())
        .arg("swap")
        .args(["--plan", "fb", "--day", "1", "--slot", "99"])
        .assert()
        .failure();
}

#[test]
fn test_external_taxonomy_reports_gaps() {
    let temp_dir = setup_test_dir();
    let tree = temp_dir.path().join("tree.json");
    fs::write(
        &tree,
        r#"[
            {"level": 3, "name": "chest"},
            {"level": 4, "name": "upper chest"},
            {"level": 5, "name": "Incline Dumbbell Press"},
            {"level": 6, "name": "9"},
            {"level": 4, "name": "middle chest"},
            {"level": 5, "name": "Flat Dumbbell Press"},
            {"level": 6, "name": "not a number"}
        ]"#,
    )
    .unwrap();

    let plan = generate_json(
        temp_dir.path(),
        &[
            "--frequency", "1", "--experience", "novice", "--taxonomy",
            tree.to_str().unwrap(),
        ],
    );

    let names = exercise_names(&plan);
    assert_eq!(names, vec!["Incline Dumbbell Press"]);
    assert!(!plan["gaps"].as_array().unwrap().is_empty());
}

#[test]
fn test_empty_taxonomy_fails() {
    let temp_dir = setup_test_dir();
    let tree = temp_dir.path().join("tree.json");
    fs::write(&tree, "[]").unwrap();

    cli(temp_dir.path())
        .arg("generate")
        .args(["--frequency", "3", "--experience", "novice", "--taxonomy"])
        .arg(&tree)
        .assert()
        .failure()
        .stderr(predicate::str::contains("taxonomy has no"));
}

#[test]
fn test_invalid_catalog_fails() {
    let temp_dir = setup_test_dir();
    let catalog = temp_dir.path().join("catalog.json");
    fs::write(
        &catalog,
        r#"[{"name": "Dips", "type": "Compound", "icon": "", "primary_muscle": "chest"}]"#,
    )
    .unwrap();

    cli(temp_dir.path())
        .arg("generate")
        .args(["--frequency", "3", "--experience", "novice", "--catalog"])
        .arg(&catalog)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Catalog validation errors"));
}
