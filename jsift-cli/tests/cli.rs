use predicates::prelude::*;
use serde_json::{json, Value};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const ENV_VARS: [&str; 7] = [
    "JSIFT_SOURCE_FILE",
    "JSIFT_TARGET_PATH",
    "JSIFT_TARGET_FILE",
    "JSIFT_MODE",
    "JSIFT_JSON_PATH",
    "JSIFT_JSON_FIELDS",
    "JSIFT_BATCH",
];

struct SampleSource {
    dir: TempDir,
    source: PathBuf,
    out_dir: PathBuf,
}

fn build_sample_source() -> Result<SampleSource, Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("input.json");
    let out_dir = dir.path().join("out");

    let document = json!({
        "data": {
            "users": [
                {"id": "1", "name": "A"},
                {"id": "1", "name": "a"},
                {"id": "2", "name": "B"}
            ]
        }
    });
    fs::write(&source, serde_json::to_string_pretty(&document)?)?;

    Ok(SampleSource {
        dir,
        source,
        out_dir,
    })
}

// Scrub ambient JSIFT_* variables so tests only see what they set.
fn jsift_cmd() -> Result<assert_cmd::Command, Box<dyn Error>> {
    let mut cmd = assert_cmd::Command::cargo_bin("jsift")?;
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    Ok(cmd)
}

fn read_output(sample: &SampleSource, name: &str) -> Result<Value, Box<dyn Error>> {
    let data = fs::read_to_string(sample.out_dir.join(name))?;
    Ok(serde_json::from_str(&data)?)
}

#[test]
fn run_unique_writes_filtered_output() -> Result<(), Box<dyn Error>> {
    let sample = build_sample_source()?;
    jsift_cmd()?
        .args([
            "run",
            "--source-file",
            sample.source.to_str().unwrap(),
            "--target-path",
            sample.out_dir.to_str().unwrap(),
            "--mode",
            "unique",
            "--json-path",
            "$.data.users[*]",
            "--json-fields",
            "id,name",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("changed=true"))
        .stderr(predicate::str::contains("Processing source JSON file:"))
        .stderr(predicate::str::contains("Stored JSON data to target file:"));

    let output = read_output(&sample, "input.json")?;
    assert_eq!(
        output["data"]["users"],
        json!([{"id": "1", "name": "A"}, {"id": "2", "name": "B"}])
    );
    Ok(())
}

#[test]
fn run_distinct_keeps_only_repeats() -> Result<(), Box<dyn Error>> {
    let sample = build_sample_source()?;
    jsift_cmd()?
        .args([
            "run",
            "--source-file",
            sample.source.to_str().unwrap(),
            "--target-path",
            sample.out_dir.to_str().unwrap(),
            "--mode",
            "distinct",
            "--json-path",
            "$.data.users[*]",
            "--json-fields",
            "id,name",
        ])
        .assert()
        .success();

    let output = read_output(&sample, "input.json")?;
    assert_eq!(output["data"]["users"], json!([{"id": "1", "name": "a"}]));
    Ok(())
}

#[test]
fn options_fall_back_to_environment_variables() -> Result<(), Box<dyn Error>> {
    let sample = build_sample_source()?;
    jsift_cmd()?
        .arg("run")
        .env("JSIFT_SOURCE_FILE", sample.source.to_str().unwrap())
        .env("JSIFT_TARGET_PATH", sample.out_dir.to_str().unwrap())
        .env("JSIFT_TARGET_FILE", "from-env.json")
        .env("JSIFT_MODE", "unique")
        .env("JSIFT_JSON_PATH", "$.data.users[*]")
        .env("JSIFT_JSON_FIELDS", "id,name")
        .assert()
        .success()
        .stdout(predicate::str::contains("changed=true"));

    assert!(sample.out_dir.join("from-env.json").exists());
    Ok(())
}

#[test]
fn missing_required_option_fails_with_config_error() -> Result<(), Box<dyn Error>> {
    jsift_cmd()?
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot process JSON data"))
        .stderr(predicate::str::contains("Missing required option 'sourceFile'"));
    Ok(())
}

#[test]
fn unknown_mode_fails_with_config_error() -> Result<(), Box<dyn Error>> {
    let sample = build_sample_source()?;
    jsift_cmd()?
        .args([
            "run",
            "--source-file",
            sample.source.to_str().unwrap(),
            "--target-path",
            sample.out_dir.to_str().unwrap(),
            "--mode",
            "dedupe",
            "--json-path",
            "$.data.users[*]",
            "--json-fields",
            "id",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown filter mode: 'dedupe'"));
    assert!(!sample.out_dir.exists());
    Ok(())
}

#[test]
fn non_array_target_reports_type_mismatch() -> Result<(), Box<dyn Error>> {
    let sample = build_sample_source()?;
    jsift_cmd()?
        .args([
            "run",
            "--source-file",
            sample.source.to_str().unwrap(),
            "--target-path",
            sample.out_dir.to_str().unwrap(),
            "--mode",
            "unique",
            "--json-path",
            "$.data",
            "--json-fields",
            "id",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Invalid data type: object for property: $.data, should be an array",
        ));
    assert!(!sample.out_dir.exists());
    Ok(())
}

#[test]
fn batch_runs_every_descriptor_entry() -> Result<(), Box<dyn Error>> {
    let sample = build_sample_source()?;
    let descriptor = sample.dir.path().join("jobs.json");
    let jobs = json!([
        {"mode": "unique", "targetFile": "unique.json"},
        {"mode": "distinct", "targetFile": "distinct.json"}
    ]);
    fs::write(&descriptor, serde_json::to_string(&jobs)?)?;

    jsift_cmd()?
        .args([
            "batch",
            descriptor.to_str().unwrap(),
            "--source-file",
            sample.source.to_str().unwrap(),
            "--target-path",
            sample.out_dir.to_str().unwrap(),
            "--json-path",
            "$.data.users[*]",
            "--json-fields",
            "id,name",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("changed=true"));

    let unique = read_output(&sample, "unique.json")?;
    assert_eq!(unique["data"]["users"].as_array().unwrap().len(), 2);
    let distinct = read_output(&sample, "distinct.json")?;
    assert_eq!(distinct["data"]["users"].as_array().unwrap().len(), 1);
    Ok(())
}

#[test]
fn batch_without_descriptor_runs_one_fallback_job() -> Result<(), Box<dyn Error>> {
    let sample = build_sample_source()?;
    jsift_cmd()?
        .args([
            "batch",
            "--source-file",
            sample.source.to_str().unwrap(),
            "--target-path",
            sample.out_dir.to_str().unwrap(),
            "--mode",
            "unique",
            "--json-path",
            "$.data.users[*]",
            "--json-fields",
            "id,name",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("changed=true"));

    assert!(sample.out_dir.join("input.json").exists());
    Ok(())
}

#[test]
fn batch_aborts_on_failing_entry_and_keeps_earlier_output() -> Result<(), Box<dyn Error>> {
    let sample = build_sample_source()?;
    let descriptor = sample.dir.path().join("jobs.json");
    let missing = sample.dir.path().join("absent.json");
    let jobs = json!([
        {"targetFile": "first.json"},
        {"sourceFile": missing.to_str().unwrap()}
    ]);
    fs::write(&descriptor, serde_json::to_string(&jobs)?)?;

    jsift_cmd()?
        .args([
            "batch",
            descriptor.to_str().unwrap(),
            "--source-file",
            sample.source.to_str().unwrap(),
            "--target-path",
            sample.out_dir.to_str().unwrap(),
            "--mode",
            "unique",
            "--json-path",
            "$.data.users[*]",
            "--json-fields",
            "id,name",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot process JSON data"));

    // The first entry persisted before the second failed
    assert!(sample.out_dir.join("first.json").exists());
    Ok(())
}

#[test]
fn help_lists_both_subcommands() -> Result<(), Box<dyn Error>> {
    jsift_cmd()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("batch"));
    Ok(())
}
