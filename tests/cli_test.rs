mod common;

use common::{run, to_bytes};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn envision_asm(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_envision_asm"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("ENVISION_ASM_OUTPUT__OUTPUT_DIR")
        .env_remove("ENVISION_ASM_OUTPUT__PRETTY")
        .output()
        .unwrap()
}

#[test]
fn test_convert_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("run.json"),
        to_bytes(&run("Absorbance @ 450", &[("A", 1, 0.452)])),
    )
    .unwrap();

    let output = envision_asm(&["convert", "run.json", "-o", "out/run.asm.json"], dir.path());
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written = fs::read_to_string(dir.path().join("out/run.asm.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    let aggregate = &json["plate reader aggregate document"];
    assert_eq!(aggregate["data system document"]["file name"], "run.json");
    assert_eq!(
        aggregate["plate reader document"].as_array().map(Vec::len),
        Some(1)
    );
}

#[test]
fn test_convert_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("run.json"),
        to_bytes(&run("LUM", &[("A", 1, 10.0), ("B", 1, 20.0)])),
    )
    .unwrap();

    let output = envision_asm(&["convert", "run.json", "--pretty"], dir.path());
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let wells = &json["plate reader aggregate document"]["plate reader document"];
    assert_eq!(wells.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_configured_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("config")).unwrap();
    fs::write(
        dir.path().join("config/envision_asm.toml"),
        "[output]\noutput_dir = \"converted\"\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("plate_run.json"),
        to_bytes(&run("LUM", &[("A", 1, 10.0)])),
    )
    .unwrap();

    let output = envision_asm(&["convert", "plate_run.json"], dir.path());
    assert!(output.status.success());
    assert!(dir.path().join("converted/plate_run.json").exists());
}

#[test]
fn test_conversion_error_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let mut input = run("Absorbance", &[("A", 1, 0.1)]);
    input["number_of_wells"] = serde_json::Value::Null;
    fs::write(dir.path().join("run.json"), to_bytes(&input)).unwrap();

    let output = envision_asm(&["convert", "run.json"], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Unable to get number of the wells in the plate"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = envision_asm(&["--config", "nope.toml", "config"], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Config file not found"));
}

#[test]
fn test_config_prints_effective_settings() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("custom.toml"),
        "[time]\ndefault_utc_offset = \"-05:00\"\n",
    )
    .unwrap();

    let output = envision_asm(&["--config", "custom.toml", "config"], dir.path());
    assert!(output.status.success());

    let rendered = String::from_utf8_lossy(&output.stdout);
    assert!(rendered.contains("default_utc_offset = \"-05:00\""));
    assert!(rendered.contains("log_level = \"info\""));
}
