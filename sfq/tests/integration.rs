//! Integration tests for sfq CLI.

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn sfq_cmd(root: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sfq"));
    cmd.env("SPECTRUM_FILTER_ROOT", root);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run(root: &std::path::Path, args: &[&str]) -> Output {
    sfq_cmd(root).args(args).output().expect("failed to run sfq")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_parse_simple() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["parse", "--compact", "model_name ~ 'FW'"]);

    assert!(output.status.success(), "sfq parse failed: {:?}", output);
    assert_eq!(stdout(&output).trim(), r#"{"has-substring-ignore-case":["0x1006e","FW"]}"#);
}

#[test]
fn test_parse_nested_groups() {
    let tmp = TempDir::new().unwrap();
    let output = run(
        tmp.path(),
        &["p", "and(model_name ~ 'FW', or(device_type = 23000e, condition != \"DOWN\"))"],
    );
    assert!(output.status.success(), "sfq parse failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["and"][0]["has-substring-ignore-case"][0], "0x1006e");
    assert_eq!(json["and"][1]["or"][0]["equals-ignore-case"][1], "23000e");
    assert_eq!(json["and"][1]["or"][1]["does-not-equal"][1], "DOWN");
}

#[test]
fn test_parse_from_stdin() {
    let tmp = TempDir::new().unwrap();
    let mut child = sfq_cmd(tmp.path())
        .args(["parse", "-c"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn");

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(b"or(\n  condition = 0,\n  condition = 1\n)\n").unwrap();
    }

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "sfq parse failed: {:?}", output);
    assert_eq!(
        stdout(&output).trim(),
        r#"{"or":[{"equals-ignore-case":["0x1000a","0"]},{"equals-ignore-case":["0x1000a","1"]}]}"#
    );
}

#[test]
fn test_parse_grammar_error() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["parse", "model_name ?? value"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Error: Unable to parse filter expression"), "{err}");
    assert!(err.contains("model_name ?? value"), "{err}");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_parse_unknown_attribute() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["parse", "not_a_real_attr = 'x'"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("'not_a_real_attr' is not a recognised Spectrum attribute"));
}

#[test]
fn test_search_defaults() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["search", "condition = 0"]);
    assert!(output.status.success(), "sfq search failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["requested_attrs"], serde_json::json!(["0x129fa", "0x1006e", "0x10000"]));
    assert_eq!(json["throttle_size"], 9999);
    assert_eq!(json["devices_only"], false);
    assert_eq!(json["filter"]["equals-ignore-case"][0], "0x1000a");
}

#[test]
fn test_search_overrides() {
    let tmp = TempDir::new().unwrap();
    let output = run(
        tmp.path(),
        &["s", "-a", "serial_number", "-a", "0x10052", "--devices-only", "-t", "25", "condition = 0"],
    );
    assert!(output.status.success(), "sfq search failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        json["requested_attrs"],
        serde_json::json!(["0x129fa", "0x1006e", "0x10000", "0x10030", "0x10052"])
    );
    assert_eq!(json["throttle_size"], 25);
    assert_eq!(json["devices_only"], true);
}

#[test]
fn test_search_rejects_zero_throttle() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["search", "-t", "0", "condition = 0"]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("--throttle"), "{}", stderr(&output));
}

#[test]
fn test_parse_deep_nesting_fails_cleanly() {
    let tmp = TempDir::new().unwrap();
    let expr = format!("{}0x1 = a{}", "and(".repeat(3000), ")".repeat(3000));
    let output = run(tmp.path(), &["parse", "-c", &expr]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("nesting too deep"));
}

#[test]
fn test_search_uses_config() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("config.toml"),
        "throttle_size = 50\ndefault_attrs = [\"model_name\"]\ndevices_only = true\n",
    )
    .unwrap();

    let output = run(tmp.path(), &["search", "-c", "condition = 0"]);
    assert!(output.status.success(), "sfq search failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["requested_attrs"], serde_json::json!(["0x1006e"]));
    assert_eq!(json["throttle_size"], 50);
    assert_eq!(json["devices_only"], true);
}

#[test]
fn test_search_invalid_config() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("config.toml"), "default_attrs = [\"bogus\"]\n").unwrap();

    let output = run(tmp.path(), &["search", "condition = 0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration error"));
}

#[test]
fn test_init_writes_config() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("cfg");

    let output = run(&root, &["init"]);
    assert!(output.status.success(), "sfq init failed: {:?}", output);
    assert!(root.join("config.toml").exists());
    assert!(stdout(&output).contains("Config written to"));

    let again = run(&root, &["init"]);
    assert!(again.status.success());
    assert!(stdout(&again).contains("already exists"));

    let forced = run(&root, &["init", "--force"]);
    assert!(forced.status.success());
    assert!(stdout(&forced).contains("Config written to"));
}

#[test]
fn test_resolve() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["resolve", "MODEL_NAME", "0x1000a", "0x99"]);
    assert!(output.status.success(), "sfq resolve failed: {:?}", output);

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("0x1006e") && lines[0].ends_with("model_name"), "{out}");
    assert!(lines[1].ends_with("condition"), "{out}");
    assert!(lines[2].ends_with("0x99"), "{out}");
}

#[test]
fn test_resolve_unknown() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["resolve", "model_name", "bogus"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("'bogus'"));
}

#[test]
fn test_attrs_listing() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["attrs"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).lines().count(), 20);

    let filtered = run(tmp.path(), &["attrs", "NCM"]);
    assert!(filtered.status.success());
    let out = stdout(&filtered);
    assert_eq!(out.lines().count(), 3, "{out}");
    assert!(out.contains("ncm_selected_comm_mode"));

    let none = run(tmp.path(), &["attrs", "zzz"]);
    assert!(stdout(&none).contains("No matching attributes."));
}

#[test]
fn test_operators_listing() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["operators"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert_eq!(out.lines().count(), 11);
    assert!(out.contains("=~  has-pcre-ignore-case"));
    assert!(out.contains("!~  does-not-have-substring-ignore-case"));
}

#[test]
fn test_quick_help() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["?"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("SFQ QUICK REFERENCE"));
}
