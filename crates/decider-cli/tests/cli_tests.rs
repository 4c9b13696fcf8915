//! Integration tests for the `decider` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the encode,
//! decode, match and explain subcommands through the actual binary, including
//! stdin/stdout piping, file I/O, exit codes and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the sample.json fixture.
fn sample_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json")
}

/// Helper: path to the changed.txt fixture (one path per line).
fn changed_paths_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/changed.txt")
}

fn sample_json() -> String {
    std::fs::read_to_string(sample_json_path()).expect("sample.json fixture must exist")
}

/// Helper: a per-test scratch file path.
fn scratch(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("decider-cli-{}-{name}", std::process::id()))
}

fn decider() -> Command {
    Command::cargo_bin("decider").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Encode subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn encode_stdin_to_stdout_compact() {
    decider()
        .args(["encode", "--compact"])
        .write_stdin(r#"{"zebra":"z","alpha":"a","beta":"b"}"#)
        .assert()
        .success()
        .stdout("{alpha:a beta:b zebra:z}\n");
}

#[test]
fn encode_indented_by_default() {
    decider()
        .arg("encode")
        .write_stdin(r#"{"name":"x","tags":["a","b"]}"#)
        .assert()
        .success()
        .stdout("{\n  name:x\n  tags:[\n    a\n    b\n  ]\n}\n");
}

#[test]
fn encode_file_to_stdout() {
    decider()
        .args(["encode", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("id:ADR-0007"))
        .stdout(predicate::str::contains(r#""internal/toon/**""#))
        .stdout(predicate::str::contains("supersedes:null"));
}

#[test]
fn encode_file_to_file() {
    let output_path = scratch("encode.toon");
    let _ = std::fs::remove_file(&output_path);

    decider()
        .args(["encode", "--compact", "-i", sample_json_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout("");

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert!(content.starts_with("{date:\"2024-03-18\" draft:false id:ADR-0007"));
    assert!(content.ends_with("}\n"));

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn encode_invalid_json_fails() {
    decider()
        .arg("encode")
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON input"));
}

#[test]
fn encode_missing_input_file_fails() {
    decider()
        .args(["encode", "-i", "/nonexistent/decider/input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Decode subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn decode_stdin_to_stdout() {
    decider()
        .args(["decode", "--compact"])
        .write_stdin("{name:Alice age:30 tags:[a \"b c\"] ok:true gone:null}")
        .assert()
        .success()
        .stdout(
            r#"{"age":30,"gone":null,"name":"Alice","ok":true,"tags":["a","b c"]}"#.to_string()
                + "\n",
        );
}

#[test]
fn decode_pretty_by_default() {
    decider()
        .arg("decode")
        .write_stdin("{a:[1 2.5]}")
        .assert()
        .success()
        .stdout("{\n  \"a\": [\n    1,\n    2.5\n  ]\n}\n");
}

#[test]
fn decode_invalid_toon_fails() {
    decider()
        .arg("decode")
        .write_stdin("{a 1}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode TOON"))
        .stderr(predicate::str::contains("expected ':' after map key at byte 3"));
}

#[test]
fn decode_file_to_file() {
    let toon_path = scratch("decode-input.toon");
    let json_path = scratch("decode-output.json");
    let _ = std::fs::remove_file(&toon_path);
    let _ = std::fs::remove_file(&json_path);

    decider()
        .args(["encode", "-i", sample_json_path(), "-o"])
        .arg(&toon_path)
        .assert()
        .success();

    decider()
        .args(["decode", "-i"])
        .arg(&toon_path)
        .arg("-o")
        .arg(&json_path)
        .assert()
        .success();

    let decoded: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    let original: serde_json::Value = serde_json::from_str(&sample_json()).unwrap();
    assert_eq!(decoded, original);

    let _ = std::fs::remove_file(&toon_path);
    let _ = std::fs::remove_file(&json_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// Roundtrip
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn roundtrip_encode_decode_pipeline() {
    let encoded = decider()
        .args(["encode", "-i", sample_json_path()])
        .output()
        .expect("encode should run");
    assert!(encoded.status.success());

    let decoded = decider()
        .args(["decode", "--compact"])
        .write_stdin(encoded.stdout)
        .output()
        .expect("decode should run");
    assert!(decoded.status.success());

    let original: serde_json::Value = serde_json::from_str(&sample_json()).unwrap();
    let expected = serde_json::to_string(&original).unwrap() + "\n";
    assert_eq!(String::from_utf8(decoded.stdout).unwrap(), expected);
}

#[test]
fn roundtrip_keeps_float_with_integral_value() {
    let encoded = decider()
        .args(["encode", "--compact"])
        .write_stdin(r#"{"ratio":1.0,"count":1}"#)
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&encoded.stdout), "{count:1 ratio:1.0}\n");

    decider()
        .args(["decode", "--compact"])
        .write_stdin(encoded.stdout)
        .assert()
        .success()
        .stdout("{\"count\":1,\"ratio\":1.0}\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Match subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn match_paths_from_args() {
    decider()
        .args(["match", "-p", "src/**/*.go", "-p", "*.md"])
        .args(["src/main.go", "src/pkg/util.go", "README.md", "docs/guide.md", "main.js"])
        .assert()
        .success()
        .stdout("src/main.go\nsrc/pkg/util.go\nREADME.md\n");
}

#[test]
fn match_paths_from_stdin() {
    let changed = std::fs::read_to_string(changed_paths_path()).unwrap();
    decider()
        .args(["match", "-p", "internal/**", "--pattern", "cmd/decider/**"])
        .write_stdin(changed)
        .assert()
        .success()
        .stdout("internal/toon/toon.go\ninternal/glob/glob.go\ncmd/decider/main.go\n");
}

#[test]
fn match_nothing_exits_with_status_one() {
    decider()
        .args(["match", "-p", "*.go", "src/main.go"])
        .assert()
        .code(1)
        .stdout("");
}

#[test]
fn match_warns_about_malformed_pattern() {
    decider()
        .args(["match", "-p", "src/[abc", "-p", "*.md", "README.md"])
        .assert()
        .success()
        .stdout("README.md\n")
        .stderr(predicate::str::contains("warning: pattern 'src/[abc' matches nothing"));
}

#[test]
fn match_over_ceiling_pattern_matches_nothing() {
    let pattern = vec!["**"; 11].join("/");
    decider()
        .args(["match", "-p", &pattern, "a/b/c"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("11 '**' sequences"));
}

#[test]
fn match_requires_a_pattern() {
    decider()
        .args(["match", "src/main.go"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--pattern"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Explain subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn explain_as_toon() {
    decider()
        .args(["explain", "-p", "src/**", "-p", "**/*.go", "-p", "internal/**"])
        .args(["src/main.go", "internal/adr.go", "other/file.md"])
        .assert()
        .success()
        .stdout(concat!(
            "{\n",
            "  \"internal/adr.go\":[\n",
            "    \"**/*.go\"\n",
            "    \"internal/**\"\n",
            "  ]\n",
            "  \"src/main.go\":[\n",
            "    \"src/**\"\n",
            "    \"**/*.go\"\n",
            "  ]\n",
            "}\n",
        ));
}

#[test]
fn explain_as_json() {
    let output = decider()
        .args(["explain", "--format", "json", "-p", "src/**", "-p", "**/*.go"])
        .args(["src/main.go", "lib.go", "README.md"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report,
        serde_json::json!({
            "lib.go": ["**/*.go"],
            "src/main.go": ["src/**", "**/*.go"],
        })
    );
}

#[test]
fn explain_no_matches_is_empty_map() {
    decider()
        .args(["explain", "-p", "*.rs", "main.go"])
        .assert()
        .success()
        .stdout("{}\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// CLI surface
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    decider()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("encode"))
        .stdout(predicate::str::contains("decode"))
        .stdout(predicate::str::contains("match"))
        .stdout(predicate::str::contains("explain"));
}

#[test]
fn unknown_subcommand_fails() {
    decider()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
